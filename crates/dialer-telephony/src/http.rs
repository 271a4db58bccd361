//! HTTP backend abstraction for the call API.
//!
//! The client talks to the service through [`CallBackend`] so tests can
//! swap in a fake. The production backend uses reqwest and makes exactly
//! one attempt per call.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::config::TelephonyConfig;
use crate::error::{CallError, CallResult};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Posts a form to the call API and returns the raw response body.
#[async_trait]
pub trait CallBackend: Send + Sync {
    /// Non-2xx statuses are returned as [`CallError::ApiRequestFailed`].
    async fn post_form(&self, url: &Url, params: &[(&'static str, String)]) -> CallResult<String>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

pub struct ReqwestBackend {
    client: reqwest::Client,
    sid: String,
    auth_token: String,
}

impl ReqwestBackend {
    pub fn new(config: &TelephonyConfig) -> CallResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            sid: config.sid.clone(),
            auth_token: config.auth_token.clone(),
        })
    }
}

#[async_trait]
impl CallBackend for ReqwestBackend {
    async fn post_form(&self, url: &Url, params: &[(&'static str, String)]) -> CallResult<String> {
        debug!(%url, "POST call request");
        let response = self
            .client
            .post(url.as_str())
            .basic_auth(&self.sid, Some(&self.auth_token))
            .form(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CallError::ApiRequestFailed {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// What the fake answers with, in order of calls.
    #[derive(Clone)]
    pub enum CannedReply {
        Body(String),
        Status(u16, String),
    }

    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub url: String,
        pub params: Vec<(String, String)>,
    }

    impl RecordedRequest {
        pub fn param(&self, key: &str) -> Option<&str> {
            self.params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        }
    }

    /// A fake HTTP backend that returns canned replies and records requests.
    #[derive(Default)]
    pub struct FakeBackend {
        replies: Mutex<VecDeque<CannedReply>>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_reply(self, reply: CannedReply) -> Self {
            self.replies.lock().unwrap().push_back(reply);
            self
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CallBackend for FakeBackend {
        async fn post_form(
            &self,
            url: &Url,
            params: &[(&'static str, String)],
        ) -> CallResult<String> {
            self.requests.lock().unwrap().push(RecordedRequest {
                url: url.to_string(),
                params: params
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), v.clone()))
                    .collect(),
            });

            match self.replies.lock().unwrap().pop_front() {
                Some(CannedReply::Body(body)) => Ok(body),
                Some(CannedReply::Status(status, body)) => {
                    Err(CallError::ApiRequestFailed { status, body })
                }
                None => Err(CallError::ApiRequestFailed {
                    status: 404,
                    body: String::new(),
                }),
            }
        }
    }
}
