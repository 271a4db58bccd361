//! Shared fixtures for dialer-axum integration tests.
//!
//! Builds the real router over an in-memory database and a recording
//! telephony fake.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use dialer_axum::{AxumContext, ThrottleConfig, create_router};
use dialer_core::{
    AppCore, CallRequest, CallResponse, DialerSettings, NewGateway, NewVoipApp, TelephonyPort,
    TelephonyResult, User, VoipAppType,
};
use dialer_db::{CoreFactory, TestDb};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const PASSWORD: &str = "secret";

/// Telephony fake that acknowledges every call and remembers it.
#[derive(Default)]
pub struct RecordingTelephony {
    pub calls: Mutex<Vec<CallRequest>>,
}

#[async_trait]
impl TelephonyPort for RecordingTelephony {
    async fn place_call(&self, request: &CallRequest) -> TelephonyResult<CallResponse> {
        self.calls.lock().unwrap().push(request.clone());
        Ok(CallResponse {
            request_uuid: "4f8ab6e6-96a3-11e0-8f2b-080027a5b0f3".to_string(),
            message: Some("Call Request Executed".to_string()),
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub core: Arc<AppCore>,
    pub telephony: Arc<RecordingTelephony>,
    /// Regular account with default dialer settings.
    pub alice: User,
    pub admin: User,
    _db: TestDb,
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_throttle(ThrottleConfig::default()).await
    }

    /// Fixture with one gateway (id 1) and one VoIP application (id 1).
    pub async fn with_throttle(throttle: ThrottleConfig) -> Self {
        let db = TestDb::new().await.unwrap();
        let telephony = Arc::new(RecordingTelephony::default());
        let core = Arc::new(
            CoreFactory::build_app_core(db.pool().clone(), telephony.clone()).with_password_cost(4),
        );

        let alice = core.users().create("alice", PASSWORD, false).await.unwrap();
        core.users()
            .set_dialer_settings(alice.id, &DialerSettings::default())
            .await
            .unwrap();
        let admin = core.users().create("admin", PASSWORD, true).await.unwrap();
        core.gateways()
            .add(&NewGateway::new("default", "user/,sofia/gateway/backup/"))
            .await
            .unwrap();
        core.voip_apps()
            .add(&NewVoipApp::new("welcome", VoipAppType::PlayAudio, "welcome.wav"))
            .await
            .unwrap();

        let router = create_router(AxumContext::new(core.clone(), throttle));
        Self {
            router,
            core,
            telephony,
            alice,
            admin,
            _db: db,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        username: Option<&str>,
        body: Option<Value>,
    ) -> Reply {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(username) = username {
            builder = builder.header(header::AUTHORIZATION, basic(username, PASSWORD));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.dispatch(builder.body(body).unwrap()).await
    }

    /// POST `raw` verbatim as an `application/json` body.
    pub async fn post_raw(&self, uri: &str, username: &str, raw: &str) -> Reply {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::AUTHORIZATION, basic(username, PASSWORD))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw.to_owned()))
            .unwrap();
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request<Body>) -> Reply {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        Reply {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, username: &str) -> Reply {
        self.request(Method::GET, uri, Some(username), None).await
    }

    pub async fn post(&self, uri: &str, username: &str, body: Value) -> Reply {
        self.request(Method::POST, uri, Some(username), Some(body))
            .await
    }

    pub async fn put(&self, uri: &str, username: &str, body: Value) -> Reply {
        self.request(Method::PUT, uri, Some(username), Some(body))
            .await
    }

    pub async fn delete(&self, uri: &str, username: &str) -> Reply {
        self.request(Method::DELETE, uri, Some(username), None)
            .await
    }
}

pub fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}
