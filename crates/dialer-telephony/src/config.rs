//! Public configuration for the telephony client.

use std::time::Duration;

/// Configuration for the telephony REST client.
///
/// # Example
///
/// ```
/// use dialer_telephony::TelephonyConfig;
/// use std::time::Duration;
///
/// let config = TelephonyConfig::new()
///     .with_base_url("http://10.0.0.5:8088")
///     .with_credentials("ACCOUNT_SID", "AUTH_TOKEN")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct TelephonyConfig {
    /// Root URL of the REST service, without the API version
    pub(crate) base_url: String,
    /// API version path segment
    pub(crate) api_version: String,
    /// Account SID, sent as the Basic auth user
    pub(crate) sid: String,
    /// Auth token, sent as the Basic auth password
    pub(crate) auth_token: String,
    /// Answer URL used when the request does not carry one
    pub(crate) answer_url: Option<String>,
    /// Hangup URL used when the request does not carry one
    pub(crate) hangup_url: Option<String>,
    /// Request timeout
    pub(crate) timeout: Duration,
    pub(crate) user_agent: String,
}

impl Default for TelephonyConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8088".to_string(),
            api_version: "v0.1".to_string(),
            sid: String::new(),
            auth_token: String::new(),
            answer_url: None,
            hangup_url: None,
            timeout: Duration::from_secs(30),
            user_agent: concat!("dialer-telephony/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl TelephonyConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults to `http://127.0.0.1:8088`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Defaults to `v0.1`.
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    #[must_use]
    pub fn with_credentials(
        mut self,
        sid: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        self.sid = sid.into();
        self.auth_token = auth_token.into();
        self
    }

    #[must_use]
    pub fn with_answer_url(mut self, url: Option<String>) -> Self {
        self.answer_url = url;
        self
    }

    #[must_use]
    pub fn with_hangup_url(mut self, url: Option<String>) -> Self {
        self.hangup_url = url;
        self
    }

    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// `{base_url}/{api_version}/Call/`, tolerant of stray slashes.
    pub(crate) fn call_endpoint(&self) -> String {
        format!(
            "{}/{}/Call/",
            self.base_url.trim_end_matches('/'),
            self.api_version.trim_matches('/')
        )
    }
}
