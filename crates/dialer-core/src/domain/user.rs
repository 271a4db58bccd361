//! User accounts and their dialer limits.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An account in the local identity store.
///
/// The password hash is deliberately absent; it is only ever returned by
/// the credential lookup used during authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub last_login: Option<NaiveDateTime>,
    pub is_superuser: bool,
    pub date_joined: NaiveDateTime,
}

/// A user to be inserted. The password must already be hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_superuser: bool,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            first_name: String::new(),
            last_name: String::new(),
            is_superuser: false,
            password_hash: password_hash.into(),
        }
    }

    #[must_use]
    pub const fn superuser(mut self, is_superuser: bool) -> Self {
        self.is_superuser = is_superuser;
        self
    }

    #[must_use]
    pub fn with_names(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }
}

/// Exact-match filters for the user list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub username: Option<String>,
}

/// Per-user ceilings on campaign count and pacing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialerSettings {
    pub max_number_campaign: u32,
    pub max_frequency: u32,
    pub callmaxduration: u32,
    pub maxretry: u32,
    pub max_calltimeout: u32,
}

impl Default for DialerSettings {
    fn default() -> Self {
        Self {
            max_number_campaign: 10,
            max_frequency: 100,
            callmaxduration: 1800,
            maxretry: 3,
            max_calltimeout: 45,
        }
    }
}

/// The individual limits carried by [`DialerSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialerLimit {
    CampaignCount,
    Frequency,
    Duration,
    Retry,
    Timeout,
}

impl DialerLimit {
    /// Error key reported when this limit is breached.
    pub const fn error_key(self) -> &'static str {
        match self {
            Self::CampaignCount => "chk_campaign",
            Self::Frequency => "chk_frequency",
            Self::Duration => "chk_duration",
            Self::Retry => "chk_maxretry",
            Self::Timeout => "chk_timeout",
        }
    }

    /// Human readable violation message for the given ceiling.
    pub fn message(self, limit: u32) -> String {
        match self {
            Self::CampaignCount => format!("You have too many campaigns. Max allowed {limit}"),
            Self::Frequency => format!("Maximum Frequency limit of {limit} exceeded."),
            Self::Duration => format!("Maximum Duration limit of {limit} exceeded."),
            Self::Retry => format!("Maximum Retries limit of {limit} exceeded."),
            Self::Timeout => format!("Maximum Timeout limit of {limit} exceeded."),
        }
    }
}

impl DialerSettings {
    pub const fn limit(&self, which: DialerLimit) -> u32 {
        match which {
            DialerLimit::CampaignCount => self.max_number_campaign,
            DialerLimit::Frequency => self.max_frequency,
            DialerLimit::Duration => self.callmaxduration,
            DialerLimit::Retry => self.maxretry,
            DialerLimit::Timeout => self.max_calltimeout,
        }
    }

    /// Whether `value` is strictly above the ceiling for `which`.
    pub const fn exceeds(&self, which: DialerLimit, value: u32) -> bool {
        value > self.limit(which)
    }

    /// Whether a user who already owns `owned` campaigns may create another.
    pub const fn allows_another_campaign(&self, owned: u64) -> bool {
        owned < self.max_number_campaign as u64
    }
}
