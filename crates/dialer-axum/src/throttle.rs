//! Per-credential request throttle.
//!
//! Fixed window counter keyed by username: each credential may make
//! `limit` requests per `window`, after which requests are refused until
//! the window rolls over.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Requests allowed per window when nothing else is configured.
pub const DEFAULT_THROTTLE_LIMIT: u32 = 1000;
/// Window length when nothing else is configured.
pub const DEFAULT_THROTTLE_WINDOW: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleConfig {
    pub limit: u32,
    pub window: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_THROTTLE_LIMIT,
            window: DEFAULT_THROTTLE_WINDOW,
        }
    }
}

impl ThrottleConfig {
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub const fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }
}

struct Window {
    started: Instant,
    count: u32,
}

pub struct Throttle {
    config: ThrottleConfig,
    windows: Mutex<HashMap<String, Window>>,
}

impl Throttle {
    pub fn new(config: ThrottleConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub const fn config(&self) -> ThrottleConfig {
        self.config
    }

    /// Count one request for `key`. Returns `false` once the key is over
    /// its limit for the current window.
    pub async fn hit(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let window = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(window.started) >= self.config.window {
            window.started = now;
            window.count = 0;
        }
        if window.count >= self.config.limit {
            return false;
        }
        window.count += 1;
        true
    }
}
