use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme, host and port of the panel, e.g. `http://127.0.0.1:5000`.
    pub origin: String,
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_login_route")]
    pub login_route: String,
    #[serde(default = "default_logout_route")]
    pub logout_route: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
    #[serde(default)]
    pub policy: DisplayPolicy,
}

/// How many banners may be visible at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayPolicy {
    Unbounded,
    Bounded { max: usize },
    LatestWins,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl ApiConfig {
    pub fn new(origin: impl Into<String>) -> Self {
        let origin: String = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            base_path: default_base_path(),
            login_route: default_login_route(),
            logout_route: default_logout_route(),
            timeout_secs: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl NotificationConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
            policy: DisplayPolicy::default(),
        }
    }
}

impl Default for DisplayPolicy {
    fn default() -> Self {
        Self::Bounded { max: 5 }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_base_path() -> String {
    "/api".to_string()
}

fn default_login_route() -> String {
    "/login".to_string()
}

fn default_logout_route() -> String {
    "/logout".to_string()
}

fn default_ttl_ms() -> u64 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}
