#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use chrono::{FixedOffset, Offset, Utc};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

pub const DEFAULT_UTC_OFFSET_SECONDS: i32 = 3600 * 8;
pub const DEFAULT_TIMEZONE: &str = "Asia/Shanghai";
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 6;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KitConfig {
    pub time: TimeSettings,
    pub http: HttpSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSettings {
    /// Offset applied by every timekit helper that formats "local" time.
    pub utc_offset_seconds: i32,
    /// Informational label, e.g. "Asia/Shanghai".
    pub timezone: String,
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self {
            utc_offset_seconds: DEFAULT_UTC_OFFSET_SECONDS,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl TimeSettings {
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_seconds).unwrap_or_else(|| Utc.fix())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_seconds: u64,
    pub user_agent: Option<String>,
    pub proxy: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
            user_agent: None,
            proxy: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

static TIME_SETTINGS: Lazy<RwLock<TimeSettings>> = Lazy::new(|| RwLock::new(TimeSettings::default()));
static HTTP_SETTINGS: Lazy<RwLock<HttpSettings>> = Lazy::new(|| RwLock::new(HttpSettings::default()));

pub fn time_settings() -> TimeSettings {
    TIME_SETTINGS.read().clone()
}

pub fn set_time_settings(settings: TimeSettings) {
    *TIME_SETTINGS.write() = settings;
}

pub fn http_settings() -> HttpSettings {
    HTTP_SETTINGS.read().clone()
}

pub fn set_http_settings(settings: HttpSettings) {
    *HTTP_SETTINGS.write() = settings;
}

impl KitConfig {
    /// Install this configuration as the process-wide settings.
    pub fn apply(&self) {
        tracing::debug!(
            "Applying kit config: utc_offset={}s timezone={} http_timeout={}s",
            self.time.utc_offset_seconds,
            self.time.timezone,
            self.http.timeout_seconds
        );
        set_time_settings(self.time.clone());
        set_http_settings(self.http.clone());
    }
}
