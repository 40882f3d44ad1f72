use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Deep link that hands control back to the host mobile app.
pub const LOGIN_DEEP_LINK: &str = "blsapp://login";

/// Simulated round-trip for the password change when nothing is configured.
pub const DEFAULT_SIMULATED_LATENCY_MS: u64 = 1500;

fn default_simulated_latency_ms() -> u64 {
    DEFAULT_SIMULATED_LATENCY_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Settings for the reset flow itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowConfig {
    /// How long the placeholder submission takes before reporting success.
    #[serde(default = "default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: DEFAULT_SIMULATED_LATENCY_MS,
        }
    }
}

impl FlowConfig {
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Top-level config file structure matching `config.toml`.
///
/// Every field defaults so that a missing or partial file still yields
/// the reference behavior.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub reset: FlowConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
