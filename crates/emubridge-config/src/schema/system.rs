//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log levels accepted in `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for the `emubridge` targets; `--log-level` wins.
    pub level: String,
    /// Level for messages the engine logs (target `engine`).
    pub engine_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            engine_level: "debug".into(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive for `tracing_subscriber::EnvFilter`.
    pub fn directive(&self) -> String {
        format!("emubridge={},engine={}", self.level, self.engine_level)
    }
}
