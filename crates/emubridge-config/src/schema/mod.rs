//! Config schema. Every section uses `#[serde(default)]`, so missing
//! sections and fields fall back to the values below.

mod display;
mod engine;
mod output;
mod system;

pub use display::DisplayConfig;
pub use engine::{DemoProgram, EngineConfig};
pub use output::OutputConfig;
pub use system::{LoggingConfig, LOG_LEVELS};

use serde::{Deserialize, Serialize};

/// Top-level bridge configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub display: DisplayConfig,
    pub output: OutputConfig,
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}
