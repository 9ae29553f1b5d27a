//! Engine configuration types.

use serde::{Deserialize, Serialize};

/// Built-in scripted engine program run by the `emubridge` binary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum DemoProgram {
    /// Prints a greeting and exits.
    #[default]
    Hello,
    /// Opens a window and presents gradient frames.
    Gradient,
}

/// Engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub program: DemoProgram,
    /// Frames presented by programs that draw (valid range: 1-600).
    pub frames: u32,
    /// Logical window size requested by programs that draw.
    pub width: u32,
    pub height: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: DemoProgram::Hello,
            frames: 3,
            width: 320,
            height: 200,
        }
    }
}
