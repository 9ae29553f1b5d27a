//! Output configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where engine output ends up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that receives one PNG per window when the engine exits.
    pub frames_dir: Option<PathBuf>,
    /// Echo decoded engine stdout to the process stdout.
    pub echo_stdout: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            frames_dir: None,
            echo_stdout: true,
        }
    }
}
