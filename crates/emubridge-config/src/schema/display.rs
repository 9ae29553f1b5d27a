//! Display configuration types.

use serde::{Deserialize, Serialize};

/// Presentation environment settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Device pixel ratio applied when the engine resizes a window
    /// (valid range: 0.25-8.0).
    pub scale_factor: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { scale_factor: 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_config_defaults() {
        let config = DisplayConfig::default();
        assert!((config.scale_factor - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn display_config_from_toml() {
        let config: DisplayConfig = toml::from_str("scale_factor = 2.0").unwrap();
        assert!((config.scale_factor - 2.0).abs() < f64::EPSILON);
    }
}
