//! emubridge configuration.
//!
//! TOML-based configuration with defaults for every field, so a partial
//! file (or none at all) works out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use emubridge_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    BridgeConfig, DemoProgram, DisplayConfig, EngineConfig, LoggingConfig, OutputConfig,
};

use std::path::Path;

use emubridge_common::ConfigError;

/// Load config from `path`, or from the platform default path when `None`.
///
/// An explicit path must exist. The default path is created with a
/// commented template on first use. The result is validated either way.
pub fn load_config(path: Option<&Path>) -> Result<BridgeConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            toml_loader::load_from_path(path)?
        }
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &BridgeConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let json = config_to_json(&BridgeConfig::default());
        assert!(json.contains("\"display\""));
        assert!(json.contains("\"output\""));
        assert!(json.contains("\"engine\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn load_config_missing_explicit_path() {
        let err = load_config(Some(Path::new("/tmp/no_such_emubridge_config.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_config_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\nscale_factor = 0.0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn load_config_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\nscale_factor = 2.0\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!((config.display.scale_factor - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let json = config_to_json(&BridgeConfig::default());
        let parsed: BridgeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.engine.program, DemoProgram::Hello);
        assert_eq!(parsed.logging.level, "info");
    }
}
