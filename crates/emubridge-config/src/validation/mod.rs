//! Full configuration validation.
//!
//! Checks numeric ranges and enumerated strings, collecting every problem
//! into a single `ConfigError`.

mod helpers;


use crate::schema::{BridgeConfig, LOG_LEVELS};
use emubridge_common::ConfigError;

use helpers::{validate_one_of, validate_range, validate_range_f64};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &BridgeConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_display(&mut errors, config);
    validate_engine(&mut errors, config);
    validate_logging(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_display(errors: &mut Vec<String>, config: &BridgeConfig) {
    validate_range_f64(
        errors,
        "display.scale_factor",
        config.display.scale_factor,
        0.25,
        8.0,
    );
}

fn validate_engine(errors: &mut Vec<String>, config: &BridgeConfig) {
    validate_range(errors, "engine.frames", config.engine.frames, 1, 600);
    validate_range(errors, "engine.width", config.engine.width, 1, 4096);
    validate_range(errors, "engine.height", config.engine.height, 1, 4096);
}

fn validate_logging(errors: &mut Vec<String>, config: &BridgeConfig) {
    validate_one_of(errors, "logging.level", &config.logging.level, LOG_LEVELS);
    validate_one_of(
        errors,
        "logging.engine_level",
        &config.logging.engine_level,
        LOG_LEVELS,
    );
}
