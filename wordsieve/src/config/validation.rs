//! Configuration validation utilities.
//!
//! This module provides validation functions for configuration values.

use super::ConfigError;
use super::models::*;

/// Smallest token budget that still fits `[CLS] token [SEP]`
const MIN_MAX_LENGTH: usize = 3;

/// Validate the entire configuration.
pub fn validate_config(config: &SieveConfig) -> Result<(), ConfigError> {
    if config.input.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Input file cannot be empty".to_string(),
        ));
    }

    if config.output.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Output file cannot be empty".to_string(),
        ));
    }

    validate_model_config(&config.model)?;

    Ok(())
}

/// Validate model configuration.
fn validate_model_config(config: &ModelConfig) -> Result<(), ConfigError> {
    if config.model_id.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Model id cannot be empty".to_string(),
        ));
    }

    if config.revision.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Model revision cannot be empty".to_string(),
        ));
    }

    if let Some(dir) = &config.cache_dir
        && dir.as_os_str().is_empty()
    {
        return Err(ConfigError::ValidationError(
            "Model cache directory cannot be empty".to_string(),
        ));
    }

    if config.max_length < MIN_MAX_LENGTH {
        return Err(ConfigError::ValidationError(format!(
            "max_length must be at least {}",
            MIN_MAX_LENGTH
        )));
    }

    Ok(())
}
