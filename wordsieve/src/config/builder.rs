//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use crate::tagging::AggregationStrategy;
use std::path::Path;

/// Builder for creating SieveConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: SieveConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: SieveConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: SieveConfig) -> Self {
        Self { config }
    }

    /// Set the word list to read.
    pub fn with_input<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.input = path.as_ref().to_path_buf();
        self
    }

    /// Set the file the filtered words are written to.
    pub fn with_output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.output = path.as_ref().to_path_buf();
        self
    }

    /// Set the hub identifier of the tagging model.
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.config.model.model_id = model_id.into();
        self
    }

    /// Set the hub revision of the tagging model.
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.config.model.revision = revision.into();
        self
    }

    /// Set the model cache directory.
    pub fn with_model_cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.model.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the aggregation strategy.
    pub fn with_aggregation(mut self, aggregation: AggregationStrategy) -> Self {
        self.config.model.aggregation = aggregation;
        self
    }

    /// Set the maximum token length per input.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.config.model.max_length = max_length;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Set a log file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable console logging.
    pub fn with_console_logging(mut self, enabled: bool) -> Self {
        self.config.logging.stdout = enabled;
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<SieveConfig> {
        validation::validate_config(&self.config)?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
