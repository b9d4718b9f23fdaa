//! Configuration system for wordsieve.
//!
//! Defaults reproduce a plain run (read `he_full.txt`, write
//! `bonus_words.json`, tag with the default model). Configuration files and
//! environment variables can override any value.

mod builder;
mod loader;
mod models;
mod validation;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;
pub use validation::validate_config;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "wordsieve.toml",
    "wordsieve.yaml",
    "wordsieve.yml",
    "wordsieve.json",
    ".wordsieve/config.toml",
    ".wordsieve/config.yaml",
    ".wordsieve/config.yml",
    ".wordsieve/config.json",
];

/// Environment variable prefix for wordsieve configuration
pub const ENV_PREFIX: &str = "WORDSIEVE_";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
