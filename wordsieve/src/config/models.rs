//! Configuration model definitions.
//!
//! This module contains the configuration structures for all wordsieve components.

use crate::tagging::AggregationStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Word list read when no input is configured
pub const DEFAULT_INPUT_FILE: &str = "he_full.txt";

/// File the filtered words are written to when no output is configured
pub const DEFAULT_OUTPUT_FILE: &str = "bonus_words.json";

/// Morphological tagging model used when no model is configured
pub const DEFAULT_MODEL_ID: &str = "ShaltielShmidman/DictaBERT-morph";

/// Main configuration structure for wordsieve.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SieveConfig {
    /// Word list, one word per line
    pub input: PathBuf,

    /// Destination of the filtered words
    pub output: PathBuf,

    /// Tagging model configuration
    pub model: ModelConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_FILE),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            model: ModelConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Tagging model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Hub identifier of the tokenizer/model pair
    pub model_id: String,

    /// Hub revision (branch, tag or commit)
    pub revision: String,

    /// Directory to cache downloaded files (hub default when unset)
    pub cache_dir: Option<PathBuf>,

    /// How sub-token predictions are merged into spans
    pub aggregation: AggregationStrategy,

    /// Maximum number of tokens per input, special tokens included
    pub max_length: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            revision: "main".to_string(),
            cache_dir: None,
            aggregation: AggregationStrategy::Simple,
            max_length: 512,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,

    /// Log format
    pub format: LogFormat,

    /// File to log to (if any); replaces console output when set
    pub file: Option<PathBuf>,

    /// Whether to log to the console (stderr) when no file is set
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Default,
            file: None,
            stdout: true,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level
    Trace,

    /// Debug level
    Debug,

    /// Info level
    Info,

    /// Warn level
    Warn,

    /// Error level
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact single-line format with local timestamps
    Default,

    /// JSON format
    Json,

    /// Compact format
    Compact,

    /// Pretty format
    Pretty,
}
