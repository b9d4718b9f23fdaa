//! Error types for ML operations

use std::fmt;
use thiserror::Error;

/// Error type for ML operations
#[derive(Debug, Error)]
pub enum MLError {
    /// Error during model loading
    #[error("Failed to load model: {0}")]
    ModelLoading(String),

    /// Error during tokenization
    #[error("Tokenization error: {0}")]
    Tokenization(String),

    /// Error during a forward pass
    #[error("Inference error: {0}")]
    Inference(String),

    /// Error related to model configuration
    #[error("Model configuration error: {0}")]
    Configuration(String),

    /// Model or one of its files is not available on the hub
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// IO error during model operations
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

impl MLError {
    /// Create a new model loading error
    pub fn model_loading(msg: impl fmt::Display) -> Self {
        Self::ModelLoading(msg.to_string())
    }

    /// Create a new tokenization error
    pub fn tokenization(msg: impl fmt::Display) -> Self {
        Self::Tokenization(msg.to_string())
    }

    /// Create a new inference error
    pub fn inference(msg: impl fmt::Display) -> Self {
        Self::Inference(msg.to_string())
    }

    /// Create a new configuration error
    pub fn configuration(msg: impl fmt::Display) -> Self {
        Self::Configuration(msg.to_string())
    }

    /// Create a new model not found error
    pub fn model_not_found(msg: impl fmt::Display) -> Self {
        Self::ModelNotFound(msg.to_string())
    }
}

impl From<candle_core::Error> for MLError {
    fn from(err: candle_core::Error) -> Self {
        MLError::inference(format!("Candle error: {}", err))
    }
}

/// Result type for ML operations
pub type Result<T> = std::result::Result<T, MLError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let error = MLError::ModelLoading("test error".to_string());
        assert_eq!(error.to_string(), "Failed to load model: test error");

        let error = MLError::Tokenization("tokenizer failed".to_string());
        assert_eq!(error.to_string(), "Tokenization error: tokenizer failed");

        let error = MLError::Inference("shape mismatch".to_string());
        assert_eq!(error.to_string(), "Inference error: shape mismatch");

        let error = MLError::ModelNotFound("org/model".to_string());
        assert_eq!(error.to_string(), "Model not found: org/model");
    }

    #[test]
    fn test_error_factory_methods() {
        assert!(matches!(MLError::model_loading("x"), MLError::ModelLoading(_)));
        assert!(matches!(MLError::tokenization("x"), MLError::Tokenization(_)));
        assert!(matches!(MLError::inference("x"), MLError::Inference(_)));
        assert!(matches!(MLError::configuration("x"), MLError::Configuration(_)));
        assert!(matches!(MLError::model_not_found("x"), MLError::ModelNotFound(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let ml_error = MLError::from(io_error);
        assert!(matches!(ml_error, MLError::IO(_)));
    }
}
