//! Model loading and inference on top of Candle.
//!
//! This module knows how to fetch a checkpoint from the Hugging Face hub
//! and run a BERT encoder with a token classification head over it:
//! - [`ModelCache`] downloads repository files and keeps them cached locally
//! - [`BertForTokenClassification`] loads weights and produces per-token
//!   class probabilities
//!
//! Turning those probabilities into labeled spans is the job of
//! [`crate::tagging`].

pub mod cache;
pub mod error;
pub mod model;
pub mod utils;

pub use cache::ModelCache;
pub use error::{MLError, Result};
pub use model::{BertForTokenClassification, LabelMapping};
