//! # wordsieve
//!
//! Filters a word list by part of speech. Every word is tagged by a
//! pretrained token classification model; words the model sees as a single
//! noun (`NN`), verb (`VB`) or adjective (`JJ`) are kept and written out as
//! JSON.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wordsieve::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ConfigBuilder::new()
//!         .with_input("he_full.txt")
//!         .with_output("bonus_words.json")
//!         .build()?;
//!
//!     let tagger = TokenClassificationPipeline::from_pretrained(&config.model).await?;
//!     let outcome = sieve_file(&config, &tagger, |_, _| {}).await?;
//!
//!     println!("{}", outcome.summary());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **ml**: hub downloads and the Candle BERT token classifier
//! - **tagging**: the [`tagging::Tagger`] seam and span aggregation
//! - **filter**: the single-span allow-set predicate
//! - **wordlist** / **output**: reading the input list and writing the result
//! - **config** / **logging**: layered configuration and tracing setup

pub mod config;
pub mod filter;
pub mod logging;
pub mod ml;
pub mod output;
pub mod tagging;
pub mod wordlist;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::config::{
        ConfigBuilder, ConfigLoader, LogFormat, LogLevel, LoggingConfig, ModelConfig, SieveConfig,
    };
    pub use crate::filter::{ALLOWED_TAGS, FilterOutcome, Verdict, WordFilter};
    pub use crate::output::{BonusWords, write_words};
    pub use crate::tagging::{
        AggregationStrategy, TaggedSpan, Tagger, TokenClassificationPipeline,
    };
    pub use crate::wordlist::{parse_words, read_words};
    pub use crate::{Result, SieveError, sieve_file};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for wordsieve operations
#[derive(Debug, thiserror::Error)]
pub enum SieveError {
    /// The word list could not be read
    #[error("Input error: {0}")]
    Input(String),

    /// The result file could not be written
    #[error("Output error: {0}")]
    Output(String),

    /// Error during ML operations
    #[error("ML error: {0}")]
    ML(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// A tagger failed on a word
    #[error("Tagging error: {0}")]
    Tagging(String),

    /// JSON serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<crate::config::ConfigError> for SieveError {
    fn from(err: crate::config::ConfigError) -> Self {
        SieveError::Configuration(err.to_string())
    }
}

impl From<crate::ml::error::MLError> for SieveError {
    fn from(err: crate::ml::error::MLError) -> Self {
        SieveError::ML(err.to_string())
    }
}

/// Result type for wordsieve operations
pub type Result<T> = std::result::Result<T, SieveError>;

/// Read the configured word list, filter it with `tagger` and write the
/// survivors to the configured output file.
///
/// `on_progress` is called after each word with the number of words processed
/// so far and the length of the list.
///
/// # Arguments
/// * `config` - Supplies the input and output paths
/// * `tagger` - The tagger every word is run through
/// * `on_progress` - Progress callback
///
/// # Returns
/// The filter outcome; the output file has been written when this returns `Ok`
pub async fn sieve_file<T, F>(
    config: &config::SieveConfig,
    tagger: &T,
    mut on_progress: F,
) -> Result<filter::FilterOutcome>
where
    T: tagging::Tagger + ?Sized,
    F: FnMut(usize, usize),
{
    let words = wordlist::read_words(&config.input)?;
    tracing::info!(
        count = words.len(),
        "Read word list from {}",
        config.input.display()
    );

    let total = words.len();
    let outcome = filter::WordFilter::new(tagger)
        .filter_with(&words, |done| on_progress(done, total))
        .await?;

    output::write_words(&config.output, &outcome.words)?;
    tracing::info!(
        kept = outcome.words.len(),
        "Wrote filtered words to {}",
        config.output.display()
    );

    Ok(outcome)
}
