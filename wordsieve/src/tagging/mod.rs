//! Part-of-speech tagging of single words.
//!
//! A [`Tagger`] maps an input to a sequence of labeled spans. The production
//! implementation, [`TokenClassificationPipeline`], runs a pretrained BERT
//! token classifier and merges sub-token predictions into spans with the
//! configured [`AggregationStrategy`].

mod aggregation;
mod pipeline;
mod traits;
mod types;

pub use aggregation::aggregate;
pub use pipeline::TokenClassificationPipeline;
pub use traits::*;
pub use types::*;
