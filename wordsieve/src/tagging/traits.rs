//! Traits for part-of-speech tagging.

use async_trait::async_trait;

use super::TaggedSpan;
use crate::Result;

/// Trait for tagging a single input with labeled spans.
///
/// The tagger is the only seam between the filter and the pretrained model,
/// so alternative backends (or test doubles) only need to implement this.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Tagger: Send + Sync + std::fmt::Debug {
    /// Tag the given input.
    ///
    /// # Arguments
    /// * `text` - A single word (or any short input)
    ///
    /// # Returns
    /// The aggregated spans, in input order. An empty vector means nothing
    /// outside the `O` label was predicted.
    async fn tag(&self, text: &str) -> Result<Vec<TaggedSpan>>;

    /// Get the name of this tagger for identification purposes.
    fn name(&self) -> &str;
}
