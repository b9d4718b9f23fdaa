//! Part-of-speech filter over a word list.
//!
//! A word is kept only when the tagger returns exactly one span and that
//! span's label is one of [`ALLOWED_TAGS`]. Words with no span, several spans
//! or another label are dropped without error; only tagger failures abort.

use std::fmt;

use crate::Result;
use crate::tagging::{TaggedSpan, Tagger};

/// Tags a word must carry to be kept: noun, verb, adjective.
pub const ALLOWED_TAGS: [&str; 3] = ["NN", "VB", "JJ"];

/// Whether `label` is in the allow-set.
pub fn is_allowed_tag(label: &str) -> bool {
    ALLOWED_TAGS.contains(&label)
}

/// Decision for a single word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Exactly one span with an allowed tag
    Keep,
    /// The tagger produced no span
    NoSpan,
    /// The tagger produced more than one span
    MultiSpan(usize),
    /// Exactly one span, but its tag is not allowed
    DisallowedTag(String),
}

impl Verdict {
    /// Classify the spans returned for one word.
    pub fn from_spans(spans: &[TaggedSpan]) -> Self {
        match spans {
            [] => Verdict::NoSpan,
            [span] if is_allowed_tag(&span.label) => Verdict::Keep,
            [span] => Verdict::DisallowedTag(span.label.clone()),
            _ => Verdict::MultiSpan(spans.len()),
        }
    }
}

/// Result of filtering a word list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Kept words, in input order
    pub words: Vec<String>,
    /// Number of words read
    pub total: usize,
    /// Words with no span
    pub no_span: usize,
    /// Words with more than one span
    pub multi_span: usize,
    /// Words whose single span had a tag outside the allow-set
    pub disallowed_tag: usize,
}

impl FilterOutcome {
    /// Number of kept words.
    pub fn kept(&self) -> usize {
        self.words.len()
    }

    /// Number of dropped words.
    pub fn rejected(&self) -> usize {
        self.no_span + self.multi_span + self.disallowed_tag
    }

    /// One-line run summary, e.g. `Filtered 2 words out of 3`.
    pub fn summary(&self) -> String {
        format!("Filtered {} words out of {}", self.kept(), self.total)
    }

    fn record(&mut self, word: &str, verdict: Verdict) {
        self.total += 1;
        match verdict {
            Verdict::Keep => self.words.push(word.to_string()),
            Verdict::NoSpan => self.no_span += 1,
            Verdict::MultiSpan(_) => self.multi_span += 1,
            Verdict::DisallowedTag(_) => self.disallowed_tag += 1,
        }
    }
}

/// Runs words through a [`Tagger`] one at a time and keeps the ones that pass.
pub struct WordFilter<'a, T: Tagger + ?Sized> {
    tagger: &'a T,
}

impl<'a, T: Tagger + ?Sized> WordFilter<'a, T> {
    pub fn new(tagger: &'a T) -> Self {
        Self { tagger }
    }

    /// Tag one word and decide whether to keep it.
    pub async fn evaluate(&self, word: &str) -> Result<Verdict> {
        let spans = self.tagger.tag(word).await?;
        Ok(Verdict::from_spans(&spans))
    }

    /// Filter `words`, preserving their order.
    pub async fn filter(&self, words: &[String]) -> Result<FilterOutcome> {
        self.filter_with(words, |_| {}).await
    }

    /// Filter `words`, calling `on_progress` with the number of words
    /// processed after each one.
    pub async fn filter_with<F>(&self, words: &[String], mut on_progress: F) -> Result<FilterOutcome>
    where
        F: FnMut(usize),
    {
        let mut outcome = FilterOutcome::default();

        for (idx, word) in words.iter().enumerate() {
            let verdict = self.evaluate(word).await?;
            outcome.record(word, verdict);
            on_progress(idx + 1);
        }

        tracing::debug!(
            total = outcome.total,
            kept = outcome.kept(),
            no_span = outcome.no_span,
            multi_span = outcome.multi_span,
            disallowed_tag = outcome.disallowed_tag,
            "Filtering finished"
        );

        Ok(outcome)
    }
}

impl<T: Tagger + ?Sized> fmt::Debug for WordFilter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordFilter")
            .field("tagger", &self.tagger)
            .finish()
    }
}
