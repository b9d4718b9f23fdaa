//! Prediction types produced by taggers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label the token classification pipeline treats as "outside any span".
pub const OUTSIDE_LABEL: &str = "O";

/// A single sub-word token prediction, before aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPrediction {
    /// Predicted label (e.g. `NN`, `B-VB`, `O`)
    pub label: String,
    /// Probability of the predicted label
    pub score: f32,
    /// Byte offset of the token start in the input
    pub start: usize,
    /// Byte offset of the token end in the input
    pub end: usize,
    /// Whether the tokenizer inserted this token (`[CLS]`, `[SEP]`, ...)
    pub is_special: bool,
}

impl TokenPrediction {
    /// Create a prediction for a regular (non-special) token.
    pub fn new(label: impl Into<String>, score: f32, start: usize, end: usize) -> Self {
        Self {
            label: label.into(),
            score,
            start,
            end,
            is_special: false,
        }
    }

    /// Mark this prediction as belonging to a special token.
    pub fn special(mut self) -> Self {
        self.is_special = true;
        self
    }
}

/// One labeled span returned by a tagger for an input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedSpan {
    /// Entity group (part-of-speech tag) of the span
    pub label: String,
    /// Mean probability of the tokens in the span
    pub score: f32,
    /// Surface text covered by the span
    pub word: String,
    /// Byte offset of the span start in the input
    pub start: usize,
    /// Byte offset of the span end in the input
    pub end: usize,
}

impl TaggedSpan {
    /// Create a new span
    pub fn new(label: impl Into<String>, score: f32, word: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            label: label.into(),
            score,
            word: word.into(),
            start,
            end,
        }
    }
}

/// How sub-token predictions are merged into spans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationStrategy {
    /// Every token is its own span
    None,

    /// Adjacent tokens with the same tag are merged; `B-` starts a new span
    #[default]
    Simple,
}

impl fmt::Display for AggregationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationStrategy::None => write!(f, "none"),
            AggregationStrategy::Simple => write!(f, "simple"),
        }
    }
}

impl FromStr for AggregationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(AggregationStrategy::None),
            "simple" => Ok(AggregationStrategy::Simple),
            _ => Err(format!("Invalid aggregation strategy: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregation_strategy_parsing() {
        assert_eq!("simple".parse::<AggregationStrategy>(), Ok(AggregationStrategy::Simple));
        assert_eq!("NONE".parse::<AggregationStrategy>(), Ok(AggregationStrategy::None));
        assert!("first".parse::<AggregationStrategy>().is_err());
        assert_eq!(AggregationStrategy::default(), AggregationStrategy::Simple);
    }

    #[test]
    fn test_tagged_span_serializes_flat() {
        let span = TaggedSpan::new("NN", 0.5, "בית", 0, 6);
        let json = serde_json::to_value(&span).unwrap();
        assert_eq!(json["label"], "NN");
        assert_eq!(json["word"], "בית");
        assert_eq!(json["end"], 6);
    }
}
