//! Merging sub-token predictions into labeled spans.

use super::types::{AggregationStrategy, OUTSIDE_LABEL, TaggedSpan, TokenPrediction};

/// Position of a token in a BIO-style label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Begin,
    Inside,
}

/// Split a label into its boundary marker and tag.
///
/// Labels without a `B-`/`I-` prefix count as inside tokens of their own tag,
/// so consecutive bare labels merge.
fn split_label(label: &str) -> (Boundary, &str) {
    if let Some(tag) = label.strip_prefix("B-") {
        (Boundary::Begin, tag)
    } else if let Some(tag) = label.strip_prefix("I-") {
        (Boundary::Inside, tag)
    } else {
        (Boundary::Inside, label)
    }
}

/// Name of a group: everything after the first `-` of its first label, so
/// `B-NN`, `S-NN` and `NN` all name an `NN` span.
fn group_label(label: &str) -> &str {
    label.split_once('-').map_or(label, |(_, tag)| tag)
}

/// Aggregate token predictions for `text` into spans.
///
/// Special tokens are skipped and spans tagged `O` are dropped.
pub fn aggregate(
    text: &str,
    tokens: &[TokenPrediction],
    strategy: AggregationStrategy,
) -> Vec<TaggedSpan> {
    let tokens: Vec<&TokenPrediction> = tokens.iter().filter(|t| !t.is_special).collect();

    let spans: Vec<TaggedSpan> = match strategy {
        AggregationStrategy::None => tokens
            .iter()
            .map(|token| span_from_group(text, std::slice::from_ref(token), &token.label))
            .collect(),
        AggregationStrategy::Simple => group_simple(text, &tokens),
    };

    spans
        .into_iter()
        .filter(|span| span.label != OUTSIDE_LABEL)
        .collect()
}

fn group_simple(text: &str, tokens: &[&TokenPrediction]) -> Vec<TaggedSpan> {
    let mut spans = Vec::new();
    let mut group_start = 0;

    for idx in 1..=tokens.len() {
        let closes_group = match tokens.get(idx) {
            None => true,
            Some(token) => {
                let (boundary, tag) = split_label(&token.label);
                let (_, last_tag) = split_label(&tokens[idx - 1].label);
                boundary == Boundary::Begin || tag != last_tag
            }
        };

        if closes_group {
            let group = &tokens[group_start..idx];
            spans.push(span_from_group(text, group, group_label(&group[0].label)));
            group_start = idx;
        }
    }

    spans
}

fn span_from_group(text: &str, group: &[&TokenPrediction], tag: &str) -> TaggedSpan {
    let start = group.first().map(|t| t.start).unwrap_or(0);
    let end = group.last().map(|t| t.end).unwrap_or(start);
    let score = group.iter().map(|t| t.score).sum::<f32>() / group.len() as f32;
    let word = text.get(start..end).unwrap_or_default();

    TaggedSpan::new(tag, score, word, start, end)
}
