//! End-to-end tests for reading, filtering and writing a word list.
//!
//! The tagger here is a fixed lexicon so the tests run without a model.

use std::collections::HashMap;

use async_trait::async_trait;
use wordsieve::output::read_words_json;
use wordsieve::prelude::*;

/// Tagger that looks words up in a table of span labels.
#[derive(Debug, Default)]
struct LexiconTagger {
    entries: HashMap<String, Vec<&'static str>>,
}

impl LexiconTagger {
    fn with(mut self, word: &str, labels: &[&'static str]) -> Self {
        self.entries.insert(word.to_string(), labels.to_vec());
        self
    }
}

#[async_trait]
impl Tagger for LexiconTagger {
    async fn tag(&self, text: &str) -> Result<Vec<TaggedSpan>> {
        let labels = self.entries.get(text).cloned().unwrap_or_default();
        Ok(labels
            .into_iter()
            .map(|label| TaggedSpan::new(label, 0.9, text, 0, text.len()))
            .collect())
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}

fn hebrew_tagger() -> LexiconTagger {
    LexiconTagger::default()
        .with("שלום", &["NN"])
        .with("רץ", &["VB"])
        .with("ה", &["DEF", "NN"])
        .with("יפה", &["JJ"])
        .with("של", &["PREP"])
}

#[tokio::test]
async fn test_sieve_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("he_full.txt");
    let output = dir.path().join("bonus_words.json");
    std::fs::write(&input, "שלום\nרץ\nה\n").unwrap();

    let config = ConfigBuilder::new()
        .with_input(&input)
        .with_output(&output)
        .build()
        .unwrap();

    let outcome = sieve_file(&config, &hebrew_tagger(), |_, _| {}).await.unwrap();

    assert_eq!(outcome.summary(), "Filtered 2 words out of 3");
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "{\n  \"words\": [\n    \"שלום\",\n    \"רץ\"\n  ]\n}"
    );
}

#[tokio::test]
async fn test_blank_lines_are_not_counted() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("words.txt");
    let output = dir.path().join("out.json");
    std::fs::write(&input, "\n  שלום  \n\n\t\nיפה\n\n").unwrap();

    let config = ConfigBuilder::new()
        .with_input(&input)
        .with_output(&output)
        .build()
        .unwrap();

    let mut progress = Vec::new();
    let outcome = sieve_file(&config, &hebrew_tagger(), |done, total| {
        progress.push((done, total))
    })
    .await
    .unwrap();

    assert_eq!(outcome.total, 2);
    assert_eq!(progress, vec![(1, 2), (2, 2)]);
    assert_eq!(read_words_json(&output).unwrap(), vec!["שלום", "יפה"]);
}

#[tokio::test]
async fn test_output_is_ordered_subsequence_of_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("words.txt");
    let output = dir.path().join("out.json");
    let lines = ["יפה", "של", "unknown", "רץ", "ה", "שלום", "רץ", "של"];
    std::fs::write(&input, lines.join("\n")).unwrap();

    let config = ConfigBuilder::new()
        .with_input(&input)
        .with_output(&output)
        .build()
        .unwrap();

    let outcome = sieve_file(&config, &hebrew_tagger(), |_, _| {}).await.unwrap();
    let written = read_words_json(&output).unwrap();

    assert_eq!(written, outcome.words);
    assert_eq!(written, vec!["יפה", "רץ", "שלום", "רץ"]);
    assert!(written.len() <= lines.len());

    let mut remaining = lines.iter();
    for word in &written {
        assert!(
            remaining.any(|line| line == word),
            "{} is out of order",
            word
        );
    }

    assert_eq!(outcome.no_span, 1);
    assert_eq!(outcome.multi_span, 1);
    assert_eq!(outcome.disallowed_tag, 2);
}

#[tokio::test]
async fn test_missing_input_leaves_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.json");

    let config = ConfigBuilder::new()
        .with_input(dir.path().join("missing.txt"))
        .with_output(&output)
        .build()
        .unwrap();

    let result = sieve_file(&config, &hebrew_tagger(), |_, _| {}).await;

    assert!(matches!(result, Err(SieveError::Input(_))));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_tagger_as_trait_object() {
    let tagger: Box<dyn Tagger> = Box::new(hebrew_tagger());
    let words = parse_words("רץ\nשל\n");

    let outcome = WordFilter::new(tagger.as_ref()).filter(&words).await.unwrap();

    assert_eq!(outcome.words, vec!["רץ"]);
    assert_eq!(tagger.name(), "lexicon");
}
