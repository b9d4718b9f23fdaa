//! Tests for loading a token classification pipeline from local files.
//!
//! A tiny BERT checkpoint is written to a temporary directory together with
//! a word-level tokenizer, so no network access is needed.

use std::path::{Path, PathBuf};

use candle_core::{DType, Device, Tensor};
use candle_nn::{VarBuilder, VarMap};
use wordsieve::ml::BertForTokenClassification;
use wordsieve::ml::model::parse_model_config;
use wordsieve::prelude::*;

const TOKENIZER_JSON: &str = r#"{
  "version": "1.0",
  "truncation": null,
  "padding": null,
  "added_tokens": [
    {"id": 0, "content": "[UNK]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
    {"id": 1, "content": "[CLS]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
    {"id": 2, "content": "[SEP]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
  ],
  "normalizer": null,
  "pre_tokenizer": {"type": "Whitespace"},
  "post_processor": {"type": "BertProcessing", "sep": ["[SEP]", 2], "cls": ["[CLS]", 1]},
  "decoder": null,
  "model": {
    "type": "WordLevel",
    "vocab": {"[UNK]": 0, "[CLS]": 1, "[SEP]": 2, "big": 3, "dog": 4, "runs": 5},
    "unk_token": "[UNK]"
  }
}"#;

fn model_config(labels: &[&str]) -> String {
    let id2label = labels
        .iter()
        .enumerate()
        .map(|(id, label)| format!("\"{}\": \"{}\"", id, label))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"{{
  "vocab_size": 16,
  "hidden_size": 8,
  "num_hidden_layers": 1,
  "num_attention_heads": 2,
  "intermediate_size": 16,
  "hidden_act": "gelu",
  "hidden_dropout_prob": 0.1,
  "max_position_embeddings": 16,
  "type_vocab_size": 2,
  "initializer_range": 0.02,
  "layer_norm_eps": 1e-12,
  "pad_token_id": 0,
  "id2label": {{{}}}
}}"#,
        id2label
    )
}

struct Checkpoint {
    _dir: tempfile::TempDir,
    tokenizer: PathBuf,
    config: PathBuf,
    weights: PathBuf,
}

fn write_checkpoint(labels: &[&str], classifier_bias: Option<&[f32]>) -> Checkpoint {
    let dir = tempfile::tempdir().unwrap();
    let (tokenizer, config, weights) = write_checkpoint_in(dir.path(), labels, classifier_bias);

    Checkpoint {
        _dir: dir,
        tokenizer,
        config,
        weights,
    }
}

/// Write a checkpoint whose encoder weights are all zero into `dir`. With
/// zero weights every label is equally likely, so `classifier_bias` alone
/// decides the predicted label.
fn write_checkpoint_in(
    dir: &Path,
    labels: &[&str],
    classifier_bias: Option<&[f32]>,
) -> (PathBuf, PathBuf, PathBuf) {
    let tokenizer = dir.join("tokenizer.json");
    let config = dir.join("config.json");
    let weights = dir.join("model.safetensors");

    let raw_config = model_config(labels);
    std::fs::write(&tokenizer, TOKENIZER_JSON).unwrap();
    std::fs::write(&config, &raw_config).unwrap();

    let (bert_config, mapping) = parse_model_config(&raw_config).unwrap();
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    BertForTokenClassification::new(vb, &bert_config, mapping).unwrap();

    for var in varmap.all_vars() {
        var.set(&var.zeros_like().unwrap()).unwrap();
    }
    if let Some(bias) = classifier_bias {
        let data = varmap.data().lock().unwrap();
        let var = data.get("classifier.bias").unwrap();
        var.set(&Tensor::new(bias, &Device::Cpu).unwrap()).unwrap();
    }
    varmap.save(&weights).unwrap();

    (tokenizer, config, weights)
}

fn load(checkpoint: &Checkpoint, aggregation: AggregationStrategy) -> TokenClassificationPipeline {
    TokenClassificationPipeline::from_files(
        "tiny-bert",
        &checkpoint.tokenizer,
        &checkpoint.config,
        &checkpoint.weights,
        aggregation,
        8,
    )
    .unwrap()
}

#[tokio::test]
async fn test_single_word_yields_one_span() {
    let checkpoint = write_checkpoint(&["NN", "VB", "JJ", "O"], None);
    let pipeline = load(&checkpoint, AggregationStrategy::Simple);

    let spans = pipeline.tag("dog").await.unwrap();

    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].label, "NN");
    assert_eq!(spans[0].word, "dog");
    assert_eq!((spans[0].start, spans[0].end), (0, 3));
    assert!((spans[0].score - 0.25).abs() < 1e-4);
    assert_eq!(pipeline.name(), "tiny-bert");
}

#[tokio::test]
async fn test_aggregation_strategy_controls_span_count() {
    let checkpoint = write_checkpoint(&["NN", "VB", "JJ", "O"], None);

    let simple = load(&checkpoint, AggregationStrategy::Simple);
    let spans = simple.tag("big dog").await.unwrap();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].word, "big dog");

    let none = load(&checkpoint, AggregationStrategy::None);
    let spans = none.tag("big dog").await.unwrap();
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].word, "big");
    assert_eq!(spans[1].word, "dog");
}

#[tokio::test]
async fn test_outside_label_produces_no_spans() {
    let checkpoint = write_checkpoint(&["NN", "VB", "JJ", "O"], Some(&[0.0, 0.0, 0.0, 5.0]));
    let pipeline = load(&checkpoint, AggregationStrategy::Simple);

    assert!(pipeline.tag("dog").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_classifier_bias_selects_label() {
    let checkpoint = write_checkpoint(&["NN", "VB", "JJ", "O"], Some(&[0.0, 3.0, 0.0, 0.0]));
    let pipeline = load(&checkpoint, AggregationStrategy::Simple);

    let spans = pipeline.tag("runs").await.unwrap();

    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].label, "VB");
    assert!(spans[0].score > 0.5);
}

#[tokio::test]
async fn test_pipeline_drives_the_filter() {
    let checkpoint = write_checkpoint(&["PREP", "NN", "VB", "O"], None);
    let pipeline = load(&checkpoint, AggregationStrategy::Simple);

    let words = vec!["dog".to_string(), "runs".to_string()];
    let outcome = WordFilter::new(&pipeline).filter(&words).await.unwrap();

    assert!(outcome.words.is_empty());
    assert_eq!(outcome.disallowed_tag, 2);
}

#[tokio::test]
async fn test_long_input_is_truncated_to_max_length() {
    let checkpoint = write_checkpoint(&["NN", "VB", "JJ", "O"], None);
    // Eight tokens with [CLS] and [SEP] leave room for six words
    let text = "dog dog dog dog dog dog dog dog big";

    let simple = load(&checkpoint, AggregationStrategy::Simple);
    let spans = simple.tag(text).await.unwrap();
    assert_eq!(spans.len(), 1);
    assert_eq!((spans[0].start, spans[0].end), (0, 23));
    assert_eq!(spans[0].word, "dog dog dog dog dog dog");

    let none = load(&checkpoint, AggregationStrategy::None);
    let spans = none.tag(text).await.unwrap();
    assert_eq!(spans.len(), 6);
    assert_eq!(spans.last().map(|s| s.end), Some(23));
    assert!(spans.iter().all(|s| s.word == "dog"));
}

#[tokio::test]
async fn test_from_pretrained_uses_warm_cache() {
    let cache_dir = tempfile::tempdir().unwrap();
    let repo_dir = cache_dir.path().join("models--wordsieve--tiny-bert");
    let snapshot = repo_dir.join("snapshots").join("abc123");
    std::fs::create_dir_all(&snapshot).unwrap();
    std::fs::create_dir_all(repo_dir.join("refs")).unwrap();
    std::fs::write(repo_dir.join("refs").join("main"), "abc123").unwrap();
    write_checkpoint_in(&snapshot, &["NN", "VB", "JJ", "O"], None);

    let config = ModelConfig {
        model_id: "wordsieve/tiny-bert".to_string(),
        revision: "main".to_string(),
        cache_dir: Some(cache_dir.path().to_path_buf()),
        aggregation: AggregationStrategy::Simple,
        max_length: 8,
    };
    let pipeline = TokenClassificationPipeline::from_pretrained(&config)
        .await
        .unwrap();

    let spans = pipeline.tag("dog").await.unwrap();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].label, "NN");
    assert_eq!(pipeline.name(), "wordsieve/tiny-bert");
}

#[test]
fn test_missing_tokenizer_is_an_error() {
    let checkpoint = write_checkpoint(&["NN", "O"], None);

    let result = TokenClassificationPipeline::from_files(
        "tiny-bert",
        &checkpoint.tokenizer.with_file_name("missing.json"),
        &checkpoint.config,
        &checkpoint.weights,
        AggregationStrategy::Simple,
        8,
    );

    assert!(matches!(result, Err(SieveError::ML(_))));
}
