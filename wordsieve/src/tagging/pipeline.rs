//! Token classification pipeline backed by a pretrained BERT checkpoint.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokenizers::Tokenizer as HFTokenizer;

use super::aggregation::aggregate;
use super::{AggregationStrategy, TaggedSpan, Tagger, TokenPrediction};
use crate::config::ModelConfig;
use crate::ml::model::{BertForTokenClassification, parse_model_config};
use crate::ml::utils::{argmax, get_device};
use crate::ml::{MLError, ModelCache};
use crate::{Result, SieveError};

const TOKENIZER_FILE: &str = "tokenizer.json";
const CONFIG_FILE: &str = "config.json";
const SAFETENSORS_FILE: &str = "model.safetensors";
const PYTORCH_FILE: &str = "pytorch_model.bin";

struct PipelineInner {
    tokenizer: HFTokenizer,
    model: BertForTokenClassification,
    aggregation: AggregationStrategy,
}

impl PipelineInner {
    fn predict_tokens(&self, text: &str) -> std::result::Result<Vec<TokenPrediction>, MLError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| MLError::tokenization(format!("Failed to encode '{}': {}", text, e)))?;

        let ids = encoding.get_ids();
        let offsets = encoding.get_offsets();
        let special = encoding.get_special_tokens_mask();

        let rows = self.model.predict(ids)?;

        rows.iter()
            .enumerate()
            .map(|(idx, row)| {
                let (class, score) = argmax(row)
                    .ok_or_else(|| MLError::inference("Model returned an empty score row"))?;
                let label = self.model.labels().label(class).ok_or_else(|| {
                    MLError::configuration(format!("No label for class id {}", class))
                })?;
                let (start, end) = offsets[idx];

                let prediction = TokenPrediction::new(label, score, start, end);
                Ok(if special[idx] == 1 {
                    prediction.special()
                } else {
                    prediction
                })
            })
            .collect()
    }
}

/// Token classification pipeline: tokenizer, model and span aggregation.
///
/// Cloning is cheap; clones share the loaded model.
#[derive(Clone)]
pub struct TokenClassificationPipeline {
    inner: Arc<PipelineInner>,
    name: String,
}

impl std::fmt::Debug for TokenClassificationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenClassificationPipeline")
            .field("name", &self.name)
            .field("aggregation", &self.inner.aggregation)
            .field("model", &self.inner.model)
            .finish()
    }
}

impl TokenClassificationPipeline {
    /// Assemble a pipeline from already loaded parts.
    pub fn new(
        name: impl Into<String>,
        tokenizer: HFTokenizer,
        model: BertForTokenClassification,
        aggregation: AggregationStrategy,
    ) -> Self {
        Self {
            inner: Arc::new(PipelineInner {
                tokenizer,
                model,
                aggregation,
            }),
            name: name.into(),
        }
    }

    /// Fetch the tokenizer, config and weights for the configured model
    /// from the hub (or its cache) and load them.
    pub async fn from_pretrained(config: &ModelConfig) -> Result<Self> {
        tracing::info!(
            model = %config.model_id,
            revision = %config.revision,
            "Loading token classification model"
        );

        let cache = ModelCache::new(config.cache_dir.clone())?;

        let weights_path = match cache
            .get_file(&config.model_id, &config.revision, SAFETENSORS_FILE)
            .await
        {
            Ok(path) => path,
            Err(safetensors_err) => {
                tracing::debug!(error = %safetensors_err, "Falling back to {}", PYTORCH_FILE);
                cache
                    .get_file(&config.model_id, &config.revision, PYTORCH_FILE)
                    .await
                    .map_err(|e| {
                        MLError::model_not_found(format!(
                            "{} has no usable {} or {}: {}",
                            config.model_id, SAFETENSORS_FILE, PYTORCH_FILE, e
                        ))
                    })?
            }
        };

        let tokenizer_path = cache
            .get_file(&config.model_id, &config.revision, TOKENIZER_FILE)
            .await?;
        let config_path = cache
            .get_file(&config.model_id, &config.revision, CONFIG_FILE)
            .await?;

        let model_id = config.model_id.clone();
        let aggregation = config.aggregation;
        let max_length = config.max_length;

        tokio::task::spawn_blocking(move || {
            Self::from_files(
                model_id,
                &tokenizer_path,
                &config_path,
                &weights_path,
                aggregation,
                max_length,
            )
        })
        .await
        .map_err(|e| SieveError::ML(format!("Task join error: {}", e)))?
    }

    /// Load a pipeline from local files.
    pub fn from_files(
        name: impl Into<String>,
        tokenizer_path: &Path,
        config_path: &Path,
        weights_path: &Path,
        aggregation: AggregationStrategy,
        max_length: usize,
    ) -> Result<Self> {
        let mut tokenizer = HFTokenizer::from_file(tokenizer_path)
            .map_err(|e| MLError::tokenization(format!("Failed to load tokenizer: {}", e)))?;
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| MLError::tokenization(format!("Failed to set truncation: {}", e)))?;
        tokenizer.with_padding(None);

        let raw_config = std::fs::read_to_string(config_path).map_err(MLError::from)?;
        let (bert_config, labels) = parse_model_config(&raw_config)?;

        let device = get_device().map_err(|e| MLError::model_loading(format!("Failed to get device: {}", e)))?;
        tracing::debug!(
            labels = labels.num_labels,
            ?device,
            "Loading model weights from {}",
            weights_path.display()
        );

        let model = BertForTokenClassification::from_checkpoint(weights_path, &bert_config, labels, &device)?;

        Ok(Self::new(name, tokenizer, model, aggregation))
    }

}

#[async_trait]
impl Tagger for TokenClassificationPipeline {
    async fn tag(&self, text: &str) -> Result<Vec<TaggedSpan>> {
        let inner = Arc::clone(&self.inner);
        let text = text.to_string();

        // Run blocking task to use Candle for inference
        let spans = tokio::task::spawn_blocking(move || {
            let tokens = inner.predict_tokens(&text)?;
            Ok::<_, MLError>(aggregate(&text, &tokens, inner.aggregation))
        })
        .await
        .map_err(|e| SieveError::Tagging(format!("Task join error: {}", e)))??;

        Ok(spans)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
