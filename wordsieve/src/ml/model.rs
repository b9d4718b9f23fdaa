//! BERT encoder with a token classification head, loaded with Candle.

use std::collections::HashMap;
use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use serde::Deserialize;

use crate::ml::error::{MLError, Result};

/// Label mapping for token classification models
#[derive(Debug, Clone)]
pub struct LabelMapping {
    pub id_to_label: HashMap<usize, String>,
    pub num_labels: usize,
}

impl LabelMapping {
    /// Create label mapping from a list of labels ordered by id
    pub fn from_labels(labels: &[String]) -> Self {
        let mut id_to_label = HashMap::new();

        for (id, label) in labels.iter().enumerate() {
            id_to_label.insert(id, label.clone());
        }

        Self {
            id_to_label,
            num_labels: labels.len(),
        }
    }

    /// Create label mapping from a model config's `id2label` table.
    ///
    /// Ids must be dense, starting at zero.
    pub fn from_id2label(id2label: &HashMap<String, String>) -> Result<Self> {
        let mut labels = vec![None; id2label.len()];
        for (id, label) in id2label {
            let idx: usize = id
                .parse()
                .map_err(|_| MLError::configuration(format!("Invalid label id '{}'", id)))?;
            let slot = labels.get_mut(idx).ok_or_else(|| {
                MLError::configuration(format!("Label id {} out of range", idx))
            })?;
            *slot = Some(label.clone());
        }

        let labels = labels
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| MLError::configuration("id2label ids are not contiguous"))?;

        if labels.is_empty() {
            return Err(MLError::configuration("Model config has an empty id2label table"));
        }

        Ok(Self::from_labels(&labels))
    }

    /// Label for a class id
    pub fn label(&self, id: usize) -> Option<&str> {
        self.id_to_label.get(&id).map(String::as_str)
    }
}

/// The part of `config.json` a token classification checkpoint adds on top
/// of the encoder config.
#[derive(Debug, Deserialize)]
struct ClassificationHeadConfig {
    #[serde(default)]
    id2label: HashMap<String, String>,
}

/// Parse a model `config.json` into the encoder config and label mapping.
pub fn parse_model_config(raw: &str) -> Result<(BertConfig, LabelMapping)> {
    let bert_config: BertConfig = serde_json::from_str(raw)
        .map_err(|e| MLError::configuration(format!("Failed to parse BERT config: {}", e)))?;
    let head: ClassificationHeadConfig = serde_json::from_str(raw)
        .map_err(|e| MLError::configuration(format!("Failed to parse id2label: {}", e)))?;
    let labels = LabelMapping::from_id2label(&head.id2label)?;
    Ok((bert_config, labels))
}

/// BERT model with token classification head
pub struct BertForTokenClassification {
    bert: BertModel,
    classifier: Linear,
    labels: LabelMapping,
    device: Device,
}

impl std::fmt::Debug for BertForTokenClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BertForTokenClassification")
            .field("num_labels", &self.labels.num_labels)
            .field("device", &self.device)
            .finish()
    }
}

impl BertForTokenClassification {
    /// Build the model from a var builder rooted at the checkpoint.
    ///
    /// Checkpoints saved from `BertForTokenClassification` prefix the encoder
    /// with `bert.`; bare encoder checkpoints do not.
    pub fn new(vb: VarBuilder, config: &BertConfig, labels: LabelMapping) -> Result<Self> {
        let encoder_vb = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            vb.pp("bert")
        } else {
            vb.clone()
        };

        let bert = BertModel::load(encoder_vb, config)
            .map_err(|e| MLError::model_loading(format!("Failed to load encoder: {}", e)))?;
        let classifier = candle_nn::linear(config.hidden_size, labels.num_labels, vb.pp("classifier"))
            .map_err(|e| MLError::model_loading(format!("Failed to load classifier head: {}", e)))?;

        Ok(Self {
            bert,
            classifier,
            labels,
            device: vb.device().clone(),
        })
    }

    /// Load weights from a safetensors or PyTorch checkpoint file.
    pub fn from_checkpoint(
        weights: &Path,
        config: &BertConfig,
        labels: LabelMapping,
        device: &Device,
    ) -> Result<Self> {
        let is_safetensors = weights
            .extension()
            .is_some_and(|ext| ext == "safetensors");

        let vb = if is_safetensors {
            // SAFETY: the file is memory mapped read-only and is not modified while loaded
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights], DType::F32, device) }
        } else {
            VarBuilder::from_pth(weights, DType::F32, device)
        }
        .map_err(|e| {
            MLError::model_loading(format!("Failed to read weights {}: {}", weights.display(), e))
        })?;

        Self::new(vb, config, labels)
    }

    /// Label mapping of the classification head
    pub fn labels(&self) -> &LabelMapping {
        &self.labels
    }

    /// Per-token class probabilities for one encoded sequence.
    ///
    /// Returns one row of `num_labels` probabilities per input id.
    pub fn predict(&self, input_ids: &[u32]) -> Result<Vec<Vec<f32>>> {
        if input_ids.is_empty() {
            return Ok(Vec::new());
        }

        let input = Tensor::new(input_ids, &self.device)?.unsqueeze(0)?;
        let token_type_ids = input.zeros_like()?;

        let hidden = self.bert.forward(&input, &token_type_ids, None)?;
        let logits = self.classifier.forward(&hidden)?;
        let probs = candle_nn::ops::softmax_last_dim(&logits)?;

        let rows = probs.squeeze(0)?.to_dtype(DType::F32)?.to_vec2::<f32>()?;
        Ok(rows)
    }
}
