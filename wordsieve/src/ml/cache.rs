//! Hugging Face hub access with a local file cache.

use std::path::PathBuf;

use hf_hub::api::sync::{Api, ApiBuilder, ApiRepo};
use hf_hub::{Repo, RepoType};

use crate::ml::error::{MLError, Result};

/// A cache for model files downloaded from the hub.
///
/// Files are fetched on first use and served from the cache directory
/// afterwards. All network calls are blocking and run on tokio's blocking
/// pool.
#[derive(Clone)]
pub struct ModelCache {
    cache_dir: Option<PathBuf>,
    hub_api: Api,
}

impl std::fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelCache")
            .field("cache_dir", &self.cache_dir)
            .finish()
    }
}

impl ModelCache {
    /// Create a model cache. `None` uses the hub's default cache location.
    pub fn new(cache_dir: Option<PathBuf>) -> Result<Self> {
        let mut builder = ApiBuilder::new().with_progress(false);
        if let Some(dir) = &cache_dir {
            builder = builder.with_cache_dir(dir.clone());
        }

        let hub_api = builder
            .build()
            .map_err(|e| MLError::model_loading(format!("Failed to create hub client: {}", e)))?;

        Ok(Self { cache_dir, hub_api })
    }

    fn repo(&self, model_id: &str, revision: &str) -> ApiRepo {
        self.hub_api.repo(Repo::with_revision(
            model_id.to_string(),
            RepoType::Model,
            revision.to_string(),
        ))
    }

    /// Get a file from the cache or download it.
    ///
    /// A cached file is returned without contacting the hub.
    pub async fn get_file(&self, model_id: &str, revision: &str, filename: &str) -> Result<PathBuf> {
        let repo = self.repo(model_id, revision);
        let filename = filename.to_string();

        tokio::task::spawn_blocking(move || {
            repo.get(&filename)
                .map_err(|e| MLError::model_loading(format!("Failed to download {}: {}", filename, e)))
        })
        .await
        .map_err(|e| MLError::model_loading(format!("Task join error: {}", e)))?
    }
}
