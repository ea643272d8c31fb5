use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, info};

use super::traits::Embedder;
use crate::error::{AnalysisError, Result};

/// Sentence embeddings from a local AllMiniLML6V2 model, memoised per text.
pub struct FastEmbedder {
    model: TextEmbedding,
    cache: Mutex<LruCache<String, Vec<f32>>>,
}

impl FastEmbedder {
    /// Load (downloading on first use) the embedding model into `cache_dir`.
    pub fn try_new(cache_dir: PathBuf, cache_size: NonZeroUsize) -> Result<Self> {
        let mut options = InitOptions::new(EmbeddingModel::AllMiniLML6V2);
        options.show_download_progress = false;
        options.cache_dir = cache_dir;

        let model = TextEmbedding::try_new(options).map_err(|e| {
            AnalysisError::Collaborator(format!("Failed to load embedding model: {}", e))
        })?;
        info!("Embedding model loaded successfully");

        Ok(Self {
            model,
            cache: Mutex::new(LruCache::new(cache_size)),
        })
    }

    fn cached(&self, text: &str) -> Option<Vec<f32>> {
        self.cache.lock().ok()?.get(text).cloned()
    }

    fn remember(&self, text: &str, embedding: &[f32]) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(text.to_string(), embedding.to_vec());
        }
    }
}

impl Embedder for FastEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if let Some(embedding) = self.cached(text) {
            debug!("Embedding cache hit");
            return Ok(embedding);
        }

        let embeddings = self
            .model
            .embed(vec![text.to_string()], None)
            .map_err(|e| AnalysisError::Collaborator(format!("Embedding failed: {}", e)))?;
        let embedding = embeddings
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::Collaborator("No embedding generated".to_string()))?;

        self.remember(text, &embedding);
        Ok(embedding)
    }
}
