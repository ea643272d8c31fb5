//! Text similarity capability.
//!
//! Two interchangeable backends: plain token-set Jaccard, and embedding cosine
//! similarity that falls back to Jaccard for any pair it cannot embed. The
//! analyzer picks one when it is built.

use std::sync::Arc;
use tracing::warn;

use super::text::jaccard;
use crate::collaborators::Embedder;

/// Jaccard index above which two task phrases are the same task
pub const LEXICAL_DUPLICATE_THRESHOLD: f32 = 0.7;
/// Cosine similarity above which two task phrases are the same task
pub const EMBEDDING_DUPLICATE_THRESHOLD: f32 = 0.8;

pub trait SimilarityBackend: Send + Sync {
    /// Similarity in `[0, 1]` (cosine may dip below 0 for unrelated text).
    fn similarity(&self, a: &str, b: &str) -> f32;

    /// Whether `a` and `b` describe the same thing.
    fn is_duplicate(&self, a: &str, b: &str) -> bool;

    /// Short backend name for reports and logs
    fn kind(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalSimilarity;

impl SimilarityBackend for LexicalSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f32 {
        jaccard(a, b)
    }

    fn is_duplicate(&self, a: &str, b: &str) -> bool {
        jaccard(a, b) > LEXICAL_DUPLICATE_THRESHOLD
    }

    fn kind(&self) -> &'static str {
        "lexical"
    }
}

pub struct EmbeddingSimilarity {
    embedder: Arc<dyn Embedder>,
}

impl EmbeddingSimilarity {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    fn cosine(&self, a: &str, b: &str) -> Option<f32> {
        let embedded = self
            .embedder
            .embed(a)
            .and_then(|ea| self.embedder.embed(b).map(|eb| (ea, eb)));
        match embedded {
            Ok((ea, eb)) => Some(cosine_similarity(&ea, &eb)),
            Err(e) => {
                warn!("Embedding similarity unavailable, using lexical: {}", e);
                None
            }
        }
    }
}

impl SimilarityBackend for EmbeddingSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f32 {
        self.cosine(a, b).unwrap_or_else(|| jaccard(a, b))
    }

    fn is_duplicate(&self, a: &str, b: &str) -> bool {
        // Lexical near-copies are duplicates whatever the embedding says
        if jaccard(a, b) > LEXICAL_DUPLICATE_THRESHOLD {
            return true;
        }
        self.cosine(a, b)
            .is_some_and(|c| c > EMBEDDING_DUPLICATE_THRESHOLD)
    }

    fn kind(&self) -> &'static str {
        "embedding"
    }
}

/// Calculate cosine similarity between two vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}
