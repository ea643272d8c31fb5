use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Word-count window requested from an abstractive summarizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBounds {
    pub min_words: usize,
    pub max_words: usize,
}

impl LengthBounds {
    /// Bounds for a transcript of `word_count` words.
    ///
    /// Three tiers (<50, <150, the rest), each with its own clamp window, so
    /// short transcripts get short summaries and long ones up to 120 words.
    pub fn for_word_count(word_count: usize) -> Self {
        let (max_words, min_words) = if word_count < 50 {
            let max = (word_count / 2).clamp(20, 40);
            (max, (max / 2).clamp(10, 15))
        } else if word_count < 150 {
            let max = (word_count / 2).clamp(40, 80);
            (max, (max / 2).clamp(20, 30))
        } else {
            let max = (word_count / 3).clamp(60, 120);
            (max, (max / 2).clamp(30, 50))
        };

        let min_words = if min_words >= max_words {
            max_words.saturating_sub(5).max(5)
        } else {
            min_words
        };

        Self {
            min_words,
            max_words,
        }
    }
}

/// Defines the public interface for an abstractive summarization backend.
///
/// Failures are never fatal to an analysis: the caller treats any error as
/// "no abstractive candidate".
#[async_trait]
pub trait Summarizer: Send + Sync + 'static {
    /// Summarize `text` within the requested word window.
    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String>;

    /// Cheap liveness probe used by readiness reporting.
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Defines the public interface for a sentence embedding backend.
///
/// Implementations must tolerate concurrent read-only calls.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}
