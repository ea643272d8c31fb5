use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::{sleep, Duration};

use crate::analysis::SimilarityBackend;
use crate::collaborators::{LengthBounds, Summarizer};
use crate::error::{AnalysisError, Result};

pub const SCENARIO: &str = "CEO: We need to increase Q4 revenue by 25%. \
                            Sarah, prepare the financial analysis by Friday.";

pub fn scenario_participants() -> Vec<String> {
    vec!["CEO".to_string(), "Sarah".to_string()]
}

// --- Summarizers ---

/// Always fails, counting the attempts
#[derive(Default)]
pub struct FailingSummarizer {
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Summarizer for FailingSummarizer {
    async fn summarize(&self, _text: &str, _bounds: LengthBounds) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AnalysisError::Collaborator("Simulated model failure".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Returns a fixed summary and records the bounds it was asked for
pub struct FixedSummarizer {
    pub summary: String,
    pub requested: Mutex<Vec<LengthBounds>>,
}

impl FixedSummarizer {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            requested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Summarizer for FixedSummarizer {
    async fn summarize(&self, _text: &str, bounds: LengthBounds) -> Result<String> {
        self.requested.lock().unwrap().push(bounds);
        Ok(self.summary.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Answers only after `delay`
pub struct SlowSummarizer {
    pub delay: Duration,
}

#[async_trait]
impl Summarizer for SlowSummarizer {
    async fn summarize(&self, _text: &str, _bounds: LengthBounds) -> Result<String> {
        sleep(self.delay).await;
        Ok("A summary that arrived far too late to matter".to_string())
    }

    fn name(&self) -> &str {
        "slow"
    }
}

// --- Similarity ---

/// Panics on use, standing in for a bug inside the pipeline
pub struct PanickingSimilarity;

impl SimilarityBackend for PanickingSimilarity {
    fn similarity(&self, _a: &str, _b: &str) -> f32 {
        panic!("similarity backend exploded");
    }

    fn is_duplicate(&self, _a: &str, _b: &str) -> bool {
        panic!("similarity backend exploded");
    }

    fn kind(&self) -> &'static str {
        "panicking"
    }
}
