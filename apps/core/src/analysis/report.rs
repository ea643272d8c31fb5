//! Analysis report - output structure of one `analyze` call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::sentences::ScoredSentence;
use crate::models::{ActionItem, Insight, MeetingType, Priority};

/// Complete result of analysing one transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Unique identifier of this analysis run
    pub analysis_id: Uuid,

    pub meeting_type: MeetingType,

    /// Merged ensemble summary, never empty
    pub summary: String,

    /// At most five tasks, highest priority first
    pub action_items: Vec<ActionItem>,

    /// Meeting quality in `[0, 10]`
    pub health_score: f32,

    pub insights: Vec<Insight>,

    pub next_steps: Vec<String>,

    /// Sentences above the acceptance threshold, best first
    pub key_sentences: Vec<ScoredSentence>,

    /// Which similarity backend resolved assignees and duplicates
    pub similarity_backend: String,

    /// Whether the fallback pipeline produced this report
    pub degraded: bool,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,

    /// Timestamp of analysis
    pub generated_at: DateTime<Utc>,
}

impl AnalysisReport {
    /// Create an empty report for `meeting_type`
    pub fn new(meeting_type: MeetingType) -> Self {
        Self {
            analysis_id: Uuid::new_v4(),
            meeting_type,
            summary: String::new(),
            action_items: vec![],
            health_score: 0.0,
            insights: vec![],
            next_steps: vec![],
            key_sentences: vec![],
            similarity_backend: String::new(),
            degraded: false,
            processing_time_ms: 0,
            generated_at: Utc::now(),
        }
    }

    pub fn high_priority_count(&self) -> usize {
        self.action_items
            .iter()
            .filter(|item| item.priority == Priority::High)
            .count()
    }

    /// Get a summary for logging
    pub fn log_line(&self) -> String {
        format!(
            "Type: {}, Actions: {} ({} high), Insights: {}, Health: {:.1}, Similarity: {}{}",
            self.meeting_type,
            self.action_items.len(),
            self.high_priority_count(),
            self.insights.len(),
            self.health_score,
            self.similarity_backend,
            if self.degraded { ", degraded" } else { "" }
        )
    }
}
