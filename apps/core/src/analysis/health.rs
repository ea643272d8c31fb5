//! Meeting health score.
//!
//! Starts from a neutral 5.0 and adds independently capped adjustments for
//! outcomes (action items, decisions), attendance, pace, engagement and
//! concreteness. The result is clamped to `[0, 10]`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::lexicon;
use super::text::word_count;

pub const BASE_SCORE: f32 = 5.0;
pub const MAX_SCORE: f32 = 10.0;

const ACTION_STEP: f32 = 0.7;
const ACTION_CAP: f32 = 3.0;
const DECISION_STEP: f32 = 0.5;
const DECISION_CAP: f32 = 2.5;
const PARTICIPANT_STEP: f32 = 0.4;
const PARTICIPANT_CAP: f32 = 1.5;
/// Participants beyond this many earn a bonus
const PARTICIPANT_BASELINE: usize = 2;
/// Words per minute
const DENSE_PACE: f32 = 25.0;
const SLOW_PACE: f32 = 15.0;
const PACE_DIVISOR: f32 = 12.0;
const PACE_CAP: f32 = 2.0;
const SLOW_PACE_PENALTY: f32 = 0.8;
const ENGAGEMENT_STEP: f32 = 0.3;
const ENGAGEMENT_CAP: f32 = 1.5;
const QUESTION_STEP: f32 = 0.2;
const QUESTION_CAP: f32 = 1.0;
const SPECIFICITY_STEP: f32 = 0.1;
const SPECIFICITY_CAP: f32 = 1.0;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid regex: number"));

/// The individual adjustments behind a health score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthBreakdown {
    pub action_items: f32,
    pub decisions: f32,
    pub participants: f32,
    pub pace: f32,
    pub engagement: f32,
    pub questions: f32,
    pub specificity: f32,
}

impl HealthBreakdown {
    /// Final score, clamped to `[0, 10]`.
    pub fn score(&self) -> f32 {
        let raw = BASE_SCORE
            + self.action_items
            + self.decisions
            + self.participants
            + self.pace
            + self.engagement
            + self.questions
            + self.specificity;
        raw.clamp(0.0, MAX_SCORE)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HealthScorer;

impl HealthScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a meeting in `[0, 10]`.
    pub fn score(
        &self,
        transcript: &str,
        duration_minutes: u32,
        participant_count: usize,
        action_item_count: usize,
    ) -> f32 {
        self.breakdown(transcript, duration_minutes, participant_count, action_item_count)
            .score()
    }

    pub fn breakdown(
        &self,
        transcript: &str,
        duration_minutes: u32,
        participant_count: usize,
        action_item_count: usize,
    ) -> HealthBreakdown {
        let specificity = NUMBER.find_iter(transcript).count()
            + lexicon::MONTHS.count(transcript)
            + lexicon::WEEKDAYS.count(transcript);

        HealthBreakdown {
            action_items: capped(action_item_count, ACTION_STEP, ACTION_CAP),
            decisions: capped(
                lexicon::HEALTH_DECISIONS.count(transcript),
                DECISION_STEP,
                DECISION_CAP,
            ),
            participants: capped(
                participant_count.saturating_sub(PARTICIPANT_BASELINE),
                PARTICIPANT_STEP,
                PARTICIPANT_CAP,
            ),
            pace: pace_adjustment(word_count(transcript), duration_minutes),
            engagement: capped(
                lexicon::ENGAGEMENT.count(transcript),
                ENGAGEMENT_STEP,
                ENGAGEMENT_CAP,
            ),
            questions: capped(transcript.matches('?').count(), QUESTION_STEP, QUESTION_CAP),
            specificity: capped(specificity, SPECIFICITY_STEP, SPECIFICITY_CAP),
        }
    }
}

fn capped(count: usize, step: f32, cap: f32) -> f32 {
    (count as f32 * step).min(cap)
}

fn pace_adjustment(words: usize, duration_minutes: u32) -> f32 {
    if duration_minutes == 0 {
        return 0.0;
    }
    let density = words as f32 / duration_minutes as f32;
    if density > DENSE_PACE {
        (density / PACE_DIVISOR).min(PACE_CAP)
    } else if density < SLOW_PACE {
        -SLOW_PACE_PENALTY
    } else {
        0.0
    }
}
