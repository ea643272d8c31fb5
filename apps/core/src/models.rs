use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::{AnalysisError, Result};

/// Sentinel used when no assignee or due date could be resolved.
pub const TBD: &str = "TBD";

/// Minimum transcript length (in characters, after trimming).
pub const MIN_TRANSCRIPT_CHARS: usize = 10;

/// Kind of meeting, drives type-specific summary extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingType {
    General,
    Executive,
    Planning,
    SprintPlanning,
    Budget,
    Client,
    Technical,
}

impl MeetingType {
    pub const ALL: [MeetingType; 7] = [
        MeetingType::General,
        MeetingType::Executive,
        MeetingType::Planning,
        MeetingType::SprintPlanning,
        MeetingType::Budget,
        MeetingType::Client,
        MeetingType::Technical,
    ];

    /// Returns the wire name of the meeting type
    pub fn label(&self) -> &'static str {
        match self {
            MeetingType::General => "general",
            MeetingType::Executive => "executive",
            MeetingType::Planning => "planning",
            MeetingType::SprintPlanning => "sprint_planning",
            MeetingType::Budget => "budget",
            MeetingType::Client => "client",
            MeetingType::Technical => "technical",
        }
    }
}

impl fmt::Display for MeetingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for MeetingType {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        MeetingType::ALL
            .into_iter()
            .find(|t| t.label() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = MeetingType::ALL.iter().map(|t| t.label()).collect();
                AnalysisError::Input(format!(
                    "Invalid meeting type '{}'. Must be one of: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

/// Raw analysis input as handed over by the API layer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalysisRequest {
    #[validate(length(min = 1))]
    pub transcript: String,
    pub participants: Vec<String>,
    pub meeting_type: MeetingType,
    #[validate(range(min = 1))]
    pub duration_minutes: u32,
}

impl AnalysisRequest {
    /// Build a request from an untyped meeting type name.
    pub fn new(
        transcript: impl Into<String>,
        participants: Vec<String>,
        meeting_type: &str,
        duration_minutes: u32,
    ) -> Result<Self> {
        Ok(Self {
            transcript: transcript.into(),
            participants,
            meeting_type: meeting_type.parse()?,
            duration_minutes,
        })
    }

    /// Validate the request and turn it into an immutable [`Transcript`].
    pub fn into_transcript(self) -> Result<Transcript> {
        self.validate()?;

        let text = self.transcript.trim();
        if text.is_empty() {
            return Err(AnalysisError::Input("Transcript cannot be empty".to_string()));
        }
        if text.chars().count() < MIN_TRANSCRIPT_CHARS {
            return Err(AnalysisError::Input(format!(
                "Transcript too short (minimum {} characters)",
                MIN_TRANSCRIPT_CHARS
            )));
        }

        let mut participants: Vec<String> = Vec::with_capacity(self.participants.len());
        for name in self.participants {
            let name = name.trim();
            if !name.is_empty() && !participants.iter().any(|p| p == name) {
                participants.push(name.to_string());
            }
        }

        Ok(Transcript {
            text: text.to_string(),
            participants,
            meeting_type: self.meeting_type,
            duration_minutes: self.duration_minutes,
        })
    }
}

/// Validated transcript plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    /// Ordered, unique display names
    pub participants: Vec<String>,
    pub meeting_type: MeetingType,
    pub duration_minutes: u32,
}

impl Transcript {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Action item priority. Ordering follows urgency: `High > Medium > Low`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Lifecycle state of an action item. The engine only ever emits `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

/// A task extracted from the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    /// Unique within one analysis call
    pub id: String,
    pub task: String,
    /// Participant name or [`TBD`]
    pub assignee: String,
    /// Resolved date token or [`TBD`]
    pub due_date: String,
    pub priority: Priority,
    pub status: ActionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Decision,
    Risk,
    Opportunity,
    Financial,
    Thematic,
}

/// A qualitative observation mined from the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub category: InsightCategory,
    pub text: String,
}

impl Insight {
    pub fn new(category: InsightCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meeting_type_parsing() {
        assert_eq!("executive".parse::<MeetingType>().unwrap(), MeetingType::Executive);
        assert_eq!(" Budget ".parse::<MeetingType>().unwrap(), MeetingType::Budget);
        assert_eq!(
            "sprint_planning".parse::<MeetingType>().unwrap(),
            MeetingType::SprintPlanning
        );
        assert!(matches!(
            "standup".parse::<MeetingType>(),
            Err(AnalysisError::Input(_))
        ));
    }

    #[test]
    fn test_short_transcript_rejected() {
        let request = AnalysisRequest::new("  Hi there ", vec![], "general", 30).unwrap();
        let err = request.into_transcript().unwrap_err();
        assert!(matches!(err, AnalysisError::Input(msg) if msg.contains("too short")));
    }

    #[test]
    fn test_empty_transcript_rejected() {
        let request = AnalysisRequest::new("     ", vec![], "general", 30).unwrap();
        assert!(matches!(request.into_transcript(), Err(AnalysisError::Input(_))));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let request =
            AnalysisRequest::new("A perfectly valid transcript", vec![], "general", 0).unwrap();
        assert!(matches!(request.into_transcript(), Err(AnalysisError::Input(_))));
    }

    #[test]
    fn test_participants_normalized() {
        let request = AnalysisRequest::new(
            "A perfectly valid transcript",
            vec![" Sarah ".into(), "".into(), "Mike".into(), "Sarah".into()],
            "general",
            30,
        )
        .unwrap();
        let transcript = request.into_transcript().unwrap();
        assert_eq!(transcript.participants, vec!["Sarah", "Mike"]);
        assert_eq!(transcript.word_count(), 4);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
    }

    #[test]
    fn test_action_status_default_is_pending() {
        assert_eq!(ActionStatus::default(), ActionStatus::Pending);
        assert_eq!(
            serde_json::to_string(&ActionStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }
}
