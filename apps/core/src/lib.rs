//! Meeting transcript analysis engine.
//!
//! Turns a raw transcript plus its metadata into a summary, ranked action
//! items, a 0-10 health score, insights and next steps. Model inference is
//! consumed through the [`collaborators`] traits and is never required.

pub mod analysis;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod models;
pub mod readiness;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use analysis::{AnalysisReport, MeetingAnalyzer};
pub use config::{EngineConfig, LogFormat};
pub use error::{AnalysisError, Result};
pub use models::{
    ActionItem, ActionStatus, AnalysisRequest, Insight, InsightCategory, MeetingType, Priority,
    Transcript,
};
