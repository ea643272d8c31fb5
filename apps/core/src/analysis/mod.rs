//! # Analysis Module
//!
//! Deterministic, heuristic analysis of meeting transcripts.
//!
//! ## Components
//! - `sentences`: Sentence splitting and importance scoring
//! - `summary`: Multi-strategy summary ensemble
//! - `action_items`: Task extraction with assignee, due date and priority
//! - `health`: Meeting health score
//! - `insights`: Decision/risk/opportunity/financial insights
//! - `next_steps`: Follow-up lines derived from action items
//! - `similarity`: Lexical and embedding similarity backends
//! - `lexicon`: Static keyword tables
//! - `report`: Output data structure
//! - `analyzer`: Main orchestrator

pub mod action_items;
pub mod analyzer;
pub mod health;
pub mod insights;
pub mod lexicon;
pub mod next_steps;
pub mod report;
pub mod sentences;
pub mod similarity;
pub mod summary;
pub mod text;

pub use action_items::ActionItemExtractor;
pub use analyzer::MeetingAnalyzer;
pub use health::{HealthBreakdown, HealthScorer};
pub use insights::InsightExtractor;
pub use next_steps::generate_next_steps;
pub use report::AnalysisReport;
pub use sentences::{ScoredSentence, Sentence, SentenceScorer};
pub use similarity::{EmbeddingSimilarity, LexicalSimilarity, SimilarityBackend};
pub use summary::{CandidateSummary, SummaryEnsembler, SummaryInputs, SummaryStrategy};
