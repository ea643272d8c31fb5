//! Meeting Analyzer - main orchestrator of the analysis engine.
//!
//! Validates the request, asks the abstractive collaborator for a summary,
//! then runs the deterministic pipeline (sentence scoring, action items,
//! summary ensemble, health, insights, next steps) on a blocking worker.
//!
//! Any failure inside the pipeline degrades to a first/last sentence summary
//! and cue-only action items instead of failing the call.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::action_items::{fallback_action_items, ActionItemExtractor};
use super::health::HealthScorer;
use super::insights::InsightExtractor;
use super::next_steps::generate_next_steps;
use super::report::AnalysisReport;
use super::sentences::{ScoredSentence, SentenceScorer};
use super::similarity::{EmbeddingSimilarity, LexicalSimilarity, SimilarityBackend};
use super::summary::{SummaryEnsembler, SummaryInputs, MAX_EXTRACTIVE_SENTENCES};
use super::text::{split_sentences, truncate_chars};
use crate::collaborators::{FastEmbedder, LengthBounds, LlamaSummarizer, Summarizer};
use crate::config::EngineConfig;
use crate::error::{AnalysisError, Result};
use crate::models::{ActionItem, AnalysisRequest, Insight, Transcript};

/// Longest first/last sentence summary of the degraded path
const FALLBACK_SUMMARY_CHARS: usize = 200;

/// What the pipeline contributes to a report
struct PipelineOutput {
    summary: String,
    action_items: Vec<ActionItem>,
    health_score: f32,
    insights: Vec<Insight>,
    next_steps: Vec<String>,
    key_sentences: Vec<ScoredSentence>,
}

/// Entry point of the engine. Cheap to share behind an `Arc`.
pub struct MeetingAnalyzer {
    summarizer: Option<Arc<dyn Summarizer>>,
    similarity: Arc<dyn SimilarityBackend>,
}

impl Default for MeetingAnalyzer {
    fn default() -> Self {
        Self::lexical()
    }
}

impl MeetingAnalyzer {
    pub fn new(
        summarizer: Option<Arc<dyn Summarizer>>,
        similarity: Arc<dyn SimilarityBackend>,
    ) -> Self {
        Self {
            summarizer,
            similarity,
        }
    }

    /// No abstractive collaborator, lexical similarity only
    pub fn lexical() -> Self {
        Self::new(None, Arc::new(LexicalSimilarity))
    }

    /// Build the analyzer with whichever collaborators the configuration enables.
    ///
    /// An embedding model that fails to load downgrades to lexical similarity.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let summarizer: Option<Arc<dyn Summarizer>> = if config.summarizer_enabled {
            let summarizer = LlamaSummarizer::from_config(config)?;
            info!("Abstractive summarizer: {}", config.summarizer_url);
            Some(Arc::new(summarizer))
        } else {
            info!("Abstractive summarizer disabled");
            None
        };

        let similarity: Arc<dyn SimilarityBackend> = if config.embeddings_enabled {
            match FastEmbedder::try_new(
                config.embeddings_cache_dir.clone(),
                config.embedding_cache_capacity()?,
            ) {
                Ok(embedder) => Arc::new(EmbeddingSimilarity::new(Arc::new(embedder))),
                Err(e) => {
                    warn!("Embedding model unavailable, using lexical similarity: {}", e);
                    Arc::new(LexicalSimilarity)
                }
            }
        } else {
            Arc::new(LexicalSimilarity)
        };

        Ok(Self::new(summarizer, similarity))
    }

    pub fn summarizer(&self) -> Option<&Arc<dyn Summarizer>> {
        self.summarizer.as_ref()
    }

    pub fn similarity_kind(&self) -> &'static str {
        self.similarity.kind()
    }

    /// Analyze one transcript.
    ///
    /// Only input errors are returned; collaborator and pipeline failures are
    /// absorbed and mark the report as degraded.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport> {
        let start = Instant::now();

        // 1. Validate before doing any work
        let transcript = request.into_transcript()?;
        info!(
            "Analyzing {} meeting: {} words, {} participants",
            transcript.meeting_type,
            transcript.word_count(),
            transcript.participants.len()
        );

        let mut report = AnalysisReport::new(transcript.meeting_type);
        report.similarity_backend = self.similarity.kind().to_string();

        // 2. Abstractive candidate
        let abstractive = self.abstractive_summary(&transcript).await;

        // 3. Deterministic pipeline on a blocking worker
        let worker_transcript = transcript.clone();
        let similarity = Arc::clone(&self.similarity);
        let outcome = tokio::task::spawn_blocking(move || {
            run_pipeline(&worker_transcript, abstractive.as_deref(), similarity)
        })
        .await
        .map_err(AnalysisError::from)
        .and_then(|result| result);

        let output = match outcome {
            Ok(output) => output,
            Err(e) => {
                warn!("Analysis pipeline failed, using fallback: {}", e);
                report.degraded = true;
                fallback_pipeline(&transcript)
            }
        };

        // 4. Assemble
        report.summary = output.summary;
        report.action_items = output.action_items;
        report.health_score = output.health_score;
        report.insights = output.insights;
        report.next_steps = output.next_steps;
        report.key_sentences = output.key_sentences;
        report.processing_time_ms = start.elapsed().as_millis() as u64;
        report.generated_at = Utc::now();

        info!(
            "Analysis {} done in {}ms: {}",
            report.analysis_id,
            report.processing_time_ms,
            report.log_line()
        );
        Ok(report)
    }

    /// [`Self::analyze`] under a deadline; partial work is dropped on expiry.
    pub async fn analyze_with_timeout(
        &self,
        request: AnalysisRequest,
        deadline: Duration,
    ) -> Result<AnalysisReport> {
        timeout(deadline, self.analyze(request)).await?
    }

    async fn abstractive_summary(&self, transcript: &Transcript) -> Option<String> {
        let summarizer = self.summarizer.as_ref()?;
        let bounds = LengthBounds::for_word_count(transcript.word_count());

        match summarizer.summarize(&transcript.text, bounds).await {
            Ok(summary) => {
                debug!("Abstractive summary from {}", summarizer.name());
                Some(summary)
            }
            Err(e) => {
                warn!("Abstractive summary from {} failed: {}", summarizer.name(), e);
                None
            }
        }
    }
}

fn run_pipeline(
    transcript: &Transcript,
    abstractive: Option<&str>,
    similarity: Arc<dyn SimilarityBackend>,
) -> Result<PipelineOutput> {
    let scorer = SentenceScorer::new();

    // 1. Score sentences
    let scored = scorer.score_sentences(transcript);
    let key_sentences = scorer.key_sentences(&scored, MAX_EXTRACTIVE_SENTENCES);

    // 2. Action items
    let action_items = ActionItemExtractor::new(similarity)
        .extract_action_items(&transcript.text, &transcript.participants)?;

    // 3. Summary ensemble
    let summary = SummaryEnsembler::new().build_summary(&SummaryInputs {
        transcript,
        key_sentences: &key_sentences,
        abstractive,
        action_items: &action_items,
    });

    // 4. Health
    let health_score = HealthScorer::new().score(
        &transcript.text,
        transcript.duration_minutes,
        transcript.participants.len(),
        action_items.len(),
    );

    // 5. Insights
    let insights = InsightExtractor::new().extract_insights(&transcript.text);

    // 6. Next steps
    let next_steps = generate_next_steps(&action_items);

    Ok(PipelineOutput {
        summary,
        health_score,
        insights,
        next_steps,
        key_sentences: key_sentences.into_iter().cloned().collect(),
        action_items,
    })
}

/// Simplest deterministic rendition of the pipeline.
fn fallback_pipeline(transcript: &Transcript) -> PipelineOutput {
    let action_items = fallback_action_items(&transcript.text, &transcript.participants);
    let health_score = HealthScorer::new().score(
        &transcript.text,
        transcript.duration_minutes,
        transcript.participants.len(),
        action_items.len(),
    );

    PipelineOutput {
        summary: fallback_summary_text(&transcript.text),
        health_score,
        insights: vec![],
        next_steps: generate_next_steps(&action_items),
        key_sentences: vec![],
        action_items,
    }
}

/// First and last sentence, capped at [`FALLBACK_SUMMARY_CHARS`].
fn fallback_summary_text(text: &str) -> String {
    let sentences = split_sentences(text);
    let summary = match (sentences.first(), sentences.last()) {
        (Some(first), Some(last)) if sentences.len() > 2 => format!("{}. {}.", first, last),
        _ => text.to_string(),
    };

    if summary.chars().count() > FALLBACK_SUMMARY_CHARS {
        format!("{}...", truncate_chars(&summary, FALLBACK_SUMMARY_CHARS))
    } else {
        summary
    }
}
