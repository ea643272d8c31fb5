use thiserror::Error;

/// Errors raised by the meeting analysis engine.
///
/// Only `Input`, `Timeout` and `Config` ever reach a caller of
/// [`crate::analysis::MeetingAnalyzer::analyze`]. `Collaborator` and
/// `Internal` are produced inside the pipeline and recovered there.
#[derive(Debug, Error, Clone)]
pub enum AnalysisError {
    /// The transcript or its metadata was rejected before any scoring began.
    #[error("Input error: {0}")]
    Input(String),

    /// A model collaborator (summarizer or embedder) failed.
    #[error("Collaborator failure: {0}")]
    Collaborator(String),

    /// Unexpected failure inside scoring or extraction.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The caller-level deadline expired before the analysis finished.
    #[error("Analysis timed out: {0}")]
    Timeout(String),

    /// Invalid or missing engine configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    /// Whether the pipeline is expected to recover from this error on its own.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AnalysisError::Collaborator(_) | AnalysisError::Internal(_))
    }
}

impl From<tokio::time::error::Elapsed> for AnalysisError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AnalysisError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<tokio::task::JoinError> for AnalysisError {
    fn from(err: tokio::task::JoinError) -> Self {
        AnalysisError::Internal(format!("Analysis worker failed: {}", err))
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Collaborator(format!("JSON error: {}", err))
    }
}

impl From<url::ParseError> for AnalysisError {
    fn from(err: url::ParseError) -> Self {
        AnalysisError::Config(format!("URL parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AnalysisError {
    fn from(err: validator::ValidationErrors) -> Self {
        AnalysisError::Input(format!("Validation errors: {}", err))
    }
}

impl From<regex::Error> for AnalysisError {
    fn from(err: regex::Error) -> Self {
        AnalysisError::Internal(format!("Pattern error: {}", err))
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        AnalysisError::Collaborator(format!("HTTP error: {}", err))
    }
}
