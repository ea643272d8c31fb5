//! Readiness report.
//!
//! Probes the collaborators an analyzer was built with. The engine can always
//! analyse, so failed probes only describe how degraded the output will be.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::MeetingAnalyzer;

/// Result of a single check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub details: Option<String>,
}

impl CheckResult {
    fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            details: None,
        }
    }

    fn fail(name: &str, message: &str, details: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            details,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub checks: Vec<CheckResult>,
    pub ready: bool,
    pub summary: String,
}

impl ReadinessReport {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }
}

pub async fn check_readiness(analyzer: &MeetingAnalyzer) -> ReadinessReport {
    let checks = vec![check_summarizer(analyzer).await, check_similarity(analyzer)];

    let summary = if checks.iter().all(|c| c.passed) {
        "All collaborators available.".to_string()
    } else {
        "Some collaborators unavailable. Analysis will run degraded.".to_string()
    };

    for check in &checks {
        if check.passed {
            info!("{}: {}", check.name, check.message);
        } else {
            warn!("{}: {}", check.name, check.message);
            if let Some(details) = &check.details {
                warn!("    Details: {}", details);
            }
        }
    }
    info!("Readiness: {}", summary);

    ReadinessReport {
        checks,
        ready: true,
        summary,
    }
}

async fn check_summarizer(analyzer: &MeetingAnalyzer) -> CheckResult {
    let Some(summarizer) = analyzer.summarizer() else {
        return CheckResult::pass("summarizer", "Disabled, extractive summaries only");
    };

    match summarizer.health_check().await {
        Ok(()) => CheckResult::pass(
            "summarizer",
            &format!("{} is responding", summarizer.name()),
        ),
        Err(e) => CheckResult::fail(
            "summarizer",
            &format!("{} is not responding", summarizer.name()),
            Some(e.to_string()),
        ),
    }
}

fn check_similarity(analyzer: &MeetingAnalyzer) -> CheckResult {
    match analyzer.similarity_kind() {
        "embedding" => CheckResult::pass("similarity", "Embedding similarity loaded"),
        kind => CheckResult::pass(
            "similarity",
            &format!("Using {} similarity", kind),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::LexicalSimilarity;
    use crate::collaborators::{LengthBounds, Summarizer};
    use crate::error::{AnalysisError, Result};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StubSummarizer {
        healthy: bool,
    }

    #[async_trait]
    impl Summarizer for StubSummarizer {
        async fn summarize(&self, _text: &str, _bounds: LengthBounds) -> Result<String> {
            Ok("stub".to_string())
        }

        async fn health_check(&self) -> Result<()> {
            if self.healthy {
                Ok(())
            } else {
                Err(AnalysisError::Collaborator("connection refused".to_string()))
            }
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn analyzer(healthy: bool) -> MeetingAnalyzer {
        MeetingAnalyzer::new(
            Some(Arc::new(StubSummarizer { healthy })),
            Arc::new(LexicalSimilarity),
        )
    }

    #[tokio::test]
    async fn test_healthy_summarizer() {
        let report = check_readiness(&analyzer(true)).await;
        assert!(report.ready);
        assert!(report.all_passed());
        assert_eq!(report.check("summarizer").unwrap().message, "stub is responding");
        assert_eq!(
            report.check("similarity").unwrap().message,
            "Using lexical similarity"
        );
    }

    #[tokio::test]
    async fn test_unhealthy_summarizer_still_ready() {
        let report = check_readiness(&analyzer(false)).await;
        assert!(report.ready);
        assert!(!report.all_passed());

        let check = report.check("summarizer").unwrap();
        assert!(!check.passed);
        assert!(check.details.as_deref().unwrap().contains("connection refused"));
        assert!(report.summary.contains("degraded"));
    }

    #[tokio::test]
    async fn test_disabled_summarizer_passes() {
        let report = check_readiness(&MeetingAnalyzer::lexical()).await;
        assert!(report.all_passed());
        assert!(report.check("summarizer").unwrap().message.starts_with("Disabled"));
    }
}
