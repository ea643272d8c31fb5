//! Resilience Tests
//!
//! Collaborator outages, a crashing pipeline worker and caller deadlines.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::time::Duration;

use super::mocks::{
    scenario_participants, FailingSummarizer, PanickingSimilarity, SlowSummarizer, SCENARIO,
};
use crate::analysis::{LexicalSimilarity, MeetingAnalyzer};
use crate::error::AnalysisError;
use crate::models::{AnalysisRequest, Priority, TBD};

fn scenario_request() -> AnalysisRequest {
    AnalysisRequest::new(SCENARIO, scenario_participants(), "executive", 30).unwrap()
}

#[tokio::test]
async fn test_failing_summarizer_still_summarizes() {
    let summarizer = Arc::new(FailingSummarizer::default());
    let calls = summarizer.calls.clone();
    let analyzer = MeetingAnalyzer::new(Some(summarizer), Arc::new(LexicalSimilarity));

    let report = analyzer.analyze(scenario_request()).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!report.summary.trim().is_empty());
    assert!(!report.degraded);
    assert!(report.summary.contains("revenue"));
}

#[tokio::test]
async fn test_failing_summarizer_with_no_usable_strategy_uses_template() {
    let analyzer = MeetingAnalyzer::new(
        Some(Arc::new(FailingSummarizer::default())),
        Arc::new(LexicalSimilarity),
    );
    let request =
        AnalysisRequest::new("ok ok ok. hm. yes yes", vec![], "technical", 5).unwrap();

    let report = analyzer.analyze(request).await.unwrap();
    assert!(report.summary.starts_with("Technical"));
    assert!(report.action_items.is_empty());
    assert_eq!(report.next_steps, vec!["No specific next steps identified"]);
}

#[tokio::test]
async fn test_input_error_skips_collaborators() {
    let summarizer = Arc::new(FailingSummarizer::default());
    let calls = summarizer.calls.clone();
    let analyzer = MeetingAnalyzer::new(Some(summarizer), Arc::new(LexicalSimilarity));

    let result = analyzer
        .analyze(AnalysisRequest::new("tiny", vec![], "general", 30).unwrap())
        .await;

    assert!(matches!(result, Err(AnalysisError::Input(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_worker_panic_falls_back() {
    let analyzer = MeetingAnalyzer::new(None, Arc::new(PanickingSimilarity));

    let report = analyzer.analyze(scenario_request()).await.unwrap();

    assert!(report.degraded);
    // Two sentences: the whole transcript is the summary
    assert_eq!(report.summary, SCENARIO);
    assert!(report.insights.is_empty());
    assert!((0.0..=10.0).contains(&report.health_score));

    assert_eq!(report.action_items.len(), 1);
    let item = &report.action_items[0];
    assert_eq!(item.task, "increase Q4 revenue by 25%");
    assert_eq!(item.assignee, "CEO");
    assert_eq!(item.due_date, TBD);
    assert_eq!(item.priority, Priority::Medium);
    assert_eq!(report.next_steps, vec!["Follow up on: increase Q4 revenue by 25%"]);
}

#[tokio::test]
async fn test_fallback_assigns_round_robin() {
    let analyzer = MeetingAnalyzer::new(None, Arc::new(PanickingSimilarity));
    let request = AnalysisRequest::new(
        "We need to renew the domain. Bo should call the landlord. \
         Cy will order new chairs. That is all for today.",
        vec!["Ann".to_string(), "Bo".to_string()],
        "general",
        15,
    )
    .unwrap();

    let report = analyzer.analyze(request).await.unwrap();
    assert!(report.degraded);

    let assignees: Vec<&str> = report.action_items.iter().map(|a| a.assignee.as_str()).collect();
    assert_eq!(assignees, vec!["Ann", "Bo", "Ann"]);
    assert!(report.action_items.iter().all(|a| a.due_date == TBD));
    assert!(report.summary.starts_with("We need to renew the domain. That is all for today."));
}

#[tokio::test]
async fn test_timeout_discards_work() {
    let analyzer = MeetingAnalyzer::new(
        Some(Arc::new(SlowSummarizer {
            delay: Duration::from_secs(5),
        })),
        Arc::new(LexicalSimilarity),
    );

    let result = analyzer
        .analyze_with_timeout(scenario_request(), Duration::from_millis(50))
        .await;
    assert!(matches!(result, Err(AnalysisError::Timeout(_))));
}

#[tokio::test]
async fn test_generous_deadline_completes() {
    let analyzer = MeetingAnalyzer::lexical();
    let report = analyzer
        .analyze_with_timeout(scenario_request(), Duration::from_secs(30))
        .await
        .unwrap();
    assert!(!report.summary.is_empty());
}

#[tokio::test]
async fn test_concurrent_analyses_are_independent() {
    let analyzer = Arc::new(MeetingAnalyzer::lexical());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let analyzer = Arc::clone(&analyzer);
            tokio::spawn(async move { analyzer.analyze(scenario_request()).await })
        })
        .collect();

    let mut health = Vec::new();
    for handle in handles {
        let report = handle.await.unwrap().unwrap();
        health.push(report.health_score);
    }
    assert!(health.windows(2).all(|w| w[0] == w[1]));
}
