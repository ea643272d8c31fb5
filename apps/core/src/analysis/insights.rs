//! Insight mining.
//!
//! One insight per lexicon family (decision, risk, opportunity, financial):
//! the first substantial sentence that mentions the family. Transcripts with
//! none of those get frequency-based themes instead.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::lexicon::{self, Lexicon};
use super::text::{split_sentences, title_case, tokenize};
use crate::models::{Insight, InsightCategory};

pub const MAX_INSIGHTS: usize = 5;
/// Sentences must be longer than this (in characters) to become an insight
const MIN_INSIGHT_SENTENCE_CHARS: usize = 30;
/// Theme words must be longer than this
const MIN_THEME_WORD_CHARS: usize = 4;
const MAX_THEMES: usize = 3;
/// Below this many fallback insights, every generic insight is appended
const MIN_FALLBACK_INSIGHTS: usize = 2;

const GENERIC_INSIGHTS: [&str; 2] = [
    "Meeting focused on strategic planning and execution",
    "Action items and next steps clearly defined",
];

static FAMILIES: [(InsightCategory, &LazyLock<Lexicon>); 4] = [
    (InsightCategory::Decision, &lexicon::INSIGHT_DECISION),
    (InsightCategory::Risk, &lexicon::INSIGHT_RISK),
    (InsightCategory::Opportunity, &lexicon::INSIGHT_OPPORTUNITY),
    (InsightCategory::Financial, &lexicon::INSIGHT_FINANCIAL),
];

#[derive(Debug, Default, Clone, Copy)]
pub struct InsightExtractor;

impl InsightExtractor {
    pub fn new() -> Self {
        Self
    }

    /// At most [`MAX_INSIGHTS`] insights, family order first.
    pub fn extract_insights(&self, transcript: &str) -> Vec<Insight> {
        let sentences: Vec<&str> = split_sentences(transcript)
            .into_iter()
            .filter(|s| s.chars().count() > MIN_INSIGHT_SENTENCE_CHARS)
            .collect();

        let mut insights: Vec<Insight> = FAMILIES
            .iter()
            .filter_map(|(category, family)| {
                sentences
                    .iter()
                    .find(|s| family.contains(s))
                    .map(|s| Insight::new(*category, *s))
            })
            .collect();

        if insights.is_empty() {
            insights = theme_insights(transcript);
        }
        insights.truncate(MAX_INSIGHTS);
        insights
    }
}

/// Frequency-based fallback: recurring long words plus a few topical cues.
fn theme_insights(transcript: &str) -> Vec<Insight> {
    let tokens = tokenize(transcript);
    let stopwords: HashSet<&str> = lexicon::STOPWORDS_EN.iter().copied().collect();

    // word -> (count, first position)
    let mut frequency: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, word) in tokens.iter().enumerate() {
        if word.chars().count() <= MIN_THEME_WORD_CHARS || stopwords.contains(word.as_str()) {
            continue;
        }
        frequency.entry(word.as_str()).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = frequency
        .into_iter()
        .filter(|(_, (count, _))| *count > 1)
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    let mut insights: Vec<Insight> = ranked
        .into_iter()
        .take(MAX_THEMES)
        .map(|(word, count, _)| {
            Insight::new(
                InsightCategory::Thematic,
                format!("Key theme: {} (mentioned {} times)", title_case(word), count),
            )
        })
        .collect();

    if any_token(&tokens, |t| t.starts_with("budget")) {
        insights.push(Insight::new(
            InsightCategory::Thematic,
            "Financial planning and budget allocation discussed",
        ));
    }
    if any_token(&tokens, |t| t.starts_with("deadline") || t == "due") {
        insights.push(Insight::new(
            InsightCategory::Thematic,
            "Time-sensitive deliverables identified",
        ));
    }
    if any_token(&tokens, |t| t.starts_with("team") || t.starts_with("collaborat")) {
        insights.push(Insight::new(
            InsightCategory::Thematic,
            "Team coordination and collaboration emphasized",
        ));
    }

    if insights.len() < MIN_FALLBACK_INSIGHTS {
        insights.extend(
            GENERIC_INSIGHTS
                .iter()
                .map(|generic| Insight::new(InsightCategory::Thematic, *generic)),
        );
    }
    insights
}

fn any_token(tokens: &[String], pred: impl Fn(&str) -> bool) -> bool {
    tokens.iter().any(|t| pred(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> InsightExtractor {
        InsightExtractor::new()
    }

    #[test]
    fn test_one_insight_per_family() {
        let transcript = "We decided to move the launch to the second week of May. \
                          We also decided to freeze hiring for now. \
                          The main risk is that the vendor slips their delivery. \
                          There is a big opportunity in the enterprise segment. \
                          The new budget covers two extra contractors.";
        let insights = extractor().extract_insights(transcript);

        let categories: Vec<InsightCategory> = insights.iter().map(|i| i.category).collect();
        assert_eq!(
            categories,
            vec![
                InsightCategory::Decision,
                InsightCategory::Risk,
                InsightCategory::Opportunity,
                InsightCategory::Financial
            ]
        );
        assert_eq!(
            insights[0].text,
            "We decided to move the launch to the second week of May"
        );
    }

    #[test]
    fn test_short_sentences_ignored() {
        // Mentions a risk, but too short to be an insight
        let insights = extractor().extract_insights("Risk noted. Risk noted again today.");
        assert!(insights.iter().all(|i| i.category == InsightCategory::Thematic));
    }

    #[test]
    fn test_theme_fallback() {
        let transcript = "Marketing update for the launch. Marketing wants banners. \
                          Marketing and design sync weekly. Design reviews banners.";
        let insights = extractor().extract_insights(transcript);
        assert_eq!(
            insights[0].text,
            "Key theme: Marketing (mentioned 3 times)"
        );
        assert_eq!(insights[1].text, "Key theme: Banners (mentioned 2 times)");
        assert_eq!(insights[2].text, "Key theme: Design (mentioned 2 times)");
        assert!(insights.len() <= MAX_INSIGHTS);
    }

    #[test]
    fn test_fallback_pads_with_generic() {
        let insights = extractor().extract_insights("Hello everyone, short call today.");
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].text, GENERIC_INSIGHTS[0]);
        assert_eq!(insights[1].text, GENERIC_INSIGHTS[1]);
    }

    #[test]
    fn test_single_theme_gets_both_generics() {
        let insights = extractor().extract_insights("Marketing meets today. Marketing leaves soon.");
        let texts: Vec<&str> = insights.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Key theme: Marketing (mentioned 2 times)",
                GENERIC_INSIGHTS[0],
                GENERIC_INSIGHTS[1],
            ]
        );
    }

    #[test]
    fn test_topical_cues() {
        let insights = extractor().extract_insights("Team sync. Deadline is close.");
        let texts: Vec<&str> = insights.iter().map(|i| i.text.as_str()).collect();
        assert!(texts.contains(&"Time-sensitive deliverables identified"));
        assert!(texts.contains(&"Team coordination and collaboration emphasized"));
    }

    #[test]
    fn test_bounded() {
        let transcript = "alpha bravo charlie delta echo ".repeat(3)
            + "budgets team deadline collaboration";
        assert!(extractor().extract_insights(&transcript).len() <= MAX_INSIGHTS);
    }
}
