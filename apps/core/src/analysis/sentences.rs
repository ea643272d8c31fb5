//! Sentence scoring.
//!
//! Every transcript sentence gets a heuristic importance score built from
//! weighted keyword categories, its position in the meeting, its length and a
//! handful of surface signals (questions, names, dates, numbers, imperatives,
//! urgency). Filler words and very short fragments are penalised.

use serde::{Deserialize, Serialize};

use super::lexicon::{self, Lexicon};
use super::text::{mentions_name, split_sentences, word_count};
use crate::models::Transcript;

/// Category weights, most important first
pub const ACTION_WEIGHT: f32 = 3.0;
pub const DECISION_WEIGHT: f32 = 2.5;
pub const BUSINESS_WEIGHT: f32 = 2.0;
pub const TECHNICAL_WEIGHT: f32 = 1.5;
pub const MEETING_WEIGHT: f32 = 1.0;

const OPENING_BONUS: f32 = 3.0;
const CLOSING_BONUS: f32 = 2.0;
const EDGE_BONUS: f32 = 2.0;
const MIDDLE_BONUS: f32 = 1.0;
/// Share of the sentence sequence (percent) counted as "near the start/end"
const EDGE_PERCENT: usize = 30;

const SIGNAL_BONUS: f32 = 2.0;
const FILLER_PENALTY: f32 = 0.5;
const SHORT_SENTENCE_PENALTY: f32 = 1.0;
const SHORT_SENTENCE_WORDS: usize = 5;

/// Sentences must score strictly above this to count as key sentences
pub const KEY_SENTENCE_THRESHOLD: f32 = 4.0;

/// A sentence of the transcript, numbered in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub index: usize,
    pub word_count: usize,
}

/// Per-component contributions to a sentence score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keywords: f32,
    pub position: f32,
    pub length: f32,
    pub signals: f32,
    pub penalty: f32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f32 {
        self.keywords + self.position + self.length + self.signals - self.penalty
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSentence {
    pub sentence: Sentence,
    pub score: f32,
    pub breakdown: ScoreBreakdown,
}

pub struct SentenceScorer {
    categories: [(&'static Lexicon, f32); 5],
    threshold: f32,
}

impl Default for SentenceScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceScorer {
    pub fn new() -> Self {
        Self {
            categories: [
                (&*lexicon::ACTION, ACTION_WEIGHT),
                (&*lexicon::DECISION, DECISION_WEIGHT),
                (&*lexicon::BUSINESS, BUSINESS_WEIGHT),
                (&*lexicon::TECHNICAL, TECHNICAL_WEIGHT),
                (&*lexicon::MEETING, MEETING_WEIGHT),
            ],
            threshold: KEY_SENTENCE_THRESHOLD,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Split `text` into numbered sentences.
    pub fn split(&self, text: &str) -> Vec<Sentence> {
        split_sentences(text)
            .into_iter()
            .enumerate()
            .map(|(index, text)| Sentence {
                text: text.to_string(),
                index,
                word_count: word_count(text),
            })
            .collect()
    }

    /// Score every sentence of the transcript, best first.
    ///
    /// Ties keep reading order.
    pub fn score_sentences(&self, transcript: &Transcript) -> Vec<ScoredSentence> {
        let sentences = self.split(&transcript.text);
        let total = sentences.len();

        let mut scored: Vec<ScoredSentence> = sentences
            .into_iter()
            .map(|sentence| {
                let breakdown = self.breakdown(&sentence, total, &transcript.participants);
                ScoredSentence {
                    score: breakdown.total(),
                    sentence,
                    breakdown,
                }
            })
            .collect();

        // sort_by is stable and the input is in index order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }

    /// The best `limit` sentences scoring above the acceptance threshold.
    pub fn key_sentences<'a>(
        &self,
        scored: &'a [ScoredSentence],
        limit: usize,
    ) -> Vec<&'a ScoredSentence> {
        scored
            .iter()
            .filter(|s| s.score > self.threshold)
            .take(limit)
            .collect()
    }

    pub fn breakdown(
        &self,
        sentence: &Sentence,
        total_sentences: usize,
        participants: &[String],
    ) -> ScoreBreakdown {
        ScoreBreakdown {
            keywords: self.keyword_score(&sentence.text),
            position: position_score(sentence.index, total_sentences),
            length: length_score(sentence.word_count),
            signals: signal_score(&sentence.text, participants),
            penalty: quality_penalty(&sentence.text, sentence.word_count),
        }
    }

    fn keyword_score(&self, text: &str) -> f32 {
        self.categories
            .iter()
            .map(|(lexicon, weight)| lexicon.count(text) as f32 * weight)
            .sum()
    }
}

fn position_score(index: usize, total: usize) -> f32 {
    if index == 0 {
        return OPENING_BONUS;
    }
    if index + 1 == total {
        return CLOSING_BONUS;
    }
    let near_start = index * 100 < total * EDGE_PERCENT;
    let near_end = index * 100 >= total * (100 - EDGE_PERCENT);
    if near_start || near_end {
        EDGE_BONUS
    } else {
        MIDDLE_BONUS
    }
}

fn length_score(words: usize) -> f32 {
    match words {
        15..=35 => 3.0,
        10..=50 => 2.0,
        5..=60 => 1.0,
        _ => 0.0,
    }
}

fn signal_score(text: &str, participants: &[String]) -> f32 {
    let signals = [
        text.contains('?'),
        participants.iter().any(|p| mentions_name(text, p)),
        lexicon::DATE_TIME.contains(text),
        text.chars().any(|c| c.is_ascii_digit() || c == '%'),
        lexicon::IMPERATIVE.contains(text),
        lexicon::URGENCY.contains(text),
    ];
    signals.iter().filter(|hit| **hit).count() as f32 * SIGNAL_BONUS
}

fn quality_penalty(text: &str, words: usize) -> f32 {
    let mut penalty = lexicon::FILLER.count(text) as f32 * FILLER_PENALTY;
    if words < SHORT_SENTENCE_WORDS {
        penalty += SHORT_SENTENCE_PENALTY;
    }
    penalty
}
