//! Ensemble summary construction.
//!
//! Each strategy independently proposes zero or more [`CandidateSummary`]
//! values; [`merge_candidates`] is a pure function that ranks them by strategy
//! weight, drops near-duplicates, joins the best four and pads the result with
//! meeting-type context when it comes out too thin.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

use super::lexicon;
use super::sentences::ScoredSentence;
use super::text::{overlap_ratio, token_set, word_count};
use crate::models::{ActionItem, MeetingType, Transcript};

pub const MAX_EXTRACTIVE_SENTENCES: usize = 5;
pub const MAX_ACTIONS_IN_SUMMARY: usize = 3;
pub const MAX_MERGED_CANDIDATES: usize = 4;
/// Candidates with fewer words are discarded before ranking
pub const MIN_CANDIDATE_WORDS: usize = 5;
/// Token overlap with an accepted candidate above which a candidate is dropped
pub const DUPLICATE_OVERLAP: f32 = 0.7;
/// Summaries shorter than this get a meeting-type context sentence
pub const SUMMARY_WORD_FLOOR: usize = 50;
/// Summaries mentioning fewer distinct business terms get a closing sentence
pub const MIN_BUSINESS_TERMS: usize = 8;

const OUTCOME_CLOSING: &str = "Key outcomes included strategic decisions, action items, and \
    project milestones that will drive organizational success and competitive advantage.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStrategy {
    Abstractive,
    Extractive,
    TypeSpecific,
    ActionFocused,
}

impl SummaryStrategy {
    /// Strategies in descending priority
    pub const ORDER: [SummaryStrategy; 4] = [
        SummaryStrategy::Abstractive,
        SummaryStrategy::Extractive,
        SummaryStrategy::TypeSpecific,
        SummaryStrategy::ActionFocused,
    ];

    pub fn priority_weight(&self) -> u8 {
        match self {
            SummaryStrategy::Abstractive => 10,
            SummaryStrategy::Extractive => 8,
            SummaryStrategy::TypeSpecific => 7,
            SummaryStrategy::ActionFocused => 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub source_strategy: SummaryStrategy,
    pub text: String,
    pub priority_weight: u8,
}

impl CandidateSummary {
    pub fn new(source_strategy: SummaryStrategy, text: impl Into<String>) -> Self {
        Self {
            source_strategy,
            text: text.into(),
            priority_weight: source_strategy.priority_weight(),
        }
    }
}

/// Everything the strategies draw on for one transcript.
pub struct SummaryInputs<'a> {
    pub transcript: &'a Transcript,
    /// Key sentences, best first
    pub key_sentences: &'a [&'a ScoredSentence],
    /// Output of the abstractive collaborator, `None` when it failed
    pub abstractive: Option<&'a str>,
    pub action_items: &'a [ActionItem],
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SummaryEnsembler;

impl SummaryEnsembler {
    pub fn new() -> Self {
        Self
    }

    /// Proposals of every strategy, in [`SummaryStrategy::ORDER`].
    pub fn candidates(&self, inputs: &SummaryInputs<'_>) -> Vec<CandidateSummary> {
        let mut candidates = Vec::new();
        for strategy in SummaryStrategy::ORDER {
            match strategy {
                SummaryStrategy::Abstractive => {
                    candidates.extend(abstractive_candidate(inputs.abstractive))
                }
                SummaryStrategy::Extractive => {
                    candidates.extend(extractive_candidates(inputs.key_sentences))
                }
                SummaryStrategy::TypeSpecific => candidates.extend(type_specific_candidate(
                    &inputs.transcript.text,
                    inputs.transcript.meeting_type,
                )),
                SummaryStrategy::ActionFocused => {
                    candidates.extend(action_focused_candidate(inputs.action_items))
                }
            }
        }
        candidates
    }

    pub fn build_summary(&self, inputs: &SummaryInputs<'_>) -> String {
        let candidates = self.candidates(inputs);
        debug!("Merging {} summary candidates", candidates.len());
        merge_candidates(candidates, inputs.transcript.meeting_type)
    }
}

// --- Strategies ---

/// The collaborator's summary, if it produced one.
pub fn abstractive_candidate(summary: Option<&str>) -> Option<CandidateSummary> {
    summary
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| CandidateSummary::new(SummaryStrategy::Abstractive, s))
}

/// One candidate per key sentence, best first.
pub fn extractive_candidates(key_sentences: &[&ScoredSentence]) -> Vec<CandidateSummary> {
    key_sentences
        .iter()
        .take(MAX_EXTRACTIVE_SENTENCES)
        .map(|s| CandidateSummary::new(SummaryStrategy::Extractive, s.sentence.text.as_str()))
        .collect()
}

/// "Key actions: a, b, c" from the leading action items.
pub fn action_focused_candidate(action_items: &[ActionItem]) -> Option<CandidateSummary> {
    if action_items.is_empty() {
        return None;
    }
    let tasks: Vec<&str> = action_items
        .iter()
        .take(MAX_ACTIONS_IN_SUMMARY)
        .map(|a| a.task.as_str())
        .collect();
    Some(CandidateSummary::new(
        SummaryStrategy::ActionFocused,
        format!("Key actions: {}", tasks.join(", ")),
    ))
}

/// Labelled fragments pulled out with the meeting type's pattern families.
pub fn type_specific_candidate(
    transcript: &str,
    meeting_type: MeetingType,
) -> Option<CandidateSummary> {
    let elements: Vec<String> = RuleSet::for_meeting(meeting_type)
        .compiled()
        .iter()
        .filter_map(|family| family.extract(transcript))
        .collect();

    if elements.is_empty() {
        None
    } else {
        Some(CandidateSummary::new(
            SummaryStrategy::TypeSpecific,
            elements.join(". "),
        ))
    }
}

// --- Merge ---

/// Rank, deduplicate, join and pad the candidates into the final summary.
///
/// Never returns an empty string: with no usable candidate the meeting type's
/// fallback template is returned as is.
pub fn merge_candidates(mut candidates: Vec<CandidateSummary>, meeting_type: MeetingType) -> String {
    candidates.retain(|c| word_count(&c.text) >= MIN_CANDIDATE_WORDS);
    // Stable: equal weights keep proposal order
    candidates.sort_by(|a, b| b.priority_weight.cmp(&a.priority_weight));

    let mut accepted: Vec<(CandidateSummary, _)> = Vec::new();
    for candidate in candidates {
        if accepted.len() == MAX_MERGED_CANDIDATES {
            break;
        }
        let tokens = token_set(&candidate.text);
        let duplicate = accepted
            .iter()
            .any(|(_, seen)| overlap_ratio(&tokens, seen) > DUPLICATE_OVERLAP);
        if !duplicate {
            accepted.push((candidate, tokens));
        }
    }

    if accepted.is_empty() {
        return fallback_summary(meeting_type).to_string();
    }

    let parts: Vec<String> = accepted
        .iter()
        .map(|(c, _)| {
            let part = c.text.trim().trim_end_matches(['.', ';', ',']).trim_end();
            if part.ends_with(['?', '!']) {
                part.to_string()
            } else {
                format!("{}.", part)
            }
        })
        .collect();
    let mut summary = parts.join(" ");

    if word_count(&summary) < SUMMARY_WORD_FLOOR {
        summary.push(' ');
        summary.push_str(context_sentence(meeting_type));
    }
    if lexicon::BUSINESS_DOMAIN.distinct_count(&summary) < MIN_BUSINESS_TERMS {
        summary.push(' ');
        summary.push_str(OUTCOME_CLOSING);
    }
    summary
}

/// Meeting-type sentence appended to thin summaries.
pub fn context_sentence(meeting_type: MeetingType) -> &'static str {
    match meeting_type {
        MeetingType::Executive => {
            "This executive meeting covered critical strategic decisions, budget allocations, \
             and key performance targets that will drive organizational growth and competitive \
             advantage."
        }
        MeetingType::Planning | MeetingType::SprintPlanning => {
            "This planning meeting focused on project roadmap development, resource allocation, \
             timeline optimization, and team coordination for successful delivery."
        }
        MeetingType::Technical => {
            "This technical meeting addressed system architecture improvements, performance \
             optimization, security enhancements, and implementation strategies."
        }
        MeetingType::Budget => {
            "This budget meeting covered financial planning, cost analysis, resource allocation, \
             and investment decisions for optimal fiscal management."
        }
        MeetingType::General | MeetingType::Client => {
            "This meeting covered important project discussions, strategic planning decisions, \
             and key action items requiring immediate attention and follow-up."
        }
    }
}

/// Template returned when no strategy produced anything usable.
pub fn fallback_summary(meeting_type: MeetingType) -> &'static str {
    match meeting_type {
        MeetingType::Executive => {
            "Executive meeting focused on strategic leadership decisions, organizational \
             direction, and high-level planning initiatives."
        }
        MeetingType::Planning | MeetingType::SprintPlanning => {
            "Planning meeting covered project coordination, resource management, and timeline \
             optimization strategies."
        }
        MeetingType::Technical => {
            "Technical meeting addressed system improvements, performance optimization, and \
             implementation strategies."
        }
        MeetingType::Budget => {
            "Budget meeting covered financial planning, cost management, and resource \
             allocation decisions."
        }
        MeetingType::General | MeetingType::Client => {
            "Meeting focused on important project discussions, strategic planning, and team \
             coordination."
        }
    }
}

// --- Type-specific pattern families ---

/// A labelled group of alternative patterns. The first pattern with any match
/// supplies up to `take` distinct captures.
struct PatternFamily {
    label: &'static str,
    patterns: &'static [&'static str],
    take: usize,
}

const BUDGET_FAMILIES: &[PatternFamily] = &[
    PatternFamily {
        label: "Budget considerations",
        patterns: &[
            r"(?i)(\d+(?:\.\d+)?%)",
            r"(?i)(\$\d[\d,]*(?:\.\d+)?(?:\s?(?:k|m|thousand|million|billion))?)",
            r"(?i)(\d+ thousand)",
            r"(?i)(\d+ million)",
            r"(?i)\bbudget\D*?(\d+)",
            r"(?i)\bcosts?\D*?(\d+)",
            r"(?i)\bexpenses?\D*?(\d+)",
        ],
        take: 3,
    },
    PatternFamily {
        label: "Timeline",
        patterns: &[
            r"(?i)\bby (\w+day)\b",
            r"(?i)\b(\w+day)\b",
            r"(?i)\bdeadline\W+(\w+)",
            r"(?i)\bdue\W+(\w+)",
            r"\b(\d{1,2}/\d{1,2})\b",
            r"\b(\w+ \d+)\b",
        ],
        take: 2,
    },
];

const PLANNING_FAMILIES: &[PatternFamily] = &[
    PatternFamily {
        label: "Key deliverables",
        patterns: &[
            r"(?i)\bfeatures?\W+(\w+)",
            r"(?i)\btasks?\W+(\w+)",
            r"(?i)\bprojects?\W+(\w+)",
            r"(?i)\bdevelopment\W+(\w+)",
            r"(?i)\bimplementation\W+(\w+)",
        ],
        take: 3,
    },
    PatternFamily {
        label: "Priorities",
        patterns: &[
            r"(?i)\bpriority\W+(\w+)",
            r"(?i)\bimportant\W+(\w+)",
            r"(?i)\bcritical\W+(\w+)",
            r"(?i)\burgent\W+(\w+)",
            r"(?i)\bhigh\W+(\w+)",
        ],
        take: 2,
    },
];

const EXECUTIVE_FAMILIES: &[PatternFamily] = &[
    PatternFamily {
        label: "Strategic decisions",
        patterns: &[
            r"(?i)\bdecided\W+(?:to\s+)?(\w+)",
            r"(?i)\bapproved\W+(?:the\s+)?(\w+)",
            r"(?i)\bstrategy\W+(\w+)",
            r"(?i)\bplans?\W+(?:to\s+)?(\w+)",
            r"(?i)\bgoal\W+(\w+)",
            r"(?i)\btarget\W+(\w+)",
        ],
        take: 3,
    },
    PatternFamily {
        label: "Growth targets",
        patterns: &[
            r"(?i)\brevenue\D*?(\d+(?:\.\d+)?%)",
            r"(?i)\bgrowth\D*?(\d+(?:\.\d+)?%)",
            r"(?i)\bincrease\D*?(\d+(?:\.\d+)?%)",
            r"(?i)\btarget\D*?(\d+)",
            r"(?i)\bgoal\D*?(\d+)",
        ],
        take: 2,
    },
];

const CLIENT_FAMILIES: &[PatternFamily] = &[
    PatternFamily {
        label: "Client concerns",
        patterns: &[
            r"(?i)\bissues?\W+(?:with\s+)?(\w+)",
            r"(?i)\bproblems?\W+(?:with\s+)?(\w+)",
            r"(?i)\bconcerns?\W+(?:about\s+)?(\w+)",
            r"(?i)\bchallenges?\W+(?:with\s+)?(\w+)",
            r"(?i)\bdifficult(?:y|ies)\W+(?:with\s+)?(\w+)",
        ],
        take: 3,
    },
    PatternFamily {
        label: "Solutions",
        patterns: &[
            r"(?i)\bsolutions?\W+(?:for\s+)?(\w+)",
            r"(?i)\bfix\W+(?:the\s+)?(\w+)",
            r"(?i)\bimprove\W+(?:the\s+)?(\w+)",
            r"(?i)\bupdate\W+(?:the\s+)?(\w+)",
            r"(?i)\bnext\W+(\w+)",
        ],
        take: 2,
    },
];

const GENERAL_FAMILIES: &[PatternFamily] = &[PatternFamily {
    label: "Action items",
    patterns: &[
        r"(?i)\baction\W+(\w+)",
        r"(?i)\btasks?\W+(\w+)",
        r"(?i)\bnext\W+(\w+)",
        r"(?i)\bfollow\W+(\w+)",
        r"(?i)\bcomplete\W+(?:the\s+)?(\w+)",
    ],
    take: 3,
}];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleSet {
    Budget,
    Planning,
    Executive,
    Client,
    General,
}

impl RuleSet {
    const ALL: [RuleSet; 5] = [
        RuleSet::Budget,
        RuleSet::Planning,
        RuleSet::Executive,
        RuleSet::Client,
        RuleSet::General,
    ];

    fn for_meeting(meeting_type: MeetingType) -> Self {
        match meeting_type {
            MeetingType::Budget => RuleSet::Budget,
            MeetingType::Planning | MeetingType::SprintPlanning => RuleSet::Planning,
            MeetingType::Executive => RuleSet::Executive,
            MeetingType::Client => RuleSet::Client,
            MeetingType::General | MeetingType::Technical => RuleSet::General,
        }
    }

    fn families(self) -> &'static [PatternFamily] {
        match self {
            RuleSet::Budget => BUDGET_FAMILIES,
            RuleSet::Planning => PLANNING_FAMILIES,
            RuleSet::Executive => EXECUTIVE_FAMILIES,
            RuleSet::Client => CLIENT_FAMILIES,
            RuleSet::General => GENERAL_FAMILIES,
        }
    }

    fn compiled(self) -> &'static [CompiledFamily] {
        &COMPILED_RULES[self as usize]
    }
}

struct CompiledFamily {
    label: &'static str,
    patterns: Vec<Regex>,
    take: usize,
}

impl CompiledFamily {
    fn extract(&self, text: &str) -> Option<String> {
        self.patterns.iter().find_map(|pattern| {
            let mut found: Vec<String> = Vec::new();
            for caps in pattern.captures_iter(text) {
                let Some(m) = caps.get(1) else { continue };
                let value = m.as_str().trim().to_string();
                if !found.iter().any(|f| f.eq_ignore_ascii_case(&value)) {
                    found.push(value);
                }
                if found.len() == self.take {
                    break;
                }
            }
            (!found.is_empty()).then(|| format!("{}: {}", self.label, found.join(", ")))
        })
    }
}

static COMPILED_RULES: LazyLock<Vec<Vec<CompiledFamily>>> = LazyLock::new(|| {
    RuleSet::ALL
        .iter()
        .map(|rules| {
            rules
                .families()
                .iter()
                .map(|family| CompiledFamily {
                    label: family.label,
                    patterns: family
                        .patterns
                        .iter()
                        .map(|p| Regex::new(p).expect("Invalid regex: summary pattern"))
                        .collect(),
                    take: family.take,
                })
                .collect()
        })
        .collect()
});
