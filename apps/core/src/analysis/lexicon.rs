//! Static keyword tables.
//!
//! Every vocabulary the engine relies on lives here as a plain `&'static [&str]`
//! table and is compiled exactly once into a case-insensitive regex. Swapping a
//! table changes what is recognised without touching any scoring algorithm.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// How terms of a lexicon are anchored against the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchMode {
    /// Whole words or phrases only (`\bterm\b`)
    Word,
    /// Any word starting with the term (`\bterm`), e.g. `discuss` matches `discussed`
    Stem,
}

/// A compiled keyword table.
pub struct Lexicon {
    pattern: Regex,
}

impl Lexicon {
    fn compile(terms: &'static [&'static str], mode: MatchMode) -> Self {
        let mut sorted: Vec<&str> = terms.to_vec();
        // Longest first so that "need to" wins over "need" at the same offset
        sorted.sort_by(|a, b| b.len().cmp(&a.len()));
        let alternation = sorted
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let source = match mode {
            MatchMode::Word => format!(r"(?i)\b(?:{})\b", alternation),
            MatchMode::Stem => format!(r"(?i)\b(?:{})", alternation),
        };
        let pattern = Regex::new(&source).expect("Invalid regex: lexicon alternation");
        Self { pattern }
    }

    pub fn words(terms: &'static [&'static str]) -> Self {
        Self::compile(terms, MatchMode::Word)
    }

    pub fn stems(terms: &'static [&'static str]) -> Self {
        Self::compile(terms, MatchMode::Stem)
    }

    /// Number of (non-overlapping) occurrences in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }

    /// Number of distinct terms present in `text`.
    pub fn distinct_count(&self, text: &str) -> usize {
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Leftmost occurrence, if any.
    #[cfg(test)]
    fn first_match<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern.find(text).map(|m| m.as_str())
    }
}

// --- Sentence scoring categories ---

const ACTION_TERMS: &[&str] = &[
    "will", "need to", "needs to", "should", "must", "finalize", "prepare", "coordinate",
    "launch", "review", "identify", "track", "complete", "finish", "implement", "execute",
    "deliver", "schedule", "organize", "handle", "develop", "create", "build", "design",
    "deploy", "release", "monitor", "plan", "update", "report", "present", "document",
    "test", "validate", "verify", "fix", "resolve", "address", "prioritize", "follow up",
    "assign", "send", "share", "increase", "reduce", "improve",
];

const DECISION_TERMS: &[&str] = &[
    "approved", "rejected", "agreed", "decided", "confirmed", "finalized", "accepted",
    "declined", "chosen", "selected", "prioritized", "endorsed", "authorized", "recommended",
    "proposed", "assigned", "voted", "determined", "resolved", "settled", "concluded",
    "cancelled", "postponed", "delayed", "suspended",
];

const BUSINESS_TERMS: &[&str] = &[
    "budget", "revenue", "financial", "finance", "projections", "marketing", "sprint",
    "features", "platform", "migration", "deadline", "timeline", "hiring", "strategic",
    "allocation", "allocations", "cost", "costs", "savings", "opportunities", "client",
    "customer", "project", "team", "quarter", "q1", "q2", "q3", "q4", "annual", "monthly",
    "target", "goal", "profit", "loss", "investment", "funding", "expense", "stakeholder",
    "investor", "partner", "vendor", "product", "deliverable", "growth", "expansion",
    "efficiency", "productivity", "performance", "roi", "analysis", "sales", "pricing",
];

const TECHNICAL_TERMS: &[&str] = &[
    "api", "integration", "deployment", "configuration", "infrastructure", "architecture",
    "database", "server", "bug", "security", "scalability", "reliability", "latency",
    "microservice", "container", "kubernetes", "docker", "cloud", "aws", "azure", "cache",
    "backup", "monitoring", "logging", "dashboard", "metrics", "analytics", "pipeline",
    "module", "feature", "endpoint", "data", "algorithm", "model", "backend", "frontend",
];

const MEETING_TERMS: &[&str] = &[
    "agenda", "minutes", "notes", "summary", "recap", "discussion", "feedback", "suggestion",
    "proposal", "next steps", "action items", "tasks", "responsibilities", "owner",
    "ownership", "due date", "calendar", "call", "session", "workshop", "presentation",
    "demo", "status", "progress", "briefing", "follow-up", "sync", "check-in", "meeting",
];

pub static ACTION: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::words(ACTION_TERMS));
pub static DECISION: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::words(DECISION_TERMS));
pub static BUSINESS: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::words(BUSINESS_TERMS));
pub static TECHNICAL: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::words(TECHNICAL_TERMS));
pub static MEETING: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::words(MEETING_TERMS));

// --- Sentence signals ---

const FILLER_TERMS: &[&str] = &[
    "um", "uh", "er", "ah", "hmm", "like", "you know", "basically", "actually", "literally",
    "i mean", "kind of", "sort of",
];

const URGENCY_TERMS: &[&str] = &[
    "urgent", "urgently", "critical", "asap", "immediately", "priority", "emergency",
    "crucial", "right away",
];

const IMPERATIVE_TERMS: &[&str] = &[
    "will be", "need to", "needs to", "must be", "should be", "going to", "has to",
    "have to", "plan to",
];

const WEEKDAY_TERMS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

const MONTH_TERMS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

const DATE_TIME_TERMS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "january",
    "february", "march", "april", "june", "july", "august", "september", "october",
    "november", "december", "today", "tonight", "tomorrow", "yesterday", "next week",
    "this week", "end of week", "eod", "eow", "week", "month", "quarter", "year", "q1", "q2",
    "q3", "q4",
];

pub static FILLER: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::words(FILLER_TERMS));
pub static URGENCY: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::words(URGENCY_TERMS));
pub static IMPERATIVE: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::words(IMPERATIVE_TERMS));
pub static WEEKDAYS: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::words(WEEKDAY_TERMS));
pub static MONTHS: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::words(MONTH_TERMS));
pub static DATE_TIME: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::words(DATE_TIME_TERMS));

// --- Summary coverage ---

const BUSINESS_DOMAIN_TERMS: &[&str] = &[
    "meeting", "discussed", "decided", "approved", "will", "need", "should", "important",
    "team", "project", "development", "planning", "strategy", "action", "next", "steps",
    "deadline", "timeline", "budget", "revenue", "financial", "technical", "implementation",
    "deployment", "integration", "platform", "system", "database", "api", "security",
    "performance", "quality", "success", "milestone", "objective", "goal", "target",
    "outcome", "result", "impact", "benefit", "value", "improvement", "growth", "expansion",
    "progress", "innovation", "transformation", "automation", "efficiency", "productivity",
];

pub static BUSINESS_DOMAIN: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::words(BUSINESS_DOMAIN_TERMS));

// --- Priority vocabulary ---

const HIGH_PRIORITY_TERMS: &[&str] = &[
    "urgent", "asap", "immediately", "critical", "important", "priority", "deadline", "due",
    "must", "need to", "have to", "essential", "emergency", "crisis", "top priority",
    "high priority",
];

const LOW_PRIORITY_TERMS: &[&str] = &[
    "when possible", "eventually", "sometime", "later", "when you can", "if time permits",
    "optional", "nice to have", "low priority",
];

pub static HIGH_PRIORITY: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::words(HIGH_PRIORITY_TERMS));
pub static LOW_PRIORITY: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::words(LOW_PRIORITY_TERMS));

// --- Health scoring ---

const HEALTH_DECISION_TERMS: &[&str] = &[
    "decided", "agreed", "concluded", "resolved", "approved", "rejected", "confirmed",
    "finalized",
];

const ENGAGEMENT_STEMS: &[&str] = &[
    "discuss", "review", "analyze", "evaluate", "consider", "explore", "brainstorm",
    "collaborate",
];

pub static HEALTH_DECISIONS: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::words(HEALTH_DECISION_TERMS));
pub static ENGAGEMENT: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::stems(ENGAGEMENT_STEMS));

// --- Insight families ---

const INSIGHT_DECISION_STEMS: &[&str] = &[
    "decided", "agreed", "concluded", "resolved", "approved", "rejected", "confirmed",
    "finalized", "determined", "established",
];

const INSIGHT_RISK_STEMS: &[&str] = &[
    "risk", "concern", "issue", "problem", "challenge", "obstacle", "barrier", "threat",
    "vulnerabilit", "weakness",
];

const INSIGHT_OPPORTUNITY_STEMS: &[&str] = &[
    "opportunit", "potential", "growth", "improvement", "benefit", "advantage", "possibilit",
    "chance", "prospect", "upside",
];

const INSIGHT_FINANCIAL_STEMS: &[&str] = &[
    "budget", "cost", "revenue", "profit", "investment", "financial", "money", "dollar",
    "euro", "price",
];

pub static INSIGHT_DECISION: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::stems(INSIGHT_DECISION_STEMS));
pub static INSIGHT_RISK: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::stems(INSIGHT_RISK_STEMS));
pub static INSIGHT_OPPORTUNITY: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::stems(INSIGHT_OPPORTUNITY_STEMS));
pub static INSIGHT_FINANCIAL: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::stems(INSIGHT_FINANCIAL_STEMS));

/// Stopwords ignored by the frequency-based theme extractor
pub const STOPWORDS_EN: &[&str] = &[
    "the", "and", "but", "for", "yet", "you", "she", "they", "them", "their", "theirs", "this",
    "that", "these", "those", "which", "whom", "whose", "what", "have", "been", "being",
    "would", "should", "could", "might", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "again", "further", "there", "where",
    "when", "while", "other", "some", "such", "only", "same", "than", "very", "just", "also",
    "then", "once", "always", "never", "because", "until", "although", "though", "maybe",
    "think", "really", "going", "we're", "we'll", "there's", "that's", "let's", "everyone",
];
