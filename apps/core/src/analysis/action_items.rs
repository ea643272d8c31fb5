//! Action item extraction.
//!
//! Candidate tasks come from an ordered table of cue patterns ("need to ...",
//! "will ...", "prepare ..."). Each surviving task gets an assignee, a due date
//! and a priority, near-duplicates are collapsed and the result is ranked by
//! priority.

use chrono::Utc;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::debug;

use super::lexicon;
use super::similarity::{LexicalSimilarity, SimilarityBackend};
use super::text::{find_name, split_sentences, title_case};
use crate::error::Result;
use crate::models::{ActionItem, ActionStatus, Priority, TBD};

pub const MAX_ACTION_ITEMS: usize = 5;
/// Matches shorter than this (in characters) are noise
const MIN_TASK_CHARS: usize = 10;
/// Sentences must be longer than this to be used for assignee matching
const MIN_CONTEXT_SENTENCE_CHARS: usize = 10;

/// Priority vocabulary weight inside the task phrase
const TASK_WEIGHT: f32 = 1.0;
/// Priority vocabulary weight across the whole transcript
const CONTEXT_WEIGHT: f32 = 0.5;
/// A priority tier needs strictly more than this weighted score
const PRIORITY_FLOOR: f32 = 1.0;

/// Only the leading cues are used by the degraded extraction path
const FALLBACK_CUE_COUNT: usize = 4;

struct TaskCue {
    cue: &'static str,
    /// Whether the cue word is itself part of the task ("prepare the deck")
    keep_cue: bool,
}

const fn strip(cue: &'static str) -> TaskCue {
    TaskCue {
        cue,
        keep_cue: false,
    }
}

const fn keep(cue: &'static str) -> TaskCue {
    TaskCue {
        cue,
        keep_cue: true,
    }
}

const TASK_CUES: &[TaskCue] = &[
    strip("need to"),
    strip("should"),
    strip("will"),
    strip("action item:"),
    keep("follow up on"),
    keep("prepare"),
    keep("schedule"),
    strip("can you"),
    strip("please"),
    strip("have to"),
    strip("must"),
    strip("going to"),
    strip("plan to"),
    strip("responsible for"),
    strip("take care of"),
    keep("handle"),
    strip("work on"),
    strip("focus on"),
    keep("complete"),
    keep("finish"),
    keep("deliver"),
    keep("implement"),
    keep("create"),
    keep("develop"),
    keep("build"),
];

/// Task text runs until a sentence-ending period, `!`, `?` or end of line.
const TASK_END: &str = r"(?:\.(?:\s|$)|[!?]|$)";

static TASK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    TASK_CUES
        .iter()
        .map(|c| {
            let cue = regex::escape(c.cue);
            let source = if c.keep_cue {
                format!(r"(?im)\b({}\s+.+?){}", cue, TASK_END)
            } else {
                format!(r"(?im)\b{}\s+(.+?){}", cue, TASK_END)
            };
            Regex::new(&source).expect("Invalid regex: task cue")
        })
        .collect()
});

const WEEKDAY: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";
const MONTH: &str =
    "january|february|march|april|may|june|july|august|september|october|november|december";
/// "may" alone is far more often a verb than a month
const MONTH_EXCEPT_MAY: &str =
    "january|february|march|april|june|july|august|september|october|november|december";

/// Ordered due date patterns; the first capture of the first match wins.
static DUE_DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let sources = [
        format!(r"(?i)\bby\s+((?:next\s+)?(?:{}))\b", WEEKDAY),
        r"(?i)\bby\s+(tomorrow|today|tonight|next week|next month|this week|eod|eow|end of (?:the )?(?:day|week|month|quarter|year))\b".to_string(),
        format!(r"(?i)\b(next\s+(?:{}|week|month|quarter))\b", WEEKDAY),
        r"(?i)\b(tomorrow|today|tonight|this week|this month)\b".to_string(),
        r"\b(\d{4}-\d{2}-\d{2})\b".to_string(),
        r"\b(\d{1,2}/\d{1,2}/\d{2,4})\b".to_string(),
        r"\b(\d{1,2}/\d{1,2})\b".to_string(),
        r"\b(\d{1,2}-\d{1,2})\b".to_string(),
        format!(
            r"(?i)\b((?:{})(?:\s+\d{{1,2}}(?:st|nd|rd|th)?)?|may\s+\d{{1,2}}(?:st|nd|rd|th)?)\b",
            MONTH_EXCEPT_MAY
        ),
        format!(r"(?i)\b(\d{{1,2}}(?:st|nd|rd|th)?\s+(?:of\s+)?(?:{}))\b", MONTH),
        r"(?i)\b(end of (?:the )?(?:day|week|month|quarter|year))\b".to_string(),
        r"(?i)\b(asap|immediately|urgently|right away)\b".to_string(),
        r"(?i)\b(\d{1,2}(?:st|nd|rd|th))\b".to_string(),
        format!(r"(?i)\b({})\b", WEEKDAY),
    ];
    sources
        .iter()
        .map(|s| Regex::new(s).expect("Invalid regex: due date"))
        .collect()
});

/// Hands out ids unique within one extraction call.
struct IdSequence {
    stamp: i64,
    counter: u32,
}

impl IdSequence {
    fn new() -> Self {
        Self {
            stamp: Utc::now().timestamp_millis(),
            counter: 0,
        }
    }

    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("ai_{}_{:03}", self.stamp, self.counter)
    }
}

/// Transcript sentences that mention a participant, paired with the
/// participant mentioned first.
struct SpeakerContext<'t> {
    sentences: Vec<(&'t str, &'t str)>,
}

impl<'t> SpeakerContext<'t> {
    fn new(transcript: &'t str, participants: &'t [String]) -> Self {
        let sentences = split_sentences(transcript)
            .into_iter()
            .filter(|s| s.chars().count() > MIN_CONTEXT_SENTENCE_CHARS)
            .filter_map(|s| earliest_participant(s, participants).map(|p| (s, p)))
            .collect();
        Self { sentences }
    }
}

/// Participant whose name occurs first in `text`; list order breaks ties.
fn earliest_participant<'p>(text: &str, participants: &'p [String]) -> Option<&'p str> {
    participants
        .iter()
        .filter_map(|p| find_name(text, p).map(|pos| (pos, p.as_str())))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, p)| p)
}

pub struct ActionItemExtractor {
    similarity: Arc<dyn SimilarityBackend>,
}

impl Default for ActionItemExtractor {
    fn default() -> Self {
        Self::new(Arc::new(LexicalSimilarity))
    }
}

impl ActionItemExtractor {
    pub fn new(similarity: Arc<dyn SimilarityBackend>) -> Self {
        Self { similarity }
    }

    /// Extract at most [`MAX_ACTION_ITEMS`] tasks, highest priority first.
    pub fn extract_action_items(
        &self,
        transcript: &str,
        participants: &[String],
    ) -> Result<Vec<ActionItem>> {
        let candidates = find_task_candidates(transcript, TASK_PATTERNS.len());
        let tasks = deduplicate(candidates, self.similarity.as_ref());

        let mut ranked: Vec<(String, Priority)> = tasks
            .into_iter()
            .map(|task| {
                let priority = classify_priority(&task, transcript);
                (task, priority)
            })
            .collect();
        // Stable: discovery order survives within a tier
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(MAX_ACTION_ITEMS);

        let context = SpeakerContext::new(transcript, participants);
        let mut ids = IdSequence::new();
        let mut items = Vec::with_capacity(ranked.len());
        for (task, priority) in ranked {
            let assignee = self.assign(&task, transcript, participants, &context)?;
            items.push(ActionItem {
                id: ids.next_id(),
                due_date: resolve_due_date(&task),
                task,
                assignee,
                priority,
                status: ActionStatus::Pending,
            });
        }

        debug!("Extracted {} action items", items.len());
        Ok(items)
    }

    /// Resolve who owns `task`, or [`TBD`] when nobody can be named.
    pub fn resolve_assignee(
        &self,
        task: &str,
        transcript: &str,
        participants: &[String],
    ) -> Result<String> {
        let context = SpeakerContext::new(transcript, participants);
        self.assign(task, transcript, participants, &context)
    }

    fn assign(
        &self,
        task: &str,
        transcript: &str,
        participants: &[String],
        context: &SpeakerContext<'_>,
    ) -> Result<String> {
        // 1. Named inside the task itself
        if let Some(name) = participants.iter().find(|p| find_name(task, p).is_some()) {
            return Ok(name.clone());
        }

        // 2. Most similar sentence that mentions someone
        let mut best: Option<(f32, &str)> = None;
        for &(sentence, participant) in &context.sentences {
            let score = self.similarity.similarity(task, sentence);
            if score > 0.0 && best.map_or(true, |(top, _)| score > top) {
                best = Some((score, participant));
            }
        }
        if let Some((_, participant)) = best {
            return Ok(participant.to_string());
        }

        // 3. "Name: ... task ..." speaker labels
        for participant in participants {
            let label = Regex::new(&format!(
                r"(?im)^\s*{}\s*:.*?{}",
                regex::escape(participant),
                regex::escape(task)
            ))?;
            if label.is_match(transcript) {
                return Ok(participant.clone());
            }
        }

        // 4. Default owner
        Ok(participants
            .first()
            .cloned()
            .unwrap_or_else(|| TBD.to_string()))
    }
}

/// Raw task phrases in discovery order (cue order, then position).
fn find_task_candidates(transcript: &str, cue_count: usize) -> Vec<String> {
    TASK_PATTERNS
        .iter()
        .take(cue_count)
        .flat_map(|pattern| pattern.captures_iter(transcript))
        .filter_map(|caps| caps.get(1))
        .map(|m| clean_task(m.as_str()))
        .filter(|task| task.chars().count() >= MIN_TASK_CHARS)
        .collect()
}

fn clean_task(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(|c: char| matches!(c, ',' | ';' | ':' | '.'))
        .trim_end()
        .to_string()
}

/// Keep the first task of every duplicate cluster.
fn deduplicate(candidates: Vec<String>, similarity: &dyn SimilarityBackend) -> Vec<String> {
    let mut kept: Vec<String> = Vec::new();
    for task in candidates {
        if !kept.iter().any(|k| similarity.is_duplicate(k, &task)) {
            kept.push(task);
        }
    }
    kept
}

/// First matching due date token, title-cased, or [`TBD`].
pub fn resolve_due_date(task: &str) -> String {
    DUE_DATE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(task).and_then(|c| c.get(1)))
        .map(|m| {
            let token = m.as_str();
            if token.eq_ignore_ascii_case("asap") {
                "ASAP".to_string()
            } else {
                title_case(token)
            }
        })
        .unwrap_or_else(|| TBD.to_string())
}

/// Weigh urgency against leisure vocabulary, task-local hits counting double.
pub fn classify_priority(task: &str, transcript: &str) -> Priority {
    let weigh = |lexicon: &lexicon::Lexicon| {
        lexicon.count(task) as f32 * TASK_WEIGHT + lexicon.count(transcript) as f32 * CONTEXT_WEIGHT
    };
    let high = weigh(&lexicon::HIGH_PRIORITY);
    let low = weigh(&lexicon::LOW_PRIORITY);

    if high > low && high > PRIORITY_FLOOR {
        Priority::High
    } else if low > high && low > PRIORITY_FLOOR {
        Priority::Low
    } else {
        Priority::Medium
    }
}

/// Degraded extraction used when the full pipeline fails: leading cues only,
/// lexical dedup, round-robin owners, no dates, medium priority.
pub fn fallback_action_items(transcript: &str, participants: &[String]) -> Vec<ActionItem> {
    let candidates = find_task_candidates(transcript, FALLBACK_CUE_COUNT);
    let tasks = deduplicate(candidates, &LexicalSimilarity);

    let mut ids = IdSequence::new();
    tasks
        .into_iter()
        .take(MAX_ACTION_ITEMS)
        .enumerate()
        .map(|(i, task)| ActionItem {
            id: ids.next_id(),
            task,
            assignee: if participants.is_empty() {
                TBD.to_string()
            } else {
                participants[i % participants.len()].clone()
            },
            due_date: TBD.to_string(),
            priority: Priority::Medium,
            status: ActionStatus::Pending,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::text::jaccard;
    use std::collections::HashSet;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    fn extractor() -> ActionItemExtractor {
        ActionItemExtractor::default()
    }

    const SCENARIO: &str = "CEO: We need to increase Q4 revenue by 25%. \
                            Sarah, prepare the financial analysis by Friday.";

    #[test]
    fn test_scenario_extraction() {
        let items = extractor()
            .extract_action_items(SCENARIO, &names(&["CEO", "Sarah"]))
            .unwrap();

        assert_eq!(items.len(), 2);
        let revenue = &items[0];
        assert_eq!(revenue.task, "increase Q4 revenue by 25%");
        assert_eq!(revenue.assignee, "CEO");
        assert_eq!(revenue.due_date, TBD);

        let analysis = &items[1];
        assert_eq!(analysis.task, "prepare the financial analysis by Friday");
        assert_eq!(analysis.assignee, "Sarah");
        assert_eq!(analysis.due_date, "Friday");

        for item in &items {
            assert!(matches!(item.priority, Priority::Medium | Priority::High));
            assert_eq!(item.status, ActionStatus::Pending);
        }
    }

    #[test]
    fn test_short_matches_are_noise() {
        let items = extractor()
            .extract_action_items("I will go. We should eat.", &[])
            .unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_urgent_task_is_high_priority() {
        let transcript = "Mike should fix the urgent login bug.";
        assert_eq!(
            classify_priority("fix the urgent login bug", transcript),
            Priority::High
        );
    }

    #[test]
    fn test_low_priority_vocabulary() {
        let transcript = "Anna could tidy the wiki eventually, it is optional.";
        assert_eq!(
            classify_priority("tidy the wiki eventually", transcript),
            Priority::Low
        );
        assert_eq!(
            classify_priority("tidy the wiki", "tidy the wiki"),
            Priority::Medium
        );
    }

    #[test]
    fn test_sorted_by_priority_then_discovery() {
        let transcript = "We should tidy the wiki pages. \
                          Tom must patch the critical security hole. \
                          We should archive the old tickets.";
        let items = extractor()
            .extract_action_items(transcript, &names(&["Tom"]))
            .unwrap();
        let priorities: Vec<Priority> = items.iter().map(|i| i.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(priorities, sorted);
        assert_eq!(items[0].task, "patch the critical security hole");
    }

    #[test]
    fn test_duplicates_collapse_and_cap() {
        let transcript = "We need to prepare the budget deck by Friday. \
                          Please prepare the budget deck by Friday. \
                          We should review the hiring plan. \
                          We will update the roadmap document. \
                          Can you draft the release notes today? \
                          We have to renew the vendor contracts. \
                          We must clean up the staging servers. \
                          We plan to migrate the billing database.";
        let items = extractor().extract_action_items(transcript, &[]).unwrap();

        assert!(items.len() <= MAX_ACTION_ITEMS);
        for (i, a) in items.iter().enumerate() {
            for b in items.iter().skip(i + 1) {
                assert!(jaccard(&a.task, &b.task) <= 0.7, "{} ~ {}", a.task, b.task);
            }
        }
        let ids: HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn test_no_participants_means_tbd() {
        let items = extractor()
            .extract_action_items("We need to finalize the vendor shortlist.", &[])
            .unwrap();
        assert_eq!(items[0].assignee, TBD);
    }

    #[test]
    fn test_assignee_named_in_task() {
        let participants = names(&["Anna", "Mike"]);
        let assignee = extractor()
            .resolve_assignee(
                "ask Mike to review the contract",
                "We should ask Mike to review the contract.",
                &participants,
            )
            .unwrap();
        assert_eq!(assignee, "Mike");
    }

    #[test]
    fn test_assignee_from_similar_sentence() {
        let participants = names(&["Anna", "Mike"]);
        let transcript = "Mike owns the deployment checklist for the release. \
                          We should finalize the deployment checklist.";
        let assignee = extractor()
            .resolve_assignee("finalize the deployment checklist", transcript, &participants)
            .unwrap();
        assert_eq!(assignee, "Mike");
    }

    #[test]
    fn test_assignee_from_speaker_label() {
        let participants = names(&["Anna", "Mike"]);
        // "Mike: Okay" is too short to be a context sentence
        let transcript = "Mike: Okay. The report needs an update, we will ship the release notes.";
        let assignee = extractor()
            .resolve_assignee("ship the release notes", transcript, &participants)
            .unwrap();
        assert_eq!(assignee, "Mike");
    }

    #[test]
    fn test_assignee_defaults_to_first_participant() {
        let participants = names(&["Anna", "Mike"]);
        let assignee = extractor()
            .resolve_assignee("water the plants", "Nothing relevant here at all.", &participants)
            .unwrap();
        assert_eq!(assignee, "Anna");
    }

    #[test]
    fn test_due_date_resolution() {
        assert_eq!(resolve_due_date("send it by friday"), "Friday");
        assert_eq!(resolve_due_date("send it by next Monday"), "Next Monday");
        assert_eq!(resolve_due_date("ship by end of the week"), "End Of The Week");
        assert_eq!(resolve_due_date("call them tomorrow morning"), "Tomorrow");
        assert_eq!(resolve_due_date("launch on 2024-03-15"), "2024-03-15");
        assert_eq!(resolve_due_date("pay before 3/15"), "3/15");
        assert_eq!(resolve_due_date("review in March"), "March");
        assert_eq!(resolve_due_date("launch on May 3rd"), "May 3rd");
        assert_eq!(resolve_due_date("we may revisit this"), TBD);
        assert_eq!(resolve_due_date("fix this asap"), "ASAP");
        assert_eq!(resolve_due_date("meet on tuesday"), "Tuesday");
        assert_eq!(resolve_due_date("think about it"), TBD);
    }

    #[test]
    fn test_fallback_extraction() {
        let transcript = "We need to prepare the quarterly report. \
                          Sam should call the supplier back. \
                          We will book the offsite venue.";
        let items = fallback_action_items(transcript, &names(&["Sam", "Lee"]));
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].assignee, "Sam");
        assert_eq!(items[1].assignee, "Lee");
        assert_eq!(items[2].assignee, "Sam");
        assert!(items.iter().all(|i| i.due_date == TBD));
        assert!(items.iter().all(|i| i.priority == Priority::Medium));
    }
}
