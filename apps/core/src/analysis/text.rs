//! Text helpers shared by the scorers and extractors.

use std::collections::HashSet;

/// Split a transcript into sentences.
///
/// A period ends a sentence only when followed by whitespace or the end of the
/// text (so `25.5%` stays intact) and is dropped from the fragment. `?` and `!`
/// end a sentence the same way but are kept. A newline always ends a sentence.
/// Fragments are trimmed and empty ones skipped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let at_boundary = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
        let cut = match c {
            '.' if at_boundary => Some((i, i + 1)),
            '?' | '!' if at_boundary => Some((i + 1, i + 1)),
            '\n' => Some((i, i + 1)),
            _ => None,
        };
        if let Some((end, resume)) = cut {
            push_fragment(&mut sentences, &text[start..end]);
            start = resume;
        }
    }
    push_fragment(&mut sentences, &text[start..]);
    sentences
}

fn push_fragment<'t>(sentences: &mut Vec<&'t str>, fragment: &'t str) {
    let fragment = fragment.trim().trim_end_matches('.').trim_end();
    if !fragment.is_empty() {
        sentences.push(fragment);
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Lowercased alphanumeric tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|w| w.trim_matches('\'').to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// Jaccard index of the two token sets, `0.0` when both are empty.
pub fn jaccard(a: &str, b: &str) -> f32 {
    let a = token_set(a);
    let b = token_set(b);
    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f32 / union as f32
}

/// Share of `candidate`'s tokens already present in `accepted`.
pub fn overlap_ratio(candidate: &HashSet<String>, accepted: &HashSet<String>) -> f32 {
    if candidate.is_empty() {
        return 0.0;
    }
    candidate.intersection(accepted).count() as f32 / candidate.len() as f32
}

/// Byte offset (into the lowercased haystack) of the first case-insensitive
/// occurrence of `name` that sits on word boundaries.
pub fn find_name(haystack: &str, name: &str) -> Option<usize> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let haystack = haystack.to_lowercase();
    let needle = name.to_lowercase();

    let mut from = 0;
    while let Some(offset) = haystack[from..].find(&needle) {
        let begin = from + offset;
        let end = begin + needle.len();
        let before_ok = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return Some(begin);
        }
        from = begin + needle.chars().next().map_or(1, char::len_utf8);
    }
    None
}

pub fn mentions_name(haystack: &str, name: &str) -> bool {
    find_name(haystack, name).is_some()
}

/// `next friday` -> `Next Friday`
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_terminators() {
        let sentences = split_sentences("We met today. Is it done? Yes! Moving on");
        assert_eq!(sentences, vec!["We met today", "Is it done?", "Yes!", "Moving on"]);
    }

    #[test]
    fn test_split_keeps_decimals() {
        let sentences = split_sentences("Revenue grew 25.5% this quarter. Great work.");
        assert_eq!(sentences, vec!["Revenue grew 25.5% this quarter", "Great work"]);
    }

    #[test]
    fn test_split_on_newlines_and_skip_empty() {
        let sentences = split_sentences("Sarah: hello\n\n  \nMike: hi there.\n");
        assert_eq!(sentences, vec!["Sarah: hello", "Mike: hi there"]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_jaccard() {
        assert!((jaccard("Prepare the deck", "prepare the deck.") - 1.0).abs() < 1e-6);
        assert_eq!(jaccard("", ""), 0.0);
        let j = jaccard("review budget", "review roadmap");
        assert!((j - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_find_name_respects_boundaries() {
        assert_eq!(find_name("Ask sarah about it", "Sarah"), Some(4));
        assert_eq!(find_name("Sarahs notes", "Sarah"), None);
        assert_eq!(find_name("Annie and Ann", "Ann"), Some(10));
        assert!(!mentions_name("anything", " "));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("next FRIDAY"), "Next Friday");
        assert_eq!(title_case("asap"), "Asap");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }
}
