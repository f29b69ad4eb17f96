//! Answer checking for typed study modes.

use crate::types::MatchingMode;
use serde::{Deserialize, Serialize};

/// Default similarity needed for a fuzzy match.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

/// Outcome of checking a typed answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerCheck {
    pub is_correct: bool,
    /// Similarity score between 0.0 and 1.0.
    pub similarity: f64,
    pub matching_mode: MatchingMode,
}

/// Check a typed translation against the expected one.
pub fn check_answer(
    typed: &str,
    expected: &str,
    mode: MatchingMode,
    fuzzy_threshold: f64,
) -> AnswerCheck {
    let typed = normalize_whitespace(typed);
    let expected = normalize_whitespace(expected);

    let similarity = match mode {
        MatchingMode::Exact => exact_score(typed == expected),
        MatchingMode::CaseInsensitive => exact_score(typed.to_lowercase() == expected.to_lowercase()),
        MatchingMode::Fuzzy => similarity(&typed.to_lowercase(), &expected.to_lowercase()),
    };

    let is_correct = match mode {
        MatchingMode::Fuzzy => similarity >= fuzzy_threshold,
        MatchingMode::Exact | MatchingMode::CaseInsensitive => similarity == 1.0,
    };

    AnswerCheck {
        is_correct,
        similarity,
        matching_mode: mode,
    }
}

fn exact_score(matched: bool) -> f64 {
    if matched {
        1.0
    } else {
        0.0
    }
}

/// Trim and collapse runs of whitespace.
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Edit distance between two strings, counted in chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return a.len().max(b.len());
    }

    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;

        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}

/// Similarity in 0.0..=1.0 derived from the edit distance.
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f64 / longest as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("кот", ""), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("привет", "привед"), 1);
    }

    #[test]
    fn test_similarity_counts_chars_not_bytes() {
        assert_eq!(similarity("привет", "привет"), 1.0);
        let score = similarity("привет", "привед");
        assert!((score - 5.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_case_insensitive_is_default_quiz_check() {
        let result = check_answer("  Привет ", "привет", MatchingMode::default(), 0.8);
        assert!(result.is_correct);
        assert_eq!(result.matching_mode, MatchingMode::CaseInsensitive);
    }

    #[test]
    fn test_exact_respects_case() {
        assert!(check_answer("пока", "пока", MatchingMode::Exact, 0.8).is_correct);
        assert!(!check_answer("Пока", "пока", MatchingMode::Exact, 0.8).is_correct);
        assert!(check_answer("до   свидания", "до свидания", MatchingMode::Exact, 0.8).is_correct);
    }

    #[test]
    fn test_fuzzy_threshold() {
        assert!(check_answer("привед", "привет", MatchingMode::Fuzzy, 0.8).is_correct);
        assert!(!check_answer("пока", "привет", MatchingMode::Fuzzy, 0.8).is_correct);
    }
}
