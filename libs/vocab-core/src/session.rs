//! A single pass through a study list.

use crate::types::{SessionSummary, StudyMode, WordEntry};

/// Tracks answers while a study list is presented.
///
/// Only the first answer for a card is recorded. The session is complete
/// once the last card has been answered; cards skipped on the way count
/// toward the total as incorrect.
#[derive(Debug, Clone)]
pub struct StudySession {
    mode: StudyMode,
    words: Vec<WordEntry>,
    results: Vec<Option<bool>>,
    current: usize,
    complete: bool,
}

impl StudySession {
    pub fn new(mode: StudyMode, words: Vec<WordEntry>) -> Self {
        let results = vec![None; words.len()];
        Self {
            mode,
            words,
            results,
            current: 0,
            complete: false,
        }
    }

    pub fn mode(&self) -> StudyMode {
        self.mode
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Zero-based index of the card on display.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&WordEntry> {
        if self.complete {
            return None;
        }
        self.words.get(self.current)
    }

    /// Whether the card on display already has an answer.
    pub fn is_answered(&self) -> bool {
        matches!(self.results.get(self.current), Some(Some(_)))
    }

    /// Answer the current card and advance.
    ///
    /// Returns the word id when this is the card's first answer; the caller
    /// reports exactly that event to the repository.
    pub fn answer(&mut self, correct: bool) -> Option<String> {
        if self.complete {
            return None;
        }

        let slot = self.results.get_mut(self.current)?;
        let recorded = if slot.is_none() {
            *slot = Some(correct);
            Some(self.words[self.current].id.clone())
        } else {
            None
        };

        if self.current + 1 == self.words.len() {
            self.complete = true;
        } else {
            self.current += 1;
        }

        recorded
    }

    /// Move forward without answering. Returns false on the last card.
    pub fn next(&mut self) -> bool {
        if self.complete || self.current + 1 >= self.words.len() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move back one card. Returns false on the first card.
    pub fn previous(&mut self) -> bool {
        if self.complete || self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Result of the pass, once the last card has been answered.
    pub fn summary(&self) -> Option<SessionSummary> {
        if !self.complete {
            return None;
        }
        Some(self.tally())
    }

    /// Current tally whether or not the session is complete.
    pub fn tally(&self) -> SessionSummary {
        SessionSummary {
            correct: self.results.iter().filter(|r| **r == Some(true)).count(),
            total: self.words.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session(n: usize) -> StudySession {
        let words = (0..n)
            .map(|i| WordEntry::new(format!("word{i}"), format!("слово{i}")))
            .collect();
        StudySession::new(StudyMode::Quiz, words)
    }

    #[test]
    fn answering_every_card_completes() {
        let mut s = session(3);
        let first = s.words()[0].id.clone();

        assert_eq!(s.answer(true), Some(first));
        assert!(s.answer(false).is_some());
        assert!(!s.is_complete());
        assert!(s.answer(true).is_some());

        assert!(s.is_complete());
        assert!(s.current().is_none());
        assert_eq!(s.summary(), Some(SessionSummary { correct: 2, total: 3 }));
    }

    #[test]
    fn skipped_cards_count_toward_total() {
        let mut s = session(3);
        assert!(s.next());
        assert!(s.next());
        assert!(!s.next());
        s.answer(true);

        assert_eq!(s.summary(), Some(SessionSummary { correct: 1, total: 3 }));
    }

    #[test]
    fn reanswer_after_going_back_is_ignored() {
        let mut s = session(3);
        s.answer(false);
        assert!(s.previous());
        assert!(s.is_answered());

        assert_eq!(s.answer(true), None);
        assert_eq!(s.position(), 1);
        assert_eq!(s.tally(), SessionSummary { correct: 0, total: 3 });
    }

    #[test]
    fn incomplete_session_has_no_summary() {
        let mut s = session(2);
        s.answer(true);
        assert_eq!(s.summary(), None);
    }

    #[test]
    fn empty_session_never_completes() {
        let mut s = session(0);
        assert!(s.current().is_none());
        assert_eq!(s.answer(true), None);
        assert!(!s.next());
        assert!(!s.previous());
        assert_eq!(s.summary(), None);
    }

    #[test]
    fn no_answers_after_completion() {
        let mut s = session(1);
        assert!(s.answer(true).is_some());
        assert_eq!(s.answer(false), None);
        assert_eq!(s.summary(), Some(SessionSummary { correct: 1, total: 1 }));
    }
}
