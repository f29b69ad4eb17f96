//! Word repository.
//!
//! Owns the vocabulary and its counters. Each mutation is applied to a copy,
//! written to storage, and only then swapped in, so a failed write leaves the
//! in-memory collection as it was.

use crate::error::{Result, VocabError};
use crate::storage::{load_record, save_record, Storage, WORDS_KEY};
use crate::types::{dedup_key, WordEntry, WordPair, WordUpdate};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

pub struct WordRepository<S: Storage> {
    storage: S,
    words: Vec<WordEntry>,
}

impl<S: Storage> WordRepository<S> {
    /// Load the collection from storage. A missing record is an empty list.
    pub fn load(storage: S) -> Result<Self> {
        let words: Vec<WordEntry> = load_record(&storage, WORDS_KEY)?.unwrap_or_default();
        tracing::debug!(count = words.len(), "loaded words");
        Ok(Self { storage, words })
    }

    pub fn list(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&WordEntry> {
        self.words.iter().find(|w| w.id == id)
    }

    /// Look up a word by its English text, ignoring case and padding.
    pub fn find_by_english(&self, english: &str) -> Option<&WordEntry> {
        let key = dedup_key(english);
        self.words.iter().find(|w| w.key() == key)
    }

    /// Import pairs, skipping any whose English word is already present.
    ///
    /// Returns the number of entries added. A pair with an empty field, or
    /// one containing a comma or line break, rejects the whole batch.
    pub fn add_words(&mut self, pairs: &[WordPair]) -> Result<usize> {
        for pair in pairs {
            validate_field("english", &pair.english)?;
            validate_field("russian", &pair.russian)?;
        }

        let mut seen: HashSet<String> = self.words.iter().map(WordEntry::key).collect();
        let mut next = self.words.clone();

        for pair in pairs {
            let key = dedup_key(&pair.english);
            if !seen.insert(key) {
                tracing::debug!(english = %pair.english, "skipping duplicate word");
                continue;
            }
            next.push(WordEntry::new(pair.english.trim(), pair.russian.trim()));
        }

        let added = next.len() - self.words.len();
        if added > 0 {
            self.commit(next)?;
        }
        tracing::info!(added, skipped = pairs.len() - added, "imported words");
        Ok(added)
    }

    /// Record one answer for a word. Unknown ids are ignored.
    pub fn update_stats(&mut self, id: &str, correct: bool) -> Result<()> {
        self.update_stats_at(id, correct, Utc::now())
    }

    pub fn update_stats_at(&mut self, id: &str, correct: bool, now: DateTime<Utc>) -> Result<()> {
        let Some(idx) = self.position(id) else {
            tracing::debug!(id, "answer for unknown word ignored");
            return Ok(());
        };

        let mut next = self.words.clone();
        let word = &mut next[idx];
        if correct {
            word.correct_count += 1;
        } else {
            word.incorrect_count += 1;
        }
        word.last_studied = Some(now);

        self.commit(next)
    }

    /// Edit a word's text. Unknown ids are ignored.
    ///
    /// Renaming to an English word held by another entry fails with
    /// `DuplicateWord` and changes nothing.
    pub fn update_fields(&mut self, id: &str, update: WordUpdate) -> Result<()> {
        let Some(idx) = self.position(id) else {
            tracing::debug!(id, "edit for unknown word ignored");
            return Ok(());
        };

        if let Some(english) = &update.english {
            validate_field("english", english)?;
            let key = dedup_key(english);
            let collides = self
                .words
                .iter()
                .any(|w| w.id != id && w.key() == key);
            if collides {
                tracing::warn!(id, english = %english, "rename collides with existing word");
                return Err(VocabError::DuplicateWord {
                    english: english.trim().to_string(),
                });
            }
        }
        if let Some(russian) = &update.russian {
            validate_field("russian", russian)?;
        }

        let mut next = self.words.clone();
        let word = &mut next[idx];
        if let Some(english) = update.english {
            word.english = english.trim().to_string();
        }
        if let Some(russian) = update.russian {
            word.russian = russian.trim().to_string();
        }

        self.commit(next)
    }

    /// Remove a word. Unknown ids are ignored.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        if self.position(id).is_none() {
            return Ok(());
        }

        let next = self.words.iter().filter(|w| w.id != id).cloned().collect();
        self.commit(next)
    }

    /// Remove every word.
    pub fn clear(&mut self) -> Result<()> {
        self.commit(Vec::new())?;
        tracing::info!("cleared all words");
        Ok(())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.words.iter().position(|w| w.id == id)
    }

    fn commit(&mut self, next: Vec<WordEntry>) -> Result<()> {
        save_record(&self.storage, WORDS_KEY, &next)?;
        self.words = next;
        Ok(())
    }
}

/// Fields must survive a CSV export and re-import unchanged.
fn validate_field(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(VocabError::EmptyField { field });
    }
    if value.contains([',', '\n', '\r']) {
        return Err(VocabError::InvalidCharacter { field });
    }
    Ok(())
}
