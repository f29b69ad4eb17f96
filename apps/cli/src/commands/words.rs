//! Word list commands: import, export, listing and edits.

use crate::state::AppState;
use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use vocab_core::{export, parse, MasteryTier, WordEntry, WordUpdate};

/// Default file name for exports.
pub const DEFAULT_EXPORT_FILE: &str = "vocabulary_export.csv";

#[derive(Debug, Serialize)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
    pub total_words: usize,
}

#[derive(Debug, Serialize)]
pub struct ExportResult {
    pub exported: usize,
    /// Destination file, or None when written to stdout.
    pub path: Option<String>,
}

/// A word with its mastery tier, for display.
#[derive(Debug, Serialize)]
pub struct WordRow {
    pub id: String,
    pub english: String,
    pub russian: String,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub tier: MasteryTier,
    pub last_studied: Option<DateTime<Utc>>,
}

impl From<&WordEntry> for WordRow {
    fn from(word: &WordEntry) -> Self {
        Self {
            id: word.id.clone(),
            english: word.english.clone(),
            russian: word.russian.clone(),
            correct_count: word.correct_count,
            incorrect_count: word.incorrect_count,
            tier: word.tier(),
            last_studied: word.last_studied,
        }
    }
}

/// Import a CSV word list.
pub fn import_file(state: &mut AppState, path: &Path) -> anyhow::Result<ImportResult> {
    let is_csv = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        bail!("{} is not a CSV file", path.display());
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let pairs = parse(&content).with_context(|| format!("failed to parse {}", path.display()))?;
    let imported = state.repository.add_words(&pairs)?;

    Ok(ImportResult {
        imported,
        skipped: pairs.len() - imported,
        total_words: state.repository.len(),
    })
}

/// Export all words. `-` writes to `stdout`.
pub fn export_words<W: Write>(
    state: &AppState,
    destination: &str,
    stdout: &mut W,
) -> anyhow::Result<ExportResult> {
    let words = state.repository.list();
    if words.is_empty() {
        return Ok(ExportResult {
            exported: 0,
            path: None,
        });
    }

    let content = export(words);
    let path = if destination == "-" {
        writeln!(stdout, "{content}")?;
        None
    } else {
        fs::write(destination, &content)
            .with_context(|| format!("failed to write {destination}"))?;
        Some(destination.to_string())
    };

    tracing::info!(count = words.len(), "exported words");
    Ok(ExportResult {
        exported: words.len(),
        path,
    })
}

pub fn list_words(state: &AppState) -> Vec<WordRow> {
    state.repository.list().iter().map(WordRow::from).collect()
}

/// Find a word by id, falling back to its English text.
pub fn resolve<'a>(state: &'a AppState, target: &str) -> Option<&'a WordEntry> {
    state
        .repository
        .get(target)
        .or_else(|| state.repository.find_by_english(target))
}

pub fn edit_word(
    state: &mut AppState,
    target: &str,
    update: WordUpdate,
) -> anyhow::Result<WordRow> {
    if update.english.is_none() && update.russian.is_none() {
        bail!("nothing to change: pass --english and/or --russian");
    }

    let id = match resolve(state, target) {
        Some(word) => word.id.clone(),
        None => bail!("no word matching \"{target}\""),
    };
    state.repository.update_fields(&id, update)?;

    let word = state
        .repository
        .get(&id)
        .context("word disappeared after edit")?;
    Ok(WordRow::from(word))
}

pub fn delete_word(state: &mut AppState, target: &str) -> anyhow::Result<WordRow> {
    let Some(word) = resolve(state, target).map(WordRow::from) else {
        bail!("no word matching \"{target}\"");
    };
    state.repository.delete(&word.id)?;
    Ok(word)
}

/// Remove every word, keeping the session history. Returns how many were removed.
pub fn clear_words(state: &mut AppState) -> anyhow::Result<usize> {
    let count = state.repository.len();
    state.repository.clear()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vocab_core::WordPair;

    fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn seeded() -> AppState {
        let mut state = AppState::in_memory();
        state
            .repository
            .add_words(&[WordPair::new("hello", "привет"), WordPair::new("bye", "пока")])
            .unwrap();
        state
    }

    #[test]
    fn import_counts_new_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "words.csv", "hello,привет\nbye,пока\n");
        let mut state = AppState::in_memory();

        let first = import_file(&mut state, &path).unwrap();
        assert_eq!((first.imported, first.skipped, first.total_words), (2, 0, 2));

        let again = write_csv(&dir, "more.CSV", "Hello,hi\ncat,кот\n");
        let second = import_file(&mut state, &again).unwrap();
        assert_eq!((second.imported, second.skipped, second.total_words), (1, 1, 3));
    }

    #[test]
    fn malformed_import_adds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "bad.csv", "hello,привет\nbye\n");
        let mut state = AppState::in_memory();

        let err = import_file(&mut state, &path).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
        assert!(state.repository.is_empty());
    }

    #[test]
    fn import_rejects_non_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "words.txt", "hello,привет\n");
        let mut state = AppState::in_memory();
        assert!(import_file(&mut state, &path).is_err());
    }

    #[test]
    fn export_to_file_and_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let state = seeded();
        let target = dir.path().join(DEFAULT_EXPORT_FILE);
        let target = target.to_str().unwrap();

        let mut stdout = Vec::new();
        let result = export_words(&state, target, &mut stdout).unwrap();
        assert_eq!(result.exported, 2);
        assert_eq!(fs::read_to_string(target).unwrap(), "hello,привет\nbye,пока");
        assert!(stdout.is_empty());

        let result = export_words(&state, "-", &mut stdout).unwrap();
        assert_eq!(result.path, None);
        assert_eq!(String::from_utf8(stdout).unwrap(), "hello,привет\nbye,пока\n");
    }

    #[test]
    fn export_of_empty_list_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::in_memory();
        let target = dir.path().join("out.csv");

        let result = export_words(&state, target.to_str().unwrap(), &mut Vec::<u8>::new()).unwrap();
        assert_eq!(result.exported, 0);
        assert!(!target.exists());
    }

    #[test]
    fn edit_by_english_text() {
        let mut state = seeded();
        let row = edit_word(
            &mut state,
            "BYE",
            WordUpdate {
                english: None,
                russian: Some("до свидания".to_string()),
            },
        )
        .unwrap();
        assert_eq!(row.english, "bye");
        assert_eq!(row.russian, "до свидания");
    }

    #[test]
    fn edit_collision_is_reported() {
        let mut state = seeded();
        let result = edit_word(
            &mut state,
            "bye",
            WordUpdate {
                english: Some("hello".to_string()),
                russian: None,
            },
        );
        assert!(result.is_err());
        assert_eq!(state.repository.list()[1].english, "bye");
    }

    #[test]
    fn delete_by_id() {
        let mut state = seeded();
        let id = state.repository.list()[0].id.clone();
        let removed = delete_word(&mut state, &id).unwrap();
        assert_eq!(removed.english, "hello");
        assert_eq!(state.repository.len(), 1);
        assert!(delete_word(&mut state, "hello").is_err());
    }

    #[test]
    fn list_and_clear() {
        let mut state = seeded();
        let rows = list_words(&state);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].tier, MasteryTier::Learning);

        assert_eq!(clear_words(&mut state).unwrap(), 2);
        assert!(list_words(&state).is_empty());
    }
}
