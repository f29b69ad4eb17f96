//! Word list import and export.
//!
//! # Format
//! ```text
//! hello,привет
//! bye,пока
//! ```
//!
//! One pair per line, fields trimmed, blank lines ignored. Columns after the
//! second are ignored.

use crate::error::ImportError;
use crate::types::{WordEntry, WordPair};

/// Parse import text into word pairs.
///
/// Any malformed line fails the whole batch.
pub fn parse(content: &str) -> Result<Vec<WordPair>, ImportError> {
    let mut pairs = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx + 1;
        match parse_line(line) {
            LineType::Empty => continue,
            LineType::Pair(english, russian) => pairs.push(WordPair::new(english, russian)),
            LineType::MissingEnglish => return Err(ImportError::MissingEnglish { line: line_num }),
            LineType::MissingRussian => return Err(ImportError::MissingRussian { line: line_num }),
        }
    }

    Ok(pairs)
}

enum LineType<'a> {
    Pair(&'a str, &'a str),
    MissingEnglish,
    MissingRussian,
    Empty,
}

fn parse_line(line: &str) -> LineType<'_> {
    if line.trim().is_empty() {
        return LineType::Empty;
    }

    let mut fields = line.split(',').map(str::trim);
    let english = fields.next().unwrap_or_default();
    let russian = fields.next().unwrap_or_default();

    if english.is_empty() {
        LineType::MissingEnglish
    } else if russian.is_empty() {
        LineType::MissingRussian
    } else {
        LineType::Pair(english, russian)
    }
}

/// Serialize entries as `english,russian` lines.
pub fn export(words: &[WordEntry]) -> String {
    words
        .iter()
        .map(|word| format!("{},{}", word.english, word.russian))
        .collect::<Vec<_>>()
        .join("\n")
}
