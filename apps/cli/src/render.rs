//! Plain-text output.

use crate::commands::{ExportResult, ImportResult, StatsReport, WordRow};
use std::io::{self, Write};

const PROGRESS_WIDTH: usize = 20;

pub fn import(out: &mut impl Write, result: &ImportResult) -> io::Result<()> {
    writeln!(
        out,
        "Imported {} new words ({} already present). {} words total.",
        result.imported, result.skipped, result.total_words
    )
}

pub fn export(out: &mut impl Write, result: &ExportResult) -> io::Result<()> {
    match &result.path {
        _ if result.exported == 0 => writeln!(out, "No words to export."),
        Some(path) => writeln!(out, "Exported {} words to {path}.", result.exported),
        // csv already went to stdout
        None => Ok(()),
    }
}

pub fn words(out: &mut impl Write, rows: &[WordRow]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No words yet. Import a CSV file to get started.");
    }

    let english_width = column_width("English", rows.iter().map(|r| r.english.as_str()));
    let russian_width = column_width("Russian", rows.iter().map(|r| r.russian.as_str()));

    writeln!(
        out,
        "{:<english_width$}  {:<russian_width$}  {:>7}  {:>9}  Tier",
        "English", "Russian", "Correct", "Incorrect"
    )?;
    for row in rows {
        writeln!(
            out,
            "{:<english_width$}  {:<russian_width$}  {:>7}  {:>9}  {}",
            row.english,
            row.russian,
            row.correct_count,
            row.incorrect_count,
            row.tier.as_str()
        )?;
    }
    Ok(())
}

pub fn word(out: &mut impl Write, verb: &str, row: &WordRow) -> io::Result<()> {
    writeln!(out, "{verb}: {} - {}", row.english, row.russian)
}

pub fn stats(out: &mut impl Write, report: &StatsReport) -> io::Result<()> {
    let stats = &report.stats;
    writeln!(out, "Words:      {}", stats.total_words)?;
    writeln!(out, "Mastered:   {}", stats.mastered_words)?;
    writeln!(out, "Learning:   {}", stats.learning_words)?;
    writeln!(out, "Difficult:  {}", stats.difficult_words)?;
    writeln!(
        out,
        "Progress:   [{}] {}%",
        progress_bar(report.learning_progress),
        report.learning_progress
    )?;

    if stats.recent_performance.is_empty() {
        writeln!(out, "Recent:     no sessions yet")
    } else {
        let history: Vec<String> = stats
            .recent_performance
            .iter()
            .map(|accuracy| format!("{}%", accuracy.round()))
            .collect();
        writeln!(out, "Recent:     {}", history.join(" "))
    }
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or_default()
}

fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize * PROGRESS_WIDTH + 50) / 100;
    format!("{}{}", "#".repeat(filled), "-".repeat(PROGRESS_WIDTH - filled))
}
