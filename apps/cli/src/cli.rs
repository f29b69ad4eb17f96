use crate::commands::DEFAULT_EXPORT_FILE;
use crate::config::{parse_matching, parse_threshold, ConfigError};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vocab_core::{MatchingMode, StudyMode};

#[derive(Debug, Parser)]
#[command(name = "vocab", about = "English-Russian vocabulary trainer", version)]
pub struct Cli {
    /// Database file (default: $VOCAB_DB_PATH or the user data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import `english,russian` pairs from a CSV file
    Import {
        /// Path to a .csv file
        file: PathBuf,
    },

    /// Export all words as CSV
    Export {
        /// Output file ("-" for stdout)
        #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
        output: String,
    },

    /// List all words with their counters
    List,

    /// Change a word's English or Russian text
    Edit {
        /// Word id or English text
        word: String,
        #[arg(long)]
        english: Option<String>,
        #[arg(long)]
        russian: Option<String>,
    },

    /// Delete one word
    Delete {
        /// Word id or English text
        word: String,
    },

    /// Delete every word, keeping session history
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Start a study session
    Study {
        /// learn, quiz or review
        #[arg(default_value = "learn", value_parser = parse_mode)]
        mode: StudyMode,
        /// Answer matching for typed answers: exact, case_insensitive or fuzzy
        #[arg(long, value_parser = parse_matching_flag)]
        matching: Option<MatchingMode>,
        /// Similarity needed for a fuzzy match (0.0 to 1.0)
        #[arg(long, value_parser = parse_threshold_flag)]
        threshold: Option<f64>,
    },

    /// Show progress statistics
    Stats,

    /// Delete all words and progress
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn parse_mode(value: &str) -> Result<StudyMode, String> {
    StudyMode::from_str(value)
        .ok_or_else(|| format!("unknown mode \"{value}\" (expected learn, quiz or review)"))
}

fn parse_matching_flag(value: &str) -> Result<MatchingMode, ConfigError> {
    parse_matching("--matching", value)
}

fn parse_threshold_flag(value: &str) -> Result<f64, ConfigError> {
    parse_threshold("--threshold", value)
}
