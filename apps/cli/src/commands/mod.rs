//! Command handlers behind the `vocab` subcommands.

pub mod stats;
pub mod study;
pub mod words;

pub use stats::{get_stats, reset_all, StatsReport};
pub use study::{run_study, StudyReport};
pub use words::{
    clear_words, delete_word, edit_word, export_words, import_file, list_words, ExportResult,
    ImportResult, WordRow, DEFAULT_EXPORT_FILE,
};
