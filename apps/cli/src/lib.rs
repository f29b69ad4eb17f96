//! `vocab`: terminal front end for the vocabulary trainer.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod render;
pub mod state;

use anyhow::{bail, Context};
use cli::{Cli, Command, OutputFormat};
use config::AppConfig;
use serde::Serialize;
use state::AppState;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::WordUpdate;

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    let mut state = AppState::open(config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    execute(
        &mut state,
        cli.command,
        cli.format,
        &mut stdin.lock(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
}

/// Run one subcommand against `state`.
///
/// Results go to `out`. Confirmation prompts go to `prompts`, as does the
/// study session dialogue when the output format is JSON, so `out` holds
/// exactly one document.
pub fn execute<R, W, P>(
    state: &mut AppState,
    command: Command,
    format: OutputFormat,
    input: &mut R,
    out: &mut W,
    prompts: &mut P,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
    P: Write,
{
    match command {
        Command::Import { file } => {
            let result = commands::import_file(state, &file)?;
            emit(out, format, &result, render::import)
        }
        Command::Export { output } => {
            if output == "-" && format == OutputFormat::Json {
                bail!("--format json cannot be combined with --output -");
            }
            let result = commands::export_words(state, &output, out)?;
            emit(out, format, &result, render::export)
        }
        Command::List => {
            let rows = commands::list_words(state);
            emit(out, format, &rows, |out, rows| render::words(out, rows))
        }
        Command::Edit {
            word,
            english,
            russian,
        } => {
            let row = commands::edit_word(state, &word, WordUpdate { english, russian })?;
            emit(out, format, &row, |out, row| render::word(out, "Updated", row))
        }
        Command::Delete { word } => {
            let row = commands::delete_word(state, &word)?;
            emit(out, format, &row, |out, row| render::word(out, "Deleted", row))
        }
        Command::Clear { yes } => {
            let question = format!("Delete all {} words?", state.repository.len());
            if !yes && !confirm(input, prompts, &question)? {
                writeln!(prompts, "Aborted.")?;
                return Ok(());
            }
            let removed = commands::clear_words(state)?;
            emit(
                out,
                format,
                &serde_json::json!({ "removed": removed }),
                |out, _| writeln!(out, "Removed {removed} words."),
            )
        }
        Command::Study {
            mode,
            matching,
            threshold,
        } => {
            if let Some(matching) = matching {
                state.config.matching_mode = matching;
            }
            if let Some(threshold) = threshold {
                state.config.fuzzy_threshold = threshold;
            }
            let report = match format {
                OutputFormat::Plain => commands::run_study(state, mode, input, out)?,
                OutputFormat::Json => commands::run_study(state, mode, input, prompts)?,
            };
            // the session loop already printed its summary
            emit(out, format, &report, |_, _| Ok(()))
        }
        Command::Stats => {
            let report = commands::get_stats(state);
            emit(out, format, &report, render::stats)
        }
        Command::Reset { yes } => {
            if !yes && !confirm(input, prompts, "Delete all words and progress?")? {
                writeln!(prompts, "Aborted.")?;
                return Ok(());
            }
            commands::reset_all(state)?;
            emit(
                out,
                format,
                &serde_json::json!({ "reset": true }),
                |out, _| writeln!(out, "All words and progress deleted."),
            )
        }
    }
}

fn emit<W, T, F>(out: &mut W, format: OutputFormat, value: &T, plain: F) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
    F: FnOnce(&mut W, &T) -> io::Result<()>,
{
    match format {
        OutputFormat::Plain => plain(out, value)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
    }
    Ok(())
}

fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<bool> {
    write!(out, "{question} [y/N] ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
