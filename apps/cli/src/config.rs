//! Runtime configuration.
//!
//! Read from the environment (a `.env` file is loaded first by `main`);
//! command-line flags override individual values.

use std::path::PathBuf;
use thiserror::Error;
use vocab_core::{MatchingMode, DEFAULT_FUZZY_THRESHOLD};

pub const DB_PATH_VAR: &str = "VOCAB_DB_PATH";
pub const MATCHING_VAR: &str = "VOCAB_MATCHING";
pub const FUZZY_THRESHOLD_VAR: &str = "VOCAB_FUZZY_THRESHOLD";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var}: unknown matching mode \"{value}\" (expected exact, case_insensitive or fuzzy)")]
    InvalidMatching { var: &'static str, value: String },

    #[error("{var}: \"{value}\" is not a number between 0 and 1")]
    InvalidThreshold { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub matching_mode: MatchingMode,
    pub fuzzy_threshold: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            matching_mode: MatchingMode::default(),
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(DB_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(value) = lookup(MATCHING_VAR) {
            config.matching_mode = parse_matching(MATCHING_VAR, &value)?;
        }
        if let Some(value) = lookup(FUZZY_THRESHOLD_VAR) {
            config.fuzzy_threshold = parse_threshold(FUZZY_THRESHOLD_VAR, &value)?;
        }

        Ok(config)
    }
}

pub fn parse_matching(var: &'static str, value: &str) -> Result<MatchingMode, ConfigError> {
    MatchingMode::from_str(value.trim()).ok_or_else(|| ConfigError::InvalidMatching {
        var,
        value: value.to_string(),
    })
}

pub fn parse_threshold(var: &'static str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|t| (0.0..=1.0).contains(t))
        .ok_or_else(|| ConfigError::InvalidThreshold {
            var,
            value: value.to_string(),
        })
}

fn default_db_path() -> PathBuf {
    // Use app data directory for production, fallback to current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vocab-trainer")
        .join("vocab.db")
}
