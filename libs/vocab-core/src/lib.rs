//! Core vocabulary trainer library.
//!
//! Provides:
//! - Word repository with dedup-on-import and persisted counters
//! - Study engine: per-mode study order, mastery tiers, session history
//! - Study session tracking for presentation layers
//! - Word list import/export and typed answer checking
//! - Storage abstraction over a key-value store

pub mod engine;
pub mod error;
pub mod matching;
pub mod parser;
pub mod repository;
pub mod session;
pub mod storage;
pub mod types;

pub use engine::StudyEngine;
pub use error::{ImportError, Result, StorageError, VocabError};
pub use matching::{check_answer, AnswerCheck, DEFAULT_FUZZY_THRESHOLD};
pub use parser::{export, parse};
pub use repository::WordRepository;
pub use session::StudySession;
pub use storage::{MemoryStorage, Storage, STATS_KEY, WORDS_KEY};
pub use types::{
    AggregateStats, AnswerMode, MasteryTier, MatchingMode, SessionSummary, StudyMode, WordEntry,
    WordPair, WordUpdate,
};
