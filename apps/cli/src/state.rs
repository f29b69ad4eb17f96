//! Application state.

use crate::config::AppConfig;
use crate::db::SqliteStorage;
use anyhow::Context;
use std::rc::Rc;
use vocab_core::{StudyEngine, WordRepository};

/// Repository and engine sharing one database handle.
pub struct AppState {
    pub repository: WordRepository<Rc<SqliteStorage>>,
    pub engine: StudyEngine<Rc<SqliteStorage>>,
    pub config: AppConfig,
}

impl AppState {
    /// Open the database named by the config, creating its directory.
    pub fn open(config: AppConfig) -> anyhow::Result<Self> {
        if let Some(parent) = config.db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let storage = SqliteStorage::open(&config.db_path)
            .with_context(|| format!("failed to open database {}", config.db_path.display()))?;
        tracing::debug!(path = %config.db_path.display(), "opened database");
        Self::with_storage(storage, config)
    }

    pub fn with_storage(storage: SqliteStorage, config: AppConfig) -> anyhow::Result<Self> {
        let storage = Rc::new(storage);
        let repository = WordRepository::load(Rc::clone(&storage)).context("failed to load words")?;
        let engine = StudyEngine::load(storage).context("failed to load statistics")?;
        Ok(Self {
            repository,
            engine,
            config,
        })
    }

    /// In-memory state for tests.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        let storage = SqliteStorage::open_in_memory().expect("in-memory database");
        Self::with_storage(storage, AppConfig::default()).expect("empty state")
    }
}
