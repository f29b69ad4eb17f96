//! Key-value persistence boundary.
//!
//! The repository and the engine each own one record; both are JSON text.

use crate::error::{self, StorageError, VocabError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Record holding the word collection.
pub const WORDS_KEY: &str = "flashcard-words";

/// Record holding the performance history.
pub const STATS_KEY: &str = "flashcard-stats";

/// Durable key-value store.
///
/// `save` must not return until the value is committed.
pub trait Storage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Rc<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

/// Load and decode a JSON record. A missing key yields `None`.
pub fn load_record<S, T>(storage: &S, key: &'static str) -> error::Result<Option<T>>
where
    S: Storage + ?Sized,
    T: DeserializeOwned,
{
    match storage.load(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| VocabError::CorruptRecord { key, source }),
        None => Ok(None),
    }
}

/// Encode and write a JSON record.
pub fn save_record<S, T>(storage: &S, key: &'static str, value: &T) -> error::Result<()>
where
    S: Storage + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| VocabError::Encode { key, source })?;
    storage.save(key, &raw)?;
    tracing::debug!(key, bytes = raw.len(), "record saved");
    Ok(())
}

/// In-process storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of a record, if present.
    pub fn get(&self, key: &str) -> Option<String> {
        self.records.borrow().get(key).cloned()
    }

    /// Seed a record directly, bypassing the repository.
    pub fn insert(&self, key: &str, value: impl Into<String>) {
        self.records.borrow_mut().insert(key.to_string(), value.into());
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.insert(key, value);
        Ok(())
    }
}

/// Storage whose writes can be switched off.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct FlakyStorage {
    inner: MemoryStorage,
    pub(crate) fail_writes: std::cell::Cell<bool>,
}

#[cfg(test)]
impl Storage for FlakyStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Write {
                key: key.to_string(),
                message: "disk full".to_string(),
            });
        }
        self.inner.save(key, value)
    }
}
