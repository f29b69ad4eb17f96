//! Database error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("database schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: i32, supported: i32 },
}
