//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema for the local database.
pub const SCHEMA: &str = r#"
-- Named JSON records (word collection, session history)
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);
"#;

/// Record the schema version if not present.
pub const INIT_SCHEMA_VERSION: &str =
    "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)";
