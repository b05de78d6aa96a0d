//! `SQLite` schema definitions for the citabook store.

/// SQL statement to create the entries table.
///
/// One row per key; values are opaque text with an expiry instant.
pub const CREATE_ENTRIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS entries (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    expires_at TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create an index on `expires_at` for the expiry sweep.
pub const CREATE_EXPIRY_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_entries_expires_at ON entries(expires_at)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_ENTRIES_TABLE,
    CREATE_EXPIRY_INDEX,
    CREATE_METADATA_TABLE,
];
