//! Persistent store for citabook.
//!
//! An opaque key-value text store with per-key expiry, backed by `SQLite`.
//! The store knows nothing about appointments: values are serialized blobs
//! owned by the repository layer. Expiry mirrors a cookie jar — a value
//! written with a time-to-live becomes absent once the horizon elapses.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Key-value text store with expiry.
#[derive(Debug)]
pub struct Store {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Store {
    /// Open or create a store database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist,
    /// initializes the schema, and sweeps any already-expired entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema
    /// initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening store at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        let store = Self { path, conn };
        let swept = store.purge_expired()?;
        if swept > 0 {
            info!("Swept {} expired entries on open", swept);
        }
        Ok(store)
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store a value under `key`, replacing any previous value and setting
    /// the expiry horizon to now + `ttl`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let expires_at = (Utc::now() + ttl).to_rfc3339();
        self.conn.execute(
            r"
            INSERT INTO entries (key, value, expires_at, updated_at)
            VALUES (?1, ?2, ?3, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                expires_at = excluded.expires_at,
                updated_at = excluded.updated_at
            ",
            params![key, value, expires_at],
        )?;
        debug!("Stored {} bytes under key '{}'", value.len(), key);
        Ok(())
    }

    /// Retrieve the value stored under `key`.
    ///
    /// Returns `None` if the key is absent or its expiry horizon has passed;
    /// an expired row is deleted on the way out. A row whose expiry stamp
    /// fails to parse is treated as expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT value, expires_at FROM entries WHERE key = ?1",
                [key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((value, expires_at)) = row else {
            return Ok(None);
        };

        let expired = match DateTime::parse_from_rfc3339(&expires_at) {
            Ok(stamp) => stamp.with_timezone(&Utc) <= Utc::now(),
            Err(_) => {
                warn!("Unreadable expiry stamp for key '{}', discarding entry", key);
                true
            }
        };

        if expired {
            debug!("Entry for key '{}' has expired", key);
            self.conn
                .execute("DELETE FROM entries WHERE key = ?1", [key])?;
            return Ok(None);
        }

        Ok(Some(value))
    }

    /// Remove the value stored under `key`.
    ///
    /// Returns `true` if an entry was removed, `false` if the key was absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM entries WHERE key = ?1", [key])?;
        Ok(affected > 0)
    }

    /// Delete every entry whose expiry horizon has passed.
    ///
    /// Returns the number of entries deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn purge_expired(&self) -> Result<usize> {
        let now = Utc::now().to_rfc3339();
        let affected = self
            .conn
            .execute("DELETE FROM entries WHERE expires_at <= ?1", [now])?;
        Ok(affected)
    }
}
