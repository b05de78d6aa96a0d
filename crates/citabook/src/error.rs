//! Error types for citabook.
//!
//! This module defines all error types used throughout the citabook crate.
//! Domain errors (validation, conflict, not-found) are recoverable: the
//! caller keeps the user's draft and re-renders it with the error attached.

use std::path::PathBuf;
use thiserror::Error;

use crate::validator::FieldError;

/// The main error type for citabook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Domain Errors ===
    /// One or more form fields failed validation.
    #[error("validation failed: {} field(s) invalid", violations.len())]
    Validation {
        /// The complete set of field violations, in form order.
        violations: Vec<FieldError>,
    },

    /// Another appointment already occupies the same business key.
    #[error("an appointment for {national_id} already exists on {date} at {time}")]
    Conflict {
        /// Canonical national id of the colliding appointment.
        national_id: String,
        /// Appointment date of the colliding appointment.
        date: String,
        /// Appointment time of the colliding appointment.
        time: String,
    },

    /// The appointment being edited or deleted no longer exists.
    #[error("no appointment found with id {id}")]
    NotFound {
        /// The identifier that could not be resolved.
        id: String,
    },

    // === Storage Errors ===
    /// Failed to open or create the store database.
    #[error("failed to open store at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A store query failed.
    #[error("store query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run store migrations.
    #[error("store migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for citabook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a validation error from a set of field violations.
    #[must_use]
    pub fn validation(violations: Vec<FieldError>) -> Self {
        Self::Validation { violations }
    }

    /// Create a conflict error for the given business key.
    #[must_use]
    pub fn conflict(
        national_id: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self::Conflict {
            national_id: national_id.into(),
            date: date.into(),
            time: time.into(),
        }
    }

    /// Create a not-found error for the given appointment id.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Check if this error is a validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error is a business-key conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Check if this error is a missing-appointment failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The field violations carried by a validation error, if any.
    #[must_use]
    pub fn violations(&self) -> Option<&[FieldError]> {
        match self {
            Self::Validation { violations } => Some(violations),
            _ => None,
        }
    }
}
