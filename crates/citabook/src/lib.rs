//! `citabook` - a local appointment book for a small clinic
//!
//! This library provides the core functionality for managing clinic
//! appointments: a key-value store with expiry, a repository over the
//! appointment collection, form validation, CRUD orchestration, and CSV
//! export.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod appointment;
pub mod book;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod repository;
pub mod store;
pub mod validator;

pub use appointment::{Appointment, AppointmentDraft};
pub use book::AppointmentBook;
pub use config::Config;
pub use error::{Error, Result};
pub use export::to_csv;
pub use logging::init_logging;
pub use repository::Repository;
pub use store::Store;
pub use validator::{Field, FieldError};
