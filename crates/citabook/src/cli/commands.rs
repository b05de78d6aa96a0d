//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::appointment::AppointmentDraft;

/// Add command arguments: one flag per form field.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Appointment date (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE")]
    pub date: String,

    /// Appointment time (HH:MM)
    #[arg(short, long, value_name = "TIME")]
    pub time: String,

    /// Patient first name
    #[arg(short = 'f', long, value_name = "NAME")]
    pub first_name: String,

    /// Patient last name
    #[arg(short = 'l', long, value_name = "NAME")]
    pub last_name: String,

    /// National id (8 digits and 1 letter)
    #[arg(short = 'n', long, value_name = "ID")]
    pub national_id: String,

    /// Contact phone (9 to 15 digits)
    #[arg(short, long, value_name = "PHONE")]
    pub phone: String,

    /// Patient birth date (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE")]
    pub birth_date: String,

    /// Free-text notes (max 120 characters)
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub notes: String,
}

impl AddCommand {
    /// Convert the parsed flags into a form draft.
    #[must_use]
    pub fn to_draft(&self) -> AppointmentDraft {
        AppointmentDraft {
            appointment_date: self.date.clone(),
            appointment_time: self.time.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            national_id: self.national_id.clone(),
            phone: self.phone.clone(),
            birth_date: self.birth_date.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Edit command arguments: fields not given keep their stored values.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Id of the appointment to edit
    pub id: String,

    /// New appointment date (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE")]
    pub date: Option<String>,

    /// New appointment time (HH:MM)
    #[arg(short, long, value_name = "TIME")]
    pub time: Option<String>,

    /// New first name
    #[arg(short = 'f', long, value_name = "NAME")]
    pub first_name: Option<String>,

    /// New last name
    #[arg(short = 'l', long, value_name = "NAME")]
    pub last_name: Option<String>,

    /// New national id
    #[arg(short = 'n', long, value_name = "ID")]
    pub national_id: Option<String>,

    /// New contact phone
    #[arg(short, long, value_name = "PHONE")]
    pub phone: Option<String>,

    /// New birth date (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE")]
    pub birth_date: Option<String>,

    /// New notes
    #[arg(long, value_name = "TEXT")]
    pub notes: Option<String>,
}

impl EditCommand {
    /// Overlay the given flags onto a draft pre-filled from the stored
    /// record, like an edit form opened with current values.
    #[must_use]
    pub fn apply_to(&self, mut draft: AppointmentDraft) -> AppointmentDraft {
        if let Some(date) = &self.date {
            draft.appointment_date = date.clone();
        }
        if let Some(time) = &self.time {
            draft.appointment_time = time.clone();
        }
        if let Some(first_name) = &self.first_name {
            draft.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            draft.last_name = last_name.clone();
        }
        if let Some(national_id) = &self.national_id {
            draft.national_id = national_id.clone();
        }
        if let Some(phone) = &self.phone {
            draft.phone = phone.clone();
        }
        if let Some(birth_date) = &self.birth_date {
            draft.birth_date = birth_date.clone();
        }
        if let Some(notes) = &self.notes {
            draft.notes = notes.clone();
        }
        draft
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the appointment to delete
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Write the CSV to this path instead of the configured filename
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
