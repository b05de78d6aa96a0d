//! Command-line interface for citabook.
//!
//! This module provides the CLI structure for the `citabook` binary. The
//! subcommands are the explicit command handlers standing in for the
//! original form/list views: `add` and `edit` carry the form fields as
//! flags, `delete` asks for confirmation, `export` writes the CSV.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, EditCommand, ExportCommand, ListCommand,
};

/// citabook - appointment book for a small clinic
///
/// Keeps appointment records in a local store with an expiry horizon,
/// validates patient data on every change, and exports the book as CSV.
#[derive(Debug, Parser)]
#[command(name = "citabook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new appointment
    Add(AddCommand),

    /// List all appointments
    List(ListCommand),

    /// Edit an existing appointment
    Edit(EditCommand),

    /// Delete an appointment
    Delete(DeleteCommand),

    /// Export all appointments as CSV
    Export(ExportCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
