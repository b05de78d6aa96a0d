//! `citabook` - CLI for the clinic appointment book
//!
//! This binary provides the command-line interface for creating, listing,
//! editing, deleting, and exporting appointments.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Write;

use anyhow::Context;
use clap::Parser;

use citabook::cli::{
    AddCommand, Cli, Command, ConfigCommand, DeleteCommand, EditCommand, ExportCommand,
    ListCommand,
};
use citabook::{
    init_logging, Appointment, AppointmentBook, AppointmentDraft, Config, Error, Repository, Store,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        // Config commands don't need the store
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
        command => {
            let store = Store::open(config.database_path())?;
            let book = AppointmentBook::new(Repository::new(store, config.ttl()));

            match command {
                Command::Add(add_cmd) => handle_add(&book, &add_cmd),
                Command::List(list_cmd) => handle_list(&book, &list_cmd),
                Command::Edit(edit_cmd) => handle_edit(&book, &edit_cmd),
                Command::Delete(delete_cmd) => handle_delete(&book, &delete_cmd),
                Command::Export(export_cmd) => handle_export(&book, &config, &export_cmd),
                Command::Config(_) => unreachable!("handled above"),
            }
        }
    }
}

fn handle_add(book: &AppointmentBook, cmd: &AddCommand) -> anyhow::Result<()> {
    match book.create(&cmd.to_draft()) {
        Ok(appointment) => {
            println!(
                "Created appointment {} for {} on {} at {}",
                appointment.id,
                appointment.full_name(),
                appointment.appointment_date,
                appointment.appointment_time
            );
            Ok(())
        }
        Err(e) => Err(domain_error(e)),
    }
}

fn handle_list(book: &AppointmentBook, cmd: &ListCommand) -> anyhow::Result<()> {
    let appointments = book.list();

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&appointments)?);
        return Ok(());
    }

    if appointments.is_empty() {
        println!("No appointments.");
        return Ok(());
    }

    println!(
        "{:>3}  {:<11}  {:<24}  {:<10}  {:<5}  {:<15}  NOTES",
        "#", "NATIONAL ID", "NAME", "DATE", "TIME", "PHONE"
    );
    for (index, appointment) in appointments.iter().enumerate() {
        println!(
            "{:>3}  {:<11}  {:<24}  {:<10}  {:<5}  {:<15}  {}",
            index + 1,
            appointment.national_id,
            appointment.full_name(),
            appointment.appointment_date,
            appointment.appointment_time,
            appointment.phone,
            appointment.notes
        );
    }
    println!();
    println!(
        "{} appointment(s). Use `citabook list --json` to see appointment ids.",
        appointments.len()
    );
    Ok(())
}

fn handle_edit(book: &AppointmentBook, cmd: &EditCommand) -> anyhow::Result<()> {
    // Pre-fill from the stored record, then overlay the given flags.
    let existing = book
        .find(&cmd.id)
        .ok_or_else(|| domain_error(Error::not_found(&cmd.id)))?;
    let draft = cmd.apply_to(AppointmentDraft::from_appointment(&existing));

    match book.update(&cmd.id, &draft) {
        Ok(appointment) => {
            println!(
                "Updated appointment {} for {} on {} at {}",
                appointment.id,
                appointment.full_name(),
                appointment.appointment_date,
                appointment.appointment_time
            );
            Ok(())
        }
        Err(e) => Err(domain_error(e)),
    }
}

fn handle_delete(book: &AppointmentBook, cmd: &DeleteCommand) -> anyhow::Result<()> {
    // Idempotent: a missing id is reported, not an error.
    let Some(appointment) = book.find(&cmd.id) else {
        println!("No appointment found with id {}. Nothing to do.", cmd.id);
        return Ok(());
    };

    if !cmd.yes && !confirm_delete(&appointment)? {
        println!("Aborted.");
        return Ok(());
    }

    book.delete(&cmd.id)?;
    println!("Deleted appointment {}.", cmd.id);
    Ok(())
}

/// Ask the user to confirm the deletion. Only an explicit `y`/`yes` proceeds.
fn confirm_delete(appointment: &Appointment) -> anyhow::Result<bool> {
    print!(
        "Delete appointment for {} on {} at {}? [y/N] ",
        appointment.full_name(),
        appointment.appointment_date,
        appointment.appointment_time
    );
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn handle_export(
    book: &AppointmentBook,
    config: &Config,
    cmd: &ExportCommand,
) -> anyhow::Result<()> {
    let appointments = book.list();
    let csv = citabook::to_csv(&appointments);

    if csv.is_empty() {
        println!("No appointments to export.");
        return Ok(());
    }

    let path = cmd
        .output
        .clone()
        .unwrap_or_else(|| std::path::PathBuf::from(&config.export.filename));
    std::fs::write(&path, &csv)
        .with_context(|| format!("failed to write export to {}", path.display()))?;

    println!(
        "Exported {} appointment(s) to {}",
        appointments.len(),
        path.display()
    );
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path: {}", config.database_path().display());
                println!("  TTL (days):    {}", config.storage.ttl_days);
                println!();
                println!("[Export]");
                println!("  Filename:      {}", config.export.filename);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

/// Turn a domain error into the process error, printing field violations
/// inline first so the user sees every invalid field at once.
fn domain_error(err: Error) -> anyhow::Error {
    if let Some(violations) = err.violations() {
        eprintln!("Please review the following fields:");
        for violation in violations {
            eprintln!("  {violation}");
        }
    }
    anyhow::Error::new(err)
}
