//! CSV export for citabook.
//!
//! A pure formatting utility: serializes the collection to comma-separated
//! text with quoted fields. Whether and where the result becomes a file is
//! the caller's decision.

use crate::appointment::Appointment;

/// Column headers of the export, in output order.
pub const CSV_HEADER: &[&str] = &[
    "ORDER",
    "NATIONAL_ID",
    "FULL_NAME",
    "DATE",
    "TIME",
    "PHONE",
    "NOTES",
];

/// Serialize the collection to CSV: a header row followed by one row per
/// appointment in collection order.
///
/// The `ORDER` column is the 1-based position in the current order,
/// recomputed on every export. Every field is double-quoted; literal quotes
/// inside a field are escaped by doubling. Rows are joined with `\n` and
/// there is no trailing newline. An empty collection yields an empty string.
#[must_use]
pub fn to_csv(appointments: &[Appointment]) -> String {
    if appointments.is_empty() {
        return String::new();
    }

    let header = CSV_HEADER
        .iter()
        .map(|h| quote(h))
        .collect::<Vec<_>>()
        .join(",");

    let rows = appointments.iter().enumerate().map(|(index, a)| {
        [
            quote(&(index + 1).to_string()),
            quote(&a.national_id),
            quote(&a.full_name()),
            quote(&a.appointment_date),
            quote(&a.appointment_time),
            quote(&a.phone),
            quote(&a.notes),
        ]
        .join(",")
    });

    std::iter::once(header).chain(rows).collect::<Vec<_>>().join("\n")
}

/// Double-quote a field, doubling any embedded quote characters.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
