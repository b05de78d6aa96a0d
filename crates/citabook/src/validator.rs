//! Form validation for citabook.
//!
//! Pure functions with no side effects: they report which fields are invalid
//! and why, and never mutate the draft. `validate_form` is the authoritative
//! gate before any mutation; `validate_field` supports incremental re-checks
//! as a single field changes.

use std::sync::OnceLock;

use regex::Regex;

use crate::appointment::AppointmentDraft;

/// Maximum length of the notes field, in characters.
pub const NOTES_MAX_CHARS: usize = 120;

fn national_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("^[0-9]{8}[A-Z]$").expect("static pattern compiles"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("^[0-9]{9,15}$").expect("static pattern compiles"))
}

/// A form field that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Appointment date.
    AppointmentDate,
    /// Appointment time.
    AppointmentTime,
    /// Patient first name.
    FirstName,
    /// Patient last name.
    LastName,
    /// National id.
    NationalId,
    /// Contact phone.
    Phone,
    /// Patient birth date.
    BirthDate,
    /// Free-text notes.
    Notes,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::AppointmentDate => "appointment_date",
            Self::AppointmentTime => "appointment_time",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::NationalId => "national_id",
            Self::Phone => "phone",
            Self::BirthDate => "birth_date",
            Self::Notes => "notes",
        };
        write!(f, "{name}")
    }
}

/// A single field violation: which field, and a message suitable for inline
/// display next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The invalid field.
    pub field: Field,
    /// Human-readable description of the violation.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    #[must_use]
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Normalize a national id to its canonical form: trimmed and uppercased.
#[must_use]
pub fn normalize_national_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Check a national id against the canonical format: exactly 8 ASCII digits
/// followed by 1 uppercase ASCII letter.
#[must_use]
pub fn is_valid_national_id(value: &str) -> bool {
    national_id_regex().is_match(value)
}

/// Check a phone number: the trimmed value must be 9 to 15 ASCII digits.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    phone_regex().is_match(value.trim())
}

/// Validate a whole draft, returning every violation in one pass so all
/// invalid fields can be surfaced simultaneously.
///
/// An empty result means the draft is acceptable for create or update.
#[must_use]
pub fn validate_form(draft: &AppointmentDraft) -> Vec<FieldError> {
    let mut violations = Vec::new();

    if draft.appointment_date.trim().is_empty() {
        violations.push(FieldError::new(Field::AppointmentDate, "select a date"));
    }
    if draft.appointment_time.trim().is_empty() {
        violations.push(FieldError::new(Field::AppointmentTime, "select a time"));
    }
    if draft.first_name.trim().is_empty() {
        violations.push(FieldError::new(Field::FirstName, "first name is required"));
    }
    if draft.last_name.trim().is_empty() {
        violations.push(FieldError::new(Field::LastName, "last name is required"));
    }

    let national_id = normalize_national_id(&draft.national_id);
    if national_id.is_empty() {
        violations.push(FieldError::new(Field::NationalId, "national id is required"));
    } else if !is_valid_national_id(&national_id) {
        violations.push(FieldError::new(
            Field::NationalId,
            "format: 8 digits and 1 letter (12345678A)",
        ));
    }

    let phone = draft.phone.trim();
    if phone.is_empty() {
        violations.push(FieldError::new(Field::Phone, "phone is required"));
    } else if !is_valid_phone(phone) {
        violations.push(FieldError::new(Field::Phone, "digits only (9 to 15)"));
    }

    if draft.birth_date.trim().is_empty() {
        violations.push(FieldError::new(Field::BirthDate, "select the birth date"));
    }

    // Notes are optional but bounded.
    if draft.notes.chars().count() > NOTES_MAX_CHARS {
        violations.push(FieldError::new(Field::Notes, "maximum 120 characters"));
    }

    violations
}

/// Re-validate a single field of the draft, as the user edits it.
///
/// Returns the violation for that field if it is currently invalid. The
/// authoritative gate before any mutation remains [`validate_form`].
#[must_use]
pub fn validate_field(field: Field, draft: &AppointmentDraft) -> Option<FieldError> {
    validate_form(draft).into_iter().find(|v| v.field == field)
}
