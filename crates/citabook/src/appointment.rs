//! Core appointment types for citabook.
//!
//! This module defines the appointment record persisted in the store and the
//! typed draft produced by a form submission.

use serde::{Deserialize, Serialize};

use crate::validator::normalize_national_id;

/// A scheduled clinic visit.
///
/// The persisted JSON uses camelCase field names; the collection blob in the
/// store is a JSON array of these records in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Opaque unique identifier, assigned at creation, immutable thereafter.
    pub id: String,

    /// Calendar date of the visit (`YYYY-MM-DD`).
    pub appointment_date: String,

    /// Time of day of the visit (`HH:MM`).
    pub appointment_time: String,

    /// Patient first name.
    pub first_name: String,

    /// Patient last name.
    pub last_name: String,

    /// National id in canonical form: 8 digits followed by 1 uppercase letter.
    pub national_id: String,

    /// Contact phone, 9 to 15 digits.
    pub phone: String,

    /// Patient birth date (`YYYY-MM-DD`).
    pub birth_date: String,

    /// Free-text notes, optional, at most 120 characters.
    #[serde(default)]
    pub notes: String,
}

impl Appointment {
    /// Build an appointment from a canonicalized draft and a fresh id.
    #[must_use]
    pub fn from_draft(id: String, draft: AppointmentDraft) -> Self {
        Self {
            id,
            appointment_date: draft.appointment_date,
            appointment_time: draft.appointment_time,
            first_name: draft.first_name,
            last_name: draft.last_name,
            national_id: draft.national_id,
            phone: draft.phone,
            birth_date: draft.birth_date,
            notes: draft.notes,
        }
    }

    /// Replace every field except `id` with the draft's values.
    pub fn apply_draft(&mut self, draft: AppointmentDraft) {
        self.appointment_date = draft.appointment_date;
        self.appointment_time = draft.appointment_time;
        self.first_name = draft.first_name;
        self.last_name = draft.last_name;
        self.national_id = draft.national_id;
        self.phone = draft.phone;
        self.birth_date = draft.birth_date;
        self.notes = draft.notes;
    }

    /// Full patient name, first and last space-joined.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The (national id, date, time) triple used for duplicate detection.
    #[must_use]
    pub fn business_key(&self) -> (&str, &str, &str) {
        (
            &self.national_id,
            &self.appointment_date,
            &self.appointment_time,
        )
    }
}

/// Field values entered in the appointment form, before validation.
///
/// An explicit structured record rather than a bag of raw strings keyed by
/// name: validation and conflict checking operate on this type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentDraft {
    /// Calendar date of the visit (`YYYY-MM-DD`).
    pub appointment_date: String,
    /// Time of day of the visit (`HH:MM`).
    pub appointment_time: String,
    /// Patient first name.
    pub first_name: String,
    /// Patient last name.
    pub last_name: String,
    /// National id as typed; canonicalized before any check.
    pub national_id: String,
    /// Contact phone as typed.
    pub phone: String,
    /// Patient birth date (`YYYY-MM-DD`).
    pub birth_date: String,
    /// Free-text notes.
    pub notes: String,
}

impl AppointmentDraft {
    /// Produce the canonical form of this draft: all fields trimmed, the
    /// national id additionally uppercased.
    ///
    /// The orchestrator canonicalizes before validating, conflict checking,
    /// and storing, so stored records always hold canonical values.
    #[must_use]
    pub fn canonicalized(&self) -> Self {
        Self {
            appointment_date: self.appointment_date.trim().to_string(),
            appointment_time: self.appointment_time.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            national_id: normalize_national_id(&self.national_id),
            phone: self.phone.trim().to_string(),
            birth_date: self.birth_date.trim().to_string(),
            notes: self.notes.trim().to_string(),
        }
    }

    /// The (national id, date, time) triple of this draft.
    #[must_use]
    pub fn business_key(&self) -> (&str, &str, &str) {
        (
            &self.national_id,
            &self.appointment_date,
            &self.appointment_time,
        )
    }

    /// A draft holding an existing appointment's values, for pre-filling an
    /// edit form.
    #[must_use]
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            appointment_date: appointment.appointment_date.clone(),
            appointment_time: appointment.appointment_time.clone(),
            first_name: appointment.first_name.clone(),
            last_name: appointment.last_name.clone(),
            national_id: appointment.national_id.clone(),
            phone: appointment.phone.clone(),
            birth_date: appointment.birth_date.clone(),
            notes: appointment.notes.clone(),
        }
    }
}
