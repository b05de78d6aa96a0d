//! CRUD orchestration for citabook.
//!
//! [`AppointmentBook`] coordinates create, edit, and delete against the
//! repository: canonicalize the draft, run the full-form validation gate,
//! check the business key for conflicts, then mutate and persist. Every
//! failure is signaled, never silently corrected, and carries what the caller
//! needs to re-render the form with the user's input intact.

use tracing::{debug, info};
use uuid::Uuid;

use crate::appointment::{Appointment, AppointmentDraft};
use crate::error::{Error, Result};
use crate::repository::Repository;
use crate::validator::validate_form;

/// The appointment book: orchestrates all mutations of the collection.
#[derive(Debug)]
pub struct AppointmentBook {
    repository: Repository,
}

impl AppointmentBook {
    /// Create a book over the given repository.
    #[must_use]
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// The full collection, in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Appointment> {
        self.repository.load_all()
    }

    /// Look up a single appointment, e.g. to pre-fill an edit form.
    ///
    /// Always reads from the store, never from previously rendered state.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<Appointment> {
        self.repository.find_by_id(id)
    }

    /// Create a new appointment from a form draft.
    ///
    /// The draft is canonicalized, validated, and conflict-checked before a
    /// fresh id is assigned and the record appended to the collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] with the complete violation set if any
    /// field is invalid, or [`Error::Conflict`] if another appointment holds
    /// the same (national id, date, time) key. Persistence failures propagate
    /// as storage errors.
    pub fn create(&self, draft: &AppointmentDraft) -> Result<Appointment> {
        let draft = draft.canonicalized();
        self.check(&draft, None)?;

        let mut appointments = self.repository.load_all();
        let appointment = Appointment::from_draft(Uuid::new_v4().to_string(), draft);
        appointments.push(appointment.clone());
        self.repository.save_all(&appointments)?;

        info!("Created appointment {}", appointment.id);
        Ok(appointment)
    }

    /// Replace an existing appointment's fields, preserving its id and its
    /// position in the collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `id` does not reference a stored
    /// appointment, [`Error::Validation`] or [`Error::Conflict`] under the
    /// same conditions as [`Self::create`] (the record being edited is
    /// excluded from the conflict check).
    pub fn update(&self, id: &str, draft: &AppointmentDraft) -> Result<Appointment> {
        let draft = draft.canonicalized();

        let mut appointments = self.repository.load_all();
        let index = appointments
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| Error::not_found(id))?;

        self.check(&draft, Some(id))?;

        appointments[index].apply_draft(draft);
        let appointment = appointments[index].clone();
        self.repository.save_all(&appointments)?;

        info!("Updated appointment {}", id);
        Ok(appointment)
    }

    /// Remove the appointment with the given id, if present.
    ///
    /// Idempotent: a missing id is not an error and leaves the collection
    /// untouched. Returns whether a record was removed. Asking the user for
    /// confirmation is the caller's responsibility; once asked, the removal
    /// is unconditional.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting the shrunken collection fails.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut appointments = self.repository.load_all();
        let before = appointments.len();
        appointments.retain(|a| a.id != id);

        if appointments.len() == before {
            debug!("Delete of unknown appointment {} is a no-op", id);
            return Ok(false);
        }

        self.repository.save_all(&appointments)?;
        info!("Deleted appointment {}", id);
        Ok(true)
    }

    /// Run the validation gate, then the conflict gate, on a canonicalized
    /// draft.
    fn check(&self, draft: &AppointmentDraft, excluding_id: Option<&str>) -> Result<()> {
        let violations = validate_form(draft);
        if !violations.is_empty() {
            return Err(Error::validation(violations));
        }

        if self.repository.has_conflict(draft, excluding_id) {
            let (national_id, date, time) = draft.business_key();
            return Err(Error::conflict(national_id, date, time));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use chrono::Duration;

    fn test_book() -> AppointmentBook {
        let store = Store::open_in_memory().expect("failed to create test store");
        AppointmentBook::new(Repository::new(store, Duration::days(30)))
    }

    fn draft(national_id: &str, date: &str, time: &str) -> AppointmentDraft {
        AppointmentDraft {
            appointment_date: date.to_string(),
            appointment_time: time.to_string(),
            first_name: "Ana".to_string(),
            last_name: "García".to_string(),
            national_id: national_id.to_string(),
            phone: "612345678".to_string(),
            birth_date: "1980-02-15".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_create_assigns_id_and_persists() {
        let book = test_book();
        let created = book
            .create(&draft("12345678A", "2024-01-01", "10:00"))
            .unwrap();

        assert!(!created.id.is_empty());
        let found = book.find(&created.id).expect("created record not found");
        assert_eq!(found, created);
    }

    #[test]
    fn test_create_assigns_distinct_ids() {
        let book = test_book();
        let a = book
            .create(&draft("12345678A", "2024-01-01", "10:00"))
            .unwrap();
        let b = book
            .create(&draft("12345678A", "2024-01-01", "11:00"))
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_create_canonicalizes_draft() {
        let book = test_book();
        let mut d = draft(" 12345678a ", "2024-01-01", "10:00");
        d.first_name = "  Ana ".to_string();

        let created = book.create(&d).unwrap();
        assert_eq!(created.national_id, "12345678A");
        assert_eq!(created.first_name, "Ana");
    }

    #[test]
    fn test_create_rejects_invalid_draft_with_all_violations() {
        let book = test_book();
        let mut d = draft("bad", "2024-01-01", "10:00");
        d.phone = "123".to_string();

        let err = book.create(&d).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.violations().unwrap().len(), 2);
        // Nothing was persisted.
        assert!(book.list().is_empty());
    }

    #[test]
    fn test_create_rejects_duplicate_business_key() {
        let book = test_book();
        book.create(&draft("12345678A", "2024-01-01", "10:00"))
            .unwrap();

        let err = book
            .create(&draft("12345678A", "2024-01-01", "10:00"))
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(book.list().len(), 1);
    }

    #[test]
    fn test_create_allows_same_patient_different_slot() {
        let book = test_book();
        book.create(&draft("12345678A", "2024-01-01", "10:00"))
            .unwrap();
        book.create(&draft("12345678A", "2024-01-01", "10:30"))
            .unwrap();
        assert_eq!(book.list().len(), 2);
    }

    #[test]
    fn test_create_appends_in_insertion_order() {
        let book = test_book();
        let a = book
            .create(&draft("12345678A", "2024-01-01", "10:00"))
            .unwrap();
        let b = book
            .create(&draft("87654321B", "2024-01-01", "10:00"))
            .unwrap();

        let ids: Vec<String> = book.list().into_iter().map(|x| x.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[test]
    fn test_update_preserves_id_and_position() {
        let book = test_book();
        let first = book
            .create(&draft("12345678A", "2024-01-01", "10:00"))
            .unwrap();
        let second = book
            .create(&draft("87654321B", "2024-01-01", "10:00"))
            .unwrap();

        let updated = book
            .update(&first.id, &draft("12345678A", "2024-02-02", "12:00"))
            .unwrap();

        assert_eq!(updated.id, first.id);
        assert_eq!(updated.appointment_date, "2024-02-02");

        let list = book.list();
        assert_eq!(list[0].id, first.id);
        assert_eq!(list[0].appointment_date, "2024-02-02");
        assert_eq!(list[1], second);
    }

    #[test]
    fn test_update_does_not_conflict_with_itself() {
        let book = test_book();
        let created = book
            .create(&draft("12345678A", "2024-01-01", "10:00"))
            .unwrap();

        // Re-submitting the same slot for the same record succeeds.
        let updated = book
            .update(&created.id, &draft("12345678A", "2024-01-01", "10:00"))
            .unwrap();
        assert_eq!(updated.business_key(), created.business_key());
    }

    #[test]
    fn test_update_conflicts_with_other_record() {
        let book = test_book();
        book.create(&draft("12345678A", "2024-01-01", "10:00"))
            .unwrap();
        let other = book
            .create(&draft("87654321B", "2024-01-01", "10:00"))
            .unwrap();

        let err = book
            .update(&other.id, &draft("12345678A", "2024-01-01", "10:00"))
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_update_unknown_id() {
        let book = test_book();
        let err = book
            .update("ghost", &draft("12345678A", "2024-01-01", "10:00"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_rejects_invalid_draft() {
        let book = test_book();
        let created = book
            .create(&draft("12345678A", "2024-01-01", "10:00"))
            .unwrap();

        let mut bad = draft("12345678A", "2024-01-01", "10:00");
        bad.last_name = String::new();
        let err = book.update(&created.id, &bad).unwrap_err();
        assert!(err.is_validation());

        // Stored record unchanged.
        assert_eq!(book.find(&created.id).unwrap(), created);
    }

    #[test]
    fn test_delete_removes_record() {
        let book = test_book();
        let created = book
            .create(&draft("12345678A", "2024-01-01", "10:00"))
            .unwrap();

        assert!(book.delete(&created.id).unwrap());
        assert!(book.find(&created.id).is_none());
        assert!(book.list().is_empty());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let book = test_book();
        let created = book
            .create(&draft("12345678A", "2024-01-01", "10:00"))
            .unwrap();

        assert!(!book.delete("ghost").unwrap());
        assert_eq!(book.list().len(), 1);

        assert!(book.delete(&created.id).unwrap());
        assert!(!book.delete(&created.id).unwrap());
    }

    #[test]
    fn test_delete_preserves_remaining_order() {
        let book = test_book();
        let a = book
            .create(&draft("12345678A", "2024-01-01", "10:00"))
            .unwrap();
        let b = book
            .create(&draft("87654321B", "2024-01-01", "10:00"))
            .unwrap();
        let c = book
            .create(&draft("11111111C", "2024-01-01", "10:00"))
            .unwrap();

        book.delete(&b.id).unwrap();
        let ids: Vec<String> = book.list().into_iter().map(|x| x.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[test]
    fn test_freed_slot_can_be_reused() {
        let book = test_book();
        let created = book
            .create(&draft("12345678A", "2024-01-01", "10:00"))
            .unwrap();
        book.delete(&created.id).unwrap();

        assert!(book.create(&draft("12345678A", "2024-01-01", "10:00")).is_ok());
    }
}
