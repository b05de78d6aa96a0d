//! Appointment repository for citabook.
//!
//! Loads and saves the full appointment collection through the store. The
//! store is the single source of truth: every operation re-reads the whole
//! collection, so there is no look-aside cache to invalidate. Reads are
//! fail-soft — an absent, expired, or corrupt blob degrades to an empty
//! collection rather than an error, so a damaged store never takes the
//! application down.

use chrono::Duration;
use tracing::{debug, warn};

use crate::appointment::{Appointment, AppointmentDraft};
use crate::error::Result;
use crate::store::Store;

/// Well-known store key holding the serialized collection.
pub const COLLECTION_KEY: &str = "appointments";

/// Repository over the appointment collection.
#[derive(Debug)]
pub struct Repository {
    store: Store,
    ttl: Duration,
}

impl Repository {
    /// Create a repository over the given store.
    ///
    /// `ttl` is the expiry horizon applied (and refreshed) on every write.
    #[must_use]
    pub fn new(store: Store, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Load the full collection, in insertion order.
    ///
    /// Never fails: an absent key, an expired entry, a store error, or a
    /// blob that does not parse as a JSON appointment array all yield the
    /// empty collection.
    #[must_use]
    pub fn load_all(&self) -> Vec<Appointment> {
        let blob = match self.store.get(COLLECTION_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!("No stored collection, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!("Store read failed, treating collection as empty: {e}");
                return Vec::new();
            }
        };

        match serde_json::from_str(&blob) {
            Ok(appointments) => appointments,
            Err(e) => {
                warn!("Discarding corrupt collection blob: {e}");
                Vec::new()
            }
        }
    }

    /// Serialize the full collection back to the store, overwriting prior
    /// content and refreshing the expiry horizon.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store write fails.
    pub fn save_all(&self, appointments: &[Appointment]) -> Result<()> {
        let blob = serde_json::to_string(appointments)?;
        self.store.put(COLLECTION_KEY, &blob, self.ttl)?;
        debug!("Saved {} appointment(s)", appointments.len());
        Ok(())
    }

    /// Find an appointment by its id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<Appointment> {
        self.load_all().into_iter().find(|a| a.id == id)
    }

    /// Check whether some stored appointment with a different id shares the
    /// candidate's (national id, date, time) business key.
    ///
    /// `excluding_id` lets an edit not conflict with itself: pass the id of
    /// the record being edited, or `None` when creating.
    #[must_use]
    pub fn has_conflict(&self, candidate: &AppointmentDraft, excluding_id: Option<&str>) -> bool {
        let key = candidate.business_key();
        self.load_all()
            .iter()
            .any(|a| Some(a.id.as_str()) != excluding_id && a.business_key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_repository() -> Repository {
        let store = Store::open_in_memory().expect("failed to create test store");
        Repository::new(store, Duration::days(30))
    }

    fn appointment(id: &str, national_id: &str, date: &str, time: &str) -> Appointment {
        Appointment {
            id: id.to_string(),
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
    fn test_load_all_empty_on_fresh_store() {
        let repo = test_repository();
        assert!(repo.load_all().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let repo = test_repository();
        let items = vec![
            appointment("1", "12345678A", "2024-01-01", "10:00"),
            appointment("2", "87654321B", "2024-01-02", "11:30"),
        ];

        repo.save_all(&items).unwrap();
        assert_eq!(repo.load_all(), items);
    }

    #[test]
    fn test_save_all_overwrites() {
        let repo = test_repository();
        repo.save_all(&[appointment("1", "12345678A", "2024-01-01", "10:00")])
            .unwrap();
        repo.save_all(&[appointment("2", "87654321B", "2024-01-02", "11:30")])
            .unwrap();

        let loaded = repo.load_all();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "2");
    }

    #[test]
    fn test_load_all_preserves_order() {
        let repo = test_repository();
        let items: Vec<Appointment> = (0..5)
            .map(|i| appointment(&i.to_string(), "12345678A", "2024-01-01", &format!("{i:02}:00")))
            .collect();
        repo.save_all(&items).unwrap();

        let ids: Vec<String> = repo.load_all().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_corrupt_blob_degrades_to_empty() {
        let store = Store::open_in_memory().unwrap();
        store
            .put(COLLECTION_KEY, "{this is not json", Duration::days(30))
            .unwrap();

        let repo = Repository::new(store, Duration::days(30));
        assert!(repo.load_all().is_empty());
    }

    #[test]
    fn test_wrong_shape_blob_degrades_to_empty() {
        let store = Store::open_in_memory().unwrap();
        store
            .put(COLLECTION_KEY, r#"{"not":"an array"}"#, Duration::days(30))
            .unwrap();

        let repo = Repository::new(store, Duration::days(30));
        assert!(repo.load_all().is_empty());
    }

    #[test]
    fn test_expired_collection_degrades_to_empty() {
        let store = Store::open_in_memory().unwrap();
        let repo = Repository::new(store, Duration::seconds(-1));
        repo.save_all(&[appointment("1", "12345678A", "2024-01-01", "10:00")])
            .unwrap();

        assert!(repo.load_all().is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let repo = test_repository();
        repo.save_all(&[
            appointment("1", "12345678A", "2024-01-01", "10:00"),
            appointment("2", "87654321B", "2024-01-02", "11:30"),
        ])
        .unwrap();

        assert_eq!(repo.find_by_id("2").unwrap().national_id, "87654321B");
        assert!(repo.find_by_id("3").is_none());
    }

    #[test]
    fn test_has_conflict_excludes_self() {
        let repo = test_repository();
        repo.save_all(&[appointment("1", "12345678A", "2024-01-01", "10:00")])
            .unwrap();

        let candidate = draft("12345678A", "2024-01-01", "10:00");

        // Editing record 1 itself: no conflict.
        assert!(!repo.has_conflict(&candidate, Some("1")));
        // Any other record (or a create) with the same key: conflict.
        assert!(repo.has_conflict(&candidate, Some("2")));
        assert!(repo.has_conflict(&candidate, None));
    }

    #[test]
    fn test_has_conflict_requires_full_key_match() {
        let repo = test_repository();
        repo.save_all(&[appointment("1", "12345678A", "2024-01-01", "10:00")])
            .unwrap();

        assert!(!repo.has_conflict(&draft("12345678A", "2024-01-01", "10:30"), None));
        assert!(!repo.has_conflict(&draft("12345678A", "2024-01-02", "10:00"), None));
        assert!(!repo.has_conflict(&draft("87654321B", "2024-01-01", "10:00"), None));
    }

    #[test]
    fn test_save_refreshes_ttl() {
        // A fresh save must be readable even if the previous blob was
        // written long ago; the horizon restarts on every write.
        let repo = test_repository();
        repo.save_all(&[appointment("1", "12345678A", "2024-01-01", "10:00")])
            .unwrap();
        repo.save_all(&[appointment("1", "12345678A", "2024-01-01", "10:00")])
            .unwrap();
        assert_eq!(repo.load_all().len(), 1);
    }
}
