//! CRUD over saved traveler profiles.

use std::sync::Arc;

use tm30_protocol::{Person, PersonId};
use tracing::info;

use crate::{
    Error, Result,
    store::{Store, now_ms},
};

/// Profile view over the shared store.
#[derive(Clone)]
pub struct ProfileStore {
    inner: Arc<Store>,
}

impl ProfileStore {
    /// Create a profile view over `store`.
    pub fn new(store: Arc<Store>) -> Self {
        Self { inner: store }
    }

    /// All profiles, in the order they were saved.
    pub fn all(&self) -> Vec<Person> {
        self.inner.file.lock().persons.clone()
    }

    /// Look up a single profile.
    pub fn get(&self, id: PersonId) -> Option<Person> {
        self.inner
            .file
            .lock()
            .persons
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Save a profile. With `existing` set, the matching profile is replaced
    /// in place and keeps its id; otherwise a fresh id is assigned. Returns
    /// the saved profile.
    pub fn save(&self, mut person: Person, existing: Option<PersonId>) -> Result<Person> {
        let mut file = self.inner.file.lock();
        match existing {
            Some(id) => {
                let slot = file
                    .persons
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or(Error::NotFound(id))?;
                person.id = id;
                *slot = person.clone();
            }
            None => {
                person.id = next_id(&file.persons);
                file.persons.push(person.clone());
            }
        }
        self.inner.persist(&file)?;
        info!(id = %person.id, "profile saved");
        Ok(person)
    }

    /// Delete a profile. Returns whether anything was removed.
    pub fn delete(&self, id: PersonId) -> Result<bool> {
        let mut file = self.inner.file.lock();
        let before = file.persons.len();
        file.persons.retain(|p| p.id != id);
        let removed = file.persons.len() != before;
        if removed {
            self.inner.persist(&file)?;
            info!(id = %id, "profile deleted");
        }
        Ok(removed)
    }
}

/// Ids are epoch-millis timestamps, bumped past any existing id so two saves
/// in the same millisecond stay distinct.
fn next_id(persons: &[Person]) -> PersonId {
    let max_existing = persons.iter().map(|p| p.id.0).max().unwrap_or(0);
    PersonId(now_ms().max(max_existing + 1))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use tm30_protocol::Gender;

    use super::*;

    fn person(first: &str) -> Person {
        Person {
            id: PersonId(0),
            first_name: first.into(),
            last_name: "Sook".into(),
            passport_no: "AB1234567".into(),
            nationality: "THA : THAI".into(),
            nationality_code: "THA".into(),
            gender: Gender::M,
            birth_date: "05/11/1990".into(),
            phone_no: String::new(),
            check_in: None,
            check_out: None,
        }
    }

    fn open(dir: &TempDir) -> ProfileStore {
        let store = Store::open(&dir.path().join("persons.json")).unwrap();
        ProfileStore::new(store)
    }

    #[test]
    fn save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let saved = {
            let profiles = open(&dir);
            profiles.save(person("Somchai"), None).unwrap()
        };
        // A fresh handle reads the same profile back from disk.
        let profiles = open(&dir);
        let got = profiles.get(saved.id).unwrap();
        assert_eq!(got.first_name, "Somchai");
    }

    #[test]
    fn ids_stay_distinct_within_one_millisecond() {
        let dir = TempDir::new().unwrap();
        let profiles = open(&dir);
        let a = profiles.save(person("A"), None).unwrap();
        let b = profiles.save(person("B"), None).unwrap();
        assert!(b.id.0 > a.id.0);
    }

    #[test]
    fn edit_preserves_id() {
        let dir = TempDir::new().unwrap();
        let profiles = open(&dir);
        let saved = profiles.save(person("Somchai"), None).unwrap();
        let mut edited = saved.clone();
        edited.first_name = "Somsak".into();
        let updated = profiles.save(edited, Some(saved.id)).unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(profiles.all().len(), 1);
        assert_eq!(profiles.get(saved.id).unwrap().first_name, "Somsak");
    }

    #[test]
    fn edit_of_missing_profile_errors() {
        let dir = TempDir::new().unwrap();
        let profiles = open(&dir);
        let err = profiles
            .save(person("Ghost"), Some(PersonId(42)))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(PersonId(42))));
    }

    #[test]
    fn delete_reports_whether_anything_was_removed() {
        let dir = TempDir::new().unwrap();
        let profiles = open(&dir);
        let saved = profiles.save(person("Somchai"), None).unwrap();
        assert!(profiles.delete(saved.id).unwrap());
        assert!(!profiles.delete(saved.id).unwrap());
        assert!(profiles.all().is_empty());
    }
}
