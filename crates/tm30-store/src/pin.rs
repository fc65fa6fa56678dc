//! Four-digit PIN lock over the profile store.
//!
//! The PIN is stored as a SHA-256 hex digest. A successful verification
//! opens a session; while the session is live no further prompting is
//! needed. Failures are counted so callers can lock out after
//! [`MAX_ATTEMPTS`].

use std::{sync::Arc, time::Duration};

use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::{
    Error, Result,
    store::{LockState, Store, now_ms},
};

/// Failed verifications allowed before callers should refuse further tries.
pub const MAX_ATTEMPTS: u32 = 3;

/// Default unlock session lifetime.
const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(300);

/// PIN view over the shared store.
#[derive(Clone)]
pub struct PinManager {
    inner: Arc<Store>,
}

impl PinManager {
    /// Create a PIN view over `store`.
    pub fn new(store: Arc<Store>) -> Self {
        Self { inner: store }
    }

    /// Whether a PIN is currently set.
    pub fn is_enabled(&self) -> bool {
        self.inner.file.lock().lock.pin_hash.is_some()
    }

    /// Consecutive failed attempts since the last success.
    pub fn attempts(&self) -> u32 {
        self.inner.file.lock().lock.attempts
    }

    /// Whether `pin` is exactly four ASCII digits.
    pub fn is_valid_format(pin: &str) -> bool {
        pin.len() == 4 && pin.chars().all(|c| c.is_ascii_digit())
    }

    /// Set (or replace) the PIN. Resets the attempt counter.
    pub fn set_pin(&self, pin: &str) -> Result<()> {
        if !Self::is_valid_format(pin) {
            return Err(Error::PinFormat);
        }
        let mut file = self.inner.file.lock();
        file.lock.pin_hash = Some(hash_pin(pin));
        file.lock.attempts = 0;
        file.lock.session_expires_ms = None;
        self.inner.persist(&file)?;
        info!("PIN set");
        Ok(())
    }

    /// Check `pin` against the stored hash. Success resets the attempt
    /// counter and opens a session; failure increments it. With no PIN set
    /// every check succeeds.
    pub fn verify_pin(&self, pin: &str) -> Result<bool> {
        let mut file = self.inner.file.lock();
        let Some(hash) = &file.lock.pin_hash else {
            return Ok(true);
        };
        if *hash == hash_pin(pin) {
            file.lock.attempts = 0;
            open_session(&mut file.lock);
            self.inner.persist(&file)?;
            Ok(true)
        } else {
            file.lock.attempts += 1;
            warn!(attempts = file.lock.attempts, "PIN verification failed");
            self.inner.persist(&file)?;
            Ok(false)
        }
    }

    /// Open an unlock session without a verification, e.g. right after the
    /// PIN was first set.
    pub fn start_session(&self) -> Result<()> {
        let mut file = self.inner.file.lock();
        open_session(&mut file.lock);
        self.inner.persist(&file)
    }

    /// Whether an unlock session is still live.
    pub fn session_valid(&self) -> bool {
        let file = self.inner.file.lock();
        match file.lock.session_expires_ms {
            Some(expires) => now_ms() < expires,
            None => false,
        }
    }

    /// Forget the current session without touching the PIN.
    pub fn clear_session(&self) -> Result<()> {
        let mut file = self.inner.file.lock();
        file.lock.session_expires_ms = None;
        self.inner.persist(&file)
    }

    /// Override the session lifetime.
    pub fn set_lock_timeout(&self, timeout: Duration) -> Result<()> {
        let mut file = self.inner.file.lock();
        file.lock.lock_timeout_ms = Some(timeout.as_millis() as u64);
        self.inner.persist(&file)
    }

    /// Remove the PIN entirely. Profiles are untouched.
    pub fn remove_pin(&self) -> Result<()> {
        let mut file = self.inner.file.lock();
        file.lock.pin_hash = None;
        file.lock.attempts = 0;
        file.lock.session_expires_ms = None;
        self.inner.persist(&file)?;
        info!("PIN removed");
        Ok(())
    }

    /// Wipe everything: PIN state and all saved profiles. The recovery path
    /// for a forgotten PIN.
    pub fn reset_all(&self) -> Result<()> {
        let mut file = self.inner.file.lock();
        file.persons.clear();
        file.lock = LockState::default();
        self.inner.persist(&file)?;
        warn!("store reset: profiles and PIN wiped");
        Ok(())
    }
}

/// Stamp a fresh session expiry onto the lock state.
fn open_session(lock: &mut LockState) {
    let timeout = lock
        .lock_timeout_ms
        .map_or(DEFAULT_LOCK_TIMEOUT, Duration::from_millis);
    lock.session_expires_ms = Some(now_ms() + timeout.as_millis() as u64);
}

fn hash_pin(pin: &str) -> String {
    format!("{:x}", Sha256::digest(pin.as_bytes()))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn open(dir: &TempDir) -> PinManager {
        let store = Store::open(&dir.path().join("persons.json")).unwrap();
        PinManager::new(store)
    }

    #[test]
    fn format_requires_exactly_four_digits() {
        assert!(PinManager::is_valid_format("1234"));
        assert!(!PinManager::is_valid_format("123"));
        assert!(!PinManager::is_valid_format("12345"));
        assert!(!PinManager::is_valid_format("12a4"));
        assert!(!PinManager::is_valid_format(""));
    }

    #[test]
    fn set_and_verify() {
        let dir = TempDir::new().unwrap();
        let pin = open(&dir);
        assert!(!pin.is_enabled());
        pin.set_pin("1234").unwrap();
        assert!(pin.is_enabled());
        assert!(pin.verify_pin("1234").unwrap());
        assert!(!pin.verify_pin("0000").unwrap());
    }

    #[test]
    fn bad_format_is_rejected() {
        let dir = TempDir::new().unwrap();
        let pin = open(&dir);
        assert!(matches!(pin.set_pin("abcd"), Err(Error::PinFormat)));
        assert!(!pin.is_enabled());
    }

    #[test]
    fn attempts_count_failures_and_reset_on_success() {
        let dir = TempDir::new().unwrap();
        let pin = open(&dir);
        pin.set_pin("1234").unwrap();
        pin.verify_pin("0000").unwrap();
        pin.verify_pin("1111").unwrap();
        assert_eq!(pin.attempts(), 2);
        pin.verify_pin("1234").unwrap();
        assert_eq!(pin.attempts(), 0);
    }

    #[test]
    fn success_opens_a_session() {
        let dir = TempDir::new().unwrap();
        let pin = open(&dir);
        pin.set_pin("1234").unwrap();
        assert!(!pin.session_valid());
        pin.verify_pin("1234").unwrap();
        assert!(pin.session_valid());
        pin.clear_session().unwrap();
        assert!(!pin.session_valid());
    }

    #[test]
    fn zero_timeout_expires_the_session_immediately() {
        let dir = TempDir::new().unwrap();
        let pin = open(&dir);
        pin.set_pin("1234").unwrap();
        pin.set_lock_timeout(Duration::ZERO).unwrap();
        pin.verify_pin("1234").unwrap();
        assert!(!pin.session_valid());
    }

    #[test]
    fn start_session_opens_without_verification() {
        let dir = TempDir::new().unwrap();
        let pin = open(&dir);
        pin.set_pin("1234").unwrap();
        assert!(!pin.session_valid());
        pin.start_session().unwrap();
        assert!(pin.session_valid());
    }

    #[test]
    fn remove_keeps_profiles() {
        use tm30_protocol::{Gender, Person, PersonId};

        let dir = TempDir::new().unwrap();
        let store = Store::open(&dir.path().join("persons.json")).unwrap();
        let profiles = crate::ProfileStore::new(store.clone());
        let pin = PinManager::new(store);
        profiles
            .save(
                Person {
                    id: PersonId(0),
                    first_name: "Somchai".into(),
                    last_name: "Sook".into(),
                    passport_no: "AB1234567".into(),
                    nationality: "THA : THAI".into(),
                    nationality_code: "THA".into(),
                    gender: Gender::M,
                    birth_date: "05/11/1990".into(),
                    phone_no: String::new(),
                    check_in: None,
                    check_out: None,
                },
                None,
            )
            .unwrap();
        pin.set_pin("1234").unwrap();
        pin.remove_pin().unwrap();
        assert!(!pin.is_enabled());
        assert_eq!(profiles.all().len(), 1);

        pin.set_pin("1234").unwrap();
        pin.reset_all().unwrap();
        assert!(!pin.is_enabled());
        assert!(profiles.all().is_empty());
    }

    #[test]
    fn no_pin_means_open_access() {
        let dir = TempDir::new().unwrap();
        let pin = open(&dir);
        assert!(pin.verify_pin("whatever").unwrap());
    }
}
