//! Interactive PIN gate in front of the profile store.

use std::io::{self, BufRead, Write};

use tm30_store::{MAX_ATTEMPTS, PinManager};

use crate::error::{Error, Result};

/// Make sure the store is unlocked before a profile command runs.
///
/// No PIN, or a still-live unlock session, passes straight through.
/// Otherwise the user is prompted on stdin; every wrong answer is counted in
/// the store, and once [`MAX_ATTEMPTS`] is reached the only way forward is
/// `pin reset`.
pub fn unlock(pin: &PinManager) -> Result<()> {
    if !pin.is_enabled() || pin.session_valid() {
        return Ok(());
    }
    let stdin = io::stdin();
    loop {
        if pin.attempts() >= MAX_ATTEMPTS {
            return Err(Error::LockedOut);
        }
        eprint!("PIN: ");
        io::stderr().flush()?;
        let mut line = String::new();
        stdin.lock().read_line(&mut line)?;
        if pin.verify_pin(line.trim())? {
            return Ok(());
        }
        let left = MAX_ATTEMPTS.saturating_sub(pin.attempts());
        eprintln!("wrong PIN ({left} attempts left)");
    }
}
