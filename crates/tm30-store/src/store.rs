//! The JSON store file and its shared handle.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tm30_protocol::Person;
use tracing::debug;

use crate::Result;

/// Lock bookkeeping persisted beside the profiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LockState {
    /// SHA-256 hex of the PIN; `None` means no PIN is set.
    pub pin_hash: Option<String>,
    /// Consecutive failed attempts since the last success.
    #[serde(default)]
    pub attempts: u32,
    /// Unlock session expiry, unix millis.
    #[serde(default)]
    pub session_expires_ms: Option<u64>,
    /// Overridden session lifetime, millis.
    #[serde(default)]
    pub lock_timeout_ms: Option<u64>,
}

/// On-disk document.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoreFile {
    /// All saved profiles, in insertion order.
    #[serde(default)]
    pub persons: Vec<Person>,
    /// PIN lock state.
    #[serde(default)]
    pub lock: LockState,
}

/// Shared handle over the store file. Cheap to clone via `Arc`; one handle
/// per process keeps file writes serialized.
pub struct Store {
    path: PathBuf,
    pub(crate) file: Mutex<StoreFile>,
}

impl Store {
    /// Open (or initialize) the store at `path`.
    pub fn open(path: &Path) -> Result<Arc<Self>> {
        let file = if path.exists() {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str(&raw)?
        } else {
            StoreFile::default()
        };
        debug!(path = %path.display(), persons = file.persons.len(), "store opened");
        Ok(Arc::new(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        }))
    }

    /// Write the current in-memory state back to disk.
    pub(crate) fn persist(&self, file: &StoreFile) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(file)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// Current time as unix epoch milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
