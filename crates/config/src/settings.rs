//! The on-disk settings file (RON).

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, TimingPolicy, default_store_path};

/// Default PIN session lifetime: five minutes.
const DEFAULT_PIN_LOCK_TIMEOUT_SECS: u64 = 300;

/// User settings. Every field has a default so a partial file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path of the profile store file.
    pub store_path: std::path::PathBuf,
    /// Timing policy for the fill engine.
    pub timing: TimingPolicy,
    /// PIN session lifetime in seconds.
    pub pin_lock_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            timing: TimingPolicy::default(),
            pin_lock_timeout_secs: DEFAULT_PIN_LOCK_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path).map_err(|e| Error::Read {
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        })?;
        Ok(ron::from_str(&raw)?)
    }
}
