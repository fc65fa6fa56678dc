//! Configuration for tm30fill: the per-step timing tables the engine runs
//! on, and the on-disk settings file.
#![allow(missing_docs)]

use std::{
    env,
    path::{Path, PathBuf},
};

mod error;
mod settings;
mod timing;

pub use error::Error;
pub use settings::Settings;
pub use timing::{Timing, TimingPolicy};

/// Preferred user config path (`~/.tm30/config.ron`).
pub fn default_config_path() -> PathBuf {
    let mut p = PathBuf::from(env::var_os("HOME").unwrap_or_default());
    p.push(".tm30");
    p.push("config.ron");
    p
}

/// Default profile store path (`~/.tm30/persons.json`).
pub fn default_store_path() -> PathBuf {
    let mut p = PathBuf::from(env::var_os("HOME").unwrap_or_default());
    p.push(".tm30");
    p.push("persons.json");
    p
}

/// Resolve the effective config path.
///
/// Policy:
/// 1) Use `explicit` when provided (missing file is an error).
/// 2) Else use `~/.tm30/config.ron` when it exists.
/// 3) Else `None`: run on built-in defaults.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>, Error> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::Read {
                path: Some(path.to_path_buf()),
                message: "config file not found".to_string(),
            });
        }
        return Ok(Some(path.to_path_buf()));
    }
    let preferred = default_config_path();
    if preferred.exists() {
        Ok(Some(preferred))
    } else {
        Ok(None)
    }
}
