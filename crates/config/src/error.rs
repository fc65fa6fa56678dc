use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while locating or parsing the settings file.
#[derive(Debug, Error)]
pub enum Error {
    /// The file could not be read.
    #[error("config read error{}: {message}", path.as_ref().map(|p| format!(" ({})", p.display())).unwrap_or_default())]
    Read {
        /// Offending path, when known.
        path: Option<PathBuf>,
        /// Human-readable description.
        message: String,
    },

    /// The file was read but did not parse as RON.
    #[error("config parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
