use std::{io, result::Result as StdResult};

use thiserror::Error;
use tm30_protocol::PersonId;

/// Convenient result type for the store crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for store operations.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O failure while reading or writing the store file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The store file is not valid JSON.
    #[error("store file corrupt: {0}")]
    Json(#[from] serde_json::Error),

    /// Spreadsheet read/write failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No profile with the given id.
    #[error("no profile with id {0}")]
    NotFound(PersonId),

    /// PIN is not exactly four digits.
    #[error("PIN must be exactly 4 digits")]
    PinFormat,
}
