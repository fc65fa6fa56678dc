//! Error handling for the tm30 binary.

use std::{io, result};

use thiserror::Error;
use tm30_protocol::PersonId;

/// Convenient result type for CLI operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors surfaced to the user by the CLI.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Configuration loading or resolution errors.
    #[error("Configuration error: {0}")]
    Config(#[from] config::Error),
    /// Errors surfaced by the profile store.
    #[error("Store error: {0}")]
    Store(#[from] tm30_store::Error),
    /// The given birth date does not have the `DD/MM/YYYY` shape.
    #[error("invalid birth date {0:?}: expected DD/MM/YYYY")]
    InvalidBirthDate(String),
    /// No profile with the given id.
    #[error("no profile with id {0}")]
    NotFound(PersonId),
    /// The engine task went away mid-fill.
    #[error("fill engine stopped unexpectedly")]
    EngineStopped,
    /// The PIN prompt was answered wrong too many times.
    #[error("too many wrong PIN attempts; run `tm30 pin reset` to wipe the store and start over")]
    LockedOut,
}
