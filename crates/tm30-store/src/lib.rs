//! Local persistence for tm30fill: traveler profiles, the PIN lock state
//! that gates access to them, and spreadsheet import/export.
//!
//! Everything lives in one JSON store file. Writes go through a single
//! [`Store`] handle; [`ProfileStore`] and [`PinManager`] are views over it.

mod error;
mod pin;
mod profiles;
mod spreadsheet;
mod store;

pub use error::{Error, Result};
pub use pin::{MAX_ATTEMPTS, PinManager};
pub use profiles::ProfileStore;
pub use spreadsheet::{ImportSummary, export_csv, import_csv};
pub use store::Store;
