//! Dataset loader for the COVID-19 case API.
//!
//! Pulls `Covid19Casos.csv` from a local path or an HTTP(S) URL, decodes it
//! with [`covid_csv`], and publishes the result into a
//! [`covid_core::snapshot::SnapshotCell`]. The API only ever sees the cell.

mod loader;
mod source;

pub mod error;

pub use error::{Error, Result};
pub use loader::{Loader, load};
pub use source::{DatasetLocation, fetch};

#[cfg(test)]
mod tests;
