//! Error types for `covid-core`.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unrecognised classification: {0:?}")]
  InvalidClassification(String),

  #[error("invalid date for `{param}`: {value:?} (expected YYYY-MM-DD)")]
  InvalidDate { param: &'static str, value: String },

  #[error("unknown province slug: {0:?}")]
  UnknownProvince(String),

  #[error("summary window start {start} is after end {end}")]
  InvalidWindow { start: NaiveDate, end: NaiveDate },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
