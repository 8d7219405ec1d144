//! Error types for the covid-csv codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("dataset is missing required column `{0}`")]
  MissingColumn(&'static str),

  #[error("row {row}: invalid {column}: {value:?}")]
  MalformedField {
    row:    u64,
    column: &'static str,
    value:  String,
  },

  #[error("CSV error: {0}")]
  Csv(#[from] csv::Error),

  #[error("failed to flush CSV output: {0}")]
  Flush(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
