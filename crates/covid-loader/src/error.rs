//! Error type for `covid-loader`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to read dataset file: {0}")]
  Io(#[from] std::io::Error),

  #[error("HTTP error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("dataset download from {url} returned {status}")]
  Status {
    url:    String,
    status: reqwest::StatusCode,
  },

  #[error("dataset could not be decoded: {0}")]
  Csv(#[from] covid_csv::Error),

  #[error("dataset decoding task failed: {0}")]
  Join(#[from] tokio::task::JoinError),

  /// The file parsed but produced no usable rows.
  #[error("dataset contains no usable rows ({skipped} skipped)")]
  EmptyDataset { skipped: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
