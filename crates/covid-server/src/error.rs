//! Startup configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("`dataset` must name a file path or an http(s) URL")]
  MissingDataset,

  #[error("`refresh_interval_secs` must be greater than zero")]
  ZeroRefreshInterval,

  #[error("invalid summary window: {0}")]
  Window(#[from] covid_core::Error),
}
