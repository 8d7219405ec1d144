//! Where the dataset lives and how to pull its bytes.

use std::{fmt, path::PathBuf, time::Duration};

use bytes::Bytes;
use reqwest::Client;

use crate::{Error, Result};

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// A dataset location as written in the server config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetLocation {
  File(PathBuf),
  Url(String),
}

impl DatasetLocation {
  /// `http://` and `https://` strings are URLs; anything else is a path.
  pub fn parse(raw: &str) -> Self {
    let raw = raw.trim();
    if raw.starts_with("http://") || raw.starts_with("https://") {
      Self::Url(raw.to_owned())
    } else {
      Self::File(PathBuf::from(raw))
    }
  }
}

impl fmt::Display for DatasetLocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::File(path) => write!(f, "{}", path.display()),
      Self::Url(url) => f.write_str(url),
    }
  }
}

/// Read the raw dataset bytes. A non-2xx response is an error.
pub async fn fetch(location: &DatasetLocation) -> Result<Bytes> {
  match location {
    DatasetLocation::File(path) => Ok(Bytes::from(tokio::fs::read(path).await?)),
    DatasetLocation::Url(url) => {
      let client = Client::builder().timeout(DOWNLOAD_TIMEOUT).build()?;
      let resp = client.get(url).send().await?;
      let status = resp.status();
      if !status.is_success() {
        return Err(Error::Status {
          url: url.clone(),
          status,
        });
      }
      Ok(resp.bytes().await?)
    }
  }
}
