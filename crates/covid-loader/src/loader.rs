//! [`Loader`] — keeps a [`SnapshotCell`] filled with the latest dataset.

use std::{sync::Arc, time::Duration};

use covid_core::snapshot::{DatasetSnapshot, SnapshotCell};
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  source::{DatasetLocation, fetch},
};

// ─── One-shot ────────────────────────────────────────────────────────────────

/// Fetch and parse the dataset into a fresh snapshot.
///
/// Malformed rows are skipped. A file with no usable rows at all is an error,
/// so a truncated download never replaces a good snapshot. Decoding runs on
/// the blocking pool.
pub async fn load(location: &DatasetLocation) -> Result<DatasetSnapshot> {
  let bytes = fetch(location).await?;

  let decode = move || -> Result<(DatasetSnapshot, usize)> {
    let parsed = covid_csv::parse_dataset(&bytes)?;
    if let Some(first) = &parsed.first_error {
      debug!(skipped = parsed.skipped, first = %first, "skipped malformed rows");
    }
    if parsed.records.is_empty() {
      return Err(Error::EmptyDataset {
        skipped: parsed.skipped,
      });
    }
    Ok((DatasetSnapshot::new(parsed.records), parsed.skipped))
  };
  let (snapshot, skipped) = tokio::task::spawn_blocking(decode).await??;

  info!(
    source = %location,
    rows = snapshot.len(),
    skipped,
    last_update = ?snapshot.last_update(),
    loaded_at = %snapshot.loaded_at(),
    "dataset loaded"
  );
  Ok(snapshot)
}

// ─── Periodic ────────────────────────────────────────────────────────────────

/// Periodically reloads a dataset into a shared cell.
#[derive(Debug, Clone)]
pub struct Loader {
  location: DatasetLocation,
  cell:     Arc<SnapshotCell>,
  interval: Duration,
}

impl Loader {
  pub fn new(location: DatasetLocation, cell: Arc<SnapshotCell>, interval: Duration) -> Self {
    Self {
      location,
      cell,
      interval,
    }
  }

  /// Load once and swap the result in. On failure the cell is left as it
  /// was. Returns the number of rows now being served.
  pub async fn refresh_once(&self) -> Result<usize> {
    let snapshot = load(&self.location).await?;
    let rows = snapshot.len();
    self.cell.replace(snapshot);
    Ok(rows)
  }

  /// Run forever on the tokio runtime: load immediately, then every
  /// `interval`.
  pub fn spawn(self) -> JoinHandle<()> {
    tokio::spawn(async move {
      let mut ticker = tokio::time::interval(self.interval);
      ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
      loop {
        ticker.tick().await;
        if let Err(e) = self.refresh_once().await {
          warn!(source = %self.location, error = %e, "dataset refresh failed; keeping previous snapshot");
        }
      }
    })
  }
}
