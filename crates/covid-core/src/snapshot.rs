//! The dataset snapshot and the `SnapshotSource` trait.
//!
//! A snapshot is loaded by something outside this crate (see `covid-loader`)
//! and never changes once built. Refreshing means building a new snapshot and
//! swapping the pointer; requests already holding the old `Arc` keep reading
//! it undisturbed.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, NaiveDate, Utc};

use crate::{filter::FilteredView, record::CaseRecord};

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// An immutable, fully-loaded table of case records.
#[derive(Debug)]
pub struct DatasetSnapshot {
  records:     Vec<CaseRecord>,
  last_update: Option<NaiveDate>,
  loaded_at:   DateTime<Utc>,
}

impl DatasetSnapshot {
  pub fn new(records: Vec<CaseRecord>) -> Self {
    let last_update = records.iter().map(|r| r.last_update).max();
    Self {
      records,
      last_update,
      loaded_at: Utc::now(),
    }
  }

  pub fn records(&self) -> &[CaseRecord] { &self.records }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  /// Maximum `ultima_actualizacion` over every record; `None` when empty.
  pub fn last_update(&self) -> Option<NaiveDate> { self.last_update }

  /// When this snapshot was built in-process.
  pub fn loaded_at(&self) -> DateTime<Utc> { self.loaded_at }

  /// An unfiltered view over every row.
  pub fn view(self: &Arc<Self>) -> FilteredView {
    FilteredView::full(Arc::clone(self))
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Anything that can hand out the current snapshot.
///
/// Higher layers (`covid-api`) depend on this abstraction rather than on how
/// the snapshot is kept fresh.
pub trait SnapshotSource: Send + Sync {
  /// The snapshot to serve right now, or `None` if nothing is loaded yet.
  fn current(&self) -> Option<Arc<DatasetSnapshot>>;
}

// ─── Cell ────────────────────────────────────────────────────────────────────

/// A shared slot holding the latest snapshot.
///
/// The lock only guards the pointer, so readers clone an `Arc` and release it
/// immediately; a `replace` never waits on a slow request.
#[derive(Debug, Default)]
pub struct SnapshotCell {
  inner: RwLock<Option<Arc<DatasetSnapshot>>>,
}

impl SnapshotCell {
  pub fn new() -> Self { Self::default() }

  /// A cell that starts out holding `snapshot`.
  pub fn with_snapshot(snapshot: DatasetSnapshot) -> Self {
    Self {
      inner: RwLock::new(Some(Arc::new(snapshot))),
    }
  }

  /// Swap in a new snapshot, returning the one it replaced.
  pub fn replace(&self, snapshot: DatasetSnapshot) -> Option<Arc<DatasetSnapshot>> {
    let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
    slot.replace(Arc::new(snapshot))
  }
}

impl SnapshotSource for SnapshotCell {
  fn current(&self) -> Option<Arc<DatasetSnapshot>> {
    self
      .inner
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }
}

impl<T: SnapshotSource + ?Sized> SnapshotSource for Arc<T> {
  fn current(&self) -> Option<Arc<DatasetSnapshot>> { (**self).current() }
}
