//! Shared handler state.

use std::sync::Arc;

use covid_core::{
  filter::{Equals, FilterSpec, FilteredView, RawFilter},
  province::{Province, ProvinceDirectory},
  snapshot::{DatasetSnapshot, SnapshotSource},
  summary::SummaryWindow,
};

use crate::error::ApiError;

/// Everything a handler needs: where to get the data, how to resolve
/// province slugs, and which days a summary covers.
#[derive(Debug)]
pub struct AppState<S> {
  pub source:    S,
  pub provinces: ProvinceDirectory,
  pub window:    SummaryWindow,
}

impl<S: SnapshotSource> AppState<S> {
  /// State over `source` with the Argentine province table and the default
  /// summary window.
  pub fn new(source: S) -> Self {
    Self {
      source,
      provinces: ProvinceDirectory::argentina(),
      window: SummaryWindow::default(),
    }
  }

  pub fn with_window(mut self, window: SummaryWindow) -> Self {
    self.window = window;
    self
  }

  /// The snapshot to answer from. Missing and empty snapshots are both
  /// reported as unavailable.
  pub(crate) fn snapshot(&self) -> Result<Arc<DatasetSnapshot>, ApiError> {
    match self.source.current() {
      Some(snapshot) if !snapshot.is_empty() => Ok(snapshot),
      _ => Err(ApiError::Unavailable),
    }
  }

  /// Validate `raw`, then narrow the current snapshot by it and, if given,
  /// by `province`.
  pub(crate) fn select(
    &self,
    raw: &RawFilter,
    province: Option<&Province>,
  ) -> Result<FilteredView, ApiError> {
    let spec = FilterSpec::parse(raw)?;
    let view = spec.apply(&self.snapshot()?.view());
    Ok(match province {
      Some(p) => view.filter_eq(&Equals::Province(p.name.clone())),
      None => view,
    })
  }
}
