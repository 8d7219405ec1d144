//! Handlers for `/cases` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/cases` | Listing; JSON or CSV |
//! | `GET`  | `/cases/count` | `{"count": N}` |
//!
//! Both accept `classification`, `icu`, `respirator`, `dead`, `from`, `to`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
  http::HeaderMap,
  response::Response,
};
use covid_core::{filter::RawFilter, snapshot::SnapshotSource};
use serde::Serialize;

use crate::{
  AppState,
  error::ApiError,
  format::{self, Format, FormatParam},
};

/// Body of every count endpoint.
#[derive(Debug, Serialize)]
pub struct CountBody {
  pub count: usize,
}

// ─── Listing ──────────────────────────────────────────────────────────────────

/// `GET /cases[?classification=...][&icu=...][&respirator=...][&dead=...][&from=...][&to=...][&format=...]`
pub async fn list<S: SnapshotSource>(
  State(state): State<Arc<AppState<S>>>,
  raw: Result<Query<RawFilter>, QueryRejection>,
  fmt: Result<Query<FormatParam>, QueryRejection>,
  headers: HeaderMap,
) -> Result<Response, ApiError> {
  let Query(raw) = raw?;
  let Query(fmt) = fmt?;
  let format = Format::negotiate(fmt.format.as_deref(), &headers)?;
  let view = state.select(&raw, None)?;
  format::listing(format, &view)
}

// ─── Count ────────────────────────────────────────────────────────────────────

/// `GET /cases/count[?...same filters...]`
pub async fn count<S: SnapshotSource>(
  State(state): State<Arc<AppState<S>>>,
  raw: Result<Query<RawFilter>, QueryRejection>,
) -> Result<Json<CountBody>, ApiError> {
  let Query(raw) = raw?;
  let view = state.select(&raw, None)?;
  Ok(Json(CountBody { count: view.count() }))
}
