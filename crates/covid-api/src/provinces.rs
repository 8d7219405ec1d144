//! Handlers for `/provinces` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/provinces` | Every known `{slug, province}` |
//! | `GET`  | `/provinces/{slug}/cases` | Listing scoped to one province |
//! | `GET`  | `/provinces/{slug}/cases/count` | Count scoped to one province |
//! | `GET`  | `/provinces/{slug}/summary` | Daily cumulative summary |
//!
//! An unknown slug is a 404 on every scoped route.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State, rejection::QueryRejection},
  http::HeaderMap,
  response::Response,
};
use covid_core::{
  filter::RawFilter,
  province::Province,
  snapshot::SnapshotSource,
  summary::summarize,
};

use crate::{
  AppState,
  cases::CountBody,
  error::ApiError,
  format::{self, Format, FormatParam},
};

/// `GET /provinces`
pub async fn list<S: SnapshotSource>(
  State(state): State<Arc<AppState<S>>>,
) -> Json<Vec<Province>> {
  Json(state.provinces.iter().cloned().collect())
}

/// `GET /provinces/{slug}/cases[?...filters...][&format=...]`
pub async fn cases<S: SnapshotSource>(
  State(state): State<Arc<AppState<S>>>,
  Path(slug): Path<String>,
  raw: Result<Query<RawFilter>, QueryRejection>,
  fmt: Result<Query<FormatParam>, QueryRejection>,
  headers: HeaderMap,
) -> Result<Response, ApiError> {
  let province = state.provinces.resolve(&slug)?;
  let Query(raw) = raw?;
  let Query(fmt) = fmt?;
  let format = Format::negotiate(fmt.format.as_deref(), &headers)?;
  let view = state.select(&raw, Some(province))?;
  format::listing(format, &view)
}

/// `GET /provinces/{slug}/cases/count[?...filters...]`
pub async fn count<S: SnapshotSource>(
  State(state): State<Arc<AppState<S>>>,
  Path(slug): Path<String>,
  raw: Result<Query<RawFilter>, QueryRejection>,
) -> Result<Json<CountBody>, ApiError> {
  let province = state.provinces.resolve(&slug)?;
  let Query(raw) = raw?;
  let view = state.select(&raw, Some(province))?;
  Ok(Json(CountBody { count: view.count() }))
}

/// `GET /provinces/{slug}/summary[?...filters...][&format=...]`
///
/// Filters narrow the rows before aggregation; the window is fixed by
/// server configuration.
pub async fn summary<S: SnapshotSource>(
  State(state): State<Arc<AppState<S>>>,
  Path(slug): Path<String>,
  raw: Result<Query<RawFilter>, QueryRejection>,
  fmt: Result<Query<FormatParam>, QueryRejection>,
  headers: HeaderMap,
) -> Result<Response, ApiError> {
  let province = state.provinces.resolve(&slug)?;
  let Query(raw) = raw?;
  let Query(fmt) = fmt?;
  let format = Format::negotiate(fmt.format.as_deref(), &headers)?;
  let view = state.select(&raw, Some(province))?;
  let rows = summarize(&view, &state.window);
  tracing::debug!(province = %province.name, rows = view.count(), "summarised");
  format::summary(format, &rows)
}
