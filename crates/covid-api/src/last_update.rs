//! Handler for `GET /last-update`.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::NaiveDate;
use covid_core::snapshot::SnapshotSource;
use serde::Serialize;

use crate::{AppState, error::ApiError};

#[derive(Debug, Serialize)]
pub struct LastUpdate {
  pub last_update: NaiveDate,
}

/// `GET /last-update` — the newest `ultima_actualizacion` in the snapshot.
pub async fn handler<S: SnapshotSource>(
  State(state): State<Arc<AppState<S>>>,
) -> Result<Json<LastUpdate>, ApiError> {
  let last_update = state
    .snapshot()?
    .last_update()
    .ok_or(ApiError::Unavailable)?;
  Ok(Json(LastUpdate { last_update }))
}
