//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::QueryRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// No dataset has been loaded yet, or the loaded one is empty.
  #[error("dataset unavailable")]
  Unavailable,

  #[error("encoding error: {0}")]
  Encode(#[from] covid_csv::Error),
}

impl From<covid_core::Error> for ApiError {
  fn from(e: covid_core::Error) -> Self {
    match e {
      covid_core::Error::UnknownProvince(_) => ApiError::NotFound(e.to_string()),
      other => ApiError::BadRequest(other.to_string()),
    }
  }
}

impl From<QueryRejection> for ApiError {
  fn from(e: QueryRejection) -> Self { ApiError::BadRequest(e.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Encode(e) => {
        tracing::error!(error = %e, "failed to encode response");
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
