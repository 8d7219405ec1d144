//! Response encoding: JSON by default, CSV on request.
//!
//! An explicit `?format=` wins over the `Accept` header. Only listings and
//! summaries have a CSV form; counts and metadata are always JSON.

use axum::{
  Json,
  http::{HeaderMap, HeaderValue, header},
  response::{IntoResponse, Response},
};
use covid_core::{filter::FilteredView, record::CaseRecord, summary::DailySummary};
use serde::Deserialize;

use crate::error::ApiError;

const CSV_MIME: &str = "text/csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
  Json,
  Csv,
}

/// The `format` query parameter, extracted separately from the filters.
#[derive(Debug, Default, Deserialize)]
pub struct FormatParam {
  pub format: Option<String>,
}

impl Format {
  pub fn negotiate(param: Option<&str>, headers: &HeaderMap) -> Result<Self, ApiError> {
    if let Some(raw) = param {
      return match raw.trim().to_ascii_lowercase().as_str() {
        "json" => Ok(Self::Json),
        "csv" => Ok(Self::Csv),
        _ => Err(ApiError::BadRequest(format!(
          "unsupported format {raw:?} (expected json or csv)"
        ))),
      };
    }

    let wants_csv = headers
      .get(header::ACCEPT)
      .and_then(|v| v.to_str().ok())
      .is_some_and(|accept| {
        accept.split(',').any(|range| {
          range
            .split(';')
            .next()
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(CSV_MIME))
        })
      });
    Ok(if wants_csv { Self::Csv } else { Self::Json })
  }
}

fn csv_response(body: Vec<u8>) -> Response {
  (
    [(
      header::CONTENT_TYPE,
      HeaderValue::from_static("text/csv; charset=utf-8"),
    )],
    body,
  )
    .into_response()
}

/// Encode the rows of `view` in file order.
pub(crate) fn listing(format: Format, view: &FilteredView) -> Result<Response, ApiError> {
  match format {
    Format::Json => Ok(Json(view.rows().collect::<Vec<&CaseRecord>>()).into_response()),
    Format::Csv => Ok(csv_response(covid_csv::write_records(view.rows())?)),
  }
}

pub(crate) fn summary(format: Format, rows: &[DailySummary]) -> Result<Response, ApiError> {
  match format {
    Format::Json => Ok(Json(rows).into_response()),
    Format::Csv => Ok(csv_response(covid_csv::write_summary(rows)?)),
  }
}
