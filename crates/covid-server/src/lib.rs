//! HTTP server wiring for the COVID-19 case API.
//!
//! Holds the runtime configuration and wraps [`covid_api::api_router`] with
//! request tracing. The binary in `main.rs` does the rest: reads config,
//! starts the dataset loader, and serves.

pub mod error;

pub use error::Error;

use std::{sync::Arc, time::Duration};

use axum::Router;
use chrono::NaiveDate;
use covid_api::AppState;
use covid_core::{snapshot::SnapshotSource, summary::SummaryWindow};
use covid_loader::DatasetLocation;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `COVID_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                  String,
  #[serde(default = "default_port")]
  pub port:                  u16,
  /// Path or `http(s)://` URL of `Covid19Casos.csv`.
  pub dataset:               String,
  #[serde(default = "default_refresh_interval_secs")]
  pub refresh_interval_secs: u64,
  #[serde(default = "default_summary_start")]
  pub summary_start:         NaiveDate,
  #[serde(default = "default_summary_end")]
  pub summary_end:           NaiveDate,
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 8000 }

fn default_refresh_interval_secs() -> u64 { 24 * 60 * 60 }

fn default_summary_start() -> NaiveDate { SummaryWindow::default().start() }

fn default_summary_end() -> NaiveDate { SummaryWindow::default().end() }

impl ServerConfig {
  /// Check the values serde cannot.
  pub fn validate(&self) -> Result<(), Error> {
    if self.dataset.trim().is_empty() {
      return Err(Error::MissingDataset);
    }
    if self.refresh_interval_secs == 0 {
      return Err(Error::ZeroRefreshInterval);
    }
    self.summary_window()?;
    Ok(())
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn dataset_location(&self) -> DatasetLocation {
    DatasetLocation::parse(&self.dataset)
  }

  pub fn refresh_interval(&self) -> Duration {
    Duration::from_secs(self.refresh_interval_secs)
  }

  pub fn summary_window(&self) -> Result<SummaryWindow, Error> {
    Ok(SummaryWindow::new(self.summary_start, self.summary_end)?)
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: the API plus request tracing.
pub fn router<S>(state: Arc<AppState<S>>) -> Router
where
  S: SnapshotSource + 'static,
{
  covid_api::api_router(state).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use covid_core::{
    record::CaseRecord,
    snapshot::{DatasetSnapshot, SnapshotCell},
  };
  use tower::ServiceExt as _;

  use super::*;

  fn parse(toml: &str) -> Result<ServerConfig, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
      .build()?
      .try_deserialize()
  }

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  // ── Configuration ───────────────────────────────────────────────────────────

  #[test]
  fn defaults_fill_everything_but_dataset() {
    let cfg = parse(r#"dataset = "/srv/Covid19Casos.csv""#).unwrap();
    assert_eq!(cfg.address(), "0.0.0.0:8000");
    assert_eq!(cfg.refresh_interval(), Duration::from_secs(86_400));
    assert_eq!(cfg.summary_window().unwrap(), SummaryWindow::default());
    assert_eq!(
      cfg.dataset_location(),
      DatasetLocation::File("/srv/Covid19Casos.csv".into())
    );
    cfg.validate().unwrap();
  }

  #[test]
  fn dataset_is_required() {
    assert!(parse("port = 9000").is_err());
  }

  #[test]
  fn explicit_values_override_defaults() {
    let cfg = parse(
      r#"
        host = "127.0.0.1"
        port = 9000
        dataset = "https://example.org/Covid19Casos.csv"
        refresh_interval_secs = 600
        summary_start = "2020-03-01"
        summary_end = "2020-03-31"
      "#,
    )
    .unwrap();
    assert_eq!(cfg.address(), "127.0.0.1:9000");
    assert_eq!(cfg.refresh_interval(), Duration::from_secs(600));
    assert!(matches!(cfg.dataset_location(), DatasetLocation::Url(_)));
    let window = cfg.summary_window().unwrap();
    assert_eq!(window.start(), date(2020, 3, 1));
    assert_eq!(window.num_days(), 31);
  }

  #[test]
  fn validate_rejects_bad_values() {
    let cfg = parse(
      r#"
        dataset = "data.csv"
        summary_start = "2020-07-16"
        summary_end = "2020-02-15"
      "#,
    )
    .unwrap();
    assert!(matches!(cfg.validate(), Err(Error::Window(_))));

    let cfg = parse("dataset = \"data.csv\"\nrefresh_interval_secs = 0").unwrap();
    assert!(matches!(cfg.validate(), Err(Error::ZeroRefreshInterval)));

    let cfg = parse("dataset = \"  \"").unwrap();
    assert!(matches!(cfg.validate(), Err(Error::MissingDataset)));
  }

  // ── Router ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn traced_router_serves_api() {
    let cell = SnapshotCell::with_snapshot(DatasetSnapshot::new(vec![CaseRecord::new(
      1,
      "Salta",
      date(2020, 7, 16),
    )]));
    let app = router(Arc::new(AppState::new(cell)));

    let req = Request::builder()
      .uri("/last-update")
      .body(Body::empty())
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["last_update"], "2020-07-16");
  }

  #[tokio::test]
  async fn unmatched_path_is_404() {
    let app = router(Arc::new(AppState::new(SnapshotCell::new())));
    let req = Request::builder()
      .uri("/nope")
      .body(Body::empty())
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
