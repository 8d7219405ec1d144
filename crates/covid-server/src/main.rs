//! covid-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) plus `COVID_*`
//! environment variables, starts the background dataset loader, and serves
//! the API over HTTP until interrupted.
//!
//! ```text
//! COVID_DATASET=./Covid19Casos.csv cargo run -p covid-server --bin server
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use covid_api::AppState;
use covid_core::snapshot::SnapshotCell;
use covid_loader::Loader;
use covid_server::ServerConfig;
use tokio::{net::TcpListener, signal};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "COVID-19 case data API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("COVID"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  server_cfg.validate().context("invalid configuration")?;
  let window = server_cfg.summary_window()?;

  // Start the loader; requests get 503 until its first load lands.
  let cell = Arc::new(SnapshotCell::new());
  let location = server_cfg.dataset_location();
  tracing::info!(
    source = %location,
    every_secs = server_cfg.refresh_interval_secs,
    "starting dataset loader"
  );
  let loader = Loader::new(location, Arc::clone(&cell), server_cfg.refresh_interval()).spawn();

  let state = AppState::new(cell).with_window(window);
  let app = covid_server::router(Arc::new(state));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  loader.abort();
  tracing::info!("server stopped");
  Ok(())
}

/// Resolve on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to listen for Ctrl+C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to install SIGTERM handler");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }
  tracing::info!("shutdown signal received");
}
