//! JSON/CSV REST API over the COVID-19 case dataset.
//!
//! Exposes an axum [`Router`] backed by any
//! [`covid_core::snapshot::SnapshotSource`]. Loading the data, TLS, and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(covid_api::api_router(Arc::new(AppState::new(cell.clone()))))
//! ```

pub mod cases;
pub mod error;
pub mod format;
pub mod last_update;
pub mod provinces;
mod state;

use std::sync::Arc;

use axum::{Router, routing::get};
use covid_core::snapshot::SnapshotSource;

pub use error::ApiError;
pub use state::AppState;

/// Build a fully-materialised API router over `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: Arc<AppState<S>>) -> Router<()>
where
  S: SnapshotSource + 'static,
{
  Router::new()
    // Whole country
    .route("/cases", get(cases::list::<S>))
    .route("/cases/count", get(cases::count::<S>))
    // Provinces
    .route("/provinces", get(provinces::list::<S>))
    .route("/provinces/{slug}/cases", get(provinces::cases::<S>))
    .route("/provinces/{slug}/cases/count", get(provinces::count::<S>))
    .route("/provinces/{slug}/summary", get(provinces::summary::<S>))
    // Metadata
    .route("/last-update", get(last_update::handler::<S>))
    .with_state(state)
}
