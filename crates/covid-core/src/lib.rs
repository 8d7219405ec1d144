//! Core types and the filter/aggregate pipeline for the COVID-19 case API.
//!
//! This crate is deliberately free of HTTP and I/O dependencies. It consumes
//! an in-memory [`snapshot::DatasetSnapshot`] that some other component has
//! loaded, narrows it with composable predicates, and derives per-province
//! daily summaries from the result.

pub mod error;
pub mod filter;
pub mod province;
pub mod record;
pub mod snapshot;
pub mod summary;

pub use error::{Error, Result};
