//! Per-province daily summary with running totals.
//!
//! The summary is a left join of daily case and death counts onto a complete
//! calendar spine, so every day of the window appears exactly once even when
//! nothing happened on it.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, filter::FilteredView};

// ─── Window ──────────────────────────────────────────────────────────────────

/// The inclusive date range a summary covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryWindow {
  start: NaiveDate,
  end:   NaiveDate,
}

impl SummaryWindow {
  pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
    if start > end {
      return Err(Error::InvalidWindow { start, end });
    }
    Ok(Self { start, end })
  }

  pub fn start(&self) -> NaiveDate { self.start }

  pub fn end(&self) -> NaiveDate { self.end }

  /// Number of days in the window, both ends included.
  pub fn num_days(&self) -> usize {
    (self.end - self.start).num_days() as usize + 1
  }

  /// The calendar spine: every date from `start` to `end` in order.
  pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
    let end = self.end;
    self.start.iter_days().take_while(move |d| *d <= end)
  }
}

impl Default for SummaryWindow {
  /// 2020-02-15 to 2020-07-16, the range existing clients were built against.
  fn default() -> Self {
    Self {
      start: NaiveDate::from_ymd_opt(2020, 2, 15).expect("valid date"),
      end:   NaiveDate::from_ymd_opt(2020, 7, 16).expect("valid date"),
    }
  }
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// One day of a province summary. Field names are the public wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
  #[serde(rename = "fecha_diagnostico")]
  pub date:              NaiveDate,
  #[serde(rename = "casos")]
  pub cases:             u64,
  #[serde(rename = "muertes")]
  pub deaths:            u64,
  #[serde(rename = "casos_acum")]
  pub cumulative_cases:  u64,
  #[serde(rename = "muertes_acum")]
  pub cumulative_deaths: u64,
}

pub type ProvinceSummary = Vec<DailySummary>;

// ─── Aggregation ─────────────────────────────────────────────────────────────

fn count_by<F>(view: &FilteredView, key: F) -> HashMap<NaiveDate, u64>
where
  F: Fn(&crate::record::CaseRecord) -> Option<NaiveDate>,
{
  let mut counts = HashMap::new();
  for date in view.rows().filter_map(key) {
    *counts.entry(date).or_insert(0) += 1;
  }
  counts
}

/// Summarise `view`, which the caller has already scoped to one province.
///
/// Cases are bucketed by diagnosis date. Deaths are bucketed by death date,
/// counting only rows flagged dead; a dead row with no death date is not
/// counted. Dates outside `window` are dropped.
pub fn summarize(view: &FilteredView, window: &SummaryWindow) -> ProvinceSummary {
  let cases = count_by(view, |r| r.diagnosed_on);
  let deaths = count_by(view, |r| if r.dead.is_yes() { r.died_on } else { None });

  let mut cumulative_cases = 0;
  let mut cumulative_deaths = 0;
  window
    .days()
    .map(|date| {
      let day_cases = cases.get(&date).copied().unwrap_or(0);
      let day_deaths = deaths.get(&date).copied().unwrap_or(0);
      cumulative_cases += day_cases;
      cumulative_deaths += day_deaths;
      DailySummary {
        date,
        cases: day_cases,
        deaths: day_deaths,
        cumulative_cases,
        cumulative_deaths,
      }
    })
    .collect()
}
