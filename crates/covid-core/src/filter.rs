//! The predicate filter chain.
//!
//! A [`FilteredView`] is a snapshot pointer plus the ordered indices of the
//! rows that survived every predicate so far. Each filter returns a fresh view
//! and leaves its input untouched, so views can be shared and re-filtered
//! freely.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
  Result,
  record::{CaseRecord, Classification, Flag, parse_query_date},
  snapshot::DatasetSnapshot,
};

// ─── Predicates ──────────────────────────────────────────────────────────────

/// An equality predicate on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Equals {
  Classification(Classification),
  Icu(Flag),
  Respirator(Flag),
  Dead(Flag),
  /// Exact match on `carga_provincia_nombre`.
  Province(String),
}

impl Equals {
  pub fn matches(&self, record: &CaseRecord) -> bool {
    match self {
      Self::Classification(c) => record.classification == *c,
      Self::Icu(f) => record.icu == *f,
      Self::Respirator(f) => record.respirator == *f,
      Self::Dead(f) => record.dead == *f,
      Self::Province(name) => record.province == *name,
    }
  }
}

/// Date columns that support range filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateColumn {
  /// `fecha_diagnostico`
  Diagnosis,
  /// `fecha_fallecimiento`
  Death,
}

impl DateColumn {
  fn get(self, record: &CaseRecord) -> Option<NaiveDate> {
    match self {
      Self::Diagnosis => record.diagnosed_on,
      Self::Death => record.died_on,
    }
  }
}

// ─── View ────────────────────────────────────────────────────────────────────

/// A read-only subset of a [`DatasetSnapshot`].
#[derive(Debug, Clone)]
pub struct FilteredView {
  snapshot: Arc<DatasetSnapshot>,
  rows:     Arc<[usize]>,
}

impl FilteredView {
  /// A view selecting every row of `snapshot`.
  pub fn full(snapshot: Arc<DatasetSnapshot>) -> Self {
    let rows = (0..snapshot.len()).collect();
    Self { snapshot, rows }
  }

  fn narrowed<F>(&self, keep: F) -> Self
  where
    F: Fn(&CaseRecord) -> bool,
  {
    let records = self.snapshot.records();
    let rows = self
      .rows
      .iter()
      .copied()
      .filter(|&i| keep(&records[i]))
      .collect();
    Self {
      snapshot: Arc::clone(&self.snapshot),
      rows,
    }
  }

  /// Keep only rows where the predicate's column equals its value.
  pub fn filter_eq(&self, predicate: &Equals) -> Self {
    self.narrowed(|r| predicate.matches(r))
  }

  /// Keep only rows whose `column` lies within `[lower, upper]`.
  ///
  /// Either bound may be absent. With both absent the view is returned as-is;
  /// otherwise rows with no value in `column` are dropped.
  pub fn filter_range(
    &self,
    column: DateColumn,
    lower: Option<NaiveDate>,
    upper: Option<NaiveDate>,
  ) -> Self {
    if lower.is_none() && upper.is_none() {
      return self.clone();
    }
    self.narrowed(|r| match column.get(r) {
      Some(d) => lower.is_none_or(|lo| d >= lo) && upper.is_none_or(|hi| d <= hi),
      None => false,
    })
  }

  pub fn count(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  /// Surviving rows in snapshot order.
  pub fn rows(&self) -> impl Iterator<Item = &CaseRecord> + '_ {
    let records = self.snapshot.records();
    self.rows.iter().map(move |&i| &records[i])
  }

  pub fn snapshot(&self) -> &Arc<DatasetSnapshot> { &self.snapshot }
}

// ─── Filter specification ────────────────────────────────────────────────────

/// Filter parameters exactly as a client sent them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFilter {
  pub classification: Option<String>,
  pub icu:            Option<String>,
  pub respirator:     Option<String>,
  pub dead:           Option<String>,
  pub from:           Option<String>,
  pub to:             Option<String>,
}

/// A validated set of filters, resolved once at the request boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
  pub classification: Option<Classification>,
  pub icu:            Option<Flag>,
  pub respirator:     Option<Flag>,
  pub dead:           Option<Flag>,
  /// Inclusive lower bound on the diagnosis date.
  pub from:           Option<NaiveDate>,
  /// Inclusive upper bound on the diagnosis date.
  pub to:             Option<NaiveDate>,
}

impl FilterSpec {
  /// Validate raw parameters.
  ///
  /// Classifications and dates are checked strictly. Flags never fail: see
  /// [`Flag::from_query`].
  pub fn parse(raw: &RawFilter) -> Result<Self> {
    Ok(Self {
      classification: raw
        .classification
        .as_deref()
        .map(Classification::from_query)
        .transpose()?,
      icu:            raw.icu.as_deref().map(Flag::from_query),
      respirator:     raw.respirator.as_deref().map(Flag::from_query),
      dead:           raw.dead.as_deref().map(Flag::from_query),
      from:           raw
        .from
        .as_deref()
        .map(|s| parse_query_date("from", s))
        .transpose()?,
      to:             raw
        .to
        .as_deref()
        .map(|s| parse_query_date("to", s))
        .transpose()?,
    })
  }

  /// The equality predicates these filters impose, in application order.
  pub fn predicates(&self) -> Vec<Equals> {
    let mut out = Vec::new();
    if let Some(c) = self.classification {
      out.push(Equals::Classification(c));
    }
    if let Some(f) = self.icu {
      out.push(Equals::Icu(f));
    }
    if let Some(f) = self.respirator {
      out.push(Equals::Respirator(f));
    }
    if let Some(f) = self.dead {
      out.push(Equals::Dead(f));
    }
    out
  }

  /// Apply every filter to `view`, equality predicates first, then the
  /// diagnosis-date range.
  pub fn apply(&self, view: &FilteredView) -> FilteredView {
    let narrowed = self
      .predicates()
      .iter()
      .fold(view.clone(), |v, p| v.filter_eq(p));
    narrowed.filter_range(DateColumn::Diagnosis, self.from, self.to)
  }
}
