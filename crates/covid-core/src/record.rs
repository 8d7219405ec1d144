//! Case records: one row of the upstream dataset each.
//!
//! Field names on the wire are the dataset's own column names. Clients rely on
//! them, so the serde renames below are part of the external contract.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::{Error, Result};

// ─── Classification ──────────────────────────────────────────────────────────

/// Summary classification of a case (`clasificacion_resumen`).
///
/// Parsing accepts the dataset's Spanish spelling and the English name, in
/// any ASCII case.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Classification {
  #[serde(rename = "Confirmado")]
  #[strum(serialize = "confirmado", serialize = "confirmed")]
  Confirmed,
  #[serde(rename = "Sospechoso")]
  #[strum(serialize = "sospechoso", serialize = "suspected")]
  Suspected,
  #[serde(rename = "Descartado")]
  #[strum(serialize = "descartado", serialize = "discarded")]
  Discarded,
  /// Any dataset value outside the three known buckets.
  #[serde(rename = "Desconocido")]
  #[strum(serialize = "desconocido")]
  Unknown,
}

impl Classification {
  /// Normalise a raw dataset value. Never fails; unrecognised text lands in
  /// [`Classification::Unknown`].
  pub fn from_dataset(raw: &str) -> Self {
    raw.trim().parse().unwrap_or(Self::Unknown)
  }

  /// Normalise client input.
  ///
  /// `Unknown` is not a queryable bucket, so it is rejected along with
  /// anything unparseable.
  pub fn from_query(raw: &str) -> Result<Self> {
    match raw.trim().parse::<Self>() {
      Ok(c) if c != Self::Unknown => Ok(c),
      _ => Err(Error::InvalidClassification(raw.to_owned())),
    }
  }
}

// ─── Flag ────────────────────────────────────────────────────────────────────

/// Canonical yes/no value for the ICU, respirator and death columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flag {
  #[serde(rename = "SI")]
  Yes,
  #[serde(rename = "NO")]
  No,
}

impl Flag {
  /// `SI` in any case is `Yes`; every other dataset value is `No`.
  pub fn from_dataset(raw: &str) -> Self {
    if raw.trim().eq_ignore_ascii_case("si") {
      Self::Yes
    } else {
      Self::No
    }
  }

  /// Legacy query semantics: only a case-insensitive `"true"` is `Yes`.
  ///
  /// Anything else, including `"1"`, `"yes"` or garbage, is `No` and is not
  /// an error. Existing clients depend on this.
  pub fn from_query(raw: &str) -> Self {
    if raw.eq_ignore_ascii_case("true") {
      Self::Yes
    } else {
      Self::No
    }
  }

  pub fn is_yes(self) -> bool { self == Self::Yes }
}

// ─── Dates ───────────────────────────────────────────────────────────────────

/// Parse an ISO-8601 calendar date supplied for query parameter `param`.
pub fn parse_query_date(param: &'static str, raw: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
    Error::InvalidDate {
      param,
      value: raw.to_owned(),
    }
  })
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A single case event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
  #[serde(rename = "id_evento_caso")]
  pub case_id:            u64,
  #[serde(rename = "sexo")]
  pub sex:                Option<String>,
  #[serde(rename = "edad")]
  pub age:                Option<u32>,
  #[serde(rename = "residencia_provincia_nombre")]
  pub residence_province: Option<String>,
  /// The province that reported the case; province scoping uses this column.
  #[serde(rename = "carga_provincia_nombre")]
  pub province:           String,
  #[serde(rename = "fecha_inicio_sintomas")]
  pub symptom_onset:      Option<NaiveDate>,
  #[serde(rename = "fecha_internacion")]
  pub hospitalised_on:    Option<NaiveDate>,
  #[serde(rename = "cuidado_intensivo")]
  pub icu:                Flag,
  #[serde(rename = "fecha_cui_intensivo")]
  pub icu_on:             Option<NaiveDate>,
  #[serde(rename = "fallecido")]
  pub dead:               Flag,
  #[serde(rename = "fecha_fallecimiento")]
  pub died_on:            Option<NaiveDate>,
  #[serde(rename = "asistencia_respiratoria_mecanica")]
  pub respirator:         Flag,
  /// Free-text detailed classification, kept verbatim.
  #[serde(rename = "clasificacion")]
  pub classification_detail: Option<String>,
  #[serde(rename = "clasificacion_resumen")]
  pub classification:     Classification,
  #[serde(rename = "fecha_diagnostico")]
  pub diagnosed_on:       Option<NaiveDate>,
  #[serde(rename = "ultima_actualizacion")]
  pub last_update:        NaiveDate,
}

impl CaseRecord {
  /// A record with only the required columns populated. Flags default to
  /// `No` and the classification to `Unknown`.
  pub fn new(case_id: u64, province: impl Into<String>, last_update: NaiveDate) -> Self {
    Self {
      case_id,
      sex: None,
      age: None,
      residence_province: None,
      province: province.into(),
      symptom_onset: None,
      hospitalised_on: None,
      icu: Flag::No,
      icu_on: None,
      dead: Flag::No,
      died_on: None,
      respirator: Flag::No,
      classification_detail: None,
      classification: Classification::Unknown,
      diagnosed_on: None,
      last_update,
    }
  }
}
