//! Dataset reader.
//!
//! The upstream file is addressed by header name, so column order and extra
//! columns do not matter. A row that fails to parse is skipped and counted;
//! a missing required column fails the whole file.

use std::collections::HashMap;

use chrono::NaiveDate;
use covid_core::record::{CaseRecord, Classification, Flag};
use csv::StringRecord;

use crate::error::{Error, Result};

const ID:             &str = "id_evento_caso";
const SEX:            &str = "sexo";
const AGE:            &str = "edad";
const RESIDENCE:      &str = "residencia_provincia_nombre";
const PROVINCE:       &str = "carga_provincia_nombre";
const SYMPTOM_ONSET:  &str = "fecha_inicio_sintomas";
const HOSPITALISED:   &str = "fecha_internacion";
const ICU:            &str = "cuidado_intensivo";
const ICU_DATE:       &str = "fecha_cui_intensivo";
const DEAD:           &str = "fallecido";
const DEATH_DATE:     &str = "fecha_fallecimiento";
const RESPIRATOR:     &str = "asistencia_respiratoria_mecanica";
const CLASSIFICATION: &str = "clasificacion";
const SUMMARY_CLASS:  &str = "clasificacion_resumen";
const DIAGNOSIS_DATE: &str = "fecha_diagnostico";
const LAST_UPDATE:    &str = "ultima_actualizacion";

const REQUIRED: [&str; 4] = [ID, PROVINCE, SUMMARY_CLASS, LAST_UPDATE];

// ─── Header lookup ────────────────────────────────────────────────────────────

/// Column name → position, built once from the header row.
pub(crate) struct Columns {
  index: HashMap<String, usize>,
}

impl Columns {
  pub(crate) fn from_headers(headers: &StringRecord) -> Result<Self> {
    let index: HashMap<String, usize> = headers
      .iter()
      .enumerate()
      .map(|(i, h)| (h.trim_start_matches('\u{feff}').trim().to_owned(), i))
      .collect();
    if let Some(missing) = REQUIRED.iter().find(|c| !index.contains_key(**c)) {
      return Err(Error::MissingColumn(*missing));
    }
    Ok(Self { index })
  }

  /// Trimmed cell text; empty when the column is absent from the file.
  fn get<'r>(&self, row: &'r StringRecord, column: &str) -> &'r str {
    self
      .index
      .get(column)
      .and_then(|&i| row.get(i))
      .map(str::trim)
      .unwrap_or("")
  }
}

// ─── Field decoding ───────────────────────────────────────────────────────────

fn malformed(row: u64, column: &'static str, value: &str) -> Error {
  Error::MalformedField {
    row,
    column,
    value: value.to_owned(),
  }
}

fn optional_text(s: &str) -> Option<String> {
  if s.is_empty() { None } else { Some(s.to_owned()) }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time of day which is
/// discarded.
fn parse_date(s: &str) -> Option<NaiveDate> {
  let day = s.get(..10)?;
  let rest = &s[10..];
  if !rest.is_empty() && !rest.starts_with([' ', 'T']) {
    return None;
  }
  NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn optional_date(row: u64, column: &'static str, s: &str) -> Result<Option<NaiveDate>> {
  if s.is_empty() {
    return Ok(None);
  }
  parse_date(s).map(Some).ok_or_else(|| malformed(row, column, s))
}

// ─── Rows ─────────────────────────────────────────────────────────────────────

/// Decode one data row. `row` is the 1-based line number used in errors.
pub(crate) fn parse_record(
  columns: &Columns,
  record: &StringRecord,
  row: u64,
) -> Result<CaseRecord> {
  let get = |c: &str| columns.get(record, c);

  let id_raw = get(ID);
  let case_id = id_raw.parse().map_err(|_| malformed(row, ID, id_raw))?;

  let last_raw = get(LAST_UPDATE);
  let last_update = parse_date(last_raw).ok_or_else(|| malformed(row, LAST_UPDATE, last_raw))?;

  let age_raw = get(AGE);
  let age = if age_raw.is_empty() {
    None
  } else {
    Some(age_raw.parse().map_err(|_| malformed(row, AGE, age_raw))?)
  };

  Ok(CaseRecord {
    case_id,
    sex: optional_text(get(SEX)),
    age,
    residence_province: optional_text(get(RESIDENCE)),
    province: get(PROVINCE).to_owned(),
    symptom_onset: optional_date(row, SYMPTOM_ONSET, get(SYMPTOM_ONSET))?,
    hospitalised_on: optional_date(row, HOSPITALISED, get(HOSPITALISED))?,
    icu: Flag::from_dataset(get(ICU)),
    icu_on: optional_date(row, ICU_DATE, get(ICU_DATE))?,
    dead: Flag::from_dataset(get(DEAD)),
    died_on: optional_date(row, DEATH_DATE, get(DEATH_DATE))?,
    respirator: Flag::from_dataset(get(RESPIRATOR)),
    classification_detail: optional_text(get(CLASSIFICATION)),
    classification: Classification::from_dataset(get(SUMMARY_CLASS)),
    diagnosed_on: optional_date(row, DIAGNOSIS_DATE, get(DIAGNOSIS_DATE))?,
    last_update,
  })
}
