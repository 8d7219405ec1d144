//! Flat delimited encoding of listings and summaries.
//!
//! Column names match the JSON encoding. The header row is always written,
//! even for an empty result, so clients can rely on it.

use covid_core::{record::CaseRecord, summary::DailySummary};
use serde::Serialize;

use crate::error::{Error, Result};

/// Header of a case listing; order matches [`CaseRecord`]'s serde fields.
pub const RECORD_COLUMNS: [&str; 16] = [
  "id_evento_caso",
  "sexo",
  "edad",
  "residencia_provincia_nombre",
  "carga_provincia_nombre",
  "fecha_inicio_sintomas",
  "fecha_internacion",
  "cuidado_intensivo",
  "fecha_cui_intensivo",
  "fallecido",
  "fecha_fallecimiento",
  "asistencia_respiratoria_mecanica",
  "clasificacion",
  "clasificacion_resumen",
  "fecha_diagnostico",
  "ultima_actualizacion",
];

/// Header of a province summary; order matches [`DailySummary`].
pub const SUMMARY_COLUMNS: [&str; 5] =
  ["fecha_diagnostico", "casos", "muertes", "casos_acum", "muertes_acum"];

fn write_rows<'a, T, I>(header: &[&str], rows: I) -> Result<Vec<u8>>
where
  T: Serialize + 'a,
  I: IntoIterator<Item = &'a T>,
{
  let mut writer = csv::WriterBuilder::new()
    .has_headers(false)
    .from_writer(Vec::new());
  writer.write_record(header)?;
  for row in rows {
    writer.serialize(row)?;
  }
  writer.flush().map_err(|e| Error::Flush(e.to_string()))?;
  writer.into_inner().map_err(|e| Error::Flush(e.to_string()))
}

pub(crate) fn write_records<'a, I>(records: I) -> Result<Vec<u8>>
where
  I: IntoIterator<Item = &'a CaseRecord>,
{
  write_rows(&RECORD_COLUMNS, records)
}

pub(crate) fn write_summary(rows: &[DailySummary]) -> Result<Vec<u8>> {
  write_rows(&SUMMARY_COLUMNS, rows)
}
