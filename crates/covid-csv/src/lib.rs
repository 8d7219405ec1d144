//! CSV codec for the COVID-19 case dataset.
//!
//! Reads the upstream `Covid19Casos.csv` into [`covid_core`] records and
//! writes listings and province summaries back out as flat CSV. Pure
//! synchronous; no HTTP or filesystem dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! let bytes = std::fs::read("Covid19Casos.csv").unwrap();
//! let parsed = covid_csv::parse_dataset(&bytes).unwrap();
//! println!("{} records, {} skipped", parsed.records.len(), parsed.skipped);
//! ```

pub mod error;
mod parse;
mod serialize;

pub use error::{Error, Result};
pub use serialize::{RECORD_COLUMNS, SUMMARY_COLUMNS};

use covid_core::{record::CaseRecord, summary::DailySummary};

// ─── Public types ─────────────────────────────────────────────────────────────

/// The result of reading a whole dataset file.
#[derive(Debug)]
pub struct ParsedDataset {
  /// Every row that decoded cleanly, in file order.
  pub records:     Vec<CaseRecord>,
  /// Number of data rows dropped because they failed to decode.
  pub skipped:     usize,
  /// The first decode failure, kept for diagnostics.
  pub first_error: Option<Error>,
}

// ─── Public API ───────────────────────────────────────────────────────────────

/// Parse a complete dataset from raw CSV bytes.
///
/// Fails only when the header row is unreadable or lacks a required column.
/// Individual bad rows are skipped and reported through
/// [`ParsedDataset::skipped`].
pub fn parse_dataset(input: &[u8]) -> Result<ParsedDataset> {
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(true)
    .flexible(true)
    .from_reader(input);

  let columns = parse::Columns::from_headers(reader.headers()?)?;

  let mut records = Vec::new();
  let mut skipped = 0;
  let mut first_error = None;

  for (i, row) in reader.records().enumerate() {
    // Header is line 1.
    let line = i as u64 + 2;
    let decoded = row
      .map_err(Error::from)
      .and_then(|row| parse::parse_record(&columns, &row, line));
    match decoded {
      Ok(record) => records.push(record),
      Err(e) => {
        skipped += 1;
        first_error.get_or_insert(e);
      }
    }
  }

  Ok(ParsedDataset {
    records,
    skipped,
    first_error,
  })
}

/// Encode a case listing as CSV with a header row.
pub fn write_records<'a, I>(records: I) -> Result<Vec<u8>>
where
  I: IntoIterator<Item = &'a CaseRecord>,
{
  serialize::write_records(records)
}

/// Encode a province summary as CSV with a header row.
pub fn write_summary(rows: &[DailySummary]) -> Result<Vec<u8>> {
  serialize::write_summary(rows)
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use covid_core::record::{Classification, Flag};

  use super::*;

  const SAMPLE: &str = "\
id_evento_caso,sexo,edad,residencia_provincia_nombre,carga_provincia_nombre,fecha_inicio_sintomas,fecha_internacion,cuidado_intensivo,fecha_cui_intensivo,fallecido,fecha_fallecimiento,asistencia_respiratoria_mecanica,origen_financiamiento,clasificacion,clasificacion_resumen,fecha_diagnostico,ultima_actualizacion
1000012,M,53,CABA,CABA,2020-06-01,,NO,,NO,,NO,Público,Caso confirmado por laboratorio,Confirmado,2020-06-03,2020-07-16
1000013,F,81,Buenos Aires,Buenos Aires,2020-05-20,2020-05-22,SI,2020-05-24,SI,2020-06-02,SI,Privado,Caso confirmado - fallecido,Confirmado,2020-05-23,2020-07-16
1000014,F,,Salta,Salta,,,NO,,NO,,NO,Público,Caso sospechoso,Sospechoso,,2020-07-16
bad-id,F,30,Salta,Salta,,,NO,,NO,,NO,Público,Caso descartado,Descartado,,2020-07-16
1000016,M,40,Chaco,Chaco,,,NO,,NO,,NO,Público,Caso descartado,Descartado,2020-13-01,2020-07-16
";

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn parses_sample_and_skips_bad_rows() {
    let parsed = parse_dataset(SAMPLE.as_bytes()).unwrap();
    assert_eq!(parsed.records.len(), 3);
    assert_eq!(parsed.skipped, 2);
    assert!(matches!(
      parsed.first_error,
      Some(Error::MalformedField { row: 5, column: "id_evento_caso", .. })
    ));

    let dead = &parsed.records[1];
    assert_eq!(dead.case_id, 1000013);
    assert_eq!(dead.age, Some(81));
    assert_eq!(dead.province, "Buenos Aires");
    assert_eq!(dead.icu, Flag::Yes);
    assert_eq!(dead.respirator, Flag::Yes);
    assert_eq!(dead.dead, Flag::Yes);
    assert_eq!(dead.died_on, Some(date(2020, 6, 2)));
    assert_eq!(dead.diagnosed_on, Some(date(2020, 5, 23)));
    assert_eq!(dead.classification, Classification::Confirmed);

    let suspect = &parsed.records[2];
    assert_eq!(suspect.classification, Classification::Suspected);
    assert_eq!(suspect.age, None);
    assert_eq!(suspect.diagnosed_on, None);
  }

  #[test]
  fn missing_required_column_is_fatal() {
    let input = "id_evento_caso,carga_provincia_nombre\n1,Salta\n";
    assert!(matches!(
      parse_dataset(input.as_bytes()),
      Err(Error::MissingColumn(_))
    ));
  }

  #[test]
  fn header_only_file_is_empty() {
    let input =
      "id_evento_caso,carga_provincia_nombre,clasificacion_resumen,ultima_actualizacion\n";
    let parsed = parse_dataset(input.as_bytes()).unwrap();
    assert!(parsed.records.is_empty());
    assert_eq!(parsed.skipped, 0);
  }

  #[test]
  fn record_header_matches_serde_field_names() {
    let parsed = parse_dataset(SAMPLE.as_bytes()).unwrap();
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.serialize(&parsed.records[0]).unwrap();
    let auto = String::from_utf8(writer.into_inner().unwrap()).unwrap();
    let auto_header = auto.lines().next().unwrap();
    assert_eq!(auto_header, RECORD_COLUMNS.join(","));
  }

  #[test]
  fn writes_records_with_header() {
    let parsed = parse_dataset(SAMPLE.as_bytes()).unwrap();
    let out = String::from_utf8(write_records(&parsed.records[..2]).unwrap()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], RECORD_COLUMNS.join(","));
    assert!(lines[2].starts_with("1000013,F,81,Buenos Aires,Buenos Aires,2020-05-20,2020-05-22,SI,"));
    assert!(lines[2].ends_with(",Confirmado,2020-05-23,2020-07-16"));
  }

  #[test]
  fn empty_listing_still_has_header() {
    let out = write_records(std::iter::empty::<&CaseRecord>()).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", RECORD_COLUMNS.join(",")));
  }

  #[test]
  fn writes_summary() {
    let rows = [
      DailySummary {
        date:              date(2020, 2, 15),
        cases:             0,
        deaths:            0,
        cumulative_cases:  0,
        cumulative_deaths: 0,
      },
      DailySummary {
        date:              date(2020, 2, 16),
        cases:             4,
        deaths:            1,
        cumulative_cases:  4,
        cumulative_deaths: 1,
      },
    ];
    let out = String::from_utf8(write_summary(&rows).unwrap()).unwrap();
    assert_eq!(
      out,
      "fecha_diagnostico,casos,muertes,casos_acum,muertes_acum\n\
       2020-02-15,0,0,0,0\n\
       2020-02-16,4,1,4,1\n"
    );
  }
}
