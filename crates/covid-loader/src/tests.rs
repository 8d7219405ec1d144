//! Loader tests against real files on disk.

use std::{
  io::Write as _,
  path::Path,
  sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
  },
  time::{Duration, Instant},
};

use chrono::NaiveDate;
use covid_core::snapshot::{SnapshotCell, SnapshotSource};
use tempfile::NamedTempFile;

use crate::{DatasetLocation, Error, Loader, load};

const HEADER: &str = "id_evento_caso,carga_provincia_nombre,clasificacion_resumen,fallecido,fecha_diagnostico,ultima_actualizacion\n";

fn dataset(rows: &[&str]) -> NamedTempFile {
  let mut file = NamedTempFile::new().expect("temp file");
  file.write_all(HEADER.as_bytes()).unwrap();
  for row in rows {
    writeln!(file, "{row}").unwrap();
  }
  file.flush().unwrap();
  file
}

fn location(path: &Path) -> DatasetLocation {
  DatasetLocation::File(path.to_path_buf())
}

fn overwrite(path: &Path, contents: &str) {
  std::fs::write(path, contents).unwrap();
}

// ─── load ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn load_reads_file_into_snapshot() {
  let file = dataset(&[
    "1,Salta,Confirmado,NO,2020-03-01,2020-07-15",
    "2,Jujuy,Sospechoso,NO,,2020-07-16 10:22:01",
  ]);
  let snapshot = load(&location(file.path())).await.unwrap();
  assert_eq!(snapshot.len(), 2);
  assert_eq!(snapshot.last_update(), NaiveDate::from_ymd_opt(2020, 7, 16));
}

#[tokio::test]
async fn load_skips_malformed_rows() {
  let file = dataset(&[
    "1,Salta,Confirmado,NO,2020-03-01,2020-07-15",
    "oops,Salta,Confirmado,NO,2020-03-01,2020-07-15",
    "3,Salta,Confirmado,NO,not-a-date,2020-07-15",
  ]);
  let snapshot = load(&location(file.path())).await.unwrap();
  assert_eq!(snapshot.len(), 1);
  assert_eq!(snapshot.records()[0].case_id, 1);
}

#[tokio::test]
async fn load_rejects_dataset_without_usable_rows() {
  let file = dataset(&["bad,Salta,Confirmado,NO,,2020-07-15"]);
  let err = load(&location(file.path())).await.unwrap_err();
  assert!(matches!(err, Error::EmptyDataset { skipped: 1 }));
}

#[tokio::test]
async fn load_rejects_missing_columns() {
  let file = dataset(&[]);
  overwrite(file.path(), "id_evento_caso,edad\n1,30\n");
  let err = load(&location(file.path())).await.unwrap_err();
  assert!(matches!(err, Error::Csv(covid_csv::Error::MissingColumn(_))));
}

#[tokio::test]
async fn load_missing_file_is_io_error() {
  let dir = tempfile::tempdir().unwrap();
  let err = load(&location(&dir.path().join("absent.csv"))).await.unwrap_err();
  assert!(matches!(err, Error::Io(_)));
}

#[tokio::test]
async fn load_leaves_the_runtime_free_while_decoding() {
  let rows: Vec<String> = (1..=100_000)
    .map(|i| format!("{i},Salta,Confirmado,NO,2020-03-01,2020-07-15"))
    .collect();
  let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
  let file = dataset(&rows);

  // The test runtime is single-threaded, so any decoding on it would stall
  // this ticker for the whole parse.
  let max_gap_ms = Arc::new(AtomicU64::new(0));
  let ticker = tokio::spawn({
    let max_gap_ms = Arc::clone(&max_gap_ms);
    async move {
      let mut last = Instant::now();
      loop {
        tokio::time::sleep(Duration::from_millis(1)).await;
        let now = Instant::now();
        let gap = now.duration_since(last).as_millis() as u64;
        max_gap_ms.fetch_max(gap, Ordering::Relaxed);
        last = now;
      }
    }
  });
  tokio::task::yield_now().await;

  let snapshot = load(&location(file.path())).await.unwrap();
  tokio::time::sleep(Duration::from_millis(20)).await;
  ticker.abort();

  assert_eq!(snapshot.len(), 100_000);
  let gap = max_gap_ms.load(Ordering::Relaxed);
  assert!(gap < 250, "runtime stalled for {gap} ms during load");
}

// ─── Loader ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn refresh_swaps_in_new_snapshot() {
  let file = dataset(&["1,Salta,Confirmado,NO,2020-03-01,2020-07-15"]);
  let cell = Arc::new(SnapshotCell::new());
  let loader = Loader::new(location(file.path()), Arc::clone(&cell), Duration::from_secs(3600));

  assert_eq!(loader.refresh_once().await.unwrap(), 1);
  let first = cell.current().unwrap();

  overwrite(
    file.path(),
    &format!(
      "{HEADER}1,Salta,Confirmado,NO,2020-03-01,2020-07-16\n2,Chaco,Confirmado,SI,2020-03-02,2020-07-16\n"
    ),
  );
  assert_eq!(loader.refresh_once().await.unwrap(), 2);

  assert_eq!(first.len(), 1);
  assert_eq!(cell.current().unwrap().len(), 2);
}

#[tokio::test]
async fn failed_refresh_keeps_previous_snapshot() {
  let file = dataset(&["1,Salta,Confirmado,NO,2020-03-01,2020-07-15"]);
  let cell = Arc::new(SnapshotCell::new());
  let loader = Loader::new(location(file.path()), Arc::clone(&cell), Duration::from_secs(3600));
  loader.refresh_once().await.unwrap();

  overwrite(file.path(), "garbage\n");
  assert!(loader.refresh_once().await.is_err());

  let current = cell.current().unwrap();
  assert_eq!(current.len(), 1);
  assert_eq!(current.last_update(), NaiveDate::from_ymd_opt(2020, 7, 15));
}

#[tokio::test]
async fn spawned_loader_loads_immediately() {
  let file = dataset(&["1,Salta,Confirmado,NO,2020-03-01,2020-07-15"]);
  let cell = Arc::new(SnapshotCell::new());
  let handle =
    Loader::new(location(file.path()), Arc::clone(&cell), Duration::from_secs(3600)).spawn();

  let mut loaded = false;
  for _ in 0..100 {
    if cell.current().is_some() {
      loaded = true;
      break;
    }
    tokio::time::sleep(Duration::from_millis(20)).await;
  }
  handle.abort();
  assert!(loaded, "loader never published a snapshot");
}
