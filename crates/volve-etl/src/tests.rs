//! End-to-end runs against generated workbooks in a temp directory.

use std::path::Path;

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use tempfile::TempDir;
use volve_core::{
  PipelineConfig, Table, TableCounts,
  columns::{DAILY_SHEET_COLUMNS, MONTHLY_SHEET_COLUMNS},
};
use volve_parquet::{README_FILE, parquet_path, parquet_row_count};
use volve_store_sqlite::{SqliteStore, docs};

use crate::{Error, create_schema, load, run, summary, validate};

struct FixtureWell {
  code: u32,
  name: &'static str,
  oil:  f64,
}

const WELLS: [FixtureWell; 2] = [
  FixtureWell { code: 7405, name: "15/9-F-1 C", oil: 100.0 },
  FixtureWell { code: 7078, name: "15/9-F-12", oil: 50.0 },
];

/// Two wells with five days each, a unit row and two months per well.
/// `bad_oil` replaces the Oil cell of spreadsheet row 4 on the monthly
/// sheet.
fn write_workbook(path: &Path, bad_oil: Option<&str>) {
  let mut book = Workbook::new();
  let date_format = Format::new().set_num_format("yyyy-mm-dd");

  let daily = book.add_worksheet().set_name("Daily Production Data").unwrap();
  for (col, name) in (0u16..).zip(DAILY_SHEET_COLUMNS) {
    daily.write_string(0, col, name).unwrap();
  }
  let mut row = 1;
  for day in 1..=5u8 {
    for well in &WELLS {
      let date = ExcelDateTime::from_ymd(2014, 4, day).unwrap();
      daily.write_datetime_with_format(row, 0, &date, &date_format).unwrap();
      daily.write_string(row, 1, format!("NO {}", well.name)).unwrap();
      daily.write_number(row, 2, well.code).unwrap();
      daily.write_string(row, 3, well.name).unwrap();
      daily.write_number(row, 4, 3420717).unwrap();
      daily.write_string(row, 5, "VOLVE").unwrap();
      daily.write_number(row, 6, 369304).unwrap();
      daily.write_string(row, 7, "MÆRSK INSPIRER").unwrap();
      daily.write_number(row, 8, 24.0).unwrap();
      daily.write_string(row, 14, "%").unwrap();
      daily.write_number(row, 18, well.oil).unwrap();
      daily.write_number(row, 19, well.oil * 150.0).unwrap();
      daily.write_number(row, 20, well.oil / 10.0).unwrap();
      daily.write_string(row, 22, "production").unwrap();
      daily.write_string(row, 23, "OP").unwrap();
      row += 1;
    }
  }

  let monthly = book.add_worksheet().set_name("Monthly Production Data").unwrap();
  for (col, name) in (0u16..).zip(MONTHLY_SHEET_COLUMNS) {
    monthly.write_string(0, col, name).unwrap();
  }
  for col in 5..10 {
    monthly.write_string(1, col, "Sm3").unwrap();
  }
  let mut row = 2;
  for well in &WELLS {
    for month in ["4", "5"] {
      let oil = match bad_oil {
        Some(text) if row == 3 => text.to_owned(),
        _ => format!("{}", well.oil * 30.0),
      };
      let code = well.code.to_string();
      for (col, value) in (0u16..).zip([
        well.name, code.as_str(), "2014", month, "720", oil.as_str(), "", "", "", "",
      ]) {
        if !value.is_empty() {
          monthly.write_string(row, col, value).unwrap();
        }
      }
      row += 1;
    }
  }

  book.save(path).unwrap();
}

fn setup(bad_oil: Option<&str>) -> (TempDir, PipelineConfig) {
  let dir = TempDir::new().unwrap();
  let source_path = dir.path().join("volve.xlsx");
  write_workbook(&source_path, bad_oil);
  let config = PipelineConfig {
    source_path,
    database_path: dir.path().join("database").join("volve.db"),
    export_dir: dir.path().join("parquet"),
    ..Default::default()
  };
  (dir, config)
}

const EXPECTED: TableCounts = TableCounts {
  wells:              2,
  daily_production:   10,
  monthly_production: 4,
};

// ─── Full run ────────────────────────────────────────────────────────────────

#[test]
fn run_loads_validates_and_exports() {
  let (_dir, config) = setup(None);
  let report = run(&config).unwrap();

  assert_eq!(report.load.counts, EXPECTED);
  assert!(report.load.validation.is_clean());
  assert_eq!(report.load.validation.date_ranges.len(), 2);

  for exported in &report.export.tables {
    assert_eq!(exported.rows, EXPECTED.get(exported.table));
    let path = parquet_path(&config.export_dir, exported.table);
    assert_eq!(parquet_row_count(&path).unwrap(), exported.rows);
  }
  assert_eq!(report.export.readme, config.export_dir.join(README_FILE));
  for name in [docs::SQL_FILE, docs::JSON_FILE, docs::MARKDOWN_FILE] {
    assert!(config.export_dir.join(name).exists(), "{name} missing");
  }
}

#[test]
fn summary_after_run() {
  let (_dir, config) = setup(None);
  run(&config).unwrap();

  let s = summary(&config).unwrap();
  assert_eq!(s.counts, EXPECTED);
  assert_eq!(s.field.oil, 750.0);
  assert_eq!(s.field.gas, 112_500.0);
  assert_eq!(s.field.water, 75.0);
  assert_eq!(s.field.days, 5);
  assert_eq!(s.daily.len(), 5);
  assert_eq!(s.daily[0].oil, 150.0);

  let json = serde_json::to_value(&s).unwrap();
  assert_eq!(json["daily"][0]["date"], "2014-04-01");
  assert_eq!(json["daily"][4]["gas"], 22_500.0);
  let names: Vec<_> = s.wells.iter().map(|w| w.wellbore_name.as_str()).collect();
  assert_eq!(names, ["15/9-F-1 C", "15/9-F-12"]);
}

#[test]
fn second_run_is_a_schema_conflict() {
  let (_dir, config) = setup(None);
  run(&config).unwrap();
  assert!(matches!(
    run(&config).unwrap_err(),
    Error::Store(volve_store_sqlite::Error::SchemaConflict(_))
  ));
}

// ─── Step by step ────────────────────────────────────────────────────────────

#[test]
fn load_requires_schema() {
  let (_dir, config) = setup(None);
  assert!(matches!(
    load(&config).unwrap_err(),
    Error::Store(volve_store_sqlite::Error::SchemaMissing(_))
  ));
}

#[test]
fn reload_fails_and_keeps_the_first_load() {
  let (_dir, config) = setup(None);
  create_schema(&config).unwrap();
  assert_eq!(load(&config).unwrap().counts, EXPECTED);

  assert!(matches!(
    load(&config).unwrap_err(),
    Error::Store(volve_store_sqlite::Error::DuplicateKey { table: Table::Wells, .. })
  ));
  assert_eq!(validate(&config).unwrap().counts, EXPECTED);
}

#[test]
fn validate_flags_an_empty_database() {
  let (_dir, config) = setup(None);
  create_schema(&config).unwrap();
  match validate(&config).unwrap_err() {
    Error::Store(volve_store_sqlite::Error::Integrity(violations)) => {
      assert_eq!(violations.len(), 3);
    }
    other => panic!("unexpected error: {other}"),
  }
}

// ─── Bad data ────────────────────────────────────────────────────────────────

#[test]
fn not_available_names_row_and_column_and_commits_nothing() {
  let (_dir, config) = setup(Some("N/A"));
  create_schema(&config).unwrap();

  let err = load(&config).unwrap_err();
  match &err {
    Error::Transform(volve_core::Error::Coercion { sheet, row, column, value, .. }) => {
      assert_eq!(sheet, "Monthly Production Data");
      assert_eq!(*row, 4);
      assert_eq!(*column, "Oil");
      assert_eq!(value, "N/A");
    }
    other => panic!("unexpected error: {other}"),
  }
  assert!(err.to_string().contains("row 4"));

  let store = SqliteStore::open(&config.database_path).unwrap();
  assert_eq!(store.row_counts().unwrap(), TableCounts::default());
}

#[test]
fn failed_run_never_creates_the_database() {
  let (_dir, config) = setup(Some("N/A"));
  assert!(matches!(run(&config).unwrap_err(), Error::Transform(_)));
  assert!(!config.database_path.exists());
}
