use std::path::Path;

use chrono::NaiveDate;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook as XlsxWorkbook};
use tempfile::TempDir;
use volve_core::{
  Cell, PipelineConfig, Table,
  columns::{DAILY_SHEET_COLUMNS, MONTHLY_SHEET_COLUMNS},
  transform::transform,
};

use super::*;

/// Write a small workbook shaped like the real one: two daily rows for
/// one well, a unit row and one monthly row with numbers stored as text.
/// Each of `extra_sheets` follows as a one-cell sheet.
fn write_fixture(path: &Path, leading_blank_rows: u32, extra_sheets: &[&str]) {
  let mut book = XlsxWorkbook::new();
  let date_format = Format::new().set_num_format("yyyy-mm-dd");

  let daily = book.add_worksheet().set_name("Daily Production Data").unwrap();
  let top = leading_blank_rows;
  for (col, name) in (0u16..).zip(DAILY_SHEET_COLUMNS) {
    daily.write_string(top, col, name).unwrap();
  }
  for (i, day) in [7u8, 8].into_iter().enumerate() {
    let row = top + 1 + i as u32;
    let date = ExcelDateTime::from_ymd(2014, 4, day).unwrap();
    daily.write_datetime_with_format(row, 0, &date, &date_format).unwrap();
    daily.write_string(row, 1, "NO 15/9-F-1 C").unwrap();
    daily.write_number(row, 2, 7405).unwrap();
    daily.write_string(row, 3, "15/9-F-1 C").unwrap();
    daily.write_number(row, 4, 3420717).unwrap();
    daily.write_string(row, 5, "VOLVE").unwrap();
    daily.write_number(row, 6, 369304).unwrap();
    daily.write_string(row, 7, "MÆRSK INSPIRER").unwrap();
    daily.write_number(row, 8, 24.0).unwrap();
    daily.write_string(row, 14, "%").unwrap();
    daily.write_number(row, 18, if day == 7 { 0.0 } else { 631.47 }).unwrap();
    daily.write_string(row, 22, "production").unwrap();
    daily.write_string(row, 23, "OP").unwrap();
  }

  let monthly = book.add_worksheet().set_name("Monthly Production Data").unwrap();
  for (col, name) in (0u16..).zip(MONTHLY_SHEET_COLUMNS) {
    monthly.write_string(0, col, name).unwrap();
  }
  for col in 5..10 {
    monthly.write_string(1, col, "Sm3").unwrap();
  }
  for (col, value) in (0u16..).zip([
    "15/9-F-1 C", "7405", "2014", "4", "227.5", "11142", "1631000", "", "", "0",
  ]) {
    if !value.is_empty() {
      monthly.write_string(2, col, value).unwrap();
    }
  }

  for name in extra_sheets {
    book.add_worksheet().set_name(*name).unwrap().write_string(0, 0, "notes").unwrap();
  }

  book.save(path).unwrap();
}

fn fixture(leading_blank_rows: u32) -> (TempDir, std::path::PathBuf) {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("volve.xlsx");
  write_fixture(&path, leading_blank_rows, &[]);
  (dir, path)
}

#[test]
fn reads_both_sheets_with_spreadsheet_row_numbers() {
  let (_dir, path) = fixture(0);
  let book = read_workbook(&path, &PipelineConfig::default()).unwrap();

  assert_eq!(book.daily.header, DAILY_SHEET_COLUMNS);
  assert_eq!(book.daily.header_row, 1);
  assert_eq!(book.daily.len(), 2);
  assert_eq!(book.daily.rows[0].number, 2);
  assert_eq!(
    book.daily.rows[0].cells[0],
    Cell::Date(NaiveDate::from_ymd_opt(2014, 4, 7).unwrap())
  );
  assert_eq!(book.daily.rows[1].cells[18], Cell::Float(631.47));
  assert_eq!(book.daily.rows[0].cells[9], Cell::Empty);

  assert_eq!(book.monthly.len(), 2);
  assert_eq!(book.monthly.rows[0].cells[5], Cell::Text("Sm3".into()));
  assert_eq!(book.monthly.rows[1].cells[1], Cell::Text("7405".into()));
  assert!(book.ignored_sheets.is_empty());
}

#[test]
fn extra_sheets_are_reported_and_skipped() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("volve.xlsx");
  write_fixture(&path, 0, &["Notes", "Pivot"]);

  let book = read_workbook(&path, &PipelineConfig::default()).unwrap();
  assert_eq!(book.ignored_sheets, ["Notes", "Pivot"]);
  assert_eq!(book.daily.len(), 2);
  assert_eq!(book.monthly.len(), 2);
  assert_eq!(WorkbookReader::open(&path).unwrap().sheet_names().len(), 4);
}

#[test]
fn leading_blank_rows_shift_numbering() {
  let (_dir, path) = fixture(2);
  let book = read_workbook(&path, &PipelineConfig::default()).unwrap();
  assert_eq!(book.daily.header_row, 3);
  assert_eq!(book.daily.rows[0].number, 4);
}

#[test]
fn missing_sheet_lists_available_sheets() {
  let (_dir, path) = fixture(0);
  let config = PipelineConfig {
    monthly_sheet: "Monthly".into(),
    ..Default::default()
  };
  let err = read_workbook(&path, &config).unwrap_err();
  match err {
    Error::MissingSheet { sheet, available } => {
      assert_eq!(sheet, "Monthly");
      assert_eq!(available, ["Daily Production Data", "Monthly Production Data"]);
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn missing_file_is_an_open_error() {
  let dir = TempDir::new().unwrap();
  let err = WorkbookReader::open(&dir.path().join("absent.xlsx")).err().unwrap();
  assert!(matches!(err, Error::Open { .. }));
}

#[test]
fn workbook_feeds_the_transformers() {
  let (_dir, path) = fixture(0);
  let config = PipelineConfig::default();
  let book = read_workbook(&path, &config).unwrap();
  let out = transform(&book.daily, &book.monthly, &config).unwrap();

  let counts = out.counts();
  assert_eq!(counts.get(Table::Wells), 1);
  assert_eq!(counts.get(Table::DailyProduction), 2);
  assert_eq!(counts.get(Table::MonthlyProduction), 1);
  assert_eq!(out.daily[0].oil_volume, Some(0.0));
  assert_eq!(out.monthly[0].date, NaiveDate::from_ymd_opt(2014, 4, 1).unwrap());
  assert_eq!(out.monthly[0].gas_volume_sm3, Some(1631000.0));
  assert_eq!(out.monthly[0].gas_injection_sm3, None);
}
