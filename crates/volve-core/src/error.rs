//! Error types for `volve-core`.
//!
//! Row numbers are spreadsheet row numbers (1-based, header included), so
//! they match what a spreadsheet application shows.

use thiserror::Error;

use crate::schema::{SqlType, Table};

#[derive(Debug, Error)]
pub enum Error {
  // ── Structural ────────────────────────────────────────────────────────

  #[error(
    "sheet {sheet:?}: expected column {expected:?} at position {position}, \
     found {found:?}"
  )]
  UnexpectedHeader {
    sheet:    String,
    position: usize,
    expected: &'static str,
    found:    String,
  },

  #[error("sheet {sheet:?}: missing column {expected:?} at position {position}")]
  MissingColumn {
    sheet:    String,
    position: usize,
    expected: &'static str,
  },

  #[error("sheet {sheet:?}: unexpected extra column {found:?} at position {position}")]
  ExtraColumn {
    sheet:    String,
    position: usize,
    found:    String,
  },

  // ── Row-level data errors ─────────────────────────────────────────────

  #[error("sheet {sheet:?} row {row}, column {column:?}: cannot read {value:?} as {expected}")]
  Coercion {
    sheet:    String,
    row:      u32,
    column:   &'static str,
    value:    String,
    expected: &'static str,
  },

  #[error("sheet {sheet:?} row {row}: required column {column:?} is empty")]
  MissingValue {
    sheet:  String,
    row:    u32,
    column: &'static str,
  },

  #[error("sheet {sheet:?} row {row}: year {year} / month {month} is not a calendar month")]
  InvalidMonth {
    sheet: String,
    row:   u32,
    year:  i64,
    month: i64,
  },

  /// A row dropped as a unit-label row looks like a measurement row; the
  /// configured unit-row count no longer matches the sheet.
  #[error(
    "sheet {sheet:?} row {row} is configured as a unit-label row but holds \
     measurements (check monthly_unit_rows)"
  )]
  UnitRowMismatch { sheet: String, row: u32 },

  #[error(
    "well {npd_wellbore_code}: column {column:?} is {first:?} but row {row} \
     has {other:?}"
  )]
  InconsistentWell {
    npd_wellbore_code: i64,
    column:            &'static str,
    first:             String,
    other:             String,
    row:               u32,
  },

  // ── Columnar tables ───────────────────────────────────────────────────

  #[error("{table}.{column}: expected a {expected:?} value, got {found}")]
  ColumnType {
    table:    Table,
    column:   &'static str,
    expected: SqlType,
    found:    String,
  },

  #[error("{table}: expected {expected} columns, got {found}")]
  ColumnCount {
    table:    Table,
    expected: usize,
    found:    usize,
  },

  #[error("{table}.{column}: key column is null at row {index}")]
  NullKey {
    table:  Table,
    column: &'static str,
    index:  usize,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
