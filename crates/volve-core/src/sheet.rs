//! In-memory worksheet: a header row and numbered data rows of cells.
//!
//! Produced by the spreadsheet reader and consumed by the transformers. Tests
//! build sheets directly.

use std::fmt;

use chrono::NaiveDate;

use crate::{
  Error, Result,
  coerce::{self, Expected},
};

// ─── Cells ───────────────────────────────────────────────────────────────────

/// A single spreadsheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
  Empty,
  Bool(bool),
  Int(i64),
  Float(f64),
  Text(String),
  Date(NaiveDate),
  /// A formula error such as `#DIV/0!`.
  Error(String),
}

impl Cell {
  /// Empty, or text made only of whitespace.
  pub fn is_blank(&self) -> bool {
    match self {
      Cell::Empty => true,
      Cell::Text(s) => s.trim().is_empty(),
      _ => false,
    }
  }
}

impl fmt::Display for Cell {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Cell::Empty => Ok(()),
      Cell::Bool(b) => write!(f, "{b}"),
      Cell::Int(i) => write!(f, "{i}"),
      Cell::Float(x) => write!(f, "{x}"),
      Cell::Text(s) => f.write_str(s),
      Cell::Date(d) => write!(f, "{d}"),
      Cell::Error(e) => f.write_str(e),
    }
  }
}

impl From<&str> for Cell {
  fn from(s: &str) -> Self { Cell::Text(s.to_owned()) }
}

impl From<f64> for Cell {
  fn from(x: f64) -> Self { Cell::Float(x) }
}

impl From<i64> for Cell {
  fn from(i: i64) -> Self { Cell::Int(i) }
}

impl From<NaiveDate> for Cell {
  fn from(d: NaiveDate) -> Self { Cell::Date(d) }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
  fn from(v: Option<T>) -> Self { v.map_or(Cell::Empty, Into::into) }
}

// ─── Sheet ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
  /// Spreadsheet row number (1-based).
  pub number: u32,
  pub cells:  Vec<Cell>,
}

impl SheetRow {
  pub fn is_blank(&self) -> bool { self.cells.iter().all(Cell::is_blank) }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
  pub name:       String,
  /// Spreadsheet row number of the header row (1-based).
  pub header_row: u32,
  pub header:     Vec<String>,
  pub rows:       Vec<SheetRow>,
}

impl Sheet {
  /// An empty sheet whose header sits on spreadsheet row 1.
  pub fn new<I, S>(name: impl Into<String>, header: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      name:       name.into(),
      header_row: 1,
      header:     header.into_iter().map(Into::into).collect(),
      rows:       Vec::new(),
    }
  }

  /// Append a data row numbered directly after the previous one.
  pub fn push_row(&mut self, cells: Vec<Cell>) {
    let number = self
      .rows
      .last()
      .map_or(self.header_row + 1, |r| r.number + 1);
    self.rows.push(SheetRow { number, cells });
  }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  /// Check that the header matches `expected` exactly, in order.
  pub fn check_header(&self, expected: &[&'static str]) -> Result<()> {
    for (position, want) in expected.iter().enumerate() {
      match self.header.get(position).map(|h| h.trim()) {
        Some(found) if found == *want => {}
        Some(found) => {
          return Err(Error::UnexpectedHeader {
            sheet: self.name.clone(),
            position: position + 1,
            expected: want,
            found: found.to_owned(),
          });
        }
        None => {
          return Err(Error::MissingColumn {
            sheet: self.name.clone(),
            position: position + 1,
            expected: want,
          });
        }
      }
    }

    // Readers pad ragged rows with empty header cells; only named extras
    // count as a structural difference.
    if let Some((position, found)) = self
      .header
      .iter()
      .enumerate()
      .skip(expected.len())
      .find(|(_, h)| !h.trim().is_empty())
    {
      return Err(Error::ExtraColumn {
        sheet: self.name.clone(),
        position: position + 1,
        found: found.clone(),
      });
    }

    Ok(())
  }
}

// ─── Typed row access ────────────────────────────────────────────────────────

/// A data row bound to its sheet's (already validated) column layout.
///
/// Every accessor turns a cell into a typed value or an [`Error`] naming the
/// sheet, row, column and offending value.
pub(crate) struct RowView<'a> {
  sheet:   &'a str,
  columns: &'a [&'static str],
  row:     &'a SheetRow,
}

static EMPTY: Cell = Cell::Empty;

impl<'a> RowView<'a> {
  pub(crate) fn new(
    sheet: &'a Sheet,
    columns: &'a [&'static str],
    row: &'a SheetRow,
  ) -> Self {
    Self { sheet: &sheet.name, columns, row }
  }

  pub(crate) fn sheet(&self) -> &'a str { self.sheet }

  pub(crate) fn row_number(&self) -> u32 { self.row.number }

  pub(crate) fn cell(&self, column: &'static str) -> &'a Cell {
    self
      .columns
      .iter()
      .position(|c| *c == column)
      .and_then(|i| self.row.cells.get(i))
      .unwrap_or(&EMPTY)
  }

  fn mismatch(&self, column: &'static str, expected: Expected) -> Error {
    Error::Coercion {
      sheet: self.sheet.to_owned(),
      row: self.row.number,
      column,
      value: self.cell(column).to_string(),
      expected: expected.as_str(),
    }
  }

  fn missing(&self, column: &'static str) -> Error {
    Error::MissingValue {
      sheet: self.sheet.to_owned(),
      row: self.row.number,
      column,
    }
  }

  pub(crate) fn require<T>(
    &self,
    column: &'static str,
    value: Option<T>,
  ) -> Result<T> {
    value.ok_or_else(|| self.missing(column))
  }

  /// Optional text; numbers are rendered as text.
  pub(crate) fn text(&self, column: &'static str) -> Option<String> {
    let cell = self.cell(column);
    if cell.is_blank() {
      return None;
    }
    Some(cell.to_string().trim().to_owned())
  }

  pub(crate) fn required_text(&self, column: &'static str) -> Result<String> {
    self.require(column, self.text(column))
  }

  /// A number the reader already parsed; text is only accepted when blank.
  pub(crate) fn number(&self, column: &'static str) -> Result<Option<f64>> {
    coerce::number(self.cell(column)).map_err(|e| self.mismatch(column, e))
  }

  /// A number possibly stored as text.
  pub(crate) fn parse_number(&self, column: &'static str) -> Result<Option<f64>> {
    coerce::number_from_text(self.cell(column)).map_err(|e| self.mismatch(column, e))
  }

  /// An integral number, optionally parsed from text.
  pub(crate) fn integer(
    &self,
    column: &'static str,
    from_text: bool,
  ) -> Result<Option<i64>> {
    let value = if from_text {
      self.parse_number(column)?
    } else {
      self.number(column)?
    };
    value
      .map(|x| coerce::integral(x).ok_or_else(|| self.mismatch(column, Expected::Integer)))
      .transpose()
  }

  pub(crate) fn required_integer(
    &self,
    column: &'static str,
    from_text: bool,
  ) -> Result<i64> {
    self.require(column, self.integer(column, from_text)?)
  }

  pub(crate) fn date(&self, column: &'static str) -> Result<Option<NaiveDate>> {
    coerce::date(self.cell(column)).map_err(|e| self.mismatch(column, e))
  }
}
