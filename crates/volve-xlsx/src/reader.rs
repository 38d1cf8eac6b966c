use std::{fs::File, io::BufReader, path::Path};

use calamine::{Data, Reader, Xlsx, open_workbook};
use tracing::debug;
use volve_core::{Cell, Sheet, SheetRow};

use crate::{Error, Result};

/// An open workbook.
pub struct WorkbookReader {
  workbook: Xlsx<BufReader<File>>,
}

impl WorkbookReader {
  pub fn open(path: &Path) -> Result<Self> {
    let workbook = open_workbook(path).map_err(|source| Error::Open {
      path: path.to_owned(),
      source,
    })?;
    Ok(Self { workbook })
  }

  pub fn sheet_names(&self) -> Vec<String> { self.workbook.sheet_names() }

  /// Read sheet `name` into memory.
  pub fn sheet(&mut self, name: &str) -> Result<Sheet> {
    let available = self.sheet_names();
    if !available.iter().any(|s| s == name) {
      return Err(Error::MissingSheet { sheet: name.to_owned(), available });
    }

    let range = self
      .workbook
      .worksheet_range(name)
      .map_err(|source| Error::Read { sheet: name.to_owned(), source })?;

    // `start` is the first used cell, 0-based; leading empty rows are not
    // part of the range.
    let Some((first_row, _)) = range.start() else {
      return Err(Error::EmptySheet(name.to_owned()));
    };
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
      return Err(Error::EmptySheet(name.to_owned()));
    };

    let header_row = first_row + 1;
    let mut sheet = Sheet {
      name: name.to_owned(),
      header_row,
      header: header.iter().map(header_name).collect(),
      rows: Vec::with_capacity(range.height().saturating_sub(1)),
    };
    for (offset, cells) in (1u32..).zip(rows) {
      sheet.rows.push(SheetRow {
        number: header_row + offset,
        cells:  cells.iter().map(to_cell).collect(),
      });
    }

    debug!(sheet = name, rows = sheet.len(), "read sheet");
    Ok(sheet)
  }
}

fn header_name(data: &Data) -> String {
  match data {
    Data::String(s) => s.trim().to_owned(),
    other => to_cell(other).to_string(),
  }
}

pub(crate) fn to_cell(data: &Data) -> Cell {
  match data {
    Data::Empty => Cell::Empty,
    Data::Bool(b) => Cell::Bool(*b),
    Data::Int(i) => Cell::Int(*i),
    Data::Float(x) => Cell::Float(*x),
    Data::String(s) => Cell::Text(s.clone()),
    Data::DateTime(dt) => match dt.as_datetime() {
      Some(dt) => Cell::Date(dt.date()),
      None => Cell::Float(dt.as_f64()),
    },
    Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    Data::Error(e) => Cell::Error(e.to_string()),
  }
}
