//! `.xlsx` reader for the Volve production workbook.
//!
//! Turns worksheets into [`volve_core::Sheet`] values: the first non-empty
//! row of a sheet is its header, every later row is a data row numbered as
//! a spreadsheet application would number it. Cells keep the type the
//! workbook stored; coercion is left to the transformers.
//!
//! ```no_run
//! use volve_core::PipelineConfig;
//!
//! let config = PipelineConfig::default();
//! let book = volve_xlsx::read_workbook(&config.source_path, &config).unwrap();
//! println!("{} daily rows", book.daily.len());
//! ```

pub mod error;
mod reader;

#[cfg(test)]
mod tests;

use std::path::Path;

pub use error::{Error, Result};
pub use reader::WorkbookReader;
use tracing::warn;
use volve_core::{PipelineConfig, Sheet};

/// The two production sheets of one workbook.
#[derive(Debug, Clone)]
pub struct Workbook {
  pub daily:          Sheet,
  pub monthly:        Sheet,
  /// Sheets other than the two configured ones; not read.
  pub ignored_sheets: Vec<String>,
}

/// Open `path` and read the configured daily and monthly sheets.
///
/// The workbook is expected to hold exactly those two sheets; any other
/// sheet is skipped with a warning.
pub fn read_workbook(path: &Path, config: &PipelineConfig) -> Result<Workbook> {
  let mut reader = WorkbookReader::open(path)?;
  let ignored_sheets: Vec<String> = reader
    .sheet_names()
    .into_iter()
    .filter(|s| *s != config.daily_sheet && *s != config.monthly_sheet)
    .collect();
  for sheet in &ignored_sheets {
    warn!(path = %path.display(), sheet = %sheet, "ignoring unexpected sheet");
  }

  Ok(Workbook {
    daily:          reader.sheet(&config.daily_sheet)?,
    monthly:        reader.sheet(&config.monthly_sheet)?,
    ignored_sheets,
  })
}
