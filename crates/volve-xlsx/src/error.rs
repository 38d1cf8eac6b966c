//! Error types for the workbook reader.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot open workbook {path}: {source}")]
  Open {
    path:   PathBuf,
    source: calamine::XlsxError,
  },

  #[error("workbook has no sheet {sheet:?} (found: {})", available.join(", "))]
  MissingSheet {
    sheet:     String,
    available: Vec<String>,
  },

  #[error("cannot read sheet {sheet:?}: {source}")]
  Read {
    sheet:  String,
    source: calamine::XlsxError,
  },

  #[error("sheet {0:?} has no header row")]
  EmptySheet(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
