//! Error type for `volve-parquet`.

use std::path::PathBuf;

use thiserror::Error;
use volve_core::{Table, schema::SqlType};

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] volve_core::Error),

  #[error("store error: {0}")]
  Store(#[from] volve_store_sqlite::Error),

  #[error("arrow error: {0}")]
  Arrow(#[from] arrow::error::ArrowError),

  #[error("parquet error: {0}")]
  Parquet(#[from] parquet::errors::ParquetError),

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  /// The written file does not hold the rows the store does; the temporary
  /// file has been removed.
  #[error("{table}: store has {store} rows but {path} holds {parquet}")]
  RowCountMismatch {
    table:   Table,
    path:    PathBuf,
    store:   usize,
    parquet: usize,
  },

  #[error("{table}.{column}: expected a {expected:?} column, found {found}")]
  ColumnType {
    table:    Table,
    column:   &'static str,
    expected: SqlType,
    found:    String,
  },

  #[error("{table}: expected {expected} columns, found {found}")]
  ColumnCount {
    table:    Table,
    expected: usize,
    found:    usize,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
