//! Error type for the pipeline steps.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),

  #[error("workbook error: {0}")]
  Workbook(#[from] volve_xlsx::Error),

  #[error("transform error: {0}")]
  Transform(#[from] volve_core::Error),

  #[error("store error: {0}")]
  Store(#[from] volve_store_sqlite::Error),

  #[error("export error: {0}")]
  Export(#[from] volve_parquet::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
