//! Pipeline steps behind the `volve` binary.
//!
//! Every step takes an explicit [`PipelineConfig`]. Reading and transforming
//! the workbook always completes before the store is touched, so a data
//! error never leaves a partly written database behind.

pub mod error;
pub mod settings;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;
use volve_core::{PipelineConfig, TableCounts, transform::Transformed};
use volve_parquet::ExportedTable;
use volve_store_sqlite::{SqliteStore, Summary, ValidationReport, docs::write_schema_docs};

pub use error::{Error, Result};
pub use settings::{Overrides, load_config};

// ─── Reports ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
  pub counts:     TableCounts,
  pub validation: ValidationReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
  pub tables:      Vec<ExportedTable>,
  pub readme:      PathBuf,
  pub schema_docs: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
  pub load:   LoadReport,
  pub export: ExportReport,
}

// ─── Steps ───────────────────────────────────────────────────────────────────

/// Read the workbook and run every transformer.
pub fn extract(config: &PipelineConfig) -> Result<Transformed> {
  info!(path = %config.source_path.display(), "reading workbook");
  let book = volve_xlsx::read_workbook(&config.source_path, config)?;
  Ok(volve_core::transform::transform(&book.daily, &book.monthly, config)?)
}

fn open_store(config: &PipelineConfig) -> Result<SqliteStore> {
  Ok(SqliteStore::open(&config.database_path)?)
}

pub fn create_schema(config: &PipelineConfig) -> Result<()> {
  let mut store = open_store(config)?;
  store.create_schema()?;
  info!(path = %config.database_path.display(), "created schema");
  Ok(())
}

fn load_into(store: &mut SqliteStore, data: &Transformed) -> Result<LoadReport> {
  let counts = store.load(data)?;
  let validation = store.validate(Some(&data.counts()))?.ensure_clean()?;
  Ok(LoadReport { counts, validation })
}

/// Load the workbook into an existing schema and validate the result.
pub fn load(config: &PipelineConfig) -> Result<LoadReport> {
  let data = extract(config)?;
  let mut store = open_store(config)?;
  load_into(&mut store, &data)
}

/// Validate a database without expected counts; empty tables are reported.
pub fn validate(config: &PipelineConfig) -> Result<ValidationReport> {
  let store = open_store(config)?;
  Ok(store.validate(None)?.ensure_clean()?)
}

fn export_from(store: &SqliteStore, config: &PipelineConfig) -> Result<ExportReport> {
  let dir = &config.export_dir;
  let tables = volve_parquet::export_all(store, dir, config.compression)?;
  let readme = volve_parquet::write_readme(dir, &tables)?;
  let schema_docs = write_schema_docs(dir)?;
  info!(dir = %dir.display(), files = tables.len(), "export complete");
  Ok(ExportReport { tables, readme, schema_docs })
}

/// Parquet files, their README and the schema documents.
pub fn export(config: &PipelineConfig) -> Result<ExportReport> {
  let store = open_store(config)?;
  export_from(&store, config)
}

pub fn summary(config: &PipelineConfig) -> Result<Summary> {
  Ok(open_store(config)?.summary()?)
}

/// Create the schema, load, validate and export in one go.
pub fn run(config: &PipelineConfig) -> Result<RunReport> {
  let data = extract(config)?;
  let mut store = open_store(config)?;
  store.create_schema()?;
  let load = load_into(&mut store, &data)?;
  let export = export_from(&store, config)?;
  Ok(RunReport { load, export })
}
