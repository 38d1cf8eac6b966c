//! Core types for the Volve production ETL.
//!
//! This crate is deliberately free of spreadsheet, database and file-format
//! dependencies. It holds the in-memory sheet model, the column mapping
//! table, the destination table descriptors, the typed records, and the
//! pure transformations from sheets to records.

pub mod columnar;
pub mod columns;
pub mod config;
pub mod error;
pub mod record;
pub mod schema;
pub mod sheet;
pub mod transform;

mod coerce;

pub use coerce::excel_serial_to_date;
pub use config::{ExportCompression, PipelineConfig, WellConflictPolicy};
pub use error::{Error, Result};
pub use record::{
  DailyProductionRecord, MonthlyProductionRecord, RowKey, TableCounts,
  TableRow, Value, Well,
};
pub use schema::Table;
pub use sheet::{Cell, Sheet, SheetRow};
