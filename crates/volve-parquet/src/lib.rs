//! Parquet export of the Volve production tables.
//!
//! Each table is read from the store as typed columns, written to a
//! temporary `.parquet.tmp` file, checked against the store's row count and
//! renamed into place. A `README.md` with per-file metadata is maintained in
//! the export directory.

mod convert;
mod export;
mod read;
mod readme;

pub mod error;

pub use convert::arrow_schema;
pub use error::{Error, Result};
pub use export::{ExportedTable, export_all, export_table, parquet_path};
pub use read::{parquet_row_count, read_parquet};
pub use readme::{README_FILE, render_metadata_table, write_readme};
