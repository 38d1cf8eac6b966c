//! SQLite store for the Volve production tables.
//!
//! Owns the connection for the duration of a run. Schema creation, loading,
//! validation and the read-side queries used by the exporter and the
//! summary report all go through [`SqliteStore`]. Access is synchronous;
//! there is exactly one writer.

mod encode;
mod schema;
mod store;

pub mod docs;
pub mod error;
pub mod summary;
pub mod validate;

pub use error::{Error, Result};
pub use schema::schema_sql;
pub use store::SqliteStore;
pub use summary::Summary;
pub use validate::{DateRange, ValidationReport, Violation};
