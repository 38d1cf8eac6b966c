//! Error type for `volve-store-sqlite`.

use thiserror::Error;
use volve_core::{RowKey, Table};

use crate::validate::Violation;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] volve_core::Error),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("cannot decode stored value: {0}")]
  Decode(String),

  /// `create_schema` never drops; existing tables must be removed by hand.
  #[error("schema already exists: found table(s) {}", .0.join(", "))]
  SchemaConflict(Vec<String>),

  #[error("schema missing table(s) {}; run schema creation first", .0.join(", "))]
  SchemaMissing(Vec<String>),

  #[error("{table}: duplicate primary key ({key})")]
  DuplicateKey { table: Table, key: RowKey },

  #[error("{table}: row ({key}) references unknown well {}", .key.npd_wellbore_code())]
  UnknownWell { table: Table, key: RowKey },

  #[error("integrity check failed: {}", join_violations(.0))]
  Integrity(Vec<Violation>),
}

fn join_violations(violations: &[Violation]) -> String {
  violations
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
