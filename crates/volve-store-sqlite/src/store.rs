//! [`SqliteStore`]: schema creation, transactional loading and table reads.

use std::path::Path;

use rusqlite::{Connection, Transaction, params_from_iter};
use strum::IntoEnumIterator as _;
use tracing::{debug, info};
use volve_core::{
  RowKey, Table, TableCounts, TableRow, columnar::ColumnarTable,
  transform::Transformed,
};

use crate::{
  Error, Result,
  encode::{decode_value, encode_value},
  schema::{insert_sql, schema_sql, select_all_sql},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The production tables in a single SQLite file.
///
/// The connection runs with foreign keys enforced and in exclusive locking
/// mode, so no other process can read a half-loaded database.
pub struct SqliteStore {
  conn: Connection,
}

impl SqliteStore {
  /// Open (or create) the database at `path`, creating parent directories.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }
    debug!(path = %path.display(), "opening database");
    Self::configure(Connection::open(path)?)
  }

  /// Open an in-memory store, for tests.
  pub fn open_in_memory() -> Result<Self> {
    Self::configure(Connection::open_in_memory()?)
  }

  fn configure(conn: Connection) -> Result<Self> {
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.pragma_update(None, "locking_mode", "EXCLUSIVE")?;
    Ok(Self { conn })
  }

  pub(crate) fn conn(&self) -> &Connection { &self.conn }

  // ─── Schema ────────────────────────────────────────────────────────────────

  /// Which of the three production tables exist, in load order.
  pub fn existing_tables(&self) -> Result<Vec<Table>> {
    let mut stmt = self
      .conn
      .prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
    let names = stmt
      .query_map([], |r| r.get::<_, String>(0))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(
      Table::iter()
        .filter(|t| names.iter().any(|n| n == t.name()))
        .collect(),
    )
  }

  /// Create all tables and indexes in one transaction.
  ///
  /// Fails with [`Error::SchemaConflict`] if any target table already
  /// exists. Nothing is ever dropped.
  pub fn create_schema(&mut self) -> Result<()> {
    let existing = self.existing_tables()?;
    if !existing.is_empty() {
      return Err(Error::SchemaConflict(names(&existing)));
    }

    let tx = self.conn.transaction()?;
    tx.execute_batch(&schema_sql())?;
    tx.commit()?;
    info!("created schema");
    Ok(())
  }

  pub(crate) fn require_schema(&self) -> Result<()> {
    let existing = self.existing_tables()?;
    let missing: Vec<_> = Table::iter().filter(|t| !existing.contains(t)).collect();
    if missing.is_empty() {
      Ok(())
    } else {
      Err(Error::SchemaMissing(names(&missing)))
    }
  }

  // ─── Load ──────────────────────────────────────────────────────────────────

  /// Insert wells, then daily, then monthly records.
  ///
  /// All three steps share one transaction and each step runs in its own
  /// savepoint. Any failure rolls everything back, so either every table
  /// is loaded or none is.
  pub fn load(&mut self, data: &Transformed) -> Result<TableCounts> {
    self.require_schema()?;

    let mut tx = self.conn.transaction()?;
    let counts = TableCounts {
      wells:              insert_rows(&mut tx, &data.wells)?,
      daily_production:   insert_rows(&mut tx, &data.daily)?,
      monthly_production: insert_rows(&mut tx, &data.monthly)?,
    };
    tx.commit()?;

    info!(
      wells = counts.wells,
      daily_production = counts.daily_production,
      monthly_production = counts.monthly_production,
      "load committed"
    );
    Ok(counts)
  }

  // ─── Reads ─────────────────────────────────────────────────────────────────

  pub fn row_count(&self, table: Table) -> Result<usize> {
    let n: i64 = self.conn.query_row(
      &format!("SELECT COUNT(*) FROM {}", table.name()),
      [],
      |r| r.get(0),
    )?;
    Ok(n as usize)
  }

  pub fn row_counts(&self) -> Result<TableCounts> {
    let mut counts = TableCounts::default();
    for table in Table::iter() {
      counts.set(table, self.row_count(table)?);
    }
    Ok(counts)
  }

  /// The whole table as typed columns, ordered by primary key.
  pub fn read_table(&self, table: Table) -> Result<ColumnarTable> {
    self.require_schema()?;

    let def = table.def();
    let mut out = ColumnarTable::with_capacity(table, self.row_count(table)?);
    let mut stmt = self.conn.prepare(&select_all_sql(def))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
      let values = def
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| decode_value(row.get_ref(i)?, col.sql_type))
        .collect::<Result<Vec<_>>>()?;
      out.push_row(values)?;
    }
    Ok(out)
  }
}

fn names(tables: &[Table]) -> Vec<String> {
  tables.iter().map(|t| t.name().to_owned()).collect()
}

/// One load step: insert `rows` inside a savepoint of `tx`.
fn insert_rows<R: TableRow>(tx: &mut Transaction<'_>, rows: &[R]) -> Result<usize> {
  let table = R::TABLE;
  let sp = tx.savepoint()?;
  {
    let mut stmt = sp.prepare(&insert_sql(table.def()))?;
    for row in rows {
      stmt
        .execute(params_from_iter(row.values().into_iter().map(encode_value)))
        .map_err(|e| classify(table, row.key(), e))?;
    }
  }
  sp.commit()?;
  info!(%table, rows = rows.len(), "loaded table");
  Ok(rows.len())
}

/// Name constraint failures after the row that caused them.
fn classify(table: Table, key: RowKey, err: rusqlite::Error) -> Error {
  use rusqlite::ffi::{
    SQLITE_CONSTRAINT_FOREIGNKEY, SQLITE_CONSTRAINT_PRIMARYKEY, SQLITE_CONSTRAINT_UNIQUE,
  };

  if let rusqlite::Error::SqliteFailure(e, _) = &err {
    match e.extended_code {
      SQLITE_CONSTRAINT_PRIMARYKEY | SQLITE_CONSTRAINT_UNIQUE => {
        return Error::DuplicateKey { table, key };
      }
      SQLITE_CONSTRAINT_FOREIGNKEY => return Error::UnknownWell { table, key },
      _ => {}
    }
  }
  Error::Database(err)
}
