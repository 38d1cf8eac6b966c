//! DDL and DML rendered from the table descriptors in
//! [`volve_core::schema`].
//!
//! `CREATE TABLE` carries no `IF NOT EXISTS`: schema creation refuses to run
//! over an existing schema, and the store checks for that up front so the
//! caller gets a list of the conflicting tables rather than a bare SQLite
//! error.

use std::fmt::Write as _;

use strum::IntoEnumIterator as _;
use volve_core::{
  Table,
  schema::{ColumnDef, TableDef},
};

pub fn create_table_sql(def: &TableDef) -> String {
  let mut lines: Vec<String> = def.columns.iter().map(column_sql).collect();
  lines.push(format!("PRIMARY KEY ({})", def.primary_key.join(", ")));
  for fk in def.foreign_keys {
    lines.push(format!(
      "FOREIGN KEY ({}) REFERENCES {} ({})",
      fk.column,
      fk.references_table.name(),
      fk.references_column
    ));
  }

  let mut sql = format!("-- {}\nCREATE TABLE {} (\n", def.comment, def.name());
  let last = lines.len() - 1;
  for (i, line) in lines.iter().enumerate() {
    let sep = if i == last { "" } else { "," };
    let _ = writeln!(sql, "    {line}{sep}");
  }
  sql.push_str(");\n");
  sql
}

fn column_sql(col: &ColumnDef) -> String {
  let null = if col.nullable { "" } else { " NOT NULL" };
  format!("{:<26} {}{null}", col.name, col.sql_type.as_sql())
}

pub fn create_index_sql(def: &TableDef) -> Vec<String> {
  def
    .indexes
    .iter()
    .map(|ix| format!("CREATE INDEX {} ON {} ({});", ix.name, def.name(), ix.column))
    .collect()
}

/// The complete schema: every table in load order, then every index.
pub fn schema_sql() -> String {
  let mut sql = String::new();
  for table in Table::iter() {
    sql.push_str(&create_table_sql(table.def()));
    sql.push('\n');
  }
  for table in Table::iter() {
    for stmt in create_index_sql(table.def()) {
      sql.push_str(&stmt);
      sql.push('\n');
    }
  }
  sql
}

pub fn insert_sql(def: &TableDef) -> String {
  let columns: Vec<_> = def.column_names().collect();
  let params: Vec<_> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
  format!(
    "INSERT INTO {} ({}) VALUES ({})",
    def.name(),
    columns.join(", "),
    params.join(", ")
  )
}

pub fn select_all_sql(def: &TableDef) -> String {
  let columns: Vec<_> = def.column_names().collect();
  format!(
    "SELECT {} FROM {} ORDER BY {}",
    columns.join(", "),
    def.name(),
    def.primary_key.join(", ")
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fact_table_ddl_has_composite_key_and_reference() {
    let sql = create_table_sql(Table::MonthlyProduction.def());
    assert!(sql.contains("CREATE TABLE monthly_production ("));
    assert!(sql.contains("PRIMARY KEY (date, npd_wellbore_code)"));
    assert!(sql.contains(
      "FOREIGN KEY (npd_wellbore_code) REFERENCES wells (npd_wellbore_code)"
    ));
    assert!(!sql.contains("IF NOT EXISTS"));
    assert!(sql.trim_end().ends_with(");"));
  }

  #[test]
  fn schema_declares_all_indexes() {
    let sql = schema_sql();
    for ix in ["ix_daily_date", "ix_daily_wellbore", "ix_monthly_date", "ix_monthly_wellbore"] {
      assert!(sql.contains(&format!("CREATE INDEX {ix} ON")), "{ix}");
    }
  }

  #[test]
  fn insert_has_one_parameter_per_column() {
    let sql = insert_sql(Table::Wells.def());
    assert!(sql.starts_with("INSERT INTO wells (npd_wellbore_code, wellbore_code"));
    assert!(sql.ends_with("?6, ?7)"));
  }
}
