//! Schema documentation shipped next to the exports: `schema.sql`,
//! `schema.json` and `schema.md`, all rendered from the table descriptors.

use std::{
  collections::BTreeMap,
  fmt::Write as _,
  fs,
  path::{Path, PathBuf},
};

use serde::Serialize;
use strum::IntoEnumIterator as _;
use tracing::info;
use volve_core::{
  Table,
  columns::source_of,
  schema::{ForeignKeyDef, SqlType, TableDef},
};

use crate::{Result, schema::schema_sql};

pub const SQL_FILE: &str = "schema.sql";
pub const JSON_FILE: &str = "schema.json";
pub const MARKDOWN_FILE: &str = "schema.md";

// ─── SQL ─────────────────────────────────────────────────────────────────────

pub fn schema_sql_document() -> String {
  format!(
    "-- Volve Database Schema\n\
     -- DDL statements to recreate the database structure\n\n{}",
    schema_sql()
  )
}

// ─── JSON ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct SchemaDoc {
  database:    &'static str,
  description: &'static str,
  tables:      BTreeMap<&'static str, TableDoc>,
}

#[derive(Serialize)]
struct TableDoc {
  comment:      &'static str,
  columns:      Vec<ColumnDoc>,
  primary_key:  &'static [&'static str],
  foreign_keys: &'static [ForeignKeyDef],
  indexes:      Vec<IndexDoc>,
}

#[derive(Serialize)]
struct ColumnDoc {
  name:        &'static str,
  #[serde(rename = "type")]
  sql_type:    SqlType,
  not_null:    bool,
  primary_key: bool,
  source:      Option<&'static str>,
  comment:     &'static str,
}

#[derive(Serialize)]
struct IndexDoc {
  name:    &'static str,
  unique:  bool,
  columns: [&'static str; 1],
}

fn table_doc(def: &'static TableDef) -> TableDoc {
  TableDoc {
    comment:      def.comment,
    columns:      def
      .columns
      .iter()
      .map(|c| ColumnDoc {
        name:        c.name,
        sql_type:    c.sql_type,
        not_null:    !c.nullable,
        primary_key: def.is_primary_key(c.name),
        source:      source_of(def.table, c.name),
        comment:     c.comment,
      })
      .collect(),
    primary_key:  def.primary_key,
    foreign_keys: def.foreign_keys,
    indexes:      def
      .indexes
      .iter()
      .map(|ix| IndexDoc { name: ix.name, unique: false, columns: [ix.column] })
      .collect(),
  }
}

pub fn schema_json() -> Result<String> {
  let doc = SchemaDoc {
    database:    "volve.db",
    description: "Equinor Volve production dataset",
    tables:      Table::iter().map(|t| (t.name(), table_doc(t.def()))).collect(),
  };
  Ok(serde_json::to_string_pretty(&doc)?)
}

// ─── Markdown ────────────────────────────────────────────────────────────────

pub fn schema_markdown() -> String {
  let mut md = String::from(
    "# Volve Database Schema\n\n\
     This document describes the structure of the Volve production database.\n\n\
     ## Tables\n\n",
  );

  for table in Table::iter() {
    let def = table.def();
    let _ = writeln!(md, "### {}\n\n*{}*\n", def.name(), def.comment);
    md.push_str("**Columns:**\n\n");
    md.push_str("| Column | Type | Nullable | Primary Key | Source | Comment |\n");
    md.push_str("|--------|------|----------|-------------|--------|---------|\n");
    for c in def.columns {
      let _ = writeln!(
        md,
        "| {} | {} | {} | {} | {} | {} |",
        c.name,
        c.sql_type.as_sql(),
        if c.nullable { "Yes" } else { "No" },
        if def.is_primary_key(c.name) { "✓" } else { "" },
        source_of(table, c.name).unwrap_or(""),
        c.comment,
      );
    }
    md.push('\n');

    if !def.foreign_keys.is_empty() {
      md.push_str("**Foreign Keys:**\n\n");
      for fk in def.foreign_keys {
        let _ = writeln!(
          md,
          "- `{}` → `{}.{}`",
          fk.column,
          fk.references_table.name(),
          fk.references_column
        );
      }
      md.push('\n');
    }

    if !def.indexes.is_empty() {
      md.push_str("**Indexes:**\n\n");
      for ix in def.indexes {
        let _ = writeln!(md, "- `{}`: {}", ix.name, ix.column);
      }
      md.push('\n');
    }
    md.push_str("---\n\n");
  }

  md.push_str("## Relationships\n\n```\n");
  for table in Table::iter() {
    for fk in table.def().foreign_keys {
      let _ = writeln!(
        md,
        "{}.{} → {}.{}",
        table.name(),
        fk.column,
        fk.references_table.name(),
        fk.references_column
      );
    }
  }
  md.push_str("```\n");
  md
}

// ─── Files ───────────────────────────────────────────────────────────────────

/// Write all three documents into `dir`, creating it if needed.
pub fn write_schema_docs(dir: &Path) -> Result<Vec<PathBuf>> {
  fs::create_dir_all(dir)?;
  let files = [
    (SQL_FILE, schema_sql_document()),
    (JSON_FILE, schema_json()?),
    (MARKDOWN_FILE, schema_markdown()),
  ];
  let mut written = Vec::with_capacity(files.len());
  for (name, contents) in files {
    let path = dir.join(name);
    fs::write(&path, contents)?;
    written.push(path);
  }
  info!(dir = %dir.display(), "wrote schema documentation");
  Ok(written)
}
