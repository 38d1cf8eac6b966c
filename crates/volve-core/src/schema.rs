//! Destination table descriptors.
//!
//! The schema is declared as plain data. The SQLite store renders DDL and
//! INSERT statements from it, the Parquet exporter derives its Arrow schema
//! from it, and the schema documentation is generated from it. There is no
//! entity-mapping layer.

use serde::Serialize;

use crate::columns::dest;

// ─── Tables ──────────────────────────────────────────────────────────────────

/// The three destination tables, in load order.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  strum::Display,
  strum::EnumIter,
  strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Table {
  Wells,
  DailyProduction,
  MonthlyProduction,
}

impl Table {
  pub fn name(self) -> &'static str { self.into() }

  pub fn def(self) -> &'static TableDef {
    match self {
      Table::Wells => &WELLS,
      Table::DailyProduction => &DAILY_PRODUCTION,
      Table::MonthlyProduction => &MONTHLY_PRODUCTION,
    }
  }

  /// Fact tables are keyed by `(date, npd_wellbore_code)` and reference
  /// `wells`.
  pub fn is_fact(self) -> bool { !matches!(self, Table::Wells) }
}

// ─── Descriptors ─────────────────────────────────────────────────────────────

/// Declared storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SqlType {
  Integer,
  Real,
  Text,
  /// ISO-8601 calendar date (`YYYY-MM-DD`).
  Date,
}

impl SqlType {
  pub fn as_sql(self) -> &'static str {
    match self {
      SqlType::Integer => "INTEGER",
      SqlType::Real => "REAL",
      SqlType::Text => "TEXT",
      SqlType::Date => "DATE",
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ColumnDef {
  pub name:     &'static str,
  #[serde(rename = "type")]
  pub sql_type: SqlType,
  pub nullable: bool,
  pub comment:  &'static str,
}

#[derive(Debug, Serialize)]
pub struct ForeignKeyDef {
  pub column:            &'static str,
  pub references_table:  Table,
  pub references_column: &'static str,
}

/// A single-column secondary index.
#[derive(Debug, Serialize)]
pub struct IndexDef {
  pub name:   &'static str,
  pub column: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TableDef {
  pub table:        Table,
  pub comment:      &'static str,
  pub columns:      &'static [ColumnDef],
  pub primary_key:  &'static [&'static str],
  pub foreign_keys: &'static [ForeignKeyDef],
  pub indexes:      &'static [IndexDef],
}

impl TableDef {
  pub fn name(&self) -> &'static str { self.table.name() }

  pub fn column(&self, name: &str) -> Option<&'static ColumnDef> {
    self.columns.iter().find(|c| c.name == name)
  }

  pub fn column_index(&self, name: &str) -> Option<usize> {
    self.columns.iter().position(|c| c.name == name)
  }

  pub fn is_primary_key(&self, column: &str) -> bool {
    self.primary_key.contains(&column)
  }

  pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.columns.iter().map(|c| c.name)
  }
}

const fn col(
  name: &'static str,
  sql_type: SqlType,
  nullable: bool,
  comment: &'static str,
) -> ColumnDef {
  ColumnDef { name, sql_type, nullable, comment }
}

const fn real(name: &'static str, comment: &'static str) -> ColumnDef {
  col(name, SqlType::Real, true, comment)
}

const WELL_FK: ForeignKeyDef = ForeignKeyDef {
  column:            dest::NPD_WELLBORE_CODE,
  references_table:  Table::Wells,
  references_column: dest::NPD_WELLBORE_CODE,
};

// ─── wells ───────────────────────────────────────────────────────────────────

pub static WELLS: TableDef = TableDef {
  table:        Table::Wells,
  comment:      "One row per wellbore; static attributes",
  columns:      &[
    col(
      dest::NPD_WELLBORE_CODE,
      SqlType::Integer,
      false,
      "Norwegian Petroleum Directorate wellbore code",
    ),
    col(dest::WELLBORE_CODE, SqlType::Text, false, "Well bore code, e.g. 'NO 15/9-F-1 C'"),
    col(dest::WELLBORE_NAME, SqlType::Text, false, "NPD well bore name"),
    col(dest::NPD_FIELD_CODE, SqlType::Integer, false, "NPD field code"),
    col(dest::NPD_FIELD_NAME, SqlType::Text, false, "Field name"),
    col(dest::NPD_FACILITY_CODE, SqlType::Integer, false, "NPD facility code"),
    col(dest::NPD_FACILITY_NAME, SqlType::Text, false, "Facility name"),
  ],
  primary_key:  &[dest::NPD_WELLBORE_CODE],
  foreign_keys: &[],
  indexes:      &[],
};

// ─── daily_production ────────────────────────────────────────────────────────

pub static DAILY_PRODUCTION: TableDef = TableDef {
  table:        Table::DailyProduction,
  comment:      "Daily measurements per wellbore",
  columns:      &[
    col(dest::DATE, SqlType::Date, false, "Production date"),
    col(dest::NPD_WELLBORE_CODE, SqlType::Integer, false, "Reference to wells"),
    real(dest::ON_STREAM_HOURS, "Hours the well was producing"),
    real(dest::AVG_DOWNHOLE_PRESSURE, "Average downhole pressure"),
    real(dest::AVG_DP_TUBING, "Average differential pressure in tubing"),
    real(dest::AVG_ANNULUS_PRESSURE, "Average annulus pressure"),
    real(dest::AVG_WELLHEAD_PRESSURE, "Average wellhead pressure"),
    real(dest::AVG_DOWNHOLE_TEMPERATURE, "Average downhole temperature"),
    real(dest::AVG_WELLHEAD_TEMPERATURE, "Average wellhead temperature"),
    real(dest::AVG_CHOKE_SIZE_PERCENT, "Average choke size as percentage"),
    col(dest::AVG_CHOKE_UNIT, SqlType::Text, true, "Choke unit of measurement"),
    real(dest::DP_CHOKE_SIZE, "Differential pressure choke size"),
    real(dest::OIL_VOLUME, "Oil volume produced from bore"),
    real(dest::GAS_VOLUME, "Gas volume produced from bore"),
    real(dest::WATER_VOLUME, "Water volume produced from bore"),
    real(dest::WATER_INJECTION_VOLUME, "Water injection volume"),
    col(dest::FLOW_KIND, SqlType::Text, true, "Type of flow, e.g. 'production'"),
    col(dest::WELL_TYPE, SqlType::Text, true, "Well type, e.g. 'OP' or 'WI'"),
  ],
  primary_key:  &[dest::DATE, dest::NPD_WELLBORE_CODE],
  foreign_keys: &[WELL_FK],
  indexes:      &[
    IndexDef { name: "ix_daily_date", column: dest::DATE },
    IndexDef { name: "ix_daily_wellbore", column: dest::NPD_WELLBORE_CODE },
  ],
};

// ─── monthly_production ──────────────────────────────────────────────────────

pub static MONTHLY_PRODUCTION: TableDef = TableDef {
  table:        Table::MonthlyProduction,
  comment:      "Monthly volumes per wellbore; date is the first day of the month",
  columns:      &[
    col(dest::DATE, SqlType::Date, false, "First day of production month"),
    col(dest::NPD_WELLBORE_CODE, SqlType::Integer, false, "Reference to wells"),
    real(dest::ON_STREAM_HOURS, "Hours on stream in the month"),
    real(dest::OIL_VOLUME_SM3, "Oil volume produced (Sm3)"),
    real(dest::GAS_VOLUME_SM3, "Gas volume produced (Sm3)"),
    real(dest::WATER_VOLUME_SM3, "Water volume produced (Sm3)"),
    real(dest::GAS_INJECTION_SM3, "Gas injection volume (Sm3)"),
    real(dest::WATER_INJECTION_SM3, "Water injection volume (Sm3)"),
  ],
  primary_key:  &[dest::DATE, dest::NPD_WELLBORE_CODE],
  foreign_keys: &[WELL_FK],
  indexes:      &[
    IndexDef { name: "ix_monthly_date", column: dest::DATE },
    IndexDef { name: "ix_monthly_wellbore", column: dest::NPD_WELLBORE_CODE },
  ],
};

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn table_names_are_snake_case() {
    let names: Vec<_> = Table::iter().map(Table::name).collect();
    assert_eq!(names, ["wells", "daily_production", "monthly_production"]);
  }

  #[test]
  fn fact_tables_share_key_and_reference_wells() {
    for table in [Table::DailyProduction, Table::MonthlyProduction] {
      let def = table.def();
      assert_eq!(def.primary_key, &[dest::DATE, dest::NPD_WELLBORE_CODE]);
      assert_eq!(def.foreign_keys.len(), 1);
      assert_eq!(def.foreign_keys[0].references_table, Table::Wells);
      // Separate single-column indexes on date and well code.
      let indexed: Vec<_> = def.indexes.iter().map(|i| i.column).collect();
      assert_eq!(indexed, [dest::DATE, dest::NPD_WELLBORE_CODE]);
    }
  }

  #[test]
  fn key_columns_are_not_nullable() {
    for table in Table::iter() {
      let def = table.def();
      for key in def.primary_key {
        assert!(!def.column(key).unwrap().nullable, "{table}.{key}");
      }
    }
  }

  #[test]
  fn daily_has_ten_metrics_four_volumes_two_classifications() {
    // date + code + 10 + 4 + 2
    assert_eq!(DAILY_PRODUCTION.columns.len(), 18);
    assert_eq!(MONTHLY_PRODUCTION.columns.len(), 8);
    assert_eq!(WELLS.columns.len(), 7);
  }
}
