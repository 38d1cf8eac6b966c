//! Typed rows for the three destination tables.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schema::Table;

// ─── Values ──────────────────────────────────────────────────────────────────

/// A single destination column value. `Null` is distinct from a zero.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Null,
  Integer(i64),
  Real(f64),
  Text(String),
  Date(NaiveDate),
}

impl Value {
  pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

  pub fn kind(&self) -> &'static str {
    match self {
      Value::Null => "null",
      Value::Integer(_) => "integer",
      Value::Real(_) => "real",
      Value::Text(_) => "text",
      Value::Date(_) => "date",
    }
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Null => f.write_str("NULL"),
      Value::Integer(i) => write!(f, "{i}"),
      Value::Real(x) => write!(f, "{x}"),
      Value::Text(s) => f.write_str(s),
      Value::Date(d) => write!(f, "{d}"),
    }
  }
}

impl From<i64> for Value {
  fn from(i: i64) -> Self { Value::Integer(i) }
}

impl From<f64> for Value {
  fn from(x: f64) -> Self { Value::Real(x) }
}

impl From<String> for Value {
  fn from(s: String) -> Self { Value::Text(s) }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self { Value::Text(s.to_owned()) }
}

impl From<NaiveDate> for Value {
  fn from(d: NaiveDate) -> Self { Value::Date(d) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(v: Option<T>) -> Self { v.map_or(Value::Null, Into::into) }
}

// ─── Keys ────────────────────────────────────────────────────────────────────

/// Primary key of a destination row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowKey {
  Well { npd_wellbore_code: i64 },
  Fact { date: NaiveDate, npd_wellbore_code: i64 },
}

impl RowKey {
  pub fn npd_wellbore_code(&self) -> i64 {
    match *self {
      RowKey::Well { npd_wellbore_code } | RowKey::Fact { npd_wellbore_code, .. } => {
        npd_wellbore_code
      }
    }
  }
}

impl fmt::Display for RowKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RowKey::Well { npd_wellbore_code } => {
        write!(f, "npd_wellbore_code={npd_wellbore_code}")
      }
      RowKey::Fact { date, npd_wellbore_code } => {
        write!(f, "date={date}, npd_wellbore_code={npd_wellbore_code}")
      }
    }
  }
}

// ─── Row trait ───────────────────────────────────────────────────────────────

/// A record that can be written to its destination table.
///
/// [`values`](TableRow::values) yields one value per declared column, in
/// [`TableDef::columns`](crate::schema::TableDef::columns) order.
pub trait TableRow {
  const TABLE: Table;

  fn values(&self) -> Vec<Value>;

  fn key(&self) -> RowKey;
}

/// Number of null values per column, for data-quality logging.
pub fn null_counts<R: TableRow>(rows: &[R]) -> Vec<(&'static str, usize)> {
  let def = R::TABLE.def();
  let mut counts = vec![0usize; def.columns.len()];
  for row in rows {
    for (i, v) in row.values().iter().enumerate() {
      if v.is_null() {
        counts[i] += 1;
      }
    }
  }
  def.column_names().zip(counts).collect()
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// Dimension row: one per wellbore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Well {
  pub npd_wellbore_code: i64,
  pub wellbore_code:     String,
  pub wellbore_name:     String,
  pub npd_field_code:    i64,
  pub npd_field_name:    String,
  pub npd_facility_code: i64,
  pub npd_facility_name: String,
}

impl TableRow for Well {
  const TABLE: Table = Table::Wells;

  fn values(&self) -> Vec<Value> {
    vec![
      self.npd_wellbore_code.into(),
      self.wellbore_code.as_str().into(),
      self.wellbore_name.as_str().into(),
      self.npd_field_code.into(),
      self.npd_field_name.as_str().into(),
      self.npd_facility_code.into(),
      self.npd_facility_name.as_str().into(),
    ]
  }

  fn key(&self) -> RowKey {
    RowKey::Well { npd_wellbore_code: self.npd_wellbore_code }
  }
}

/// Fact row: one well on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProductionRecord {
  pub date:                     NaiveDate,
  pub npd_wellbore_code:        i64,
  pub on_stream_hours:          Option<f64>,
  pub avg_downhole_pressure:    Option<f64>,
  pub avg_dp_tubing:            Option<f64>,
  pub avg_annulus_pressure:     Option<f64>,
  pub avg_wellhead_pressure:    Option<f64>,
  pub avg_downhole_temperature: Option<f64>,
  pub avg_wellhead_temperature: Option<f64>,
  pub avg_choke_size_percent:   Option<f64>,
  pub avg_choke_unit:           Option<String>,
  pub dp_choke_size:            Option<f64>,
  pub oil_volume:               Option<f64>,
  pub gas_volume:               Option<f64>,
  pub water_volume:             Option<f64>,
  pub water_injection_volume:   Option<f64>,
  pub flow_kind:                Option<String>,
  pub well_type:                Option<String>,
}

impl TableRow for DailyProductionRecord {
  const TABLE: Table = Table::DailyProduction;

  fn values(&self) -> Vec<Value> {
    vec![
      self.date.into(),
      self.npd_wellbore_code.into(),
      self.on_stream_hours.into(),
      self.avg_downhole_pressure.into(),
      self.avg_dp_tubing.into(),
      self.avg_annulus_pressure.into(),
      self.avg_wellhead_pressure.into(),
      self.avg_downhole_temperature.into(),
      self.avg_wellhead_temperature.into(),
      self.avg_choke_size_percent.into(),
      self.avg_choke_unit.clone().into(),
      self.dp_choke_size.into(),
      self.oil_volume.into(),
      self.gas_volume.into(),
      self.water_volume.into(),
      self.water_injection_volume.into(),
      self.flow_kind.clone().into(),
      self.well_type.clone().into(),
    ]
  }

  fn key(&self) -> RowKey {
    RowKey::Fact { date: self.date, npd_wellbore_code: self.npd_wellbore_code }
  }
}

/// Fact row: one well in one month. `date` is the first of the month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProductionRecord {
  pub date:                NaiveDate,
  pub npd_wellbore_code:   i64,
  pub on_stream_hours:     Option<f64>,
  pub oil_volume_sm3:      Option<f64>,
  pub gas_volume_sm3:      Option<f64>,
  pub water_volume_sm3:    Option<f64>,
  pub gas_injection_sm3:   Option<f64>,
  pub water_injection_sm3: Option<f64>,
}

impl TableRow for MonthlyProductionRecord {
  const TABLE: Table = Table::MonthlyProduction;

  fn values(&self) -> Vec<Value> {
    vec![
      self.date.into(),
      self.npd_wellbore_code.into(),
      self.on_stream_hours.into(),
      self.oil_volume_sm3.into(),
      self.gas_volume_sm3.into(),
      self.water_volume_sm3.into(),
      self.gas_injection_sm3.into(),
      self.water_injection_sm3.into(),
    ]
  }

  fn key(&self) -> RowKey {
    RowKey::Fact { date: self.date, npd_wellbore_code: self.npd_wellbore_code }
  }
}

// ─── Counts ──────────────────────────────────────────────────────────────────

/// Row count per destination table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableCounts {
  pub wells:              usize,
  pub daily_production:   usize,
  pub monthly_production: usize,
}

impl TableCounts {
  pub fn get(&self, table: Table) -> usize {
    match table {
      Table::Wells => self.wells,
      Table::DailyProduction => self.daily_production,
      Table::MonthlyProduction => self.monthly_production,
    }
  }

  pub fn set(&mut self, table: Table, count: usize) {
    match table {
      Table::Wells => self.wells = count,
      Table::DailyProduction => self.daily_production = count,
      Table::MonthlyProduction => self.monthly_production = count,
    }
  }
}
