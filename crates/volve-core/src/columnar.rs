//! Column-oriented table snapshots.
//!
//! A [`ColumnarTable`] is what the store hands to the Parquet writer and
//! what the Parquet reader hands back: one typed, nullable vector per
//! declared column.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::{
  Error, Result,
  columns::dest,
  record::{RowKey, Value},
  schema::{SqlType, Table},
};

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
  Integer(Vec<Option<i64>>),
  Real(Vec<Option<f64>>),
  Text(Vec<Option<String>>),
  Date(Vec<Option<NaiveDate>>),
}

impl ColumnData {
  pub fn with_capacity(sql_type: SqlType, capacity: usize) -> Self {
    match sql_type {
      SqlType::Integer => ColumnData::Integer(Vec::with_capacity(capacity)),
      SqlType::Real => ColumnData::Real(Vec::with_capacity(capacity)),
      SqlType::Text => ColumnData::Text(Vec::with_capacity(capacity)),
      SqlType::Date => ColumnData::Date(Vec::with_capacity(capacity)),
    }
  }

  pub fn sql_type(&self) -> SqlType {
    match self {
      ColumnData::Integer(_) => SqlType::Integer,
      ColumnData::Real(_) => SqlType::Real,
      ColumnData::Text(_) => SqlType::Text,
      ColumnData::Date(_) => SqlType::Date,
    }
  }

  pub fn len(&self) -> usize {
    match self {
      ColumnData::Integer(v) => v.len(),
      ColumnData::Real(v) => v.len(),
      ColumnData::Text(v) => v.len(),
      ColumnData::Date(v) => v.len(),
    }
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  pub fn null_count(&self) -> usize {
    match self {
      ColumnData::Integer(v) => v.iter().filter(|x| x.is_none()).count(),
      ColumnData::Real(v) => v.iter().filter(|x| x.is_none()).count(),
      ColumnData::Text(v) => v.iter().filter(|x| x.is_none()).count(),
      ColumnData::Date(v) => v.iter().filter(|x| x.is_none()).count(),
    }
  }

  /// Append `value`; returns it back when its type does not fit.
  fn push(&mut self, value: Value) -> std::result::Result<(), Value> {
    match (self, value) {
      (ColumnData::Integer(v), Value::Null) => v.push(None),
      (ColumnData::Real(v), Value::Null) => v.push(None),
      (ColumnData::Text(v), Value::Null) => v.push(None),
      (ColumnData::Date(v), Value::Null) => v.push(None),
      (ColumnData::Integer(v), Value::Integer(i)) => v.push(Some(i)),
      (ColumnData::Real(v), Value::Real(x)) => v.push(Some(x)),
      // SQLite hands back whole REAL values as integers.
      (ColumnData::Real(v), Value::Integer(i)) => v.push(Some(i as f64)),
      (ColumnData::Text(v), Value::Text(s)) => v.push(Some(s)),
      (ColumnData::Date(v), Value::Date(d)) => v.push(Some(d)),
      (_, other) => return Err(other),
    }
    Ok(())
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnarTable {
  pub table:   Table,
  pub columns: Vec<ColumnData>,
}

impl ColumnarTable {
  /// An empty table with one column per declared column of `table`.
  pub fn new(table: Table) -> Self {
    Self::with_capacity(table, 0)
  }

  pub fn with_capacity(table: Table, rows: usize) -> Self {
    let columns = table
      .def()
      .columns
      .iter()
      .map(|c| ColumnData::with_capacity(c.sql_type, rows))
      .collect();
    Self { table, columns }
  }

  pub fn num_rows(&self) -> usize {
    self.columns.first().map_or(0, ColumnData::len)
  }

  pub fn column(&self, name: &str) -> Option<&ColumnData> {
    self
      .table
      .def()
      .column_index(name)
      .and_then(|i| self.columns.get(i))
  }

  /// Append one row of values in declared column order.
  pub fn push_row(&mut self, values: Vec<Value>) -> Result<()> {
    let def = self.table.def();
    if values.len() != def.columns.len() {
      return Err(Error::ColumnCount {
        table:    self.table,
        expected: def.columns.len(),
        found:    values.len(),
      });
    }
    for ((data, col), value) in self.columns.iter_mut().zip(def.columns).zip(values) {
      data.push(value).map_err(|v| Error::ColumnType {
        table:    def.table,
        column:   col.name,
        expected: col.sql_type,
        found:    v.kind().to_owned(),
      })?;
    }
    Ok(())
  }

  /// The set of primary keys. Fails if a key column holds a null.
  pub fn keys(&self) -> Result<BTreeSet<RowKey>> {
    let codes = self.integer_key(dest::NPD_WELLBORE_CODE)?;
    if !self.table.is_fact() {
      return Ok(
        codes
          .into_iter()
          .map(|npd_wellbore_code| RowKey::Well { npd_wellbore_code })
          .collect(),
      );
    }

    let dates = match self.column(dest::DATE) {
      Some(ColumnData::Date(v)) => v,
      _ => return Err(self.key_type_error(dest::DATE, SqlType::Date)),
    };
    dates
      .iter()
      .zip(codes)
      .enumerate()
      .map(|(index, (date, npd_wellbore_code))| {
        let date = date.ok_or(Error::NullKey {
          table: self.table,
          column: dest::DATE,
          index,
        })?;
        Ok(RowKey::Fact { date, npd_wellbore_code })
      })
      .collect()
  }

  fn integer_key(&self, column: &'static str) -> Result<Vec<i64>> {
    match self.column(column) {
      Some(ColumnData::Integer(v)) => v
        .iter()
        .enumerate()
        .map(|(index, x)| {
          x.ok_or(Error::NullKey { table: self.table, column, index })
        })
        .collect(),
      _ => Err(self.key_type_error(column, SqlType::Integer)),
    }
  }

  fn key_type_error(&self, column: &'static str, expected: SqlType) -> Error {
    Error::ColumnType {
      table: self.table,
      column,
      expected,
      found: self
        .column(column)
        .map_or_else(|| "no column".to_owned(), |c| format!("{:?}", c.sql_type())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::record::{MonthlyProductionRecord, TableRow};

  fn record(month: u32, code: i64, oil: Option<f64>) -> MonthlyProductionRecord {
    MonthlyProductionRecord {
      date:                NaiveDate::from_ymd_opt(2014, month, 1).unwrap(),
      npd_wellbore_code:   code,
      on_stream_hours:     None,
      oil_volume_sm3:      oil,
      gas_volume_sm3:      None,
      water_volume_sm3:    None,
      gas_injection_sm3:   None,
      water_injection_sm3: None,
    }
  }

  #[test]
  fn rows_become_columns() {
    let mut t = ColumnarTable::new(Table::MonthlyProduction);
    t.push_row(record(1, 5, Some(0.0)).values()).unwrap();
    t.push_row(record(2, 5, None).values()).unwrap();

    assert_eq!(t.num_rows(), 2);
    assert_eq!(
      t.column("oil_volume_sm3"),
      Some(&ColumnData::Real(vec![Some(0.0), None]))
    );
    assert_eq!(t.column("gas_volume_sm3").unwrap().null_count(), 2);
  }

  #[test]
  fn keys_of_fact_table() {
    let mut t = ColumnarTable::new(Table::MonthlyProduction);
    t.push_row(record(1, 5, None).values()).unwrap();
    t.push_row(record(1, 6, None).values()).unwrap();
    let keys = t.keys().unwrap();
    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&RowKey::Fact {
      date:              NaiveDate::from_ymd_opt(2014, 1, 1).unwrap(),
      npd_wellbore_code: 6,
    }));
  }

  #[test]
  fn wrong_value_type_is_rejected() {
    let mut t = ColumnarTable::new(Table::MonthlyProduction);
    let mut values = record(1, 5, None).values();
    values[1] = Value::Text("5".into());
    let err = t.push_row(values).unwrap_err();
    assert!(matches!(err, Error::ColumnType { column: "npd_wellbore_code", .. }));
  }

  #[test]
  fn wrong_arity_is_rejected() {
    let mut t = ColumnarTable::new(Table::Wells);
    let err = t.push_row(vec![Value::Integer(1)]).unwrap_err();
    assert!(matches!(err, Error::ColumnCount { expected: 7, found: 1, .. }));
  }
}
