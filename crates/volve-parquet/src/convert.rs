//! [`ColumnarTable`] <-> Arrow record batches.

use std::sync::Arc;

use arrow::{
  array::{Array, ArrayRef, Date32Array, Float64Array, Int64Array, StringArray},
  datatypes::{DataType, Date32Type, Field, Schema, SchemaRef},
  record_batch::RecordBatch,
};
use volve_core::{
  Table,
  columnar::{ColumnData, ColumnarTable},
  schema::{ColumnDef, SqlType},
};

use crate::{Error, Result};

fn data_type(sql_type: SqlType) -> DataType {
  match sql_type {
    SqlType::Integer => DataType::Int64,
    SqlType::Real => DataType::Float64,
    SqlType::Text => DataType::Utf8,
    SqlType::Date => DataType::Date32,
  }
}

/// Arrow schema of `table`; nullability follows the table descriptor.
pub fn arrow_schema(table: Table) -> SchemaRef {
  let fields: Vec<Field> = table
    .def()
    .columns
    .iter()
    .map(|c| Field::new(c.name, data_type(c.sql_type), c.nullable))
    .collect();
  Arc::new(Schema::new(fields))
}

pub(crate) fn to_record_batch(data: &ColumnarTable) -> Result<RecordBatch> {
  let arrays: Vec<ArrayRef> = data.columns.iter().map(to_array).collect();
  Ok(RecordBatch::try_new(arrow_schema(data.table), arrays)?)
}

fn to_array(column: &ColumnData) -> ArrayRef {
  match column {
    ColumnData::Integer(v) => Arc::new(Int64Array::from(v.clone())),
    ColumnData::Real(v) => Arc::new(Float64Array::from(v.clone())),
    ColumnData::Text(v) => {
      Arc::new(v.iter().map(Option::as_deref).collect::<StringArray>())
    }
    ColumnData::Date(v) => Arc::new(
      v.iter()
        .map(|d| d.map(Date32Type::from_naive_date))
        .collect::<Date32Array>(),
    ),
  }
}

pub(crate) fn from_batches(table: Table, batches: &[RecordBatch]) -> Result<ColumnarTable> {
  let def = table.def();
  let rows = batches.iter().map(RecordBatch::num_rows).sum();
  let mut out = ColumnarTable::with_capacity(table, rows);

  for batch in batches {
    if batch.num_columns() != def.columns.len() {
      return Err(Error::ColumnCount {
        table,
        expected: def.columns.len(),
        found: batch.num_columns(),
      });
    }
    for ((data, col), array) in out.columns.iter_mut().zip(def.columns).zip(batch.columns()) {
      append(table, col, data, array)?;
    }
  }
  Ok(out)
}

fn append(
  table: Table,
  col: &ColumnDef,
  data: &mut ColumnData,
  array: &ArrayRef,
) -> Result<()> {
  let mismatch = || Error::ColumnType {
    table,
    column: col.name,
    expected: col.sql_type,
    found: array.data_type().to_string(),
  };
  let any = array.as_any();

  match data {
    ColumnData::Integer(v) => {
      v.extend(any.downcast_ref::<Int64Array>().ok_or_else(mismatch)?.iter());
    }
    ColumnData::Real(v) => {
      v.extend(any.downcast_ref::<Float64Array>().ok_or_else(mismatch)?.iter());
    }
    ColumnData::Text(v) => v.extend(
      any
        .downcast_ref::<StringArray>()
        .ok_or_else(mismatch)?
        .iter()
        .map(|s| s.map(str::to_owned)),
    ),
    ColumnData::Date(v) => v.extend(
      any
        .downcast_ref::<Date32Array>()
        .ok_or_else(mismatch)?
        .iter()
        .map(|d| d.map(Date32Type::to_naive_date)),
    ),
  }
  Ok(())
}
