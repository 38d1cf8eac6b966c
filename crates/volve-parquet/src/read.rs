use std::{fs::File, path::Path};

use arrow::error::ArrowError;
use parquet::{
  arrow::arrow_reader::ParquetRecordBatchReaderBuilder,
  file::reader::{FileReader as _, SerializedFileReader},
};
use volve_core::{Table, columnar::ColumnarTable};

use crate::{Result, convert::from_batches};

/// Row count from the file footer, without decoding any data.
pub fn parquet_row_count(path: &Path) -> Result<usize> {
  let reader = SerializedFileReader::new(File::open(path)?)?;
  Ok(reader.metadata().file_metadata().num_rows() as usize)
}

/// Read an exported file back into typed columns.
pub fn read_parquet(path: &Path, table: Table) -> Result<ColumnarTable> {
  let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(path)?)?.build()?;
  let batches = reader.collect::<Result<Vec<_>, ArrowError>>()?;
  from_batches(table, &batches)
}
