use std::{
  fs::{self, File},
  path::{Path, PathBuf},
};

use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use parquet::{
  arrow::ArrowWriter,
  basic::{Compression, GzipLevel, ZstdLevel},
  file::properties::WriterProperties,
};
use serde::Serialize;
use sha2::{Digest as _, Sha256};
use strum::IntoEnumIterator as _;
use tracing::{debug, info, warn};
use volve_core::{ExportCompression, Table};
use volve_store_sqlite::SqliteStore;

use crate::{Error, Result, convert::to_record_batch, read::parquet_row_count};

/// Metadata of one written Parquet file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedTable {
  pub table:       Table,
  pub rows:        usize,
  /// Bytes on disk.
  pub file_size:   u64,
  pub path:        PathBuf,
  /// Lowercase hex digest of the file contents.
  pub sha256:      String,
  pub exported_at: DateTime<Utc>,
}

impl ExportedTable {
  pub fn file_size_mb(&self) -> f64 { self.file_size as f64 / (1024.0 * 1024.0) }
}

/// `<dir>/<table>.parquet`
pub fn parquet_path(dir: &Path, table: Table) -> PathBuf {
  dir.join(format!("{}.parquet", table.name()))
}

fn codec(compression: ExportCompression) -> Compression {
  match compression {
    ExportCompression::Snappy => Compression::SNAPPY,
    ExportCompression::Gzip => Compression::GZIP(GzipLevel::default()),
    ExportCompression::Zstd => Compression::ZSTD(ZstdLevel::default()),
    ExportCompression::None => Compression::UNCOMPRESSED,
  }
}

fn write_file(path: &Path, batch: &RecordBatch, compression: ExportCompression) -> Result<()> {
  let props = WriterProperties::builder().set_compression(codec(compression)).build();
  let mut writer = ArrowWriter::try_new(File::create(path)?, batch.schema(), Some(props))?;
  writer.write(batch)?;
  writer.close()?;
  Ok(())
}

/// Export one table. The file only appears under its final name once its
/// footer row count matches the store.
pub fn export_table(
  store: &SqliteStore,
  table: Table,
  dir: &Path,
  compression: ExportCompression,
) -> Result<ExportedTable> {
  let data = store.read_table(table)?;
  let expected = store.row_count(table)?;
  let batch = to_record_batch(&data)?;

  let path = parquet_path(dir, table);
  let tmp = path.with_extension("parquet.tmp");

  let checked = write_file(&tmp, &batch, compression).and_then(|()| {
    let written = parquet_row_count(&tmp)?;
    if written == expected {
      Ok(())
    } else {
      Err(Error::RowCountMismatch {
        table,
        path: tmp.clone(),
        store: expected,
        parquet: written,
      })
    }
  });
  if let Err(e) = checked {
    if let Err(cleanup) = fs::remove_file(&tmp) {
      warn!(path = %tmp.display(), error = %cleanup, "could not remove temporary export");
    }
    return Err(e);
  }
  fs::rename(&tmp, &path)?;

  let bytes = fs::read(&path)?;
  let sha256 = hex::encode(Sha256::digest(&bytes));
  let exported = ExportedTable {
    table,
    rows: expected,
    file_size: bytes.len() as u64,
    path,
    sha256,
    exported_at: Utc::now(),
  };
  debug!(%table, sha256 = %exported.sha256, "checksummed export");
  info!(
    %table,
    rows = exported.rows,
    bytes = exported.file_size,
    path = %exported.path.display(),
    "exported table"
  );
  Ok(exported)
}

/// Export every table in load order into `dir`, creating it if needed.
pub fn export_all(
  store: &SqliteStore,
  dir: &Path,
  compression: ExportCompression,
) -> Result<Vec<ExportedTable>> {
  fs::create_dir_all(dir)?;
  Table::iter().map(|t| export_table(store, t, dir, compression)).collect()
}
