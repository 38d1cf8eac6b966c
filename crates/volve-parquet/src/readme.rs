//! `README.md` for the export directory.
//!
//! The metadata table lives between two HTML comment markers. An existing
//! README keeps everything outside the markers; one without markers, or no
//! README at all, gets the default document.

use std::{
  fmt::Write as _,
  fs, io,
  path::{Path, PathBuf},
};

use tracing::info;

use crate::{ExportedTable, Result};

pub const README_FILE: &str = "README.md";

const START_MARKER: &str = "<!-- START_METADATA_TABLE -->";
const END_MARKER: &str = "<!-- END_METADATA_TABLE -->";

fn thousands(n: usize) -> String {
  let digits = n.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(c);
  }
  out
}

pub fn render_metadata_table(exports: &[ExportedTable]) -> String {
  let mut md = String::from(
    "| Table Name | Rows | File Size (MB) | SHA-256 | Last Updated |\n\
     |------------|------|----------------|---------|--------------|\n",
  );
  for e in exports {
    let _ = writeln!(
      md,
      "| {} | {} | {:.4} | `{}` | {} |",
      e.table,
      thousands(e.rows),
      e.file_size_mb(),
      e.sha256,
      e.exported_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );
  }
  md
}

fn default_readme(table: &str) -> String {
  format!(
    "# Volve Parquet Exports\n\n\
     Parquet snapshots of the Volve production database, one file per table.\n\
     Column types and keys are described in `schema.md` and `schema.json`.\n\n\
     ## Files\n\n\
     {START_MARKER}\n{table}{END_MARKER}\n"
  )
}

fn splice(existing: &str, table: &str) -> Option<String> {
  let (head, rest) = existing.split_once(START_MARKER)?;
  let (_, tail) = rest.split_once(END_MARKER)?;
  Some(format!("{head}{START_MARKER}\n{table}{END_MARKER}{tail}"))
}

/// Write or refresh `<dir>/README.md`.
pub fn write_readme(dir: &Path, exports: &[ExportedTable]) -> Result<PathBuf> {
  let path = dir.join(README_FILE);
  let table = render_metadata_table(exports);

  let contents = match fs::read_to_string(&path) {
    Ok(existing) => splice(&existing, &table).unwrap_or_else(|| default_readme(&table)),
    Err(e) if e.kind() == io::ErrorKind::NotFound => default_readme(&table),
    Err(e) => return Err(e.into()),
  };
  fs::write(&path, contents)?;
  info!(path = %path.display(), tables = exports.len(), "updated export README");
  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn thousands_separators() {
    assert_eq!(thousands(0), "0");
    assert_eq!(thousands(999), "999");
    assert_eq!(thousands(1000), "1,000");
    assert_eq!(thousands(15634), "15,634");
    assert_eq!(thousands(1234567), "1,234,567");
  }

  #[test]
  fn splice_keeps_surrounding_text() {
    let existing = format!("intro\n{START_MARKER}\nold\n{END_MARKER}\noutro\n");
    let out = splice(&existing, "new\n").unwrap();
    assert_eq!(out, format!("intro\n{START_MARKER}\nnew\n{END_MARKER}\noutro\n"));
  }

  #[test]
  fn splice_needs_both_markers() {
    assert!(splice(&format!("{START_MARKER} only"), "x").is_none());
    assert!(splice("no markers", "x").is_none());
  }
}
