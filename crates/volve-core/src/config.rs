//! Pipeline configuration.
//!
//! A [`PipelineConfig`] value is passed explicitly to every component; there
//! is no process-wide configuration state, so several runs (e.g. in tests)
//! never interfere.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What to do when one wellbore code appears with differing attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WellConflictPolicy {
  /// Fail the run, naming the code, column and both values.
  #[default]
  Reject,
  /// Keep the attributes of the first row seen; log the rest.
  FirstWins,
}

/// Parquet compression codec for exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportCompression {
  #[default]
  Snappy,
  Gzip,
  Zstd,
  None,
}

/// Runtime configuration, deserialised from `volve.toml` and `VOLVE_*`
/// environment variables. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
  pub source_path:       PathBuf,
  pub database_path:     PathBuf,
  pub export_dir:        PathBuf,
  pub daily_sheet:       String,
  pub monthly_sheet:     String,
  /// Number of leading monthly data rows holding unit labels.
  pub monthly_unit_rows: usize,
  pub well_conflicts:    WellConflictPolicy,
  pub compression:       ExportCompression,
}

impl Default for PipelineConfig {
  fn default() -> Self {
    Self {
      source_path:       PathBuf::from("data/production/Volve production data.xlsx"),
      database_path:     PathBuf::from("database/volve.db"),
      export_dir:        PathBuf::from("parquet"),
      daily_sheet:       "Daily Production Data".into(),
      monthly_sheet:     "Monthly Production Data".into(),
      monthly_unit_rows: 1,
      well_conflicts:    WellConflictPolicy::Reject,
      compression:       ExportCompression::Snappy,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_config_keeps_defaults() {
    let cfg: PipelineConfig = serde_json::from_str(
      r#"{ "monthly_unit_rows": 2, "well_conflicts": "first-wins", "compression": "zstd" }"#,
    )
    .unwrap();
    assert_eq!(cfg.monthly_unit_rows, 2);
    assert_eq!(cfg.well_conflicts, WellConflictPolicy::FirstWins);
    assert_eq!(cfg.compression, ExportCompression::Zstd);
    assert_eq!(cfg.daily_sheet, "Daily Production Data");
  }
}
