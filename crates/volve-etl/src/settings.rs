//! Layered configuration: defaults, then an optional TOML file, then
//! `VOLVE_*` environment variables, then command-line overrides.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use volve_core::PipelineConfig;

use crate::Result;

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub source:     Option<PathBuf>,
  pub database:   Option<PathBuf>,
  pub export_dir: Option<PathBuf>,
}

fn path_value(path: &Option<PathBuf>) -> Option<String> {
  path.as_ref().map(|p| p.to_string_lossy().into_owned())
}

/// Build the run configuration. A missing `file` is not an error.
pub fn load_config(file: &Path, overrides: &Overrides) -> Result<PipelineConfig> {
  let settings = Config::builder()
    .add_source(File::from(file).required(false))
    .add_source(Environment::with_prefix("VOLVE").try_parsing(true))
    .set_override_option("source_path", path_value(&overrides.source))?
    .set_override_option("database_path", path_value(&overrides.database))?
    .set_override_option("export_dir", path_value(&overrides.export_dir))?
    .build()?;
  Ok(settings.try_deserialize()?)
}
