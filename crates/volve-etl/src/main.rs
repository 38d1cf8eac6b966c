//! `volve`: load the Volve production workbook into SQLite and export
//! Parquet snapshots.
//!
//! # Usage
//!
//! ```
//! volve run --source "data/production/Volve production data.xlsx"
//! volve --config volve.toml summary --json
//! RUST_LOG=debug volve load
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use volve_etl::{Overrides, load_config};
use volve_store_sqlite::Summary;

#[derive(Parser)]
#[command(name = "volve", version, about = "Volve production data ETL")]
struct Cli {
  /// Path to the TOML configuration file; skipped when absent.
  #[arg(short, long, global = true, default_value = "volve.toml")]
  config: PathBuf,

  /// Source workbook (.xlsx).
  #[arg(long, global = true, value_name = "FILE")]
  source: Option<PathBuf>,

  /// SQLite database file.
  #[arg(long, global = true, value_name = "FILE")]
  database: Option<PathBuf>,

  /// Directory for Parquet files, README and schema documents.
  #[arg(long, global = true, value_name = "DIR")]
  export_dir: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Create the three tables and their indexes.
  CreateSchema,
  /// Load the workbook into an existing schema.
  Load,
  /// Check integrity of a loaded database.
  Validate,
  /// Write Parquet exports and schema documentation.
  Export,
  /// Print production totals.
  Summary {
    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
  },
  /// Create schema, load, validate and export.
  Run,
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let overrides = Overrides {
    source:     cli.source,
    database:   cli.database,
    export_dir: cli.export_dir,
  };
  let config = load_config(&cli.config, &overrides)
    .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

  match cli.command {
    Command::CreateSchema => {
      volve_etl::create_schema(&config).context("schema creation failed")?;
    }
    Command::Load => {
      volve_etl::load(&config).context("load failed")?;
    }
    Command::Validate => {
      volve_etl::validate(&config).context("validation failed")?;
    }
    Command::Export => {
      volve_etl::export(&config).context("export failed")?;
    }
    Command::Summary { json } => {
      let summary = volve_etl::summary(&config).context("summary failed")?;
      if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
      } else {
        print_summary(&summary);
      }
    }
    Command::Run => {
      volve_etl::run(&config).context("pipeline run failed")?;
    }
  }

  Ok(())
}

fn print_summary(summary: &Summary) {
  let c = &summary.counts;
  println!("wells:              {}", c.wells);
  println!("daily_production:   {}", c.daily_production);
  println!("monthly_production: {}", c.monthly_production);
  for (table, range) in &summary.date_ranges {
    println!("{table} dates: {range}");
  }

  let f = &summary.field;
  println!();
  println!("Field totals over {} days:", f.days);
  println!("  oil   {:>16.1} Sm3", f.oil);
  println!("  gas   {:>16.1} Sm3", f.gas);
  println!("  water {:>16.1} Sm3", f.water);

  println!();
  println!("Daily field totals:");
  println!("  {:<10} {:>14} {:>14} {:>14}", "date", "oil", "gas", "water");
  for d in &summary.daily {
    println!("  {} {:>14.1} {:>14.1} {:>14.1}", d.date, d.oil, d.gas, d.water);
  }

  println!();
  println!("Cumulative oil by well:");
  for w in &summary.wells {
    println!("  {:<12} {:>14.1} Sm3", w.wellbore_name, w.cumulative_oil);
  }
}
