//! Sheet-to-record transformations.
//!
//! Everything here is pure: the same sheets and configuration always yield
//! the same records, and nothing touches the store. The loader runs
//! [`transform`] to completion before it writes a single row.

mod daily;
mod monthly;
mod wells;

use tracing::{debug, info};

pub use self::{
  daily::transform_daily, monthly::transform_monthly, wells::extract_wells,
};
use crate::{
  Result,
  config::PipelineConfig,
  record::{
    DailyProductionRecord, MonthlyProductionRecord, TableCounts, TableRow,
    Well, null_counts,
  },
  sheet::Sheet,
};

/// All records of one run, ready to load.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
  pub wells:   Vec<Well>,
  pub daily:   Vec<DailyProductionRecord>,
  pub monthly: Vec<MonthlyProductionRecord>,
}

impl Transformed {
  /// Row counts the loader is expected to write.
  pub fn counts(&self) -> TableCounts {
    TableCounts {
      wells:              self.wells.len(),
      daily_production:   self.daily.len(),
      monthly_production: self.monthly.len(),
    }
  }
}

/// Run the well extractor and both fact transformers.
pub fn transform(
  daily: &Sheet,
  monthly: &Sheet,
  config: &PipelineConfig,
) -> Result<Transformed> {
  let wells = extract_wells(daily, config)?;
  info!(count = wells.len(), "extracted wells");

  let daily = transform_daily(daily)?;
  info!(count = daily.len(), "transformed daily production");
  log_null_profile(&daily);

  let monthly = transform_monthly(monthly, config)?;
  info!(count = monthly.len(), "transformed monthly production");
  log_null_profile(&monthly);

  Ok(Transformed { wells, daily, monthly })
}

fn log_null_profile<R: TableRow>(rows: &[R]) {
  let table = R::TABLE;
  for (column, nulls) in null_counts(rows) {
    if nulls > 0 {
      debug!(%table, column, nulls, "null values");
    }
  }
}

#[cfg(test)]
pub(crate) mod fixtures {
  //! Small hand-built sheets shaped like the real workbook.

  use chrono::NaiveDate;

  use crate::{
    columns::{DAILY_SHEET_COLUMNS, MONTHLY_SHEET_COLUMNS},
    sheet::{Cell, Sheet},
  };

  pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  pub fn daily_sheet() -> Sheet {
    Sheet::new("Daily Production Data", DAILY_SHEET_COLUMNS)
  }

  pub fn monthly_sheet() -> Sheet {
    Sheet::new("Monthly Production Data", MONTHLY_SHEET_COLUMNS)
  }

  /// A daily row for well `code`; measurement columns other than oil are
  /// blank.
  pub fn daily_row(date: NaiveDate, code: i64, oil: Option<f64>) -> Vec<Cell> {
    let mut cells = vec![Cell::Empty; DAILY_SHEET_COLUMNS.len()];
    cells[0] = date.into();
    cells[1] = Cell::Text(format!("NO 15/9-F-{code}"));
    cells[2] = code.into();
    cells[3] = Cell::Text(format!("15/9-F-{code}"));
    cells[4] = Cell::Int(3420717);
    cells[5] = "VOLVE".into();
    cells[6] = Cell::Int(369304);
    cells[7] = "MÆRSK INSPIRER".into();
    cells[8] = Cell::Float(24.0);
    cells[14] = "%".into();
    cells[18] = oil.into();
    cells[22] = "production".into();
    cells[23] = "OP".into();
    cells
  }

  pub fn monthly_unit_row() -> Vec<Cell> {
    let mut cells = vec![Cell::Empty; MONTHLY_SHEET_COLUMNS.len()];
    for c in &mut cells[5..] {
      *c = "Sm3".into();
    }
    cells
  }

  /// A monthly row as the source sheet stores it: numbers as text.
  pub fn monthly_row(code: i64, year: i64, month: i64, oil: &str) -> Vec<Cell> {
    vec![
      Cell::Text(format!("15/9-F-{code}")),
      Cell::Text(code.to_string()),
      Cell::Text(year.to_string()),
      Cell::Text(month.to_string()),
      "720".into(),
      oil.into(),
      "1000.5".into(),
      "".into(),
      Cell::Empty,
      "0".into(),
    ]
  }
}
