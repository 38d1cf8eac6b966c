use chrono::NaiveDate;
use tracing::debug;

use crate::{
  Error, Result,
  columns::{MONTHLY_SHEET_COLUMNS, monthly},
  config::PipelineConfig,
  record::MonthlyProductionRecord,
  sheet::{RowView, Sheet},
};

/// One record per measurement row of the monthly sheet.
///
/// The first `config.monthly_unit_rows` data rows hold unit labels and are
/// dropped without being coerced. Every other cell is parsed as a number,
/// since the sheet stores its values as text.
pub fn transform_monthly(
  sheet: &Sheet,
  config: &PipelineConfig,
) -> Result<Vec<MonthlyProductionRecord>> {
  sheet.check_header(&MONTHLY_SHEET_COLUMNS)?;

  let unit_rows = config.monthly_unit_rows.min(sheet.len());
  let (units, data) = sheet.rows.split_at(unit_rows);

  for row in units {
    let r = RowView::new(sheet, &MONTHLY_SHEET_COLUMNS, row);
    if holds_measurements(&r) {
      return Err(Error::UnitRowMismatch {
        sheet: sheet.name.clone(),
        row:   row.number,
      });
    }
    debug!(sheet = %sheet.name, row = row.number, "dropping unit row");
  }

  let mut records = Vec::with_capacity(data.len());
  for row in data {
    if row.is_blank() {
      debug!(sheet = %sheet.name, row = row.number, "skipping blank row");
      continue;
    }
    let r = RowView::new(sheet, &MONTHLY_SHEET_COLUMNS, row);
    records.push(read_record(&r)?);
  }
  Ok(records)
}

/// A unit row has no well code or period; a row with all three is data.
/// Only blankness is checked, the cells are never coerced.
fn holds_measurements(r: &RowView<'_>) -> bool {
  [monthly::NPD_CODE, monthly::YEAR, monthly::MONTH]
    .into_iter()
    .all(|column| !r.cell(column).is_blank())
}

fn read_record(r: &RowView<'_>) -> Result<MonthlyProductionRecord> {
  // Coerce every numeric column before checking which ones are required,
  // so a stray label is reported as the value it is.
  let npd_code = r.integer(monthly::NPD_CODE, true)?;
  let year = r.integer(monthly::YEAR, true)?;
  let month = r.integer(monthly::MONTH, true)?;
  let on_stream_hours = r.parse_number(monthly::ON_STREAM)?;
  let oil_volume_sm3 = r.parse_number(monthly::OIL)?;
  let gas_volume_sm3 = r.parse_number(monthly::GAS)?;
  let water_volume_sm3 = r.parse_number(monthly::WATER)?;
  let gas_injection_sm3 = r.parse_number(monthly::GI)?;
  let water_injection_sm3 = r.parse_number(monthly::WI)?;

  let npd_wellbore_code = r.require(monthly::NPD_CODE, npd_code)?;
  let year = r.require(monthly::YEAR, year)?;
  let month = r.require(monthly::MONTH, month)?;

  Ok(MonthlyProductionRecord {
    date: first_of_month(r, year, month)?,
    npd_wellbore_code,
    on_stream_hours,
    oil_volume_sm3,
    gas_volume_sm3,
    water_volume_sm3,
    gas_injection_sm3,
    water_injection_sm3,
  })
}

fn first_of_month(r: &RowView<'_>, year: i64, month: i64) -> Result<NaiveDate> {
  i32::try_from(year)
    .ok()
    .zip(u32::try_from(month).ok())
    .and_then(|(y, m)| NaiveDate::from_ymd_opt(y, m, 1))
    .ok_or_else(|| Error::InvalidMonth {
      sheet: r.sheet().to_owned(),
      row: r.row_number(),
      year,
      month,
    })
}
