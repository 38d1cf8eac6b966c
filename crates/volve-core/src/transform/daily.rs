use tracing::debug;

use crate::{
  Result,
  columns::{DAILY_SHEET_COLUMNS, daily},
  record::DailyProductionRecord,
  sheet::{RowView, Sheet},
};

/// One record per non-blank row of the daily sheet.
pub fn transform_daily(sheet: &Sheet) -> Result<Vec<DailyProductionRecord>> {
  sheet.check_header(&DAILY_SHEET_COLUMNS)?;

  let mut records = Vec::with_capacity(sheet.len());
  for row in &sheet.rows {
    if row.is_blank() {
      debug!(sheet = %sheet.name, row = row.number, "skipping blank row");
      continue;
    }
    let r = RowView::new(sheet, &DAILY_SHEET_COLUMNS, row);
    records.push(DailyProductionRecord {
      date:                     r.require(daily::DATEPRD, r.date(daily::DATEPRD)?)?,
      npd_wellbore_code:        r.required_integer(daily::NPD_WELL_BORE_CODE, false)?,
      on_stream_hours:          r.number(daily::ON_STREAM_HRS)?,
      avg_downhole_pressure:    r.number(daily::AVG_DOWNHOLE_PRESSURE)?,
      avg_dp_tubing:            r.number(daily::AVG_DP_TUBING)?,
      avg_annulus_pressure:     r.number(daily::AVG_ANNULUS_PRESS)?,
      avg_wellhead_pressure:    r.number(daily::AVG_WHP_P)?,
      avg_downhole_temperature: r.number(daily::AVG_DOWNHOLE_TEMPERATURE)?,
      avg_wellhead_temperature: r.number(daily::AVG_WHT_P)?,
      avg_choke_size_percent:   r.number(daily::AVG_CHOKE_SIZE_P)?,
      avg_choke_unit:           r.text(daily::AVG_CHOKE_UOM),
      dp_choke_size:            r.number(daily::DP_CHOKE_SIZE)?,
      oil_volume:               r.number(daily::BORE_OIL_VOL)?,
      gas_volume:               r.number(daily::BORE_GAS_VOL)?,
      water_volume:             r.number(daily::BORE_WAT_VOL)?,
      water_injection_volume:   r.number(daily::BORE_WI_VOL)?,
      flow_kind:                r.text(daily::FLOW_KIND),
      well_type:                r.text(daily::WELL_TYPE),
    });
  }
  Ok(records)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{Error, sheet::Cell, transform::fixtures::*};

  #[test]
  fn zero_and_blank_stay_distinct() {
    let mut sheet = daily_sheet();
    sheet.push_row(daily_row(ymd(2014, 4, 1), 7405, Some(0.0)));
    sheet.push_row(daily_row(ymd(2014, 4, 2), 7405, None));
    let mut row = daily_row(ymd(2014, 4, 3), 7405, None);
    row[18] = "   ".into();
    sheet.push_row(row);

    let records = transform_daily(&sheet).unwrap();
    assert_eq!(records[0].oil_volume, Some(0.0));
    assert_eq!(records[1].oil_volume, None);
    assert_eq!(records[2].oil_volume, None);
    assert_eq!(records[0].avg_choke_unit.as_deref(), Some("%"));
    assert_eq!(records[0].on_stream_hours, Some(24.0));
  }

  #[test]
  fn serial_and_text_dates_accepted() {
    let mut sheet = daily_sheet();
    let mut row = daily_row(ymd(2000, 1, 1), 7405, None);
    row[0] = Cell::Float(41736.0);
    sheet.push_row(row);
    let mut row = daily_row(ymd(2000, 1, 1), 7405, None);
    row[0] = "2014-04-08".into();
    sheet.push_row(row);

    let records = transform_daily(&sheet).unwrap();
    assert_eq!(records[0].date, ymd(2014, 4, 7));
    assert_eq!(records[1].date, ymd(2014, 4, 8));
  }

  #[test]
  fn text_in_numeric_column_is_rejected() {
    let mut sheet = daily_sheet();
    sheet.push_row(daily_row(ymd(2014, 4, 1), 7405, None));
    let mut row = daily_row(ymd(2014, 4, 2), 7405, None);
    row[19] = "N/A".into();
    sheet.push_row(row);

    let err = transform_daily(&sheet).unwrap_err();
    assert!(matches!(
      err,
      Error::Coercion { row: 3, column: "BORE_GAS_VOL", ref value, .. } if value == "N/A"
    ));
  }

  #[test]
  fn fractional_wellbore_code_is_rejected() {
    let mut sheet = daily_sheet();
    let mut row = daily_row(ymd(2014, 4, 1), 7405, None);
    row[2] = Cell::Float(7405.5);
    sheet.push_row(row);

    let err = transform_daily(&sheet).unwrap_err();
    assert!(matches!(
      err,
      Error::Coercion { column: "NPD_WELL_BORE_CODE", expected: "an integer", .. }
    ));
  }

  #[test]
  fn blank_rows_are_skipped() {
    let mut sheet = daily_sheet();
    sheet.push_row(daily_row(ymd(2014, 4, 1), 7405, None));
    sheet.push_row(vec![Cell::Empty; 24]);
    assert_eq!(transform_daily(&sheet).unwrap().len(), 1);
  }

  #[test]
  fn renamed_header_is_structural() {
    let mut header = crate::columns::DAILY_SHEET_COLUMNS.map(String::from);
    header[18] = "OIL".into();
    let sheet = Sheet::new("Daily Production Data", header);

    let err = transform_daily(&sheet).unwrap_err();
    assert!(matches!(
      err,
      Error::UnexpectedHeader { position: 19, expected: "BORE_OIL_VOL", .. }
    ));
  }
}
