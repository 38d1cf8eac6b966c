use std::collections::{BTreeMap, btree_map::Entry};

use tracing::warn;

use crate::{
  Error, Result,
  columns::{DAILY_SHEET_COLUMNS, daily},
  config::{PipelineConfig, WellConflictPolicy},
  record::{TableRow, Well},
  sheet::{RowView, Sheet},
};

/// One [`Well`] per distinct `NPD_WELL_BORE_CODE` in the daily sheet, sorted
/// by code.
pub fn extract_wells(sheet: &Sheet, config: &PipelineConfig) -> Result<Vec<Well>> {
  sheet.check_header(&DAILY_SHEET_COLUMNS)?;

  let mut wells = BTreeMap::new();
  for row in sheet.rows.iter().filter(|r| !r.is_blank()) {
    let view = RowView::new(sheet, &DAILY_SHEET_COLUMNS, row);
    let well = read_well(&view)?;

    let first = match wells.entry(well.npd_wellbore_code) {
      Entry::Vacant(e) => {
        e.insert(well);
        continue;
      }
      Entry::Occupied(e) => e.into_mut(),
    };
    let Some((column, kept, other)) = first_difference(first, &well) else {
      continue;
    };

    match config.well_conflicts {
      WellConflictPolicy::Reject => {
        return Err(Error::InconsistentWell {
          npd_wellbore_code: well.npd_wellbore_code,
          column,
          first: kept,
          other,
          row: view.row_number(),
        });
      }
      WellConflictPolicy::FirstWins => warn!(
        npd_wellbore_code = well.npd_wellbore_code,
        column,
        kept = %kept,
        ignored = %other,
        row = view.row_number(),
        "conflicting well attributes; keeping the first"
      ),
    }
  }

  Ok(wells.into_values().collect())
}

fn read_well(r: &RowView<'_>) -> Result<Well> {
  Ok(Well {
    npd_wellbore_code: r.required_integer(daily::NPD_WELL_BORE_CODE, false)?,
    wellbore_code:     r.required_text(daily::WELL_BORE_CODE)?,
    wellbore_name:     r.required_text(daily::NPD_WELL_BORE_NAME)?,
    npd_field_code:    r.required_integer(daily::NPD_FIELD_CODE, false)?,
    npd_field_name:    r.required_text(daily::NPD_FIELD_NAME)?,
    npd_facility_code: r.required_integer(daily::NPD_FACILITY_CODE, false)?,
    npd_facility_name: r.required_text(daily::NPD_FACILITY_NAME)?,
  })
}

/// The first column in which `a` and `b` differ, with both values.
fn first_difference(a: &Well, b: &Well) -> Option<(&'static str, String, String)> {
  Well::TABLE
    .def()
    .column_names()
    .zip(a.values().into_iter().zip(b.values()))
    .find(|(_, (x, y))| x != y)
    .map(|(column, (x, y))| (column, x.to_string(), y.to_string()))
}
