//! Read-only production summaries over a loaded store.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use strum::IntoEnumIterator as _;
use volve_core::{Table, TableCounts};

use crate::{Result, SqliteStore, encode::decode_date, validate::DateRange};

/// Field-wide cumulative volumes over the days on which oil, gas and water
/// were all reported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldTotals {
  pub oil:   f64,
  pub gas:   f64,
  pub water: f64,
  pub days:  usize,
}

/// Field-wide volumes for one production day, under the same filter as
/// [`FieldTotals`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyTotals {
  pub date:  NaiveDate,
  pub oil:   f64,
  pub gas:   f64,
  pub water: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellOil {
  pub wellbore_name:  String,
  pub cumulative_oil: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
  pub counts:      TableCounts,
  pub date_ranges: BTreeMap<Table, DateRange>,
  pub field:       FieldTotals,
  /// Oldest day first.
  pub daily:       Vec<DailyTotals>,
  /// Highest producer first.
  pub wells:       Vec<WellOil>,
}

impl SqliteStore {
  pub fn summary(&self) -> Result<Summary> {
    self.require_schema()?;

    let mut date_ranges = BTreeMap::new();
    for table in Table::iter().filter(|t| t.is_fact()) {
      if let Some(range) = self.date_range(table)? {
        date_ranges.insert(table, range);
      }
    }

    Ok(Summary {
      counts: self.row_counts()?,
      date_ranges,
      field: self.field_totals()?,
      daily: self.daily_field_totals()?,
      wells: self.oil_by_well()?,
    })
  }

  pub fn field_totals(&self) -> Result<FieldTotals> {
    let (oil, gas, water, days): (Option<f64>, Option<f64>, Option<f64>, i64) =
      self.conn().query_row(
        "SELECT SUM(oil_volume), SUM(gas_volume), SUM(water_volume),
                COUNT(DISTINCT date)
         FROM daily_production
         WHERE oil_volume IS NOT NULL
           AND gas_volume IS NOT NULL
           AND water_volume IS NOT NULL",
        [],
        |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
      )?;
    Ok(FieldTotals {
      oil:   oil.unwrap_or(0.0),
      gas:   gas.unwrap_or(0.0),
      water: water.unwrap_or(0.0),
      days:  days as usize,
    })
  }

  /// Per-day field totals, ordered by date.
  pub fn daily_field_totals(&self) -> Result<Vec<DailyTotals>> {
    let mut stmt = self.conn().prepare(
      "SELECT date, SUM(oil_volume), SUM(gas_volume), SUM(water_volume)
       FROM daily_production
       WHERE oil_volume IS NOT NULL
         AND gas_volume IS NOT NULL
         AND water_volume IS NOT NULL
       GROUP BY date
       ORDER BY date",
    )?;
    let rows = stmt
      .query_map([], |r| {
        Ok((
          r.get::<_, String>(0)?,
          r.get::<_, f64>(1)?,
          r.get::<_, f64>(2)?,
          r.get::<_, f64>(3)?,
        ))
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    rows
      .into_iter()
      .map(|(date, oil, gas, water)| {
        Ok(DailyTotals { date: decode_date(&date)?, oil, gas, water })
      })
      .collect()
  }

  /// Cumulative daily oil per wellbore name, descending.
  pub fn oil_by_well(&self) -> Result<Vec<WellOil>> {
    let mut stmt = self.conn().prepare(
      "SELECT w.wellbore_name, SUM(dp.oil_volume) AS cumulative_oil
       FROM daily_production dp
       JOIN wells w ON dp.npd_wellbore_code = w.npd_wellbore_code
       WHERE dp.oil_volume IS NOT NULL
       GROUP BY w.wellbore_name
       ORDER BY cumulative_oil DESC, w.wellbore_name",
    )?;
    let wells = stmt
      .query_map([], |r| {
        Ok(WellOil { wellbore_name: r.get(0)?, cumulative_oil: r.get(1)? })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(wells)
  }
}
