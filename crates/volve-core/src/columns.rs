//! Column mapping table: source spreadsheet headers and the destination
//! columns they land in.
//!
//! Both sheets have a fixed column order. The header check in
//! [`Sheet::check_header`](crate::sheet::Sheet::check_header) compares against
//! [`DAILY_SHEET_COLUMNS`] and [`MONTHLY_SHEET_COLUMNS`] position by position.

use crate::schema::Table;

// ─── Source headers: daily sheet ─────────────────────────────────────────────

pub mod daily {
  pub const DATEPRD: &str = "DATEPRD";
  pub const WELL_BORE_CODE: &str = "WELL_BORE_CODE";
  pub const NPD_WELL_BORE_CODE: &str = "NPD_WELL_BORE_CODE";
  pub const NPD_WELL_BORE_NAME: &str = "NPD_WELL_BORE_NAME";
  pub const NPD_FIELD_CODE: &str = "NPD_FIELD_CODE";
  pub const NPD_FIELD_NAME: &str = "NPD_FIELD_NAME";
  pub const NPD_FACILITY_CODE: &str = "NPD_FACILITY_CODE";
  pub const NPD_FACILITY_NAME: &str = "NPD_FACILITY_NAME";
  pub const ON_STREAM_HRS: &str = "ON_STREAM_HRS";
  pub const AVG_DOWNHOLE_PRESSURE: &str = "AVG_DOWNHOLE_PRESSURE";
  pub const AVG_DOWNHOLE_TEMPERATURE: &str = "AVG_DOWNHOLE_TEMPERATURE";
  pub const AVG_DP_TUBING: &str = "AVG_DP_TUBING";
  pub const AVG_ANNULUS_PRESS: &str = "AVG_ANNULUS_PRESS";
  pub const AVG_CHOKE_SIZE_P: &str = "AVG_CHOKE_SIZE_P";
  pub const AVG_CHOKE_UOM: &str = "AVG_CHOKE_UOM";
  pub const AVG_WHP_P: &str = "AVG_WHP_P";
  pub const AVG_WHT_P: &str = "AVG_WHT_P";
  pub const DP_CHOKE_SIZE: &str = "DP_CHOKE_SIZE";
  pub const BORE_OIL_VOL: &str = "BORE_OIL_VOL";
  pub const BORE_GAS_VOL: &str = "BORE_GAS_VOL";
  pub const BORE_WAT_VOL: &str = "BORE_WAT_VOL";
  pub const BORE_WI_VOL: &str = "BORE_WI_VOL";
  pub const FLOW_KIND: &str = "FLOW_KIND";
  pub const WELL_TYPE: &str = "WELL_TYPE";
}

/// Daily sheet header, in sheet order.
pub const DAILY_SHEET_COLUMNS: [&str; 24] = [
  daily::DATEPRD,
  daily::WELL_BORE_CODE,
  daily::NPD_WELL_BORE_CODE,
  daily::NPD_WELL_BORE_NAME,
  daily::NPD_FIELD_CODE,
  daily::NPD_FIELD_NAME,
  daily::NPD_FACILITY_CODE,
  daily::NPD_FACILITY_NAME,
  daily::ON_STREAM_HRS,
  daily::AVG_DOWNHOLE_PRESSURE,
  daily::AVG_DOWNHOLE_TEMPERATURE,
  daily::AVG_DP_TUBING,
  daily::AVG_ANNULUS_PRESS,
  daily::AVG_CHOKE_SIZE_P,
  daily::AVG_CHOKE_UOM,
  daily::AVG_WHP_P,
  daily::AVG_WHT_P,
  daily::DP_CHOKE_SIZE,
  daily::BORE_OIL_VOL,
  daily::BORE_GAS_VOL,
  daily::BORE_WAT_VOL,
  daily::BORE_WI_VOL,
  daily::FLOW_KIND,
  daily::WELL_TYPE,
];

// ─── Source headers: monthly sheet ───────────────────────────────────────────

pub mod monthly {
  pub const WELLBORE_NAME: &str = "Wellbore name";
  pub const NPD_CODE: &str = "NPDCode";
  pub const YEAR: &str = "Year";
  pub const MONTH: &str = "Month";
  pub const ON_STREAM: &str = "On Stream";
  pub const OIL: &str = "Oil";
  pub const GAS: &str = "Gas";
  pub const WATER: &str = "Water";
  pub const GI: &str = "GI";
  pub const WI: &str = "WI";
}

/// Monthly sheet header, in sheet order.
pub const MONTHLY_SHEET_COLUMNS: [&str; 10] = [
  monthly::WELLBORE_NAME,
  monthly::NPD_CODE,
  monthly::YEAR,
  monthly::MONTH,
  monthly::ON_STREAM,
  monthly::OIL,
  monthly::GAS,
  monthly::WATER,
  monthly::GI,
  monthly::WI,
];

// ─── Destination columns ─────────────────────────────────────────────────────

pub mod dest {
  // shared
  pub const DATE: &str = "date";
  pub const NPD_WELLBORE_CODE: &str = "npd_wellbore_code";
  pub const ON_STREAM_HOURS: &str = "on_stream_hours";

  // wells
  pub const WELLBORE_CODE: &str = "wellbore_code";
  pub const WELLBORE_NAME: &str = "wellbore_name";
  pub const NPD_FIELD_CODE: &str = "npd_field_code";
  pub const NPD_FIELD_NAME: &str = "npd_field_name";
  pub const NPD_FACILITY_CODE: &str = "npd_facility_code";
  pub const NPD_FACILITY_NAME: &str = "npd_facility_name";

  // daily_production
  pub const AVG_DOWNHOLE_PRESSURE: &str = "avg_downhole_pressure";
  pub const AVG_DP_TUBING: &str = "avg_dp_tubing";
  pub const AVG_ANNULUS_PRESSURE: &str = "avg_annulus_pressure";
  pub const AVG_WELLHEAD_PRESSURE: &str = "avg_wellhead_pressure";
  pub const AVG_DOWNHOLE_TEMPERATURE: &str = "avg_downhole_temperature";
  pub const AVG_WELLHEAD_TEMPERATURE: &str = "avg_wellhead_temperature";
  pub const AVG_CHOKE_SIZE_PERCENT: &str = "avg_choke_size_percent";
  pub const AVG_CHOKE_UNIT: &str = "avg_choke_unit";
  pub const DP_CHOKE_SIZE: &str = "dp_choke_size";
  pub const OIL_VOLUME: &str = "oil_volume";
  pub const GAS_VOLUME: &str = "gas_volume";
  pub const WATER_VOLUME: &str = "water_volume";
  pub const WATER_INJECTION_VOLUME: &str = "water_injection_volume";
  pub const FLOW_KIND: &str = "flow_kind";
  pub const WELL_TYPE: &str = "well_type";

  // monthly_production
  pub const OIL_VOLUME_SM3: &str = "oil_volume_sm3";
  pub const GAS_VOLUME_SM3: &str = "gas_volume_sm3";
  pub const WATER_VOLUME_SM3: &str = "water_volume_sm3";
  pub const GAS_INJECTION_SM3: &str = "gas_injection_sm3";
  pub const WATER_INJECTION_SM3: &str = "water_injection_sm3";
}

// ─── Mapping ─────────────────────────────────────────────────────────────────

/// One source column feeding one destination column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
  pub source:      &'static str,
  pub destination: &'static str,
}

const fn map(source: &'static str, destination: &'static str) -> ColumnMapping {
  ColumnMapping { source, destination }
}

/// Daily sheet identification columns -> `wells`.
pub const WELL_MAPPING: [ColumnMapping; 7] = [
  map(daily::NPD_WELL_BORE_CODE, dest::NPD_WELLBORE_CODE),
  map(daily::WELL_BORE_CODE, dest::WELLBORE_CODE),
  map(daily::NPD_WELL_BORE_NAME, dest::WELLBORE_NAME),
  map(daily::NPD_FIELD_CODE, dest::NPD_FIELD_CODE),
  map(daily::NPD_FIELD_NAME, dest::NPD_FIELD_NAME),
  map(daily::NPD_FACILITY_CODE, dest::NPD_FACILITY_CODE),
  map(daily::NPD_FACILITY_NAME, dest::NPD_FACILITY_NAME),
];

/// Daily sheet -> `daily_production`.
pub const DAILY_MAPPING: [ColumnMapping; 18] = [
  map(daily::DATEPRD, dest::DATE),
  map(daily::NPD_WELL_BORE_CODE, dest::NPD_WELLBORE_CODE),
  map(daily::ON_STREAM_HRS, dest::ON_STREAM_HOURS),
  map(daily::AVG_DOWNHOLE_PRESSURE, dest::AVG_DOWNHOLE_PRESSURE),
  map(daily::AVG_DP_TUBING, dest::AVG_DP_TUBING),
  map(daily::AVG_ANNULUS_PRESS, dest::AVG_ANNULUS_PRESSURE),
  map(daily::AVG_WHP_P, dest::AVG_WELLHEAD_PRESSURE),
  map(daily::AVG_DOWNHOLE_TEMPERATURE, dest::AVG_DOWNHOLE_TEMPERATURE),
  map(daily::AVG_WHT_P, dest::AVG_WELLHEAD_TEMPERATURE),
  map(daily::AVG_CHOKE_SIZE_P, dest::AVG_CHOKE_SIZE_PERCENT),
  map(daily::AVG_CHOKE_UOM, dest::AVG_CHOKE_UNIT),
  map(daily::DP_CHOKE_SIZE, dest::DP_CHOKE_SIZE),
  map(daily::BORE_OIL_VOL, dest::OIL_VOLUME),
  map(daily::BORE_GAS_VOL, dest::GAS_VOLUME),
  map(daily::BORE_WAT_VOL, dest::WATER_VOLUME),
  map(daily::BORE_WI_VOL, dest::WATER_INJECTION_VOLUME),
  map(daily::FLOW_KIND, dest::FLOW_KIND),
  map(daily::WELL_TYPE, dest::WELL_TYPE),
];

/// Monthly sheet -> `monthly_production`. `date` is synthesized from
/// `Year` and `Month` and so has no single source column.
pub const MONTHLY_MAPPING: [ColumnMapping; 7] = [
  map(monthly::NPD_CODE, dest::NPD_WELLBORE_CODE),
  map(monthly::ON_STREAM, dest::ON_STREAM_HOURS),
  map(monthly::OIL, dest::OIL_VOLUME_SM3),
  map(monthly::GAS, dest::GAS_VOLUME_SM3),
  map(monthly::WATER, dest::WATER_VOLUME_SM3),
  map(monthly::GI, dest::GAS_INJECTION_SM3),
  map(monthly::WI, dest::WATER_INJECTION_SM3),
];

/// The mapping table for a destination table.
pub fn mapping_for(table: Table) -> &'static [ColumnMapping] {
  match table {
    Table::Wells => &WELL_MAPPING,
    Table::DailyProduction => &DAILY_MAPPING,
    Table::MonthlyProduction => &MONTHLY_MAPPING,
  }
}

/// Source column(s) a destination column is filled from, for documentation.
pub fn source_of(table: Table, destination: &str) -> Option<&'static str> {
  if table == Table::MonthlyProduction && destination == dest::DATE {
    return Some("Year + Month");
  }
  mapping_for(table)
    .iter()
    .find(|m| m.destination == destination)
    .map(|m| m.source)
}
