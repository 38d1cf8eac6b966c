//! Cell-to-value coercions shared by the transformers.

use chrono::{NaiveDate, NaiveDateTime};

use crate::sheet::Cell;

/// What a coercion expected to find; rendered into error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Expected {
  Number,
  Integer,
  Date,
}

impl Expected {
  pub(crate) fn as_str(self) -> &'static str {
    match self {
      Expected::Number => "a number",
      Expected::Integer => "an integer",
      Expected::Date => "a date",
    }
  }
}

/// Numeric cell, or blank. Text that is not blank is rejected.
pub(crate) fn number(cell: &Cell) -> Result<Option<f64>, Expected> {
  match cell {
    _ if cell.is_blank() => Ok(None),
    Cell::Int(i) => Ok(Some(*i as f64)),
    Cell::Float(x) if x.is_finite() => Ok(Some(*x)),
    _ => Err(Expected::Number),
  }
}

/// Like [`number`], but text is parsed. Non-finite results (`NaN`, `inf`)
/// are rejected so they never reach an aggregate.
pub(crate) fn number_from_text(cell: &Cell) -> Result<Option<f64>, Expected> {
  match cell {
    Cell::Text(s) if !s.trim().is_empty() => s
      .trim()
      .parse::<f64>()
      .ok()
      .filter(|x| x.is_finite())
      .map(Some)
      .ok_or(Expected::Number),
    other => number(other),
  }
}

/// `x` as an `i64` when it has no fractional part.
pub(crate) fn integral(x: f64) -> Option<i64> {
  if x.fract() != 0.0 || x < i64::MIN as f64 || x >= i64::MAX as f64 {
    return None;
  }
  Some(x as i64)
}

const TEXT_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%b-%y", "%d-%b-%Y"];

const TEXT_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Native date, ISO-ish text, or a spreadsheet serial day number.
pub(crate) fn date(cell: &Cell) -> Result<Option<NaiveDate>, Expected> {
  match cell {
    _ if cell.is_blank() => Ok(None),
    Cell::Date(d) => Ok(Some(*d)),
    Cell::Int(i) => excel_serial_to_date(*i as f64).map(Some).ok_or(Expected::Date),
    Cell::Float(x) => excel_serial_to_date(*x).map(Some).ok_or(Expected::Date),
    Cell::Text(s) => parse_date_text(s.trim()).map(Some).ok_or(Expected::Date),
    _ => Err(Expected::Date),
  }
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
  TEXT_DATE_FORMATS
    .iter()
    .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
    .or_else(|| {
      TEXT_DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .map(|dt| dt.date())
    })
}

/// Convert a spreadsheet serial date (1900 date system) to a calendar date.
/// The time-of-day fraction is discarded.
///
/// Serial 60 is the non-existent 1900-02-29 inherited from Lotus 1-2-3 and
/// is rejected.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
  if !serial.is_finite() || serial < 1.0 || serial >= 2_958_466.0 {
    return None;
  }
  let days = serial.trunc() as i64;
  let epoch = match days {
    60 => return None,
    d if d < 60 => NaiveDate::from_ymd_opt(1899, 12, 31)?,
    _ => NaiveDate::from_ymd_opt(1899, 12, 30)?,
  };
  epoch.checked_add_signed(chrono::Duration::days(days))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn text_numbers_parse() {
    assert_eq!(number_from_text(&Cell::Text(" 12.5 ".into())), Ok(Some(12.5)));
    assert_eq!(number_from_text(&Cell::Text("0".into())), Ok(Some(0.0)));
    assert_eq!(number_from_text(&Cell::Text("   ".into())), Ok(None));
    assert_eq!(number_from_text(&Cell::Empty), Ok(None));
  }

  #[test]
  fn garbage_and_non_finite_text_rejected() {
    for s in ["N/A", "Sm3", "NaN", "inf", "1,5"] {
      assert_eq!(
        number_from_text(&Cell::Text(s.into())),
        Err(Expected::Number),
        "{s}"
      );
    }
  }

  #[test]
  fn strict_number_rejects_text() {
    assert_eq!(number(&Cell::Text("1".into())), Err(Expected::Number));
    assert_eq!(number(&Cell::Int(3)), Ok(Some(3.0)));
    assert_eq!(number(&Cell::Error("#DIV/0!".into())), Err(Expected::Number));
  }

  #[test]
  fn integral_values() {
    assert_eq!(integral(7405.0), Some(7405));
    assert_eq!(integral(7405.5), None);
    assert_eq!(integral(f64::MAX), None);
  }

  #[test]
  fn serial_dates() {
    assert_eq!(excel_serial_to_date(1.0), Some(ymd(1900, 1, 1)));
    assert_eq!(excel_serial_to_date(59.0), Some(ymd(1900, 2, 28)));
    assert_eq!(excel_serial_to_date(60.0), None);
    assert_eq!(excel_serial_to_date(61.0), Some(ymd(1900, 3, 1)));
    // 2014-04-07, with a time-of-day fraction.
    assert_eq!(excel_serial_to_date(41736.75), Some(ymd(2014, 4, 7)));
    assert_eq!(excel_serial_to_date(0.0), None);
  }

  #[test]
  fn text_dates() {
    let want = Ok(Some(ymd(2014, 4, 7)));
    assert_eq!(date(&Cell::Text("2014-04-07".into())), want);
    assert_eq!(date(&Cell::Text("07-Apr-14".into())), want);
    assert_eq!(date(&Cell::Text("2014-04-07 00:00:00".into())), want);
    assert_eq!(date(&Cell::Text("yesterday".into())), Err(Expected::Date));
  }
}
