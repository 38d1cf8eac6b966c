//! Conversions between [`volve_core::Value`] and SQLite storage values.
//!
//! Dates are stored as `YYYY-MM-DD` text so they sort lexically and read
//! naturally in any SQLite client. Everything else maps onto the matching
//! storage class.

use chrono::NaiveDate;
use rusqlite::types::{Value as SqlValue, ValueRef};
use volve_core::{Value, schema::SqlType};

use crate::{Error, Result};

// ─── Dates ───────────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::Decode(format!("date {s:?}: {e}")))
}

// ─── Values ──────────────────────────────────────────────────────────────────

pub fn encode_value(v: Value) -> SqlValue {
  match v {
    Value::Null => SqlValue::Null,
    Value::Integer(i) => SqlValue::Integer(i),
    Value::Real(x) => SqlValue::Real(x),
    Value::Text(s) => SqlValue::Text(s),
    Value::Date(d) => SqlValue::Text(encode_date(d)),
  }
}

/// Decode one stored value of a column declared as `sql_type`.
pub fn decode_value(v: ValueRef<'_>, sql_type: SqlType) -> Result<Value> {
  match (v, sql_type) {
    (ValueRef::Null, _) => Ok(Value::Null),
    (ValueRef::Integer(i), _) => Ok(Value::Integer(i)),
    (ValueRef::Real(x), _) => Ok(Value::Real(x)),
    (ValueRef::Text(t), SqlType::Date) => decode_date(text(t)?).map(Value::Date),
    (ValueRef::Text(t), _) => Ok(Value::Text(text(t)?.to_owned())),
    (ValueRef::Blob(_), _) => Err(Error::Decode("unexpected blob".into())),
  }
}

fn text(bytes: &[u8]) -> Result<&str> {
  std::str::from_utf8(bytes).map_err(|e| Error::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dates_are_iso_text() {
    let d = NaiveDate::from_ymd_opt(2014, 4, 1).unwrap();
    assert_eq!(encode_value(Value::Date(d)), SqlValue::Text("2014-04-01".into()));
    assert_eq!(
      decode_value(ValueRef::Text(b"2014-04-01"), SqlType::Date).unwrap(),
      Value::Date(d)
    );
    assert!(decode_value(ValueRef::Text(b"01/04/2014"), SqlType::Date).is_err());
  }

  #[test]
  fn null_is_not_zero() {
    assert_eq!(encode_value(Value::Null), SqlValue::Null);
    assert_eq!(encode_value(Value::Real(0.0)), SqlValue::Real(0.0));
    assert_eq!(decode_value(ValueRef::Null, SqlType::Real).unwrap(), Value::Null);
  }
}
