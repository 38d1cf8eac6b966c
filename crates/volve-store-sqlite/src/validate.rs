//! Post-load integrity checks.
//!
//! The constraints already stop bad rows at insert time; these queries
//! re-check the committed state so a database produced by any other route
//! (or an older schema) is judged by the same rules.

use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;
use serde::Serialize;
use strum::IntoEnumIterator as _;
use tracing::{info, warn};
use volve_core::{Table, TableCounts};

use crate::{Error, Result, SqliteStore, encode::decode_date};

/// First and last date present in a fact table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
  pub first: NaiveDate,
  pub last:  NaiveDate,
}

impl fmt::Display for DateRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} .. {}", self.first, self.last)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
  /// Fact rows whose well code has no `wells` row.
  OrphanWell {
    table:             Table,
    npd_wellbore_code: i64,
    rows:              usize,
  },
  DuplicateKey {
    table:             Table,
    date:              NaiveDate,
    npd_wellbore_code: i64,
    count:             usize,
  },
  RowCountMismatch {
    table:    Table,
    expected: usize,
    actual:   usize,
  },
  /// Reported instead of a count mismatch when no expected counts are
  /// known.
  EmptyTable { table: Table },
}

impl fmt::Display for Violation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Violation::OrphanWell { table, npd_wellbore_code, rows } => write!(
        f,
        "{table}: {rows} row(s) reference unknown well {npd_wellbore_code}"
      ),
      Violation::DuplicateKey { table, date, npd_wellbore_code, count } => write!(
        f,
        "{table}: key (date={date}, npd_wellbore_code={npd_wellbore_code}) \
         appears {count} times"
      ),
      Violation::RowCountMismatch { table, expected, actual } => {
        write!(f, "{table}: expected {expected} rows, found {actual}")
      }
      Violation::EmptyTable { table } => write!(f, "{table}: table is empty"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
  pub counts:      TableCounts,
  pub date_ranges: BTreeMap<Table, DateRange>,
  pub violations:  Vec<Violation>,
}

impl ValidationReport {
  pub fn is_clean(&self) -> bool { self.violations.is_empty() }

  /// The report itself, or [`Error::Integrity`] listing every violation.
  pub fn ensure_clean(self) -> Result<Self> {
    if self.is_clean() {
      Ok(self)
    } else {
      Err(Error::Integrity(self.violations))
    }
  }
}

impl SqliteStore {
  /// Check referential integrity, key uniqueness and row counts.
  ///
  /// With `expected` counts (from the transformers of the same run) every
  /// table must hold exactly that many rows. Without them, an empty table
  /// is a violation.
  pub fn validate(&self, expected: Option<&TableCounts>) -> Result<ValidationReport> {
    self.require_schema()?;

    let counts = self.row_counts()?;
    let mut violations = Vec::new();
    let mut date_ranges = BTreeMap::new();

    for table in Table::iter().filter(|t| t.is_fact()) {
      violations.extend(self.orphan_wells(table)?);
      violations.extend(self.duplicate_keys(table)?);
      if let Some(range) = self.date_range(table)? {
        info!(%table, %range, "date range");
        date_ranges.insert(table, range);
      }
    }

    for table in Table::iter() {
      let actual = counts.get(table);
      match expected {
        Some(expected) if expected.get(table) != actual => {
          violations.push(Violation::RowCountMismatch {
            table,
            expected: expected.get(table),
            actual,
          });
        }
        None if actual == 0 => violations.push(Violation::EmptyTable { table }),
        _ => {}
      }
    }

    for v in &violations {
      warn!(violation = %v, "integrity violation");
    }
    if violations.is_empty() {
      info!(
        wells = counts.wells,
        daily_production = counts.daily_production,
        monthly_production = counts.monthly_production,
        "validation passed"
      );
    }

    Ok(ValidationReport { counts, date_ranges, violations })
  }

  pub fn date_range(&self, table: Table) -> Result<Option<DateRange>> {
    let (first, last): (Option<String>, Option<String>) = self.conn().query_row(
      &format!("SELECT MIN(date), MAX(date) FROM {}", table.name()),
      [],
      |r| Ok((r.get(0)?, r.get(1)?)),
    )?;
    match (first, last) {
      (Some(first), Some(last)) => Ok(Some(DateRange {
        first: decode_date(&first)?,
        last:  decode_date(&last)?,
      })),
      _ => Ok(None),
    }
  }

  fn orphan_wells(&self, table: Table) -> Result<Vec<Violation>> {
    let sql = format!(
      "SELECT f.npd_wellbore_code, COUNT(*)
       FROM {} f
       LEFT JOIN wells w ON f.npd_wellbore_code = w.npd_wellbore_code
       WHERE w.npd_wellbore_code IS NULL
       GROUP BY f.npd_wellbore_code
       ORDER BY f.npd_wellbore_code",
      table.name()
    );
    let mut stmt = self.conn().prepare(&sql)?;
    let rows = stmt
      .query_map([], |r| Ok((r.get::<_, i64>(0)?, r.get::<_, i64>(1)?)))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(
      rows
        .into_iter()
        .map(|(npd_wellbore_code, rows)| Violation::OrphanWell {
          table,
          npd_wellbore_code,
          rows: rows as usize,
        })
        .collect(),
    )
  }

  fn duplicate_keys(&self, table: Table) -> Result<Vec<Violation>> {
    let sql = format!(
      "SELECT date, npd_wellbore_code, COUNT(*)
       FROM {}
       GROUP BY date, npd_wellbore_code
       HAVING COUNT(*) > 1
       ORDER BY date, npd_wellbore_code",
      table.name()
    );
    let mut stmt = self.conn().prepare(&sql)?;
    let rows = stmt
      .query_map([], |r| {
        Ok((r.get::<_, String>(0)?, r.get::<_, i64>(1)?, r.get::<_, i64>(2)?))
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    rows
      .into_iter()
      .map(|(date, npd_wellbore_code, count)| {
        Ok(Violation::DuplicateKey {
          table,
          date: decode_date(&date)?,
          npd_wellbore_code,
          count: count as usize,
        })
      })
      .collect()
  }
}
