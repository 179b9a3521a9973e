//! Canonical UTC day keys
//!
//! Every grouping and bucketing in the engine keys on the UTC calendar
//! date of an instant, never on viewer-local time, so two clients in
//! different timezones compute identical groupings from identical data.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A date as it arrives in a platform payload: epoch seconds, an
/// ISO-8601 / RFC 3339 string, or a bare calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
  Epoch(i64),
  EpochFloat(f64),
  Text(String),
}

impl RawDate {
  /// Resolve to a UTC instant, or `None` if unparsable.
  pub fn to_instant(&self) -> Option<DateTime<Utc>> {
    match self {
      RawDate::Epoch(secs) => DateTime::from_timestamp(*secs, 0),
      RawDate::EpochFloat(secs) if secs.is_finite() => DateTime::from_timestamp(*secs as i64, 0),
      RawDate::EpochFloat(_) => None,
      RawDate::Text(s) => parse_instant(s),
    }
  }
}

impl From<DateTime<Utc>> for RawDate {
  fn from(instant: DateTime<Utc>) -> Self {
    RawDate::Epoch(instant.timestamp())
  }
}

/// Normalize a raw date to its UTC calendar day. Returns `None` on
/// unparsable input so the caller can skip the record instead of
/// failing the whole aggregation.
pub fn day_key(raw: &RawDate) -> Option<NaiveDate> {
  raw.to_instant().map(|instant| instant.date_naive())
}

/// Day key for an already-typed instant.
pub fn day_key_utc(instant: DateTime<Utc>) -> NaiveDate {
  instant.date_naive()
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
  let s = s.trim();

  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.with_timezone(&Utc));
  }

  // ISO datetime without an offset is taken as UTC
  for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
      return Some(naive.and_utc());
    }
  }

  if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
    return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
  }

  None
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
