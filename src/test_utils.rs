//! Test utilities and helpers
//!
//! Mock data factories shared by the unit tests.

use crate::datekey::RawDate;
use crate::models::{
  ActivityRecord, ContestRecord, ContestRef, Platform, RatingHistoryEntry,
};

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Create a mock activity record for testing
pub fn mock_activity(
  platform: Platform,
  date: &str,
  problems_solved: i64,
  submissions: i64,
) -> ActivityRecord {
  ActivityRecord {
    date: RawDate::Text(date.to_string()),
    platform,
    problems_solved,
    submissions,
  }
}

/// Create a mock rating-history entry with a bare contest name
pub fn mock_history_entry(
  name: &str,
  rating: Option<f64>,
  rank: Option<i64>,
  date: Option<&str>,
) -> RatingHistoryEntry {
  RatingHistoryEntry {
    rating,
    rank,
    contest: Some(ContestRef::Named(name.to_string())),
    date: date.map(|d| RawDate::Text(d.to_string())),
  }
}

/// Create a mock contest metadata record
pub fn mock_contest_record(
  name: &str,
  date: Option<&str>,
  rank: Option<i64>,
  rating: Option<f64>,
) -> ContestRecord {
  ContestRecord {
    name: name.to_string(),
    date: date.map(|d| RawDate::Text(d.to_string())),
    rank,
    rating,
  }
}
