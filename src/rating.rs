//! Rating timelines and contest-table deltas
//!
//! Joins per-platform rating-history entries to contest metadata,
//! producing an ordered rating series for plotting plus a
//! most-recent-first table view with per-contest rating deltas.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::datekey::day_key;
use crate::models::{ContestRecord, ContestRef, Platform, RatingHistoryEntry};

/// How many contests the recent-contests table shows.
pub const RECENT_CONTEST_LIMIT: usize = 5;

/// One point on a rating timeline, ascending by date.
///
/// A point is "participated" only when it carries both a numeric
/// rating and a non-zero rank; other points still appear in the series
/// as unfilled markers but never feed delta computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingPoint {
  pub contest_name: String,
  pub date: Option<DateTime<Utc>>,
  pub rating: Option<f64>,
  pub rank: Option<i64>,
  pub participated: bool,
}

/// Rating change shown in the contest table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingDelta {
  Applied(i64),
  NotApplicable,
}

impl RatingDelta {
  pub fn as_i64(&self) -> Option<i64> {
    match self {
      RatingDelta::Applied(delta) => Some(*delta),
      RatingDelta::NotApplicable => None,
    }
  }
}

impl fmt::Display for RatingDelta {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RatingDelta::Applied(delta) if *delta > 0 => write!(f, "+{}", delta),
      RatingDelta::Applied(delta) => write!(f, "{}", delta),
      RatingDelta::NotApplicable => f.write_str("N/A"),
    }
  }
}

// Positive deltas carry an explicit sign on the wire ("+120"), which a
// plain integer serialization cannot express.
impl Serialize for RatingDelta {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// One row of the recent-contests table, most-recent-first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContestRow {
  pub name: String,
  pub date: Option<DateTime<Utc>>,
  pub rank: Option<i64>,
  /// Rounded for display; `None` when the entry carried no rating.
  pub rating: Option<i64>,
  pub delta: RatingDelta,
}

/// ---------------------------------------------------------------------------
/// Timeline join
/// ---------------------------------------------------------------------------

/// Join rating-history entries to contest metadata and order the result
/// ascending by date.
///
/// Resolution order per entry: exact normalized-name match, then any
/// metadata record sharing the entry's UTC calendar date. Entries that
/// resolve nothing are retained with whatever fields they natively
/// carry; enrichment failure never drops a point.
pub fn build_timeline(
  history: &[RatingHistoryEntry],
  contests: &[ContestRecord],
) -> Vec<RatingPoint> {
  let by_name: HashMap<String, &ContestRecord> = contests
    .iter()
    .map(|contest| (normalize_name(&contest.name), contest))
    .collect();

  let mut points: Vec<RatingPoint> = history
    .iter()
    .map(|entry| {
      let native_name = entry_name(entry);
      let native_date = entry_instant(entry);

      let meta = native_name
        .as_deref()
        .and_then(|name| by_name.get(&normalize_name(name)).copied())
        .or_else(|| find_by_date(contests, native_date));

      let contest_name = meta
        .map(|m| m.name.clone())
        .or(native_name)
        .unwrap_or_default();

      let date = native_date.or_else(|| {
        meta
          .and_then(|m| m.date.as_ref())
          .and_then(|raw| raw.to_instant())
      });

      // Rank 0 is the platforms' "did not compete" marker
      let rank = entry
        .rank
        .or_else(|| meta.and_then(|m| m.rank))
        .filter(|rank| *rank != 0);

      let participated = entry.rating.is_some() && rank.is_some();

      RatingPoint {
        contest_name,
        date,
        rating: entry.rating,
        rank,
        participated,
      }
    })
    .collect();

  // Stable: undated points keep input order, ahead of dated ones
  points.sort_by_key(|point| point.date);
  points
}

/// ---------------------------------------------------------------------------
/// Recent-contests table
/// ---------------------------------------------------------------------------

/// Build the truncated most-recent-first table with rating deltas.
///
/// Deltas are chained within the presented slice: each participated row
/// is compared to the nearest older row carrying a numeric rating,
/// rated or not participated alike. A participated row with no older
/// rated row falls back to the platform baseline (1500 for LeetCode,
/// 0 for Codeforces).
pub fn recent_contests(
  timeline: &[RatingPoint],
  platform: Platform,
  limit: usize,
) -> Vec<ContestRow> {
  let mut recent: Vec<&RatingPoint> = timeline
    .iter()
    .filter(|point| point.date.is_some())
    .collect();
  recent.sort_by_key(|point| std::cmp::Reverse(point.date));
  recent.truncate(limit);

  (0..recent.len())
    .map(|i| {
      let point = recent[i];

      let delta = if point.participated {
        let current = point.rating.unwrap_or_default();
        let previous = recent[i + 1..]
          .iter()
          .find_map(|older| older.rating)
          .unwrap_or_else(|| platform.rating_baseline());
        RatingDelta::Applied((current - previous).round() as i64)
      } else {
        RatingDelta::NotApplicable
      };

      ContestRow {
        name: point.contest_name.clone(),
        date: point.date,
        rank: point.rank,
        rating: point.rating.map(|rating| rating.round() as i64),
        delta,
      }
    })
    .collect()
}

/// ---------------------------------------------------------------------------
/// Join helpers
/// ---------------------------------------------------------------------------

fn normalize_name(name: &str) -> String {
  name.trim().to_lowercase()
}

fn entry_name(entry: &RatingHistoryEntry) -> Option<String> {
  match &entry.contest {
    Some(ContestRef::Named(name)) => Some(name.clone()),
    Some(ContestRef::Embedded(descriptor)) => descriptor.title.clone(),
    None => None,
  }
}

fn entry_instant(entry: &RatingHistoryEntry) -> Option<DateTime<Utc>> {
  if let Some(instant) = entry.date.as_ref().and_then(|raw| raw.to_instant()) {
    return Some(instant);
  }
  match &entry.contest {
    Some(ContestRef::Embedded(descriptor)) => descriptor
      .start_time
      .as_ref()
      .and_then(|raw| raw.to_instant()),
    _ => None,
  }
}

/// Date-equality fallback when the name lookup misses. First match
/// wins; two contests sharing a calendar date can mis-join, a known
/// hazard of the fallback.
fn find_by_date<'a>(
  contests: &'a [ContestRecord],
  date: Option<DateTime<Utc>>,
) -> Option<&'a ContestRecord> {
  let target = date.map(|instant| instant.date_naive())?;
  contests.iter().find(|contest| {
    contest
      .date
      .as_ref()
      .and_then(day_key)
      .is_some_and(|day| day == target)
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::datekey::RawDate;
  use crate::models::ContestDescriptor;

  fn named_entry(name: &str, date: &str, rating: Option<f64>, rank: Option<i64>) -> RatingHistoryEntry {
    RatingHistoryEntry {
      rating,
      rank,
      contest: Some(ContestRef::Named(name.to_string())),
      date: Some(RawDate::Text(date.to_string())),
    }
  }

  fn contest(name: &str, date: &str, rank: Option<i64>, rating: Option<f64>) -> ContestRecord {
    ContestRecord {
      name: name.to_string(),
      date: Some(RawDate::Text(date.to_string())),
      rank,
      rating,
    }
  }

  #[test]
  fn test_join_matches_by_normalized_name() {
    let history = vec![named_entry("  codeforces round 950  ", "2024-06-04", Some(1450.0), None)];
    let contests = vec![contest("Codeforces Round 950", "2024-06-04", Some(812), Some(1450.0))];

    let timeline = build_timeline(&history, &contests);

    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].contest_name, "Codeforces Round 950");
    assert_eq!(timeline[0].rank, Some(812));
    assert!(timeline[0].participated);
  }

  #[test]
  fn test_join_falls_back_to_calendar_date() {
    let history = vec![RatingHistoryEntry {
      rating: Some(1500.0),
      rank: None,
      contest: None,
      date: Some(RawDate::Text("2024-06-04T18:00:00Z".to_string())),
    }];
    let contests = vec![contest("Codeforces Round 950", "2024-06-04T14:35:00Z", Some(42), None)];

    let timeline = build_timeline(&history, &contests);

    assert_eq!(timeline[0].contest_name, "Codeforces Round 950");
    assert_eq!(timeline[0].rank, Some(42));
  }

  #[test]
  fn test_failed_join_retains_entry_with_native_fields() {
    let history = vec![named_entry("Mystery Round", "2024-06-04", Some(1612.0), Some(3))];

    let timeline = build_timeline(&history, &[]);

    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].contest_name, "Mystery Round");
    assert_eq!(timeline[0].rating, Some(1612.0));
    assert!(timeline[0].participated);
  }

  #[test]
  fn test_embedded_descriptor_supplies_name_and_date() {
    let history = vec![RatingHistoryEntry {
      rating: Some(1620.0),
      rank: Some(1543),
      contest: Some(ContestRef::Embedded(ContestDescriptor {
        title: Some("Weekly Contest 402".to_string()),
        start_time: Some(RawDate::Epoch(1718506800)),
      })),
      date: None,
    }];

    let timeline = build_timeline(&history, &[]);

    assert_eq!(timeline[0].contest_name, "Weekly Contest 402");
    assert!(timeline[0].date.is_some());
  }

  #[test]
  fn test_timeline_sorted_ascending_by_date() {
    let history = vec![
      named_entry("B", "2024-06-10", Some(1550.0), Some(2)),
      named_entry("A", "2024-06-01", Some(1500.0), Some(1)),
      named_entry("C", "2024-06-20", Some(1600.0), Some(3)),
    ];

    let timeline = build_timeline(&history, &[]);
    let names: Vec<_> = timeline.iter().map(|p| p.contest_name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
  }

  #[test]
  fn test_rank_zero_marks_not_participated() {
    let history = vec![named_entry("Weekly Contest 400", "2024-06-01", Some(1500.0), Some(0))];

    let timeline = build_timeline(&history, &[]);

    assert_eq!(timeline[0].rank, None);
    assert!(!timeline[0].participated);
  }

  #[test]
  fn test_delta_chain_with_baseline_and_skipped_entry() {
    // Oldest -> newest: 1620 (+120 vs baseline), 1550 (-70),
    // unrated non-participated (N/A), 1700 (+150 vs 1550)
    let history = vec![
      named_entry("First", "2024-01-06", Some(1620.0), Some(100)),
      named_entry("Second", "2024-01-13", Some(1550.0), Some(200)),
      named_entry("Skipped", "2024-01-20", None, Some(0)),
      named_entry("Fourth", "2024-01-27", Some(1700.0), Some(50)),
    ];

    let timeline = build_timeline(&history, &[]);
    let rows = recent_contests(&timeline, Platform::LeetCode, RECENT_CONTEST_LIMIT);

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].name, "Fourth");
    assert_eq!(rows[0].delta, RatingDelta::Applied(150));
    assert_eq!(rows[1].delta, RatingDelta::NotApplicable);
    assert_eq!(rows[2].delta, RatingDelta::Applied(-70));
    assert_eq!(rows[3].delta, RatingDelta::Applied(120));
  }

  #[test]
  fn test_codeforces_baseline_is_zero() {
    let history = vec![named_entry("Round 1", "2024-01-06", Some(900.0), Some(5000))];

    let timeline = build_timeline(&history, &[]);
    let rows = recent_contests(&timeline, Platform::Codeforces, RECENT_CONTEST_LIMIT);

    assert_eq!(rows[0].delta, RatingDelta::Applied(900));
  }

  #[test]
  fn test_recent_contests_truncates_to_limit() {
    let history: Vec<_> = (1..=8)
      .map(|i| {
        named_entry(
          &format!("Contest {}", i),
          &format!("2024-01-{:02}", i),
          Some(1500.0 + i as f64),
          Some(i),
        )
      })
      .collect();

    let timeline = build_timeline(&history, &[]);
    let rows = recent_contests(&timeline, Platform::LeetCode, RECENT_CONTEST_LIMIT);

    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].name, "Contest 8");
    assert_eq!(rows[4].name, "Contest 4");
    // Oldest visible row chains against the slice, not full history,
    // so it falls back to the platform baseline
    assert_eq!(rows[4].delta, RatingDelta::Applied(4));
  }

  #[test]
  fn test_delta_serialization_carries_sign() {
    assert_eq!(
      serde_json::to_string(&RatingDelta::Applied(120)).unwrap(),
      "\"+120\""
    );
    assert_eq!(
      serde_json::to_string(&RatingDelta::Applied(-70)).unwrap(),
      "\"-70\""
    );
    assert_eq!(
      serde_json::to_string(&RatingDelta::NotApplicable).unwrap(),
      "\"N/A\""
    );
  }

  #[test]
  fn test_build_timeline_is_deterministic() {
    let history = vec![
      named_entry("A", "2024-06-01", Some(1500.0), Some(1)),
      named_entry("B", "2024-06-10", Some(1550.0), Some(2)),
    ];
    let contests = vec![contest("A", "2024-06-01", Some(1), Some(1500.0))];

    assert_eq!(
      build_timeline(&history, &contests),
      build_timeline(&history, &contests)
    );
  }
}
