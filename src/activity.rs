//! Unified daily-activity aggregation and streak counting
//!
//! Merges per-platform daily records into one densified map covering
//! the trailing 12 months, then scans it for the current and maximum
//! solve streak. Aggregation is additive, so the result is independent
//! of record order and duplicates for the same platform/day stack.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::datekey::day_key;
use crate::models::{ActivityRecord, Platform};

/// One day's merged totals across platforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyActivity {
  pub day: NaiveDate,
  pub total_problems_solved: i64,
  pub total_submissions: i64,
  /// Per-platform submission counts for tooltip drill-down.
  pub submissions_by_platform: BTreeMap<Platform, i64>,
}

impl DailyActivity {
  fn empty(day: NaiveDate) -> Self {
    Self {
      day,
      total_problems_solved: 0,
      total_submissions: 0,
      submissions_by_platform: BTreeMap::new(),
    }
  }
}

/// Consecutive-day solve streaks over the aggregation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakState {
  pub current: i64,
  pub max: i64,
}

/// The densified daily map plus streak state for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
  pub days: BTreeMap<NaiveDate, DailyActivity>,
  pub streak: StreakState,
}

impl ActivitySummary {
  /// Merge raw records into the trailing 12-month window ending at
  /// `as_of`'s UTC day. Every day in the window gets an entry, zero or
  /// not; records with unparsable dates or dates outside the window
  /// are skipped.
  pub fn aggregate(records: &[ActivityRecord], as_of: DateTime<Utc>) -> Self {
    let end = as_of.date_naive();
    let start = window_start(end);

    let mut days: BTreeMap<NaiveDate, DailyActivity> = start
      .iter_days()
      .take_while(|day| *day <= end)
      .map(|day| (day, DailyActivity::empty(day)))
      .collect();

    for record in records {
      let Some(day) = day_key(&record.date) else {
        continue;
      };
      let Some(cell) = days.get_mut(&day) else {
        continue;
      };

      cell.total_problems_solved += record.problems_solved;
      cell.total_submissions += record.submissions;
      *cell
        .submissions_by_platform
        .entry(record.platform)
        .or_insert(0) += record.submissions;
    }

    let streak = scan_streaks(&days);

    Self { days, streak }
  }
}

/// First day of the window: 12 months before `end`, exclusive of the
/// matching day a year ago, so the window always spans 365 or 366 days.
fn window_start(end: NaiveDate) -> NaiveDate {
  end
    .checked_sub_months(Months::new(12))
    .and_then(|day| day.checked_add_days(Days::new(1)))
    .unwrap_or(end)
}

/// Chronological walk: the counter grows on solve days and resets on
/// zero days. `current` is the counter at the window's final day, so
/// it is 0 whenever that day itself has no activity.
fn scan_streaks(days: &BTreeMap<NaiveDate, DailyActivity>) -> StreakState {
  let mut run = 0;
  let mut max = 0;

  for cell in days.values() {
    if cell.total_problems_solved > 0 {
      run += 1;
      max = max.max(run);
    } else {
      run = 0;
    }
  }

  StreakState { current: run, max }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::datekey::RawDate;
  use chrono::TimeZone;

  fn record(platform: Platform, date: &str, solved: i64, submissions: i64) -> ActivityRecord {
    ActivityRecord {
      date: RawDate::Text(date.to_string()),
      platform,
      problems_solved: solved,
      submissions,
    }
  }

  fn as_of(date: &str) -> DateTime<Utc> {
    Utc
      .from_utc_datetime(
        &NaiveDate::parse_from_str(date, "%Y-%m-%d")
          .unwrap()
          .and_hms_opt(12, 0, 0)
          .unwrap(),
      )
  }

  #[test]
  fn test_empty_input_yields_full_zero_window() {
    let summary = ActivitySummary::aggregate(&[], as_of("2025-08-29"));

    assert_eq!(summary.days.len(), 365);
    assert!(summary.days.values().all(|d| d.total_problems_solved == 0));
    assert_eq!(summary.streak, StreakState { current: 0, max: 0 });
  }

  #[test]
  fn test_window_spanning_leap_day_has_366_entries() {
    // 2023-06-16 ..= 2024-06-15 includes 2024-02-29
    let summary = ActivitySummary::aggregate(&[], as_of("2024-06-15"));
    assert_eq!(summary.days.len(), 366);

    let first = *summary.days.keys().next().unwrap();
    let last = *summary.days.keys().last().unwrap();
    assert_eq!(first, NaiveDate::from_ymd_opt(2023, 6, 16).unwrap());
    assert_eq!(last, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
  }

  #[test]
  fn test_merge_is_order_independent() {
    let records = vec![
      record(Platform::LeetCode, "2025-08-27", 2, 5),
      record(Platform::Codeforces, "2025-08-27", 1, 3),
      record(Platform::LeetCode, "2025-08-25", 4, 4),
      record(Platform::Codeforces, "2025-08-29", 1, 1),
    ];

    let forward = ActivitySummary::aggregate(&records, as_of("2025-08-29"));

    let mut reversed = records.clone();
    reversed.reverse();
    let backward = ActivitySummary::aggregate(&reversed, as_of("2025-08-29"));

    assert_eq!(forward, backward);
  }

  #[test]
  fn test_duplicate_platform_day_records_are_additive() {
    let records = vec![
      record(Platform::LeetCode, "2025-08-27", 2, 5),
      record(Platform::LeetCode, "2025-08-27", 3, 1),
    ];

    let summary = ActivitySummary::aggregate(&records, as_of("2025-08-29"));
    let day = NaiveDate::from_ymd_opt(2025, 8, 27).unwrap();
    let cell = &summary.days[&day];

    assert_eq!(cell.total_problems_solved, 5);
    assert_eq!(cell.total_submissions, 6);
    assert_eq!(cell.submissions_by_platform[&Platform::LeetCode], 6);
  }

  #[test]
  fn test_per_platform_submission_counts_stay_separate() {
    let records = vec![
      record(Platform::LeetCode, "2025-08-27", 1, 5),
      record(Platform::Codeforces, "2025-08-27", 1, 3),
    ];

    let summary = ActivitySummary::aggregate(&records, as_of("2025-08-29"));
    let day = NaiveDate::from_ymd_opt(2025, 8, 27).unwrap();
    let cell = &summary.days[&day];

    assert_eq!(cell.submissions_by_platform[&Platform::LeetCode], 5);
    assert_eq!(cell.submissions_by_platform[&Platform::Codeforces], 3);
    assert_eq!(cell.total_submissions, 8);
  }

  #[test]
  fn test_unparsable_and_out_of_window_records_are_skipped() {
    let records = vec![
      ActivityRecord {
        date: RawDate::Text("garbage".to_string()),
        platform: Platform::LeetCode,
        problems_solved: 10,
        submissions: 10,
      },
      record(Platform::LeetCode, "2019-01-01", 10, 10),
      record(Platform::LeetCode, "2025-08-29", 1, 1),
    ];

    let summary = ActivitySummary::aggregate(&records, as_of("2025-08-29"));
    let total: i64 = summary.days.values().map(|d| d.total_problems_solved).sum();
    assert_eq!(total, 1);
  }

  #[test]
  fn test_streak_counts_trailing_run_ending_today() {
    // Days ending at as_of: ..., 0, 1, 1, 0, 1, 1, 1 -> current 3
    let records = vec![
      record(Platform::LeetCode, "2025-08-24", 1, 1),
      record(Platform::LeetCode, "2025-08-25", 1, 1),
      // 2025-08-26 has no activity
      record(Platform::LeetCode, "2025-08-27", 2, 2),
      record(Platform::Codeforces, "2025-08-28", 1, 1),
      record(Platform::LeetCode, "2025-08-29", 1, 1),
    ];

    let summary = ActivitySummary::aggregate(&records, as_of("2025-08-29"));
    assert_eq!(summary.streak.current, 3);
    assert!(summary.streak.max >= 3);
  }

  #[test]
  fn test_streak_current_is_zero_when_today_is_empty() {
    let records = vec![
      record(Platform::LeetCode, "2025-08-26", 1, 1),
      record(Platform::LeetCode, "2025-08-27", 1, 1),
      record(Platform::LeetCode, "2025-08-28", 1, 1),
    ];

    let summary = ActivitySummary::aggregate(&records, as_of("2025-08-29"));
    assert_eq!(summary.streak.current, 0);
    assert_eq!(summary.streak.max, 3);
  }

  #[test]
  fn test_submissions_alone_do_not_extend_a_streak() {
    let records = vec![record(Platform::Codeforces, "2025-08-29", 0, 7)];

    let summary = ActivitySummary::aggregate(&records, as_of("2025-08-29"));
    assert_eq!(summary.streak, StreakState { current: 0, max: 0 });
  }

  #[test]
  fn test_aggregate_is_deterministic() {
    let records = vec![
      record(Platform::LeetCode, "2025-08-27", 2, 5),
      record(Platform::Codeforces, "2025-08-28", 1, 3),
    ];

    let first = ActivitySummary::aggregate(&records, as_of("2025-08-29"));
    let second = ActivitySummary::aggregate(&records, as_of("2025-08-29"));
    assert_eq!(first, second);
  }
}
