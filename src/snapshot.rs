//! Snapshot-to-dashboard derivation
//!
//! All derived views are rebuilt together from one raw snapshot at a
//! fixed observation instant, so a dashboard never mixes views computed
//! from different inputs or at different times.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::ActivitySummary;
use crate::calendar::{month_grid, ContestEvent, MonthGrid};
use crate::models::{
  ActivityRecord, CodeforcesProblemStats, ContestRecord, LeetCodeProblemStats, Platform,
  RatingHistoryEntry, RawContestEntry,
};
use crate::rating::{build_timeline, recent_contests, ContestRow, RatingPoint, RECENT_CONTEST_LIMIT};
use crate::summary::{solved_summary, SolvedSummary};

/// Everything the upstream fetchers produce, before any derivation.
/// Every field defaults to empty so a partial snapshot still derives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSnapshot {
  pub activity: Vec<ActivityRecord>,
  pub leetcode_rating_history: Vec<RatingHistoryEntry>,
  pub leetcode_contests: Vec<ContestRecord>,
  pub codeforces_rating_history: Vec<RatingHistoryEntry>,
  pub codeforces_contests: Vec<ContestRecord>,
  pub calendar_entries: Vec<RawContestEntry>,
  pub leetcode_problems: LeetCodeProblemStats,
  pub codeforces_problems: CodeforcesProblemStats,
}

/// The complete derived dashboard state.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
  pub as_of: DateTime<Utc>,
  pub activity: ActivitySummary,
  pub leetcode_timeline: Vec<RatingPoint>,
  pub codeforces_timeline: Vec<RatingPoint>,
  pub leetcode_recent: Vec<ContestRow>,
  pub codeforces_recent: Vec<ContestRow>,
  pub calendar: MonthGrid,
  pub solved: SolvedSummary,
}

impl DashboardView {
  /// Derive every view from the snapshot at `as_of`. Pure and total:
  /// the same snapshot and instant always produce the same view, and
  /// malformed entries degrade to absent fields rather than errors.
  ///
  /// The calendar shows `as_of`'s UTC month.
  pub fn derive(snapshot: &RawSnapshot, as_of: DateTime<Utc>) -> Self {
    let leetcode_timeline =
      build_timeline(&snapshot.leetcode_rating_history, &snapshot.leetcode_contests);
    let codeforces_timeline = build_timeline(
      &snapshot.codeforces_rating_history,
      &snapshot.codeforces_contests,
    );

    let events: Vec<ContestEvent> = snapshot
      .calendar_entries
      .iter()
      .filter_map(|entry| entry.normalize())
      .collect();
    let today = as_of.date_naive();

    DashboardView {
      as_of,
      activity: ActivitySummary::aggregate(&snapshot.activity, as_of),
      leetcode_recent: recent_contests(&leetcode_timeline, Platform::LeetCode, RECENT_CONTEST_LIMIT),
      codeforces_recent: recent_contests(
        &codeforces_timeline,
        Platform::Codeforces,
        RECENT_CONTEST_LIMIT,
      ),
      leetcode_timeline,
      codeforces_timeline,
      calendar: month_grid(&events, today.year(), today.month(), as_of),
      solved: solved_summary(&snapshot.leetcode_problems, &snapshot.codeforces_problems),
    }
  }
}
