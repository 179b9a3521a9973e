//! Competitive programming dashboard engine
//!
//! Normalizes raw LeetCode and Codeforces exports into the derived
//! views a dashboard renders: the unified activity heatmap with streak
//! counts, per-platform rating timelines and recent-contest tables, a
//! classified contest calendar, and the combined solved summary. The
//! derivation pipeline is pure; the platform clients live alongside it
//! for fetching fresh snapshots.

pub mod activity;
pub mod calendar;
pub mod codeforces;
pub mod config;
pub mod datekey;
pub mod leetcode;
pub mod models;
pub mod rating;
pub mod snapshot;
pub mod summary;

#[cfg(test)]
mod test_utils;

pub use activity::{ActivitySummary, DailyActivity, StreakState};
pub use calendar::{CalendarCell, ContestBadge, ContestEvent, MonthGrid};
pub use codeforces::{CodeforcesClient, CodeforcesError};
pub use config::{ClientConfig, ConfigError};
pub use datekey::RawDate;
pub use leetcode::{LeetCodeClient, LeetCodeError};
pub use models::Platform;
pub use rating::{ContestRow, RatingDelta, RatingPoint, RECENT_CONTEST_LIMIT};
pub use snapshot::{DashboardView, RawSnapshot};
pub use summary::SolvedSummary;
