//! Contest calendar normalization, classification, and month grid
//!
//! Heterogeneous per-platform contest entries are normalized once at
//! ingestion, classified by name, and bucketed into a Monday-first
//! month grid keyed on the UTC calendar date of each contest's start.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::datekey::day_key_utc;
use crate::models::{Platform, RawContestEntry};

/// A contest entry after platform-specific field mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestEvent {
  pub platform: Platform,
  pub name: String,
  pub id: String,
  pub start: DateTime<Utc>,
  pub duration_hours: f64,
}

impl RawContestEntry {
  /// Resolve field names and units to the canonical event shape.
  /// Entries with unparsable start times normalize to `None`.
  pub fn normalize(&self) -> Option<ContestEvent> {
    match self {
      RawContestEntry::LeetCode(entry) => Some(ContestEvent {
        platform: Platform::LeetCode,
        name: entry.title.clone(),
        id: entry.title_slug.clone(),
        start: entry.start_time.to_instant()?,
        duration_hours: entry.duration,
      }),
      RawContestEntry::Codeforces(entry) => Some(ContestEvent {
        platform: Platform::Codeforces,
        name: entry.name.clone(),
        id: entry.id.to_string(),
        start: entry.start.to_instant()?,
        duration_hours: entry.duration_minutes as f64 / 60.0,
      }),
    }
  }
}

/// A classified contest badge inside a day cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestBadge {
  pub platform: Platform,
  pub label: String,
  /// `start < now` at build time; not re-flagged as time passes.
  pub is_past: bool,
}

/// One slot in the month grid. Leading/trailing padding cells have no
/// day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalendarCell {
  pub day: Option<NaiveDate>,
  pub day_of_month: Option<u32>,
  pub contests: Vec<ContestBadge>,
}

/// Complete month view: Monday-first weeks padded to full rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGrid {
  pub year: i32,
  pub month: u32,
  pub weeks: Vec<Vec<CalendarCell>>,
}

/// ---------------------------------------------------------------------------
/// Classification
/// ---------------------------------------------------------------------------

/// Classify a contest by name, case-insensitively.
///
/// LeetCode: "Biweekly" beats "Weekly"; anything else gets the platform
/// label. Codeforces: a "Div(ision) n" marker becomes "Div-n";
/// otherwise the platform label.
pub fn classify(platform: Platform, name: &str) -> String {
  let lower = name.to_lowercase();

  match platform {
    Platform::LeetCode => {
      if lower.contains("biweekly") {
        "Biweekly".to_string()
      } else if lower.contains("weekly") {
        "Weekly".to_string()
      } else {
        platform.as_str().to_string()
      }
    }
    Platform::Codeforces => match division_number(&lower) {
      Some(division) => format!("Div-{}", division),
      None => platform.as_str().to_string(),
    },
  }
}

/// Extract n from "div n", "div. n", or "division n".
fn division_number(lower: &str) -> Option<u32> {
  let rest = &lower[lower.find("div")? + 3..];
  let rest = rest.strip_prefix("ision").unwrap_or(rest);
  let rest = rest.trim_start_matches(['.', ' ']);

  let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
  digits.parse().ok()
}

/// ---------------------------------------------------------------------------
/// Month grid
/// ---------------------------------------------------------------------------

/// Bucket events into the (year, month) grid. The grouping day is the
/// UTC calendar date of each event's start, matching the activity
/// views' day keys exactly. Events outside the month are ignored.
pub fn month_grid(events: &[ContestEvent], year: i32, month: u32, now: DateTime<Utc>) -> MonthGrid {
  let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
    return MonthGrid { year, month, weeks: Vec::new() };
  };

  let mut ordered: Vec<&ContestEvent> = events.iter().collect();
  ordered.sort_by_key(|event| event.start);

  let mut cells: Vec<CalendarCell> = Vec::new();

  // Leading blanks so the 1st lands on its weekday, Monday-first
  for _ in 0..first.weekday().num_days_from_monday() {
    cells.push(CalendarCell::default());
  }

  let mut day = first;
  while day.month() == month && day.year() == year {
    let contests = ordered
      .iter()
      .filter(|event| day_key_utc(event.start) == day)
      .map(|event| ContestBadge {
        platform: event.platform,
        label: classify(event.platform, &event.name),
        is_past: event.start < now,
      })
      .collect();

    cells.push(CalendarCell {
      day: Some(day),
      day_of_month: Some(day.day()),
      contests,
    });

    match day.succ_opt() {
      Some(next) => day = next,
      None => break,
    }
  }

  // Trailing blanks to a full final week
  while cells.len() % 7 != 0 {
    cells.push(CalendarCell::default());
  }

  MonthGrid {
    year,
    month,
    weeks: cells.chunks(7).map(|week| week.to_vec()).collect(),
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
