//! Raw contest-side inputs: rating history, contest metadata, and the
//! heterogeneous per-platform calendar entries.

use serde::{Deserialize, Serialize};

use crate::datekey::RawDate;

/// Contest descriptor embedded in a rating-history entry (LeetCode
/// shape: `contest: { title, startTime }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestDescriptor {
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub start_time: Option<RawDate>,
}

/// How a rating-history entry refers to its contest: either an embedded
/// descriptor or a bare name string (Codeforces shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContestRef {
  Named(String),
  Embedded(ContestDescriptor),
}

/// One rating-history entry, per platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingHistoryEntry {
  #[serde(default)]
  pub rating: Option<f64>,
  #[serde(default, alias = "ranking")]
  pub rank: Option<i64>,
  #[serde(default)]
  pub contest: Option<ContestRef>,
  #[serde(default)]
  pub date: Option<RawDate>,
}

/// Contest metadata used to enrich rating-history entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestRecord {
  pub name: String,
  #[serde(default)]
  pub date: Option<RawDate>,
  #[serde(default)]
  pub rank: Option<i64>,
  #[serde(default)]
  pub rating: Option<f64>,
}

/// ---------------------------------------------------------------------------
/// Calendar entries (heterogeneous per-platform shapes)
/// ---------------------------------------------------------------------------

/// LeetCode calendar shape: epoch-seconds start, duration in hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetCodeContestEntry {
  pub title: String,
  #[serde(default)]
  pub title_slug: String,
  pub start_time: RawDate,
  /// Hours.
  #[serde(default)]
  pub duration: f64,
}

/// Codeforces calendar shape: ISO or epoch start, duration in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeforcesContestEntry {
  pub id: i64,
  pub name: String,
  pub start: RawDate,
  /// Minutes.
  #[serde(default)]
  pub duration_minutes: i64,
}

/// A calendar entry from either platform, before normalization. The
/// field names disambiguate the untagged variants (`title` vs `name`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawContestEntry {
  LeetCode(LeetCodeContestEntry),
  Codeforces(CodeforcesContestEntry),
}
