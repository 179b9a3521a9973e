//! LeetCode GraphQL client
//!
//! Fetches contest ranking history, the submission calendar, and
//! solved-problem counts for one user. All queries go through the
//! single public `/graphql` endpoint.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::ClientConfig;
use crate::datekey::RawDate;
use crate::models::{ActivityRecord, DifficultyBuckets, LeetCodeProblemStats, Platform, RatingHistoryEntry};

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LeetCodeError {
  #[error("HTTP request failed: {0}")]
  Request(String),

  #[error("API error: {0}")]
  Api(String),

  #[error("Failed to parse response: {0}")]
  Parse(String),
}

impl From<reqwest::Error> for LeetCodeError {
  fn from(e: reqwest::Error) -> Self {
    LeetCodeError::Request(e.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Response Shapes
/// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
  data: Option<T>,
  #[serde(default)]
  errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
  message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContestHistoryData {
  user_contest_ranking_history: Option<Vec<RatingHistoryEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchedUserData<T> {
  matched_user: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserCalendarContainer {
  user_calendar: Option<SubmissionCalendar>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionCalendar {
  /// JSON-encoded string mapping epoch-second day buckets to counts.
  submission_calendar: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitStatsContainer {
  submit_stats_global: Option<SubmitStats>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitStats {
  ac_submission_num: Vec<DifficultyCount>,
}

#[derive(Debug, Deserialize)]
struct DifficultyCount {
  difficulty: String,
  count: i64,
}

/// ---------------------------------------------------------------------------
/// Client
/// ---------------------------------------------------------------------------

pub struct LeetCodeClient {
  http: Client,
  base_url: String,
}

impl LeetCodeClient {
  pub fn new(config: &ClientConfig) -> Self {
    Self {
      http: Client::new(),
      base_url: config.leetcode_base_url.trim_end_matches('/').to_string(),
    }
  }

  /// Per-contest rating history, oldest first as LeetCode returns it.
  /// Unattended contests come back too; the rank-zero marker on those
  /// entries is resolved downstream.
  pub async fn contest_history(
    &self,
    username: &str,
  ) -> Result<Vec<RatingHistoryEntry>, LeetCodeError> {
    let query = r#"
      query contestHistory($username: String!) {
        userContestRankingHistory(username: $username) {
          rating
          ranking
          contest { title startTime }
        }
      }
    "#;

    let data: ContestHistoryData = self.graphql(query, username).await?;
    Ok(data.user_contest_ranking_history.unwrap_or_default())
  }

  /// Daily submission counts from the profile calendar. The calendar
  /// arrives as a JSON string keyed by epoch-second day buckets.
  pub async fn submission_calendar(
    &self,
    username: &str,
  ) -> Result<Vec<ActivityRecord>, LeetCodeError> {
    let query = r#"
      query submissionCalendar($username: String!) {
        matchedUser(username: $username) {
          userCalendar { submissionCalendar }
        }
      }
    "#;

    let data: MatchedUserData<UserCalendarContainer> = self.graphql(query, username).await?;
    let Some(calendar) = data.matched_user.and_then(|user| user.user_calendar) else {
      return Ok(Vec::new());
    };

    let counts: std::collections::BTreeMap<String, i64> =
      serde_json::from_str(&calendar.submission_calendar)
        .map_err(|e| LeetCodeError::Parse(format!("submission calendar: {}", e)))?;

    // The calendar counts submissions only, so it stands in for both
    // totals until per-problem data exists upstream.
    let records = counts
      .into_iter()
      .filter_map(|(epoch, count)| {
        let epoch: i64 = epoch.parse().ok()?;
        Some(ActivityRecord {
          date: RawDate::Epoch(epoch),
          platform: Platform::LeetCode,
          problems_solved: count,
          submissions: count,
        })
      })
      .collect();

    Ok(records)
  }

  /// Accepted-problem counts bucketed by difficulty. The "All" bucket
  /// LeetCode includes is redundant and skipped.
  pub async fn problem_stats(&self, username: &str) -> Result<LeetCodeProblemStats, LeetCodeError> {
    let query = r#"
      query problemStats($username: String!) {
        matchedUser(username: $username) {
          submitStatsGlobal {
            acSubmissionNum { difficulty count }
          }
        }
      }
    "#;

    let data: MatchedUserData<SubmitStatsContainer> = self.graphql(query, username).await?;

    let mut buckets = DifficultyBuckets::default();
    let counts = data
      .matched_user
      .and_then(|user| user.submit_stats_global)
      .map(|stats| stats.ac_submission_num)
      .unwrap_or_default();

    for entry in counts {
      match entry.difficulty.as_str() {
        "Easy" => buckets.easy = entry.count,
        "Medium" => buckets.medium = entry.count,
        "Hard" => buckets.hard = entry.count,
        _ => {}
      }
    }

    Ok(LeetCodeProblemStats { by_difficulty: buckets })
  }

  async fn graphql<T: serde::de::DeserializeOwned>(
    &self,
    query: &str,
    username: &str,
  ) -> Result<T, LeetCodeError> {
    let response = self
      .http
      .post(format!("{}/graphql", self.base_url))
      .json(&json!({
        "query": query,
        "variables": { "username": username },
      }))
      .send()
      .await?;

    if !response.status().is_success() {
      let error_text = response.text().await.unwrap_or_default();
      return Err(LeetCodeError::Api(format!(
        "GraphQL request failed: {}",
        error_text
      )));
    }

    let body: GraphQlResponse<T> = response
      .json()
      .await
      .map_err(|e| LeetCodeError::Parse(e.to_string()))?;

    if let Some(error) = body.errors.first() {
      return Err(LeetCodeError::Api(error.message.clone()));
    }

    body
      .data
      .ok_or_else(|| LeetCodeError::Parse("response carried no data".to_string()))
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
