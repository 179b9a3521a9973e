//! Codeforces REST client
//!
//! Fetches rating changes, the submission log, and the public contest
//! list. Every endpoint wraps its payload in a status envelope; FAILED
//! responses carry a comment string.

use std::collections::HashSet;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::ClientConfig;
use crate::datekey::RawDate;
use crate::models::{
  ActivityRecord, CodeforcesContestEntry, CodeforcesProblemStats, ContestRecord, ContestRef,
  Platform, RatingHistoryEntry, RawContestEntry,
};

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CodeforcesError {
  #[error("HTTP request failed: {0}")]
  Request(String),

  #[error("API error: {0}")]
  Api(String),

  #[error("Failed to parse response: {0}")]
  Parse(String),
}

impl From<reqwest::Error> for CodeforcesError {
  fn from(e: reqwest::Error) -> Self {
    CodeforcesError::Request(e.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Response Shapes
/// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CfEnvelope<T> {
  status: String,
  result: Option<T>,
  comment: Option<String>,
}

/// One `user.rating` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfRatingChange {
  pub contest_id: i64,
  pub contest_name: String,
  pub rating_update_time_seconds: i64,
  pub rank: i64,
  pub old_rating: i64,
  pub new_rating: i64,
}

impl CfRatingChange {
  pub fn to_history_entry(&self) -> RatingHistoryEntry {
    RatingHistoryEntry {
      rating: Some(self.new_rating as f64),
      rank: Some(self.rank),
      contest: Some(ContestRef::Named(self.contest_name.clone())),
      date: Some(RawDate::Epoch(self.rating_update_time_seconds)),
    }
  }

  pub fn to_contest_record(&self) -> ContestRecord {
    ContestRecord {
      name: self.contest_name.clone(),
      date: Some(RawDate::Epoch(self.rating_update_time_seconds)),
      rank: Some(self.rank),
      rating: Some(self.new_rating as f64),
    }
  }
}

/// One `user.status` submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfSubmission {
  pub creation_time_seconds: i64,
  pub problem: CfProblem,
  #[serde(default)]
  pub verdict: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfProblem {
  #[serde(default)]
  pub contest_id: Option<i64>,
  pub index: String,
  pub name: String,
}

impl CfSubmission {
  pub fn is_accepted(&self) -> bool {
    self.verdict.as_deref() == Some("OK")
  }

  fn problem_key(&self) -> (Option<i64>, String) {
    (self.problem.contest_id, self.problem.index.clone())
  }
}

/// One `contest.list` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CfContest {
  id: i64,
  name: String,
  start_time_seconds: Option<i64>,
  #[serde(default)]
  duration_seconds: i64,
}

/// ---------------------------------------------------------------------------
/// Submission-log rollups
/// ---------------------------------------------------------------------------

/// One activity record per submission; the aggregator stacks them into
/// daily totals.
pub fn activity_from_submissions(submissions: &[CfSubmission]) -> Vec<ActivityRecord> {
  submissions
    .iter()
    .map(|submission| ActivityRecord {
      date: RawDate::Epoch(submission.creation_time_seconds),
      platform: Platform::Codeforces,
      problems_solved: if submission.is_accepted() { 1 } else { 0 },
      submissions: 1,
    })
    .collect()
}

/// Count distinct accepted problems. Resubmitting an already-solved
/// problem does not inflate the count.
pub fn solved_stats(submissions: &[CfSubmission]) -> CodeforcesProblemStats {
  let solved: HashSet<_> = submissions
    .iter()
    .filter(|submission| submission.is_accepted())
    .map(|submission| submission.problem_key())
    .collect();

  CodeforcesProblemStats {
    solved: solved.len() as i64,
  }
}

/// ---------------------------------------------------------------------------
/// Client
/// ---------------------------------------------------------------------------

pub struct CodeforcesClient {
  http: Client,
  base_url: String,
}

impl CodeforcesClient {
  pub fn new(config: &ClientConfig) -> Self {
    Self {
      http: Client::new(),
      base_url: config.codeforces_base_url.trim_end_matches('/').to_string(),
    }
  }

  /// Rating changes for one handle, oldest first as Codeforces returns
  /// them.
  pub async fn user_rating(&self, handle: &str) -> Result<Vec<CfRatingChange>, CodeforcesError> {
    let url = self.endpoint("user.rating", Some(handle))?;
    self.get(url).await
  }

  /// Full submission log for one handle, newest first.
  pub async fn user_status(&self, handle: &str) -> Result<Vec<CfSubmission>, CodeforcesError> {
    let url = self.endpoint("user.status", Some(handle))?;
    self.get(url).await
  }

  /// Public contest list mapped to calendar entries. Contests with no
  /// scheduled start are skipped.
  pub async fn contest_list(&self) -> Result<Vec<RawContestEntry>, CodeforcesError> {
    let url = self.endpoint("contest.list", None)?;
    let contests: Vec<CfContest> = self.get(url).await?;

    let entries = contests
      .into_iter()
      .filter_map(|contest| {
        let start = contest.start_time_seconds?;
        Some(RawContestEntry::Codeforces(CodeforcesContestEntry {
          id: contest.id,
          name: contest.name,
          start: RawDate::Epoch(start),
          duration_minutes: contest.duration_seconds / 60,
        }))
      })
      .collect();

    Ok(entries)
  }

  fn endpoint(&self, method: &str, handle: Option<&str>) -> Result<Url, CodeforcesError> {
    let mut url = Url::parse(&format!("{}/api/{}", self.base_url, method))
      .map_err(|e| CodeforcesError::Parse(format!("bad endpoint URL: {}", e)))?;
    if let Some(handle) = handle {
      url.query_pairs_mut().append_pair("handle", handle);
    }
    Ok(url)
  }

  async fn get<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, CodeforcesError> {
    let response = self.http.get(url).send().await?;

    if !response.status().is_success() {
      let error_text = response.text().await.unwrap_or_default();
      return Err(CodeforcesError::Api(format!(
        "Request failed: {}",
        error_text
      )));
    }

    let envelope: CfEnvelope<T> = response
      .json()
      .await
      .map_err(|e| CodeforcesError::Parse(e.to_string()))?;

    if envelope.status != "OK" {
      return Err(CodeforcesError::Api(
        envelope
          .comment
          .unwrap_or_else(|| format!("status {}", envelope.status)),
      ));
    }

    envelope
      .result
      .ok_or_else(|| CodeforcesError::Parse("OK response carried no result".to_string()))
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
