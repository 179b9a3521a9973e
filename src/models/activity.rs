use std::fmt;

use serde::{Deserialize, Serialize};

use crate::datekey::RawDate;

/// The two platforms the dashboard aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
  LeetCode,
  Codeforces,
}

impl Platform {
  pub fn as_str(&self) -> &'static str {
    match self {
      Platform::LeetCode => "LeetCode",
      Platform::Codeforces => "Codeforces",
    }
  }

  /// Reference rating used for a first contest's delta, since neither
  /// platform exposes a rating prior to a user's first contest.
  pub fn rating_baseline(&self) -> f64 {
    match self {
      Platform::LeetCode => 1500.0,
      Platform::Codeforces => 0.0,
    }
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One day of raw platform activity as fetched. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
  pub date: RawDate,
  pub platform: Platform,
  #[serde(default)]
  pub problems_solved: i64,
  #[serde(default)]
  pub submissions: i64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_activity_record_missing_counts_default_to_zero() {
    let record: ActivityRecord =
      serde_json::from_str(r#"{"date": 1711927800, "platform": "leetcode"}"#).unwrap();

    assert_eq!(record.platform, Platform::LeetCode);
    assert_eq!(record.problems_solved, 0);
    assert_eq!(record.submissions, 0);
  }

  #[test]
  fn test_platform_labels() {
    assert_eq!(Platform::LeetCode.to_string(), "LeetCode");
    assert_eq!(Platform::Codeforces.to_string(), "Codeforces");
  }
}
