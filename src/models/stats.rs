use serde::{Deserialize, Serialize};

/// LeetCode solved counts, bucketed by difficulty. Missing buckets are
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyBuckets {
  pub easy: i64,
  pub medium: i64,
  pub hard: i64,
}

/// LeetCode problem-statistics input: `{ byDifficulty: { easy, medium, hard } }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeetCodeProblemStats {
  pub by_difficulty: DifficultyBuckets,
}

/// Codeforces problem-statistics input: a single solved count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeforcesProblemStats {
  pub solved: i64,
}
