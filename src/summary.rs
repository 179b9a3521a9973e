//! Cross-platform solved-count rollup

use serde::{Deserialize, Serialize};

use crate::models::{CodeforcesProblemStats, LeetCodeProblemStats};

/// Combined problems-solved summary across both platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolvedSummary {
  pub total: i64,
  pub leetcode: i64,
  pub codeforces: i64,
}

/// Fold per-platform counts into one summary. LeetCode's count is the
/// sum of its difficulty buckets; missing buckets count as zero.
pub fn solved_summary(
  leetcode: &LeetCodeProblemStats,
  codeforces: &CodeforcesProblemStats,
) -> SolvedSummary {
  let lc_total = leetcode.by_difficulty.easy
    + leetcode.by_difficulty.medium
    + leetcode.by_difficulty.hard;

  SolvedSummary {
    total: lc_total + codeforces.solved,
    leetcode: lc_total,
    codeforces: codeforces.solved,
  }
}
