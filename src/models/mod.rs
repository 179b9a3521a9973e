pub mod activity;
pub mod contest;
pub mod stats;

pub use activity::{ActivityRecord, Platform};
pub use contest::{
  CodeforcesContestEntry, ContestDescriptor, ContestRecord, ContestRef, LeetCodeContestEntry,
  RatingHistoryEntry, RawContestEntry,
};
pub use stats::{CodeforcesProblemStats, DifficultyBuckets, LeetCodeProblemStats};
