//! # KiwiTrain Progress
//!
//! Training hierarchy indexing and progress aggregation.
//!
//! - [`hierarchy`]: Ordered department/phase/module/task groups and day indices
//! - [`completion`]: The "did this user finish this task" predicate
//! - [`aggregator`]: Per-user and per-department rates, leaderboards and the
//!   departments a viewer may see
//!
//! Everything here is pure and synchronous. A fresh [`HierarchyIndex`] is
//! built from every snapshot; nothing is cached across snapshots.
//!
//! # Example
//!
//! ```ignore
//! use kiwitrain_progress::{CompletionIndex, HierarchyIndex, ProgressAggregator};
//!
//! let index = HierarchyIndex::build(&departments, &phases, &modules, &tasks);
//! let completion = CompletionIndex::from_rows(&progress);
//! let aggregator = ProgressAggregator::new(&index, &completion);
//! let board = aggregator.leaderboard(&department_id, &users);
//! ```

pub mod aggregator;
pub mod completion;
pub mod hierarchy;

pub use aggregator::{
    completion_rate, department_roster, sort_leaderboard, visible_departments,
    DepartmentProgress, LeaderboardEntry, ProgressAggregator, UserProgress,
};
pub use completion::{CompletionIndex, CompletionSource};
pub use hierarchy::{HierarchyIndex, PhaseStats};
