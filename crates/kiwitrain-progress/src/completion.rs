//! Task completion lookups.
//!
//! The aggregator only ever asks "did this user complete this task?". Any
//! closure with that shape works, and [`CompletionIndex`] answers it from raw
//! [`TaskProgress`] rows.

use kiwitrain_models::{TaskId, TaskProgress, UserId};
use std::collections::{HashMap, HashSet};

pub trait CompletionSource {
    fn is_completed(&self, user_id: &UserId, task_id: &TaskId) -> bool;
}

impl<F> CompletionSource for F
where
    F: Fn(&UserId, &TaskId) -> bool,
{
    fn is_completed(&self, user_id: &UserId, task_id: &TaskId) -> bool {
        self(user_id, task_id)
    }
}

/// Completed (user, task) pairs from one snapshot's progress rows.
///
/// Duplicate rows for a pair are OR-reduced: one `completed = true` row is
/// enough, whatever the other rows say.
#[derive(Debug, Clone, Default)]
pub struct CompletionIndex {
    completed: HashMap<UserId, HashSet<TaskId>>,
}

impl CompletionIndex {
    pub fn from_rows(rows: &[TaskProgress]) -> Self {
        let mut completed: HashMap<UserId, HashSet<TaskId>> = HashMap::new();
        for row in rows.iter().filter(|row| row.completed) {
            completed
                .entry(row.user_id.clone())
                .or_default()
                .insert(row.task_id.clone());
        }
        Self { completed }
    }

    /// Number of distinct completed pairs.
    pub fn len(&self) -> usize {
        self.completed.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CompletionSource for CompletionIndex {
    fn is_completed(&self, user_id: &UserId, task_id: &TaskId) -> bool {
        self.completed
            .get(user_id)
            .is_some_and(|tasks| tasks.contains(task_id))
    }
}
