//! Completion statistics over a [`HierarchyIndex`].
//!
//! All rates are integer percentages in `0..=100`, rounded half up. A zero
//! denominator gives a rate of 0.

use crate::completion::CompletionSource;
use crate::hierarchy::HierarchyIndex;
use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use kiwitrain_auth::resolver::{has_permission, is_admin_like, is_leader};
use kiwitrain_core::PermissionKey;
use kiwitrain_models::{Department, DepartmentId, User, UserId};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::warn;

/// `round(100 * completed / total)`, or 0 when `total` is 0.
pub fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let (completed, total) = (completed as u64, total as u64);
    let rate = (200 * completed + total) / (2 * total);
    rate.min(100) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UserProgress {
    pub completed: usize,
    pub total: usize,
    pub rate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentProgress {
    pub department_id: DepartmentId,
    pub rate: u32,
    pub user_count: usize,
    pub total_tasks: usize,
    /// Completions summed over every user
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub name: String,
    #[serde(flatten)]
    pub progress: UserProgress,
}

/// Collator for CLDR root order.
fn name_collator() -> Option<CollatorBorrowed<'static>> {
    Collator::try_new(Default::default(), CollatorOptions::default())
        .map_err(|err| {
            warn!(error = %err, "Name collation unavailable, using case-insensitive order");
        })
        .ok()
}

fn compare_names(collator: Option<&CollatorBorrowed<'_>>, a: &str, b: &str) -> Ordering {
    match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

fn compare_entries(
    collator: Option<&CollatorBorrowed<'_>>,
    a: &LeaderboardEntry,
    b: &LeaderboardEntry,
) -> Ordering {
    b.progress
        .rate
        .cmp(&a.progress.rate)
        .then_with(|| compare_names(collator, &a.name, &b.name))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.user_id.cmp(&b.user_id))
}

/// Rate descending, then name by Unicode collation, then id.
pub fn sort_leaderboard(entries: &mut [LeaderboardEntry]) {
    let collator = name_collator();
    entries.sort_by(|a, b| compare_entries(collator.as_ref(), a, b));
}

/// First occurrence of each user id, in input order.
fn distinct_users(users: &[User]) -> Vec<&User> {
    let mut seen = HashSet::new();
    users.iter().filter(|user| seen.insert(&user.id)).collect()
}

pub struct ProgressAggregator<'a, C> {
    index: &'a HierarchyIndex,
    completion: &'a C,
}

impl<'a, C: CompletionSource> ProgressAggregator<'a, C> {
    pub fn new(index: &'a HierarchyIndex, completion: &'a C) -> Self {
        Self { index, completion }
    }

    pub fn index(&self) -> &'a HierarchyIndex {
        self.index
    }

    /// Progress of one user over every task reachable from the department.
    pub fn user_progress(&self, user: &User, department_id: &DepartmentId) -> UserProgress {
        let tasks = self.index.task_ids_of_department(department_id);
        let completed = tasks
            .iter()
            .filter(|task_id| self.completion.is_completed(&user.id, task_id))
            .count();

        UserProgress {
            completed,
            total: tasks.len(),
            rate: completion_rate(completed, tasks.len()),
        }
    }

    /// Total completions over total possible completions for the roster.
    ///
    /// Every task of every user weighs the same; per-user rates are never
    /// averaged. A user listed more than once counts once.
    pub fn department_progress(
        &self,
        department_id: &DepartmentId,
        users: &[User],
    ) -> DepartmentProgress {
        let users = distinct_users(users);
        let total_tasks = self.index.task_ids_of_department(department_id).len();
        let completed: usize = users
            .iter()
            .map(|user| self.user_progress(user, department_id).completed)
            .sum();

        DepartmentProgress {
            department_id: department_id.clone(),
            rate: completion_rate(completed, users.len() * total_tasks),
            user_count: users.len(),
            total_tasks,
            completed,
        }
    }

    pub fn leaderboard(
        &self,
        department_id: &DepartmentId,
        users: &[User],
    ) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<LeaderboardEntry> = distinct_users(users)
            .into_iter()
            .map(|user| LeaderboardEntry {
                user_id: user.id.clone(),
                name: user.name.clone(),
                progress: self.user_progress(user, department_id),
            })
            .collect();
        sort_leaderboard(&mut entries);
        entries
    }
}

/// Departments the viewer may see progress for.
///
/// A leader only ever sees their own department, and nothing when they have
/// none. An empty result means access denied.
pub fn visible_departments(user: Option<&User>, all: &[Department]) -> Vec<Department> {
    if is_leader(user) {
        return user
            .and_then(|u| u.department_id.as_ref())
            .and_then(|dept_id| all.iter().find(|d| &d.id == dept_id))
            .cloned()
            .into_iter()
            .collect();
    }

    if is_admin_like(user) || has_permission(user, PermissionKey::ViewTeamProgress) {
        all.to_vec()
    } else {
        Vec::new()
    }
}

/// Users whose `department_id` is the given department, in input order,
/// each id once.
pub fn department_roster(department_id: &DepartmentId, users: &[User]) -> Vec<User> {
    distinct_users(users)
        .into_iter()
        .filter(|user| user.belongs_to(department_id))
        .cloned()
        .collect()
}
