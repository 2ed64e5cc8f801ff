//! Per-viewer dashboard report.
//!
//! [`Dashboard::compose`] is the only place that combines the permission
//! resolver with progress aggregation: it decides which departments the
//! viewer may see, then reports progress, the leaderboard, phase statistics
//! and the labelled day plan for each of them.

use crate::snapshot::TrainingSnapshot;
use kiwitrain_auth::{Capabilities, RoleRegistry, Session};
use kiwitrain_models::{Department, DepartmentId, ModuleId, PhaseId, User, UserId};
use kiwitrain_progress::{
    department_roster, visible_departments, CompletionSource, DepartmentProgress, HierarchyIndex,
    LeaderboardEntry, PhaseStats, ProgressAggregator, UserProgress,
};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewerSummary {
    pub user_id: UserId,
    pub name: String,
    /// Role label, or `None` when the stored role is unknown
    pub role: Option<&'static str>,
    pub department_id: Option<DepartmentId>,
}

/// The viewer's own progress in the department they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnProgress {
    pub department_id: DepartmentId,
    pub department_name: String,
    #[serde(flatten)]
    pub progress: UserProgress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDay {
    pub module_id: ModuleId,
    pub title: String,
    pub phase_id: Option<PhaseId>,
    /// "D1", "D2", ...
    pub day_label: String,
    pub task_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentReport {
    pub department: Department,
    pub progress: DepartmentProgress,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub phase_stats: Vec<PhaseStats>,
    pub modules: Vec<ModuleDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub viewer: Option<ViewerSummary>,
    pub capabilities: Capabilities,
    pub own_progress: Option<OwnProgress>,
    /// Empty when the viewer may not see any department
    pub departments: Vec<DepartmentReport>,
}

fn module_days(index: &HierarchyIndex, department_id: &DepartmentId) -> Vec<ModuleDay> {
    index
        .modules_in_day_order(department_id)
        .iter()
        .filter_map(|module| {
            Some(ModuleDay {
                module_id: module.id.clone(),
                title: module.title.clone(),
                phase_id: module.phase_id.clone(),
                day_label: index.day_label(&module.id)?,
                task_count: index.tasks_of(&module.id).len(),
            })
        })
        .collect()
}

fn own_progress<C: CompletionSource>(
    aggregator: &ProgressAggregator<'_, C>,
    viewer: &User,
) -> Option<OwnProgress> {
    let department_id = viewer.department_id.as_ref()?;
    let department = aggregator.index().department(department_id)?;

    Some(OwnProgress {
        department_id: department_id.clone(),
        department_name: department.name.clone(),
        progress: aggregator.user_progress(viewer, department_id),
    })
}

impl Dashboard {
    /// Build the dashboard for `session` from a raw snapshot.
    pub fn compose(session: &Session, snapshot: &TrainingSnapshot) -> Self {
        let index = snapshot.index();
        let completion = snapshot.completion();
        Self::compose_indexed(session, &snapshot.users, &index, &completion)
    }

    /// Build the dashboard from an already indexed snapshot.
    pub fn compose_indexed<C: CompletionSource>(
        session: &Session,
        users: &[User],
        index: &HierarchyIndex,
        completion: &C,
    ) -> Self {
        let aggregator = ProgressAggregator::new(index, completion);
        let viewer = session.user();

        let departments: Vec<DepartmentReport> = visible_departments(viewer, index.departments())
            .into_iter()
            .map(|department| {
                let roster = department_roster(&department.id, users);
                debug!(
                    department_id = %department.id,
                    roster = roster.len(),
                    "Aggregating department progress"
                );

                DepartmentReport {
                    progress: aggregator.department_progress(&department.id, &roster),
                    leaderboard: aggregator.leaderboard(&department.id, &roster),
                    phase_stats: index.phase_stats(&department.id),
                    modules: module_days(index, &department.id),
                    department,
                }
            })
            .collect();

        info!(
            viewer = viewer.map(|u| u.id.as_str()).unwrap_or("anonymous"),
            departments = departments.len(),
            "Composed dashboard"
        );

        Self {
            viewer: viewer.map(|user| ViewerSummary {
                user_id: user.id.clone(),
                name: user.name.clone(),
                role: user.role.map(RoleRegistry::label),
                department_id: user.department_id.clone(),
            }),
            capabilities: session.capabilities(),
            own_progress: viewer.and_then(|user| own_progress(&aggregator, user)),
            departments,
        }
    }

    /// Whether the viewer was denied every department.
    pub fn is_access_denied(&self) -> bool {
        self.departments.is_empty()
    }

    /// Keep at most `limit` leaderboard rows per department. `0` keeps all.
    pub fn truncate_leaderboards(&mut self, limit: usize) {
        if limit == 0 {
            return;
        }
        for report in &mut self.departments {
            report.leaderboard.truncate(limit);
        }
    }

    pub fn department(&self, id: &DepartmentId) -> Option<&DepartmentReport> {
        self.departments.iter().find(|report| &report.department.id == id)
    }
}
