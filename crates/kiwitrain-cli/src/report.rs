//! Plain-text rendering for the CLI.

use kiwitrain::Dashboard;
use kiwitrain_auth::DashboardLabel;
use kiwitrain_core::PermissionKey;
use std::fmt::Write;

fn heading(dashboard: &Dashboard) -> &'static str {
    match dashboard.capabilities.dashboard_label {
        DashboardLabel::Overview => "Overview",
        DashboardLabel::TeamProgress => "Team Progress",
    }
}

/// Render a dashboard as a human-readable report.
pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    match &dashboard.viewer {
        Some(viewer) => {
            let _ = writeln!(
                out,
                "{} for {} ({})",
                heading(dashboard),
                viewer.name,
                viewer.role.unwrap_or("unknown role")
            );
        }
        None => {
            let _ = writeln!(out, "{} (not signed in)", heading(dashboard));
        }
    }

    if let Some(own) = &dashboard.own_progress {
        let _ = writeln!(
            out,
            "Your progress in {}: {}/{} tasks ({}%)",
            own.department_name, own.progress.completed, own.progress.total, own.progress.rate
        );
    }

    if dashboard.is_access_denied() {
        let _ = writeln!(out, "\nNo department progress is visible to this account.");
        return out;
    }

    for report in &dashboard.departments {
        let progress = &report.progress;
        let _ = writeln!(
            out,
            "\n== {} ==  {}% ({} of {} completions, {} users x {} tasks)",
            report.department.name,
            progress.rate,
            progress.completed,
            progress.user_count * progress.total_tasks,
            progress.user_count,
            progress.total_tasks
        );

        if !report.leaderboard.is_empty() {
            let _ = writeln!(out, "Leaderboard:");
            for (rank, entry) in report.leaderboard.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {:>3}. {:<28} {:>3}%  ({}/{})",
                    rank + 1,
                    entry.name,
                    entry.progress.rate,
                    entry.progress.completed,
                    entry.progress.total
                );
            }
        }

        if !report.phase_stats.is_empty() {
            let _ = writeln!(out, "Phases:");
            for stats in &report.phase_stats {
                let _ = writeln!(
                    out,
                    "  {:<32} {} modules, {} tasks",
                    stats.name, stats.module_count, stats.task_count
                );
            }
        }

        if !report.modules.is_empty() {
            let _ = writeln!(out, "Day plan:");
            for day in &report.modules {
                let _ = writeln!(
                    out,
                    "  {:>4}  {:<40} {} tasks",
                    day.day_label, day.title, day.task_count
                );
            }
        }
    }

    out
}

/// One line per permission, marked granted or denied.
pub fn render_permissions(granted: &[PermissionKey]) -> String {
    let mut out = String::new();
    for key in PermissionKey::ALL {
        let mark = if granted.contains(&key) { "yes" } else { "no " };
        let _ = writeln!(out, "  [{mark}] {:<20} {}", key.as_str(), key.label());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiwitrain::TrainingSnapshot;
    use kiwitrain_auth::Session;
    use kiwitrain_models::{Department, Role, TaskProgress, TrainingModule, TrainingTask, User};

    fn snapshot() -> TrainingSnapshot {
        TrainingSnapshot {
            departments: vec![Department::new("D1", "Sales", 1)],
            modules: vec![TrainingModule::new("m1", "D1", None, "Welcome", 1)],
            tasks: vec![TrainingTask::new("t1", "m1", "Read handbook", 1)],
            users: vec![
                User::new("l", "Lee Leader", Role::Leader).with_department("D1"),
                User::new("e", "Eve Employee", Role::Employee).with_department("D1"),
            ],
            progress: vec![TaskProgress::new("e", "t1", true)],
            ..Default::default()
        }
    }

    #[test]
    fn test_leader_report() {
        let snapshot = snapshot();
        let session = Session::for_user(snapshot.users[0].clone());
        let text = render_dashboard(&Dashboard::compose(&session, &snapshot));

        assert!(text.starts_with("Team Progress for Lee Leader (Team Leader)"));
        assert!(text.contains("Your progress in Sales: 0/1 tasks (0%)"));
        assert!(text.contains("== Sales ==  50%"));
        assert!(text.contains("Unassigned"));
        assert!(text.contains("D1  Welcome"));
    }

    #[test]
    fn test_denied_report() {
        let snapshot = snapshot();
        let session = Session::for_user(snapshot.users[1].clone());
        let text = render_dashboard(&Dashboard::compose(&session, &snapshot));
        assert!(text.contains("No department progress is visible"));
    }

    #[test]
    fn test_render_permissions() {
        let text = render_permissions(&[PermissionKey::ManageUsers]);
        assert_eq!(text.lines().count(), PermissionKey::ALL.len());
        assert!(text.contains("[yes] manage_users"));
        assert!(text.contains("[no ] edit_training"));
    }
}
