mod common;

use common::{sample_snapshot, users};
use kiwitrain::{Dashboard, TrainingSnapshot};
use kiwitrain_auth::{DashboardLabel, Session};
use kiwitrain_models::{DepartmentId, UserId};

fn session(snapshot: &TrainingSnapshot, id: &str) -> Session {
    snapshot
        .find_user(&UserId::from(id))
        .cloned()
        .map(Session::for_user)
        .unwrap_or_default()
}

#[test]
fn test_leader_sees_only_own_department() {
    let snapshot = sample_snapshot();
    let dashboard = Dashboard::compose(&session(&snapshot, users::LEADER), &snapshot);

    assert!(!dashboard.is_access_denied());
    assert_eq!(dashboard.departments.len(), 1);
    assert_eq!(dashboard.capabilities.dashboard_label, DashboardLabel::TeamProgress);

    let report = &dashboard.departments[0];
    assert_eq!(report.department.name, "Sales");
    assert_eq!(report.progress.rate, 60);
    assert_eq!(report.progress.user_count, 3);
    assert_eq!(report.progress.total_tasks, 5);

    let board: Vec<&str> = report.leaderboard.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(board, vec!["Alice", "Bob", "Lee Leader"]);

    let days: Vec<&str> = report.modules.iter().map(|m| m.day_label.as_str()).collect();
    assert_eq!(days, vec!["D1", "D2", "D3", "D4", "D5"]);
    assert_eq!(report.modules[4].module_id.as_str(), "M-U");
    assert!(report.modules[4].phase_id.is_none());

    let stats: Vec<(&str, usize)> = report
        .phase_stats
        .iter()
        .map(|s| (s.name.as_str(), s.module_count))
        .collect();
    assert_eq!(stats, vec![("Phase P1", 2), ("Phase P2", 2), ("Unassigned", 1)]);

    let own = dashboard.own_progress.as_ref().unwrap();
    assert_eq!(own.department_id, DepartmentId::from("D1"));
    assert_eq!(own.progress.rate, 20);
}

#[test]
fn test_admin_sees_every_department_in_order() {
    let snapshot = sample_snapshot();
    let dashboard = Dashboard::compose(&session(&snapshot, users::ADMIN), &snapshot);

    let names: Vec<&str> = dashboard
        .departments
        .iter()
        .map(|r| r.department.name.as_str())
        .collect();
    assert_eq!(names, vec!["Sales", "Kitchen", "Support"]);
    assert_eq!(dashboard.capabilities.dashboard_label, DashboardLabel::Overview);
    assert!(dashboard.own_progress.is_none());

    let kitchen = dashboard.department(&DepartmentId::from("D2")).unwrap();
    assert_eq!(kitchen.progress.rate, 25);
    assert_eq!(kitchen.leaderboard[0].name, "Carol");

    let support = dashboard.department(&DepartmentId::from("D3")).unwrap();
    assert_eq!(support.progress.rate, 0);
    assert!(support.leaderboard.is_empty());
    assert!(support.modules.is_empty());
}

#[test]
fn test_denied_viewers_get_empty_dashboards() {
    let snapshot = sample_snapshot();
    for id in [users::ALICE, users::HOMELESS_LEADER, "nobody"] {
        let dashboard = Dashboard::compose(&session(&snapshot, id), &snapshot);
        assert!(dashboard.is_access_denied(), "{id} should be denied");
    }

    let alice = Dashboard::compose(&session(&snapshot, users::ALICE), &snapshot);
    assert_eq!(alice.own_progress.unwrap().progress.completed, 4);

    let anonymous = Dashboard::compose(&Session::anonymous(), &snapshot);
    assert!(anonymous.viewer.is_none());
    assert!(anonymous.own_progress.is_none());
}

#[test]
fn test_truncate_leaderboards() {
    let snapshot = sample_snapshot();
    let mut dashboard = Dashboard::compose(&session(&snapshot, users::STAFF), &snapshot);

    dashboard.truncate_leaderboards(0);
    assert_eq!(dashboard.departments[0].leaderboard.len(), 3);

    dashboard.truncate_leaderboards(1);
    assert_eq!(dashboard.departments[0].leaderboard.len(), 1);
    assert_eq!(dashboard.departments[0].leaderboard[0].name, "Alice");
}

#[test]
fn test_dashboard_serializes_to_json() {
    let snapshot = sample_snapshot();
    let dashboard = Dashboard::compose(&session(&snapshot, users::LEADER), &snapshot);
    let json = serde_json::to_value(&dashboard).unwrap();

    assert_eq!(json["capabilities"]["dashboard_label"], "team_progress");
    assert_eq!(json["viewer"]["role"], "Team Leader");
    assert_eq!(json["departments"][0]["leaderboard"][0]["rate"], 80);
    assert_eq!(json["departments"][0]["modules"][0]["day_label"], "D1");
}

#[test]
fn test_snapshot_from_json_feeds_dashboard() {
    let snapshot = TrainingSnapshot::from_json(
        r#"{
            "departments": [{"id": 1, "name": "Ops", "sort_order": 1}],
            "modules": [{"id": 10, "department_id": 1, "phase_id": null, "title": "Intro"}],
            "tasks": [{"id": 100, "module_id": 10, "title": "Read"}],
            "users": [
                {"id": "boss", "name": "Boss", "role": "admin", "custom_perms": []},
                {"id": "e1", "name": "Eve", "role": "employee", "department_id": 1}
            ],
            "progress": [{"user_id": "e1", "training_task_id": 100, "status": "completed"}]
        }"#,
    )
    .unwrap();

    let dashboard = Dashboard::compose(&session(&snapshot, "boss"), &snapshot);
    assert_eq!(dashboard.departments.len(), 1);
    assert_eq!(dashboard.departments[0].progress.rate, 100);
    assert_eq!(dashboard.departments[0].modules[0].day_label, "D1");
}

#[test]
fn test_loose_rows_degrade_gracefully() {
    let snapshot = TrainingSnapshot::from_json(
        r#"{
            "departments": [{"id": 1, "name": "Ops"}],
            "phases": [{"id": 5, "department_id": 1, "name": "Week 1"}],
            "modules": [
                {"id": 10, "department_id": 1, "phase_id": 5, "title": "Intro"},
                {"id": 11, "department_id": 1, "phase_id": "ghost", "title": "Drift"}
            ],
            "tasks": [
                {"id": 100, "module_id": 10, "title": "Read", "task_type": null},
                {"id": 101, "module_id": 11, "title": "Shadow", "task_type": "homework"}
            ],
            "users": [
                {"id": "boss", "name": "Boss", "role": "admin", "custom_perms": []},
                {"id": "e1", "name": "Eve", "role": "employee", "department_id": 1}
            ],
            "progress": [
                {"user_id": "e1", "task_id": 100, "is_completed": true},
                {"user_id": "e1", "task_id": 101, "is_completed": false}
            ]
        }"#,
    )
    .unwrap();

    let dashboard = Dashboard::compose(&session(&snapshot, "boss"), &snapshot);
    let report = &dashboard.departments[0];
    assert_eq!(report.progress.rate, 50);

    let drift = &report.modules[1];
    assert_eq!(drift.module_id.as_str(), "11");
    assert_eq!(drift.day_label, "D2");
    assert!(drift.phase_id.is_none());

    let unassigned = report.phase_stats.last().unwrap();
    assert!(unassigned.phase_id.is_none());
    assert_eq!(unassigned.module_count, 1);
}
