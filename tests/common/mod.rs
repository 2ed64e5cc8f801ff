#![allow(dead_code)]

use kiwitrain::TrainingSnapshot;
use kiwitrain_core::PermissionKey;
use kiwitrain_models::{
    Department, PhaseId, Role, TaskProgress, TrainingModule, TrainingPhase, TrainingTask, User,
};

/// Well-known user ids in [`sample_snapshot`]
pub mod users {
    pub const ADMIN: &str = "u-admin";
    pub const STAFF: &str = "u-staff";
    pub const LEADER: &str = "u-leader";
    pub const HOMELESS_LEADER: &str = "u-homeless";
    pub const ALICE: &str = "u-alice";
    pub const BOB: &str = "u-bob";
    pub const VIEWER: &str = "u-viewer";
    pub const CAROL: &str = "u-carol";
}

pub fn department(id: &str, name: &str, order: i64) -> Department {
    Department::new(id, name, order)
}

pub fn phase(id: &str, department: &str, order: i64) -> TrainingPhase {
    TrainingPhase::new(id, department, format!("Phase {id}"), order)
}

pub fn module(id: &str, department: &str, phase: Option<&str>, order: i64) -> TrainingModule {
    TrainingModule::new(id, department, phase.map(PhaseId::from), format!("Module {id}"), order)
}

pub fn task(id: &str, module: &str, order: i64) -> TrainingTask {
    TrainingTask::new(id, module, format!("Task {id}"), order)
}

pub fn done(user: &str, task: &str) -> TaskProgress {
    TaskProgress::new(user, task, true)
}

/// Three departments. D1 has two phases of two modules each plus one
/// unassigned module, one task per module (5 tasks). D2 has one module with
/// two tasks. D3 is empty.
pub fn sample_snapshot() -> TrainingSnapshot {
    TrainingSnapshot {
        departments: vec![
            department("D3", "Support", 3),
            department("D1", "Sales", 1),
            department("D2", "Kitchen", 2),
        ],
        phases: vec![phase("P2", "D1", 2), phase("P1", "D1", 1)],
        modules: vec![
            module("M-U", "D1", None, 1),
            module("M-22", "D1", Some("P2"), 2),
            module("M-11", "D1", Some("P1"), 1),
            module("M-21", "D1", Some("P2"), 1),
            module("M-12", "D1", Some("P1"), 2),
            module("K-1", "D2", None, 1),
        ],
        tasks: vec![
            task("T-11", "M-11", 1),
            task("T-12", "M-12", 1),
            task("T-21", "M-21", 1),
            task("T-22", "M-22", 1),
            task("T-U", "M-U", 1),
            task("K-a", "K-1", 1),
            task("K-b", "K-1", 2),
        ],
        users: vec![
            User::new(users::ADMIN, "Ada Admin", Role::Admin).with_custom_perms(vec![]),
            User::new(users::STAFF, "Sam Staff", Role::AdminStaff),
            User::new(users::LEADER, "Lee Leader", Role::Leader).with_department("D1"),
            User::new(users::HOMELESS_LEADER, "Hal Leader", Role::Leader),
            User::new(users::ALICE, "Alice", Role::Employee).with_department("D1"),
            User::new(users::BOB, "Bob", Role::Employee).with_department("D1"),
            User::new(users::VIEWER, "Vic Viewer", Role::Employee)
                .with_department("D2")
                .with_custom_perms(vec![PermissionKey::ViewTeamProgress]),
            User::new(users::CAROL, "Carol", Role::Employee).with_department("D2"),
        ],
        progress: vec![
            done(users::ALICE, "T-11"),
            done(users::ALICE, "T-12"),
            done(users::ALICE, "T-21"),
            done(users::ALICE, "T-22"),
            done(users::BOB, "T-11"),
            done(users::BOB, "T-12"),
            done(users::BOB, "T-21"),
            done(users::BOB, "T-22"),
            TaskProgress::new(users::BOB, "T-U", false),
            done(users::LEADER, "T-U"),
            done(users::CAROL, "K-a"),
            done(users::CAROL, "K-a"),
        ],
    }
}
