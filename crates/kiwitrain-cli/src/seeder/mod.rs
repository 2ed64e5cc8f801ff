//! Fake training snapshot generation.
//!
//! ```ignore
//! use kiwitrain_cli::seeder::{seed_snapshot, SeedConfig};
//!
//! let config = SeedConfig::new(4).with_users(10).with_completion_ratio(0.5);
//! seed_snapshot(&config, "storage/snapshot.json").await?;
//! ```

pub mod models;
pub mod training;
pub mod users;

pub use models::{HierarchyPerDepartment, SeedConfig};

use kiwitrain::{SnapshotError, TrainingSnapshot};
use kiwitrain_models::{DepartmentId, TaskId};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Builds a complete fake snapshot in memory.
pub fn generate_snapshot(config: &SeedConfig) -> TrainingSnapshot {
    let trees = training::generate_training(config.num_departments, &config.hierarchy);

    let department_ids: Vec<DepartmentId> =
        trees.iter().map(|tree| tree.department.id.clone()).collect();
    let mut users = users::generate_office_users();
    users.extend(users::generate_department_users(
        &department_ids,
        config.users_per_department,
    ));

    let tasks_by_department: HashMap<DepartmentId, Vec<TaskId>> = trees
        .iter()
        .map(|tree| {
            let task_ids = tree.tasks.iter().map(|task| task.id.clone()).collect();
            (tree.department.id.clone(), task_ids)
        })
        .collect();
    let progress = users::generate_progress(
        &users,
        |department_id| {
            tasks_by_department
                .get(department_id)
                .cloned()
                .unwrap_or_default()
        },
        config.completion_ratio,
    );

    let mut snapshot = TrainingSnapshot {
        users,
        progress,
        ..Default::default()
    };
    for tree in trees {
        snapshot.departments.push(tree.department);
        snapshot.phases.extend(tree.phases);
        snapshot.modules.extend(tree.modules);
        snapshot.tasks.extend(tree.tasks);
    }
    snapshot
}

/// Generates a snapshot and writes it to `path`.
pub async fn seed_snapshot(
    config: &SeedConfig,
    path: impl AsRef<Path>,
) -> Result<TrainingSnapshot, SnapshotError> {
    let start_time = Instant::now();
    println!(
        "🌱 Seeding {} departments ({} tasks, {} users)...",
        config.num_departments,
        config.total_tasks(),
        config.total_users()
    );

    let snapshot = generate_snapshot(config);
    println!(
        "   ✓ Generated {} progress rows in {:?}",
        snapshot.progress.len(),
        start_time.elapsed()
    );

    snapshot.save(&path).await?;
    info!(
        departments = snapshot.departments.len(),
        users = snapshot.users.len(),
        "Seeded training snapshot"
    );
    println!("✅ Wrote snapshot to {}", path.as_ref().display());

    Ok(snapshot)
}
