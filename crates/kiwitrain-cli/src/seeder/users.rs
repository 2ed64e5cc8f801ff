//! User and progress generation.
//!
//! Every department gets one team leader followed by employees. The
//! organisation additionally gets one administrator and one admin staff
//! member without a department.

use fake::Fake;
use fake::faker::name::en::*;
use kiwitrain_core::PermissionKey;
use kiwitrain_models::{DepartmentId, Role, TaskId, TaskProgress, User};
use rand::Rng;
use rayon::prelude::*;
use uuid::Uuid;

/// Every n-th employee gets an explicit override granting sales access.
const SALES_OVERRIDE_EVERY: usize = 7;

fn generate_user(
    role: Role,
    department_id: Option<&DepartmentId>,
    group_idx: usize,
    user_idx: usize,
) -> User {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();

    let email = format!(
        "{}.{}+{}{}@example.com",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        role.as_str(),
        group_idx * 1000 + user_idx
    );

    let user = User::new(
        Uuid::new_v4().to_string(),
        format!("{first_name} {last_name}"),
        role,
    )
    .with_email(email);

    match department_id {
        Some(department_id) => user.with_department(department_id.clone()),
        None => user,
    }
}

/// Generates the leader and employees of each department.
pub fn generate_department_users(
    department_ids: &[DepartmentId],
    users_per_department: usize,
) -> Vec<User> {
    department_ids
        .par_iter()
        .enumerate()
        .flat_map(|(dept_idx, department_id)| {
            (0..users_per_department)
                .map(|user_idx| {
                    if user_idx == 0 {
                        return generate_user(Role::Leader, Some(department_id), dept_idx, user_idx);
                    }
                    let user =
                        generate_user(Role::Employee, Some(department_id), dept_idx, user_idx);
                    if user_idx % SALES_OVERRIDE_EVERY == 0 {
                        user.with_custom_perms(vec![PermissionKey::SalesDepAccess])
                    } else {
                        user
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Generates the organisation-wide administrator and admin staff member.
pub fn generate_office_users() -> Vec<User> {
    vec![
        generate_user(Role::Admin, None, 0, 0),
        generate_user(Role::AdminStaff, None, 0, 1),
    ]
}

/// Generates one progress row per (user, task) pair of the user's department.
///
/// Each row is completed with probability `completion_ratio`.
pub fn generate_progress(
    users: &[User],
    tasks_of: impl Fn(&DepartmentId) -> Vec<TaskId> + Sync,
    completion_ratio: f64,
) -> Vec<TaskProgress> {
    users
        .par_iter()
        .flat_map(|user| {
            let mut rng = rand::thread_rng();
            let tasks = user
                .department_id
                .as_ref()
                .map(&tasks_of)
                .unwrap_or_default();

            tasks
                .into_iter()
                .map(|task_id| {
                    TaskProgress::new(user.id.clone(), task_id, rng.gen_bool(completion_ratio))
                })
                .collect::<Vec<_>>()
        })
        .collect()
}
