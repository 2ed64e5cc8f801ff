//! Navigation capabilities.
//!
//! Page-level gates expressed through the resolver, so no screen re-derives
//! the admin rule or the override rule on its own.

use crate::resolver::{has_permission, is_admin_like, is_leader};
use kiwitrain_core::PermissionKey;
use kiwitrain_models::User;
use serde::Serialize;

/// Heading shown on the dashboard entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardLabel {
    /// Company-wide overview
    Overview,
    /// A leader's view of their own team
    TeamProgress,
}

pub fn can_view_dashboard(user: Option<&User>) -> bool {
    is_admin_like(user) || has_permission(user, PermissionKey::ViewTeamProgress)
}

pub fn can_manage_users(user: Option<&User>) -> bool {
    has_permission(user, PermissionKey::ManageUsers)
}

pub fn can_access_sales_dep(user: Option<&User>) -> bool {
    has_permission(user, PermissionKey::SalesDepAccess)
}

pub fn can_edit_training(user: Option<&User>) -> bool {
    has_permission(user, PermissionKey::EditTraining)
}

pub fn can_upload_resources(user: Option<&User>) -> bool {
    has_permission(user, PermissionKey::UploadResources)
}

pub fn can_approve_homework(user: Option<&User>) -> bool {
    has_permission(user, PermissionKey::ApproveHomework)
}

pub fn dashboard_label(user: Option<&User>) -> DashboardLabel {
    if is_leader(user) && can_view_dashboard(user) && !is_admin_like(user) {
        DashboardLabel::TeamProgress
    } else {
        DashboardLabel::Overview
    }
}

/// Every gate evaluated once, for rendering a navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub dashboard: bool,
    pub dashboard_label: DashboardLabel,
    pub manage_users: bool,
    pub sales_dep: bool,
    pub edit_training: bool,
    pub upload_resources: bool,
    pub approve_homework: bool,
}

impl Capabilities {
    pub fn of(user: Option<&User>) -> Self {
        Self {
            dashboard: can_view_dashboard(user),
            dashboard_label: dashboard_label(user),
            manage_users: can_manage_users(user),
            sales_dep: can_access_sales_dep(user),
            edit_training: can_edit_training(user),
            upload_resources: can_upload_resources(user),
            approve_homework: can_approve_homework(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiwitrain_models::Role;

    #[test]
    fn test_admin_staff_sees_dashboard_without_permission() {
        let staff = User::new("s", "Sam", Role::AdminStaff).with_custom_perms(vec![]);
        assert!(can_view_dashboard(Some(&staff)));
        assert!(!can_manage_users(Some(&staff)));
        assert_eq!(dashboard_label(Some(&staff)), DashboardLabel::Overview);
    }

    #[test]
    fn test_leader_gets_team_progress_label() {
        let leader = User::new("l", "Lee", Role::Leader);
        assert_eq!(dashboard_label(Some(&leader)), DashboardLabel::TeamProgress);

        let restricted = leader.clone().with_custom_perms(vec![]);
        assert!(!can_view_dashboard(Some(&restricted)));
        assert_eq!(dashboard_label(Some(&restricted)), DashboardLabel::Overview);
    }

    #[test]
    fn test_employee_with_sales_override() {
        let employee =
            User::new("e", "Eve", Role::Employee).with_custom_perms(vec![PermissionKey::SalesDepAccess]);
        let caps = Capabilities::of(Some(&employee));
        assert!(caps.sales_dep);
        assert!(!caps.dashboard);
        assert!(!caps.edit_training);
    }

    #[test]
    fn test_anonymous_has_no_capabilities() {
        let caps = Capabilities::of(None);
        assert!(!caps.dashboard);
        assert!(!caps.manage_users);
        assert!(!caps.sales_dep);
        assert!(!caps.edit_training);
        assert!(!caps.upload_resources);
        assert!(!caps.approve_homework);
    }

    #[test]
    fn test_admin_has_every_capability() {
        let admin = User::new("a", "Ada", Role::Admin);
        let caps = Capabilities::of(Some(&admin));
        assert!(caps.dashboard && caps.manage_users && caps.sales_dep);
        assert!(caps.edit_training && caps.upload_resources && caps.approve_homework);
        assert_eq!(caps.dashboard_label, DashboardLabel::Overview);
    }
}
