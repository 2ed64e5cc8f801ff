//! Permission keys for KiwiTrain.
//!
//! Permissions form a closed set. Collaborators hand us strings from storage,
//! so parsing is fallible and an unrecognised key simply has no
//! [`PermissionKey`]: every check against it is a denial.
//!
//! # Example
//!
//! ```ignore
//! use kiwitrain_core::permissions::PermissionKey;
//!
//! for key in PermissionKey::ALL {
//!     println!("{} - {}", key.as_str(), key.label());
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single grantable permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKey {
    /// Edit training phases, modules and tasks
    EditTraining,
    /// Upload training resources
    UploadResources,
    /// Manage user accounts
    ManageUsers,
    /// View team training progress
    ViewTeamProgress,
    /// Approve submitted homework
    ApproveHomework,
    /// Access the sales consultant workspace
    SalesDepAccess,
}

impl PermissionKey {
    /// Every permission key, in catalog order.
    pub const ALL: [PermissionKey; 6] = [
        PermissionKey::EditTraining,
        PermissionKey::UploadResources,
        PermissionKey::ManageUsers,
        PermissionKey::ViewTeamProgress,
        PermissionKey::ApproveHomework,
        PermissionKey::SalesDepAccess,
    ];

    /// Parse a storage key. Unknown keys yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "edit_training" => Some(Self::EditTraining),
            "upload_resources" => Some(Self::UploadResources),
            "manage_users" => Some(Self::ManageUsers),
            "view_team_progress" => Some(Self::ViewTeamProgress),
            "approve_homework" => Some(Self::ApproveHomework),
            "sales_dep_access" => Some(Self::SalesDepAccess),
            _ => None,
        }
    }

    /// The storage key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EditTraining => "edit_training",
            Self::UploadResources => "upload_resources",
            Self::ManageUsers => "manage_users",
            Self::ViewTeamProgress => "view_team_progress",
            Self::ApproveHomework => "approve_homework",
            Self::SalesDepAccess => "sales_dep_access",
        }
    }

    /// Human readable label for permission editors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::EditTraining => "Edit training plan",
            Self::UploadResources => "Upload resources",
            Self::ManageUsers => "Manage employees",
            Self::ViewTeamProgress => "View team progress",
            Self::ApproveHomework => "Approve homework",
            Self::SalesDepAccess => "Sales consultant workspace",
        }
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known permission key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPermission(pub String);

impl fmt::Display for UnknownPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown permission: {}", self.0)
    }
}

impl std::error::Error for UnknownPermission {}

impl FromStr for PermissionKey {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownPermission(s.to_string()))
    }
}
