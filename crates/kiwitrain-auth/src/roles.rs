//! Role registry.
//!
//! The single table mapping each [`Role`] to its label and default
//! permissions. Nothing outside [`crate::resolver`] should interpret
//! [`RoleDefaults::All`] on its own.

use kiwitrain_core::PermissionKey;
use kiwitrain_models::Role;

/// Permissions a role grants when the user has no override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleDefaults {
    /// Every permission, unconditionally
    All,
    /// Exactly these keys
    Keys(&'static [PermissionKey]),
}

impl RoleDefaults {
    /// The empty default set.
    pub const NONE: RoleDefaults = RoleDefaults::Keys(&[]);

    pub fn contains(&self, key: PermissionKey) -> bool {
        match self {
            RoleDefaults::All => true,
            RoleDefaults::Keys(keys) => keys.contains(&key),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, RoleDefaults::All)
    }
}

const LEADER_DEFAULTS: &[PermissionKey] = &[
    PermissionKey::EditTraining,
    PermissionKey::UploadResources,
    PermissionKey::ViewTeamProgress,
    PermissionKey::ApproveHomework,
];

const ADMIN_STAFF_DEFAULTS: &[PermissionKey] = &[PermissionKey::ManageUsers];

/// Static role table.
pub struct RoleRegistry;

impl RoleRegistry {
    pub fn defaults_of(role: Role) -> RoleDefaults {
        match role {
            Role::Admin => RoleDefaults::All,
            Role::Leader => RoleDefaults::Keys(LEADER_DEFAULTS),
            Role::AdminStaff => RoleDefaults::Keys(ADMIN_STAFF_DEFAULTS),
            Role::Employee => RoleDefaults::NONE,
        }
    }

    /// Defaults for a stored role slug. Unknown slugs grant nothing.
    pub fn defaults_of_slug(slug: &str) -> RoleDefaults {
        Role::parse(slug)
            .map(Self::defaults_of)
            .unwrap_or(RoleDefaults::NONE)
    }

    pub fn label(role: Role) -> &'static str {
        match role {
            Role::Admin => "Administrator",
            Role::Leader => "Team Leader",
            Role::AdminStaff => "Admin Staff",
            Role::Employee => "Employee",
        }
    }

    /// Pre-selected keys for the override editor when a user is given `role`.
    ///
    /// Admins get an empty list: their access is never expressed as an
    /// override.
    pub fn editable_defaults(role: Role) -> Vec<PermissionKey> {
        match Self::defaults_of(role) {
            RoleDefaults::All => Vec::new(),
            RoleDefaults::Keys(keys) => keys.to_vec(),
        }
    }
}
