//! Permission resolution.
//!
//! [`has_permission`] is the only place that combines role defaults with a
//! user's override list. The rules, in order:
//!
//! 1. No user: denied.
//! 2. Unknown role: denied.
//! 3. Role grants everything (admin): allowed, whatever the override says.
//! 4. Override list present: allowed iff the key is in it. An empty list
//!    denies everything; it never merges with the role defaults.
//! 5. Otherwise: allowed iff the role defaults contain the key.

use crate::roles::{RoleDefaults, RoleRegistry};
use kiwitrain_core::PermissionKey;
use kiwitrain_models::{Role, User, UserForm};
use validator::{Validate, ValidationErrors};

pub fn has_permission(user: Option<&User>, key: PermissionKey) -> bool {
    let Some(user) = user else {
        return false;
    };
    let Some(role) = user.role else {
        return false;
    };

    let defaults = RoleRegistry::defaults_of(role);
    if let RoleDefaults::All = defaults {
        return true;
    }

    match &user.custom_perms {
        Some(perms) => perms.contains(&key),
        None => defaults.contains(key),
    }
}

/// Same as [`has_permission`] for a key given as text. Unknown keys are denied.
pub fn has_permission_str(user: Option<&User>, key: &str) -> bool {
    PermissionKey::parse(key).is_some_and(|key| has_permission(user, key))
}

pub fn has_any_permission(user: Option<&User>, keys: &[PermissionKey]) -> bool {
    keys.iter().any(|key| has_permission(user, *key))
}

/// Every key the user holds, in catalog order.
pub fn effective_permissions(user: Option<&User>) -> Vec<PermissionKey> {
    PermissionKey::ALL
        .into_iter()
        .filter(|key| has_permission(user, *key))
        .collect()
}

pub fn is_leader(user: Option<&User>) -> bool {
    user.and_then(|u| u.role) == Some(Role::Leader)
}

/// Admins and admin staff.
pub fn is_admin_like(user: Option<&User>) -> bool {
    matches!(
        user.and_then(|u| u.role),
        Some(Role::Admin) | Some(Role::AdminStaff)
    )
}

/// Turn an override-editor selection into the value stored on the user.
///
/// Leaders and admin staff always keep a concrete list, so clearing every
/// box really removes their defaults. For other roles an empty selection
/// means "follow the role defaults".
pub fn normalize_custom_perms(
    role: Role,
    selected: Vec<PermissionKey>,
) -> Option<Vec<PermissionKey>> {
    let mut perms: Vec<PermissionKey> = Vec::with_capacity(selected.len());
    for key in selected {
        if !perms.contains(&key) {
            perms.push(key);
        }
    }

    match role {
        Role::Leader | Role::AdminStaff => Some(perms),
        _ if perms.is_empty() => None,
        _ => Some(perms),
    }
}

/// Validate a submitted account form and build the user it describes.
pub fn user_from_form(form: UserForm) -> Result<User, ValidationErrors> {
    form.validate()?;

    Ok(User {
        id: form.id,
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        role: Some(form.role),
        department_id: form.department_id,
        custom_perms: normalize_custom_perms(form.role, form.custom_perms),
    })
}
