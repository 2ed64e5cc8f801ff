//! User domain models and DTOs.
//!
//! This module contains the user entity, the closed [`Role`] set, the form
//! submitted when an account is created or edited, and the keyword filter
//! used by the account list.

use crate::ids::{DepartmentId, UserId};
use kiwitrain_core::PermissionKey;
use kiwitrain_core::serde::{
    deserialize_lenient, deserialize_lenient_list, deserialize_null_default,
    deserialize_optional_opaque,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Account role. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access, cannot be restricted
    Admin,
    /// Leads one department's training
    Leader,
    /// Administrative staff
    AdminStaff,
    /// Regular trainee
    Employee,
}

impl Role {
    /// Every role, most privileged first.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Leader, Role::AdminStaff, Role::Employee];

    /// Parse a role slug. Unknown slugs yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "leader" => Some(Self::Leader),
            "admin_staff" => Some(Self::AdminStaff),
            "employee" => Some(Self::Employee),
            _ => None,
        }
    }

    /// The role slug.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Leader => "leader",
            Self::AdminStaff => "admin_staff",
            Self::Employee => "employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known role slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// A user account as supplied by the collaborator.
///
/// `role` is `None` when the stored slug is missing or unknown; such users
/// are denied everything. `custom_perms` is `None` when the user follows
/// their role defaults and `Some` when the list replaces them, including
/// `Some(vec![])` for "no permissions at all".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub role: Option<Role>,
    #[serde(default, deserialize_with = "deserialize_optional_opaque")]
    pub department_id: Option<DepartmentId>,
    #[serde(default, deserialize_with = "deserialize_lenient_list")]
    pub custom_perms: Option<Vec<PermissionKey>>,
}

impl User {
    /// Create a user following their role defaults, with no department.
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            role: Some(role),
            department_id: None,
            custom_perms: None,
        }
    }

    /// Set the user's department.
    pub fn with_department(mut self, department_id: impl Into<DepartmentId>) -> Self {
        self.department_id = Some(department_id.into());
        self
    }

    /// Replace role defaults with an explicit permission list.
    pub fn with_custom_perms(mut self, perms: Vec<PermissionKey>) -> Self {
        self.custom_perms = Some(perms);
        self
    }

    /// Set the user's email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Whether the user belongs to the given department.
    pub fn belongs_to(&self, department_id: &DepartmentId) -> bool {
        self.department_id.as_ref() == Some(department_id)
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Form submitted when an account is created or edited.
///
/// `custom_perms` is the raw checkbox selection; turning it into an override
/// (or no override) depends on the role and is done by the auth crate.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserForm {
    pub id: UserId,
    #[validate(custom(function = "validate_not_blank", message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    pub role: Role,
    #[serde(default, deserialize_with = "deserialize_optional_opaque")]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub custom_perms: Vec<PermissionKey>,
}

/// Keyword filter for the account list.
#[derive(Debug, Clone, Default, Hash, Deserialize)]
pub struct UserFilterParams {
    /// Matched case-insensitively against name, email, role and department
    pub q: Option<String>,
}

impl UserFilterParams {
    pub fn new(q: impl Into<String>) -> Self {
        Self { q: Some(q.into()) }
    }

    /// Whether `user` matches the keyword. A blank keyword matches everyone.
    pub fn matches(&self, user: &User) -> bool {
        let keyword = match self.q.as_deref().map(str::trim) {
            Some(kw) if !kw.is_empty() => kw.to_lowercase(),
            _ => return true,
        };

        let role = user.role.map(|r| r.as_str()).unwrap_or_default();
        let department = user
            .department_id
            .as_ref()
            .map(|d| d.as_str())
            .unwrap_or_default();

        [user.name.as_str(), user.email.as_str(), role, department]
            .iter()
            .any(|field| field.to_lowercase().contains(&keyword))
    }

    /// Keep the users matching the keyword, in input order.
    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|u| self.matches(u)).collect()
    }
}
