//! # KiwiTrain Auth
//!
//! Authorization decisions for KiwiTrain.
//!
//! - [`roles`]: The role table ([`RoleRegistry`])
//! - [`resolver`]: Role defaults combined with per-user overrides
//! - [`capabilities`]: Navigation gates built on the resolver
//! - [`session`]: The explicit viewer value threaded into every check
//!
//! Every function here is total: missing users, unknown roles and unknown
//! permission keys resolve to "denied" rather than an error.
//!
//! # Example
//!
//! ```ignore
//! use kiwitrain_auth::{has_permission, Session};
//! use kiwitrain_core::PermissionKey;
//!
//! let session = Session::from_json(&stored);
//! if session.has_permission(PermissionKey::ManageUsers) {
//!     // show the account list
//! }
//! ```

pub mod capabilities;
pub mod resolver;
pub mod roles;
pub mod session;

// Re-export commonly used types at crate root
pub use capabilities::{Capabilities, DashboardLabel};
pub use resolver::{
    effective_permissions, has_any_permission, has_permission, has_permission_str,
    is_admin_like, is_leader, normalize_custom_perms, user_from_form,
};
pub use roles::{RoleDefaults, RoleRegistry};
pub use session::Session;
