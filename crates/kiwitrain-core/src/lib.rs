//! # KiwiTrain Core
//!
//! Core types and utilities shared by every KiwiTrain crate.
//!
//! - [`permissions`]: The closed set of permission keys and their labels
//! - [`serde`]: Lenient deserialization helpers for collaborator-supplied rows
//!
//! # Example
//!
//! ```ignore
//! use kiwitrain_core::PermissionKey;
//!
//! let key = PermissionKey::parse("edit_training");
//! assert_eq!(key, Some(PermissionKey::EditTraining));
//! assert_eq!(PermissionKey::parse("delete_everything"), None);
//! ```

pub mod permissions;
pub mod serde;

// Re-export commonly used types at crate root
pub use permissions::PermissionKey;
