//! Strongly-typed ID newtypes for domain entities.
//!
//! The remote store hands us ids as text or integers depending on the table,
//! so every id is an opaque token: we only ever compare and hash them. The
//! newtypes still keep a `ModuleId` from being passed where a `TaskId` is
//! expected.
//!
//! # Example
//!
//! ```ignore
//! use kiwitrain_models::ids::{DepartmentId, UserId};
//!
//! let dept = DepartmentId::from("D1");
//! let numeric = DepartmentId::from(7);
//! assert_eq!(numeric.as_str(), "7");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to define a strongly-typed opaque ID newtype.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from any token.
            #[inline]
            pub fn new(token: impl Into<String>) -> Self {
                Self(token.into())
            }

            /// Get the token text.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Get the inner token.
            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(token: String) -> Self {
                Self(token)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(token: &str) -> Self {
                Self(token.to_string())
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(token: i64) -> Self {
                Self(token.to_string())
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        // Accepts both text and integer tokens
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                kiwitrain_core::serde::deserialize_opaque_token(deserializer).map(Self)
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for User entities.
    UserId
);

define_id!(
    /// Strongly-typed ID for Department entities.
    DepartmentId
);

define_id!(
    /// Strongly-typed ID for TrainingPhase entities.
    PhaseId
);

define_id!(
    /// Strongly-typed ID for TrainingModule entities.
    ModuleId
);

define_id!(
    /// Strongly-typed ID for TrainingTask entities.
    TaskId
);
