//! The current viewer, passed explicitly.
//!
//! A [`Session`] is built once per request or render cycle by whatever owns
//! the stored session, then handed by reference to every check. Nothing in
//! the core reads ambient state to find out who is asking.

use crate::capabilities::Capabilities;
use crate::resolver;
use kiwitrain_core::PermissionKey;
use kiwitrain_models::User;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn for_user(user: User) -> Self {
        Self { user: Some(user) }
    }

    /// Restore a session from its stored JSON form.
    ///
    /// Anything that does not parse as a user is treated as "not signed in".
    pub fn from_json(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::anonymous();
        }

        match serde_json::from_str::<Option<User>>(raw) {
            Ok(user) => Self { user },
            Err(err) => {
                warn!(error = %err, "Discarding unreadable session");
                Self::anonymous()
            }
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn has_permission(&self, key: PermissionKey) -> bool {
        resolver::has_permission(self.user(), key)
    }

    pub fn is_leader(&self) -> bool {
        resolver::is_leader(self.user())
    }

    pub fn is_admin_like(&self) -> bool {
        resolver::is_admin_like(self.user())
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::of(self.user())
    }
}
