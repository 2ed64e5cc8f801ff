//! # KiwiTrain Models
//!
//! Domain models and DTOs for KiwiTrain.
//!
//! Every row the core consumes is defined here in its canonical shape. The
//! collaborator that talks to the remote store is responsible for mapping
//! legacy column names onto these fields before handing rows over.
//!
//! # Modules
//!
//! - [`ids`]: Opaque, strongly-typed entity ids
//! - [`training`]: Departments, phases, modules, tasks and task progress
//! - [`users`]: Users, roles, the account form and the account filter
//!
//! # Example
//!
//! ```ignore
//! use kiwitrain_models::{Role, User};
//!
//! let leader = User::new("u1", "Ann", Role::Leader).with_department("D1");
//! assert!(leader.custom_perms.is_none());
//! ```

pub mod ids;
pub mod training;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use ids::{DepartmentId, ModuleId, PhaseId, TaskId, UserId};

pub use training::{
    Department, TaskProgress, TaskType, TrainingModule, TrainingPhase, TrainingTask,
};

pub use users::{Role, UnknownRole, User, UserFilterParams, UserForm};
