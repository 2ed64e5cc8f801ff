//! # KiwiTrain
//!
//! A role-gated training progress core. KiwiTrain decides who may see what
//! (role defaults versus per-user permission overrides) and turns a flat
//! snapshot of training rows into completion rates, leaderboards and a
//! numbered day plan.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── kiwitrain-core/           # PermissionKey catalog, lenient serde helpers
//! ├── kiwitrain-models/         # Ids, users, roles, training rows
//! ├── kiwitrain-auth/           # Role table, permission resolver, session
//! ├── kiwitrain-progress/       # Hierarchy index, completion, aggregation
//! ├── kiwitrain-config/         # Environment configuration
//! ├── kiwitrain-observability/  # Console logging
//! └── kiwitrain-cli/            # report / check / seed commands
//! src/
//! ├── snapshot.rs               # Snapshot model, loader, progress row normalisation
//! ├── store.rs                  # Last-completed-wins snapshot store
//! └── dashboard.rs              # Per-viewer dashboard composition
//! ```
//!
//! ## Roles
//!
//! | Role | Label | Default permissions |
//! |------|-------|---------------------|
//! | `admin` | Administrator | Everything, overrides ignored |
//! | `leader` | Team Leader | edit_training, upload_resources, view_team_progress, approve_homework |
//! | `admin_staff` | Admin Staff | manage_users |
//! | `employee` | Employee | None |
//!
//! A user's `custom_perms` list, when present, replaces the role defaults
//! entirely. An empty list means no permissions at all.
//!
//! ## Progress
//!
//! Rates are integer percentages. A department's rate is total completions
//! over total possible completions (`users × tasks`), never an average of
//! per-user rates.
//!
//! ## Example
//!
//! ```ignore
//! use kiwitrain::{Dashboard, SnapshotStore, TrainingSnapshot};
//! use kiwitrain_auth::Session;
//!
//! let store = SnapshotStore::new();
//! store.refresh(TrainingSnapshot::load("storage/snapshot.json")).await?;
//!
//! let session = Session::from_json(&stored_session);
//! let dashboard = store.dashboard(&session);
//! if dashboard.is_access_denied() {
//!     // hide the dashboard
//! }
//! ```

pub mod dashboard;
pub mod snapshot;
pub mod store;

pub use dashboard::{Dashboard, DepartmentReport, ModuleDay, OwnProgress, ViewerSummary};
pub use snapshot::{SnapshotError, TrainingSnapshot};
pub use store::{PublishedSnapshot, SnapshotStore};
