//! Snapshot file location.
//!
//! - `KIWITRAIN_SNAPSHOT_PATH`: JSON snapshot file (default: `storage/snapshot.json`)

use std::path::PathBuf;

pub const DEFAULT_SNAPSHOT_PATH: &str = "storage/snapshot.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotConfig {
    pub path: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
        }
    }
}

impl SnapshotConfig {
    /// Creates a new `SnapshotConfig` from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values fall back to the
    /// default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = lookup("KIWITRAIN_SNAPSHOT_PATH")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH));

        Self { path }
    }
}
