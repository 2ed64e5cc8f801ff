//! # KiwiTrain Config
//!
//! Configuration types for KiwiTrain.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`snapshot`]: Where training snapshots are read from and written to
//! - [`report`]: Dashboard report rendering options
//!
//! # Example
//!
//! ```ignore
//! use kiwitrain_config::{ReportConfig, SnapshotConfig};
//!
//! let snapshot_config = SnapshotConfig::from_env();
//! let report_config = ReportConfig::from_env();
//! ```

pub mod report;
pub mod snapshot;

// Re-export commonly used types at crate root
pub use report::ReportConfig;
pub use snapshot::SnapshotConfig;
