//! # KiwiTrain CLI
//!
//! Report rendering and snapshot seeding used by the `kiwitrain-cli` binary.
//!
//! ## Usage
//!
//! ```ignore
//! use kiwitrain_cli::seeder::{seed_snapshot, SeedConfig};
//!
//! let config = SeedConfig::new(5); // 5 departments with defaults
//! seed_snapshot(&config, "storage/snapshot.json").await?;
//! ```

pub mod report;
pub mod seeder;
