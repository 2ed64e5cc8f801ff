//! KiwiTrain Observability Module
//!
//! Console logging for every tracing macro (`info!`, `warn!`, `debug!`, ...)
//! emitted by the KiwiTrain crates.
//!
//! # Examples
//!
//! ```no_run
//! use kiwitrain_observability::init_basic_console_logging;
//!
//! fn main() {
//!     init_basic_console_logging();
//!     tracing::info!("ready");
//! }
//! ```

pub mod basic_logging;

pub use basic_logging::{LogFormat, default_filter_directives, init_basic_console_logging};
