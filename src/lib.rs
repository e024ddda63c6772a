//! # bucketize - date-bucketed file organizer
//!
//! Scans a source tree, keeps files whose path ends with a given extension,
//! and copies or moves them into `target/YYYY/YYYY-MM-DD[/subdir]` based on
//! their last-modified date, then re-aligns the transferred files'
//! timestamps.

// Module declarations
pub mod classify;
pub mod commands;
pub mod config;
pub mod executor;
pub mod scanner;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use types::{BucketizeError, DateSource, TransferPolicy, TransferRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
