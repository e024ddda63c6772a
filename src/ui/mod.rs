//! Console output: log line format and run summary

mod console;
mod summary;

pub use console::{init_logging, ConsoleFormat};
pub use summary::format_summary;
