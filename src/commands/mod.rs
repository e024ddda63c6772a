//! Commands run by the binary

pub mod run;

pub use run::{run, RunReport};
