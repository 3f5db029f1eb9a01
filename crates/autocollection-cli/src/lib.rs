//! Command-line driver for AutoCollection
//!
//! Loads a compilation snapshot, runs every contract over it and writes the
//! published units to disk.

pub mod output;
pub mod runner;
pub mod sink;

pub use runner::{Cli, RunSummary};
pub use sink::DirectorySink;
