//! I/O side of the migration runner.

pub mod config;
pub mod git;
