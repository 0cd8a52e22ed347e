//! Move paths out of Git LFS tracking.
//!
//! This crate implements a small migration runner: given a plan (an ordered
//! list of repository-relative paths plus an attributes file, commit message,
//! and remote/branch target), it untracks each path from the index, re-adds
//! it as a regular file, stages the attributes file, commits, and pushes.
//! Git is driven exclusively through its CLI. The architecture keeps a strict
//! separation:
//!
//! - **Pure logic** ([`plan`], [`report`], [`error`]): plan validation, step
//!   reporting, the step error taxonomy. No I/O.
//! - **[`io`]**: side-effecting operations (git subprocess calls, plan file
//!   load/store). Isolated so tests can drive real repositories in tempdirs.
//!
//! [`runner`] coordinates the two to implement the `run` CLI command.

pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod plan;
pub mod report;
pub mod runner;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
