//! Step error taxonomy for migration runs.
//!
//! Each variant names the step that failed and carries the underlying git
//! failure as its source, so the tool's message reaches the user unchanged
//! through the error chain.

use thiserror::Error;

use crate::io::git::GitError;
use crate::report::Step;

#[derive(Debug, Error)]
pub enum MigrationError {
    /// A path could not be removed from the index.
    #[error("untrack '{path}' from index")]
    Untrack {
        path: String,
        #[source]
        source: GitError,
    },

    /// A path could not be re-staged as a regular file.
    #[error("restage '{path}' as regular file")]
    Restage {
        path: String,
        #[source]
        source: GitError,
    },

    /// The staged blob could not be read back for the post-restage check.
    #[error("verify restaged '{path}'")]
    Verify {
        path: String,
        #[source]
        source: GitError,
    },

    /// The post-restage check found the staged blob is still an LFS pointer.
    #[error("'{path}' is still an LFS pointer after restage")]
    StillPointer { path: String },

    /// The attributes file could not be staged.
    #[error("stage attributes file '{path}'")]
    Stage {
        path: String,
        #[source]
        source: GitError,
    },

    /// The commit failed (including the nothing-staged case).
    #[error("commit staged changes")]
    Commit {
        #[source]
        source: GitError,
    },

    /// The push was rejected or could not reach the remote.
    #[error("push to '{remote} {branch}'")]
    Push {
        remote: String,
        branch: String,
        #[source]
        source: GitError,
    },
}

impl MigrationError {
    /// The step that was in progress when the run halted.
    pub fn step(&self) -> Step {
        match self {
            MigrationError::Untrack { .. } => Step::Untrack,
            MigrationError::Restage { .. } => Step::Restage,
            MigrationError::Verify { .. } | MigrationError::StillPointer { .. } => Step::Verify,
            MigrationError::Stage { .. } => Step::StageConfig,
            MigrationError::Commit { .. } => Step::Commit,
            MigrationError::Push { .. } => Step::Push,
        }
    }
}
