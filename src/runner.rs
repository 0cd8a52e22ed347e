//! Orchestration for executing a migration plan.
//!
//! Steps run strictly in order: untrack, restage, verify, stage the
//! attributes file, commit, push. The first failure halts the run; there is
//! no retry and no rollback, matching what running the commands by hand
//! would leave behind.

use tracing::{debug, info, instrument};

use crate::error::MigrationError;
use crate::io::git::Git;
use crate::plan::MigrationPlan;
use crate::report::{RunResult, Step};

/// First line of every LFS pointer file.
const LFS_POINTER_PREFIX: &[u8] = b"version https://git-lfs.github.com/spec/v1";

/// Pointer files are tiny; larger staged blobs cannot be pointers.
const LFS_POINTER_MAX_BYTES: u64 = 1024;

/// Knobs for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Check that restaged blobs are no longer LFS pointers.
    pub verify: bool,
    /// Push the migration commit to the plan's remote/branch.
    pub push: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            verify: true,
            push: true,
        }
    }
}

/// Execute `plan` against the repository behind `git`.
///
/// Returns the ordered step record on success. On failure the error names
/// the step in progress and carries git's own message in its source chain.
#[instrument(skip_all, fields(paths = plan.paths.len()))]
pub fn run_migration(
    git: &Git,
    plan: &MigrationPlan,
    opts: &RunOptions,
) -> Result<RunResult, MigrationError> {
    let mut result = RunResult::default();

    println!("untracking {} path(s) from the index", plan.paths.len());
    for path in &plan.paths {
        debug!(path, "untrack");
        git.rm_cached(path).map_err(|source| MigrationError::Untrack {
            path: path.clone(),
            source,
        })?;
        result.record(Step::Untrack, path);
    }
    println!("untracked {} path(s)", result.count(Step::Untrack));

    println!("restaging {} path(s) as regular files", plan.paths.len());
    for path in &plan.paths {
        debug!(path, "restage");
        git.add(path).map_err(|source| MigrationError::Restage {
            path: path.clone(),
            source,
        })?;
        result.record(Step::Restage, path);
    }
    println!("restaged {} path(s)", result.count(Step::Restage));

    if opts.verify {
        println!("verifying restaged paths are no longer LFS pointers");
        for path in &plan.paths {
            verify_not_pointer(git, path)?;
            result.record(Step::Verify, path);
        }
        println!("verified {} path(s)", result.count(Step::Verify));
    } else {
        debug!("pointer verification disabled");
    }

    println!("staging {}", plan.attributes_file);
    git.add(&plan.attributes_file)
        .map_err(|source| MigrationError::Stage {
            path: plan.attributes_file.clone(),
            source,
        })?;
    result.record(Step::StageConfig, &plan.attributes_file);
    println!("staged {}", plan.attributes_file);

    println!("committing: {}", plan.message);
    git.commit(&plan.message)
        .map_err(|source| MigrationError::Commit { source })?;
    result.record(Step::Commit, &plan.message);
    println!("committed");

    if opts.push {
        println!("pushing to {} {}", plan.remote, plan.branch);
        git.push(&plan.remote, &plan.branch)
            .map_err(|source| MigrationError::Push {
                remote: plan.remote.clone(),
                branch: plan.branch.clone(),
                source,
            })?;
        result.record(Step::Push, format!("{} {}", plan.remote, plan.branch));
        println!("pushed to {} {}", plan.remote, plan.branch);
    } else {
        info!("push skipped");
    }

    Ok(result)
}

/// Post-restage check: the staged blob must not be an LFS pointer stub.
///
/// Blobs over [`LFS_POINTER_MAX_BYTES`] pass without a content read.
fn verify_not_pointer(git: &Git, path: &str) -> Result<(), MigrationError> {
    let size = git
        .staged_blob_size(path)
        .map_err(|source| MigrationError::Verify {
            path: path.to_string(),
            source,
        })?;
    if size > LFS_POINTER_MAX_BYTES {
        debug!(path, size, "staged blob too large to be a pointer");
        return Ok(());
    }
    let blob = git
        .staged_blob(path)
        .map_err(|source| MigrationError::Verify {
            path: path.to_string(),
            source,
        })?;
    if is_lfs_pointer(&blob) {
        return Err(MigrationError::StillPointer {
            path: path.to_string(),
        });
    }
    Ok(())
}

fn is_lfs_pointer(blob: &[u8]) -> bool {
    blob.starts_with(LFS_POINTER_PREFIX)
}
