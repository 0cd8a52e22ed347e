//! Git adapter for the migration runner.
//!
//! The runner drives git exclusively through its CLI, so we keep a small,
//! explicit wrapper around `git` subprocess calls. Failures preserve the
//! tool's own message so it can be surfaced unchanged.

use std::path::PathBuf;
use std::process::{Command, Output};

use thiserror::Error;
use tracing::{debug, instrument};

/// A failed git invocation.
#[derive(Debug, Error)]
pub enum GitError {
    /// The `git` binary could not be spawned at all.
    #[error("spawn git {args}: {source}")]
    Spawn {
        args: String,
        #[source]
        source: std::io::Error,
    },
    /// git ran and exited non-zero; `message` is its stderr (stdout when
    /// stderr is empty, e.g. `git commit` with nothing staged).
    #[error("git {args} failed: {message}")]
    Command { args: String, message: String },
}

/// Wrapper for executing git commands in a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Remove a path from the index, leaving the working tree copy in place.
    #[instrument(skip_all, fields(path))]
    pub fn rm_cached(&self, path: &str) -> Result<(), GitError> {
        debug!(path, "removing from index");
        self.run_checked(&["rm", "--cached", path])?;
        Ok(())
    }

    /// Stage a path with the current filter configuration.
    #[instrument(skip_all, fields(path))]
    pub fn add(&self, path: &str) -> Result<(), GitError> {
        debug!(path, "staging");
        self.run_checked(&["add", path])?;
        Ok(())
    }

    /// Stage all changes (respects .gitignore).
    pub fn add_all(&self) -> Result<(), GitError> {
        self.run_checked(&["add", "-A"])?;
        Ok(())
    }

    /// True if there is anything staged for commit.
    pub fn has_staged_changes(&self) -> Result<bool, GitError> {
        let out = self.run_capture(&["diff", "--cached", "--name-only"])?;
        Ok(!out.trim().is_empty())
    }

    /// Commit the staged index. An empty index makes git itself fail.
    #[instrument(skip_all)]
    pub fn commit(&self, message: &str) -> Result<(), GitError> {
        debug!("committing staged changes");
        self.run_checked(&["commit", "-m", message])?;
        Ok(())
    }

    /// Push a branch to a remote. Blocks until git exits; no timeout.
    #[instrument(skip_all, fields(remote, branch))]
    pub fn push(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        debug!(remote, branch, "pushing");
        self.run_checked(&["push", remote, branch])?;
        Ok(())
    }

    /// Size in bytes of the stage-0 index blob for `path`.
    pub fn staged_blob_size(&self, path: &str) -> Result<u64, GitError> {
        let spec = format!(":0:{path}");
        let out = self.run_capture(&["cat-file", "-s", &spec])?;
        out.trim()
            .parse()
            .map_err(|_| GitError::Command {
                args: format!("cat-file -s {spec}"),
                message: format!("unexpected size output '{}'", out.trim()),
            })
    }

    /// Contents of the stage-0 index blob for `path`.
    pub fn staged_blob(&self, path: &str) -> Result<Vec<u8>, GitError> {
        let spec = format!(":0:{path}");
        let out = self.run_checked(&["cat-file", "blob", &spec])?;
        Ok(out.stdout)
    }

    fn run_capture(&self, args: &[&str]) -> Result<String, GitError> {
        let output = self.run_checked(args)?;
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn run_checked(&self, args: &[&str]) -> Result<Output, GitError> {
        let output = self.run(args)?;
        if !output.status.success() {
            return Err(GitError::Command {
                args: args.join(" "),
                message: failure_message(&output),
            });
        }
        Ok(output)
    }

    fn run(&self, args: &[&str]) -> Result<Output, GitError> {
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|source| GitError::Spawn {
                args: args.join(" "),
                source,
            })
    }
}

/// Best available message for a failed invocation: stderr, else stdout.
fn failure_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let trimmed = stderr.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
