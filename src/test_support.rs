//! Test-only helpers for exercising migrations against real git repositories.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

use crate::io::git::Git;

/// A throwaway git repository (with an initial empty commit on `main`).
pub struct TestRepo {
    temp: TempDir,
    root: PathBuf,
}

impl TestRepo {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        let root = temp.path().join("repo");
        fs::create_dir(&root).context("create repo dir")?;
        run_git(&root, &["init", "--initial-branch=main"])?;
        run_git(&root, &["config", "user.name", "Test User"])?;
        run_git(&root, &["config", "user.email", "test@example.com"])?;
        run_git(&root, &["config", "commit.gpgsign", "false"])?;
        run_git(&root, &["commit", "--allow-empty", "-m", "init"])?;
        Ok(Self { temp, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn git(&self) -> Git {
        Git::new(&self.root)
    }

    /// Write a file relative to the repo root, creating parent directories.
    pub fn write_file(&self, rel: &str, contents: &str) -> Result<()> {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn delete_file(&self, rel: &str) -> Result<()> {
        let path = self.root.join(rel);
        fs::remove_file(&path).with_context(|| format!("delete {}", path.display()))?;
        Ok(())
    }

    /// Stage everything and commit it.
    pub fn commit_all(&self, message: &str) -> Result<()> {
        let git = self.git();
        git.add_all()?;
        git.commit(message)?;
        Ok(())
    }

    /// Create a bare sibling repository and register it as a remote.
    pub fn add_bare_remote(&self, name: &str) -> Result<PathBuf> {
        let remote_dir = self.temp.path().join(format!("{name}.git"));
        let remote_str = remote_dir.to_string_lossy().into_owned();
        run_git(self.temp.path(), &["init", "--bare", &remote_str])?;
        run_git(&self.root, &["remote", "add", name, &remote_str])?;
        Ok(remote_dir)
    }

    pub fn head_message(&self) -> Result<String> {
        git_capture(&self.root, &["log", "-1", "--format=%s"])
    }

    pub fn commit_count(&self) -> Result<usize> {
        let out = git_capture(&self.root, &["rev-list", "--count", "HEAD"])?;
        out.parse().context("parse commit count")
    }
}

/// Run git in `dir`, failing with its stderr on non-zero exit.
pub fn run_git(dir: &Path, args: &[&str]) -> Result<()> {
    git_capture(dir, args).map(drop)
}

/// Run git in `dir` and return trimmed stdout.
pub fn git_capture(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("spawn git {}", args.join(" ")))?;
    if !output.status.success() {
        return Err(anyhow!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Content of an LFS pointer file for the given oid/size.
pub fn lfs_pointer_stub(oid: &str, size: u64) -> String {
    format!("version https://git-lfs.github.com/spec/v1\noid sha256:{oid}\nsize {size}\n")
}
