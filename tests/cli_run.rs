//! CLI tests for the lfs-untrack binary.
//!
//! Spawns the real binary and verifies exit codes for plan bootstrap,
//! invalid plans, and full runs.

use std::process::Command;

use lfs_untrack::exit_codes;
use lfs_untrack::io::config::{load_plan, write_plan};
use lfs_untrack::plan::MigrationPlan;
use lfs_untrack::test_support::{TestRepo, git_capture};

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lfs-untrack"))
}

#[test]
fn init_writes_default_plan_once() {
    let temp = tempfile::tempdir().expect("tempdir");

    let status = bin()
        .current_dir(temp.path())
        .arg("init")
        .status()
        .expect("lfs-untrack init");
    assert_eq!(status.code(), Some(exit_codes::OK));

    let written = load_plan(&temp.path().join("untrack.toml")).expect("load");
    assert_eq!(written, MigrationPlan::default());

    // A second init without --force refuses to clobber the file.
    let status = bin()
        .current_dir(temp.path())
        .arg("init")
        .status()
        .expect("lfs-untrack init");
    assert_eq!(status.code(), Some(exit_codes::INVALID));
}

#[test]
fn run_rejects_invalid_plan() {
    let temp = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        temp.path().join("untrack.toml"),
        "paths = [\"a.json\", \"a.json\"]\n",
    )
    .expect("write plan");

    let status = bin()
        .current_dir(temp.path())
        .arg("run")
        .status()
        .expect("lfs-untrack run");
    assert_eq!(status.code(), Some(exit_codes::INVALID));
}

#[test]
fn run_executes_plan_and_is_not_repeatable() {
    let repo = TestRepo::new().expect("repo");
    let remote = repo.add_bare_remote("origin").expect("remote");
    repo.write_file(".gitattributes", "*.json filter=lfs diff=lfs merge=lfs -text\n")
        .expect("attributes");
    repo.write_file("data.json", "{\"ok\": true}\n").expect("data");
    repo.commit_all("add data").expect("commit");
    repo.write_file(".gitattributes", "").expect("drop tracking");

    let plan = MigrationPlan {
        paths: vec!["data.json".to_string()],
        ..MigrationPlan::default()
    };
    write_plan(&repo.root().join("untrack.toml"), &plan).expect("write plan");

    let status = bin()
        .current_dir(repo.root())
        .arg("run")
        .status()
        .expect("lfs-untrack run");
    assert_eq!(status.code(), Some(exit_codes::OK));
    assert_eq!(
        git_capture(&remote, &["log", "-1", "--format=%s", "main"]).expect("remote log"),
        "Remove split files from LFS"
    );

    // Second run halts at the commit step (nothing staged).
    let status = bin()
        .current_dir(repo.root())
        .arg("run")
        .status()
        .expect("lfs-untrack run");
    assert_eq!(status.code(), Some(exit_codes::FAILED));
}

#[test]
fn plan_command_prints_without_touching_repo() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = bin()
        .current_dir(temp.path())
        .arg("plan")
        .output()
        .expect("lfs-untrack plan");
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("paths (8):"));
    assert!(stdout.contains("Remove split files from LFS"));
    assert!(stdout.contains("origin main"));
}
