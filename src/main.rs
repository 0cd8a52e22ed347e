//! Migrate configured paths out of Git LFS tracking and push the result.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};

use lfs_untrack::io::config::{load_plan, write_plan};
use lfs_untrack::io::git::Git;
use lfs_untrack::plan::MigrationPlan;
use lfs_untrack::runner::{RunOptions, run_migration};
use lfs_untrack::{exit_codes, logging};

#[derive(Parser)]
#[command(
    name = "lfs-untrack",
    version,
    about = "Move paths out of Git LFS tracking and push the result"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the default migration plan to `untrack.toml`.
    Init {
        /// Overwrite an existing plan file.
        #[arg(short, long)]
        force: bool,
    },
    /// Print the resolved migration plan without touching the repository.
    Plan {
        /// Plan file (missing file resolves to the built-in default plan).
        #[arg(long, default_value = "untrack.toml")]
        plan: PathBuf,
    },
    /// Execute the migration plan against the repository in the current directory.
    Run {
        /// Plan file (missing file resolves to the built-in default plan).
        #[arg(long, default_value = "untrack.toml")]
        plan: PathBuf,
        /// Skip the post-restage LFS pointer check.
        #[arg(long)]
        no_verify: bool,
        /// Stop after the commit; do not push.
        #[arg(long)]
        skip_push: bool,
    },
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let code = match dispatch(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn dispatch(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Init { force } => cmd_init(force),
        Command::Plan { plan } => cmd_plan(&plan),
        Command::Run {
            plan,
            no_verify,
            skip_push,
        } => cmd_run(&plan, no_verify, skip_push),
    }
}

fn cmd_init(force: bool) -> Result<i32> {
    let path = Path::new("untrack.toml");
    if path.exists() && !force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    write_plan(path, &MigrationPlan::default())?;
    println!("wrote {}", path.display());
    Ok(exit_codes::OK)
}

fn cmd_plan(plan_path: &Path) -> Result<i32> {
    let plan = load_plan(plan_path)?;
    println!("paths ({}):", plan.paths.len());
    for path in &plan.paths {
        println!("  {path}");
    }
    println!("attributes file: {}", plan.attributes_file);
    println!("commit message:  {}", plan.message);
    println!("push target:     {} {}", plan.remote, plan.branch);
    Ok(exit_codes::OK)
}

fn cmd_run(plan_path: &Path, no_verify: bool, skip_push: bool) -> Result<i32> {
    let plan = load_plan(plan_path)?;
    let workdir = std::env::current_dir().context("resolve working directory")?;
    let git = Git::new(workdir);
    let opts = RunOptions {
        verify: !no_verify,
        push: !skip_push,
    };
    match run_migration(&git, &plan, &opts) {
        Ok(result) => {
            println!("migration complete ({} step(s))", result.steps.len());
            Ok(exit_codes::OK)
        }
        Err(err) => {
            let step = err.step();
            eprintln!("failed at {step} step: {:#}", anyhow::Error::new(err));
            Ok(exit_codes::FAILED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::parse_from(["lfs-untrack", "init"]);
        assert!(matches!(cli.command, Command::Init { force: false }));
    }

    #[test]
    fn parse_run_defaults() {
        let cli = Cli::parse_from(["lfs-untrack", "run"]);
        match cli.command {
            Command::Run {
                plan,
                no_verify,
                skip_push,
            } => {
                assert_eq!(plan, PathBuf::from("untrack.toml"));
                assert!(!no_verify);
                assert!(!skip_push);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn parse_run_flags() {
        let cli = Cli::parse_from([
            "lfs-untrack",
            "run",
            "--plan",
            "other.toml",
            "--no-verify",
            "--skip-push",
        ]);
        match cli.command {
            Command::Run {
                plan,
                no_verify,
                skip_push,
            } => {
                assert_eq!(plan, PathBuf::from("other.toml"));
                assert!(no_verify);
                assert!(skip_push);
            }
            _ => panic!("expected run"),
        }
    }
}
