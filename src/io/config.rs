//! Plan file loading and storage (`untrack.toml`).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::plan::MigrationPlan;

/// Load a migration plan from a TOML file.
///
/// If the file is missing, returns `MigrationPlan::default()` (the original
/// split-export migration). The loaded plan is validated before use.
pub fn load_plan(path: &Path) -> Result<MigrationPlan> {
    if !path.exists() {
        let plan = MigrationPlan::default();
        plan.validate()?;
        return Ok(plan);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let plan: MigrationPlan =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    plan.validate()?;
    Ok(plan)
}

/// Atomically write a plan to disk (temp file + rename).
pub fn write_plan(path: &Path, plan: &MigrationPlan) -> Result<()> {
    plan.validate()?;
    let mut buf = toml::to_string_pretty(plan).context("serialize plan toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("plan path missing parent {}", path.display()))?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp plan {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace plan {}", path.display()))?;
    Ok(())
}
