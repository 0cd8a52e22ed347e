//! Migration plan: which paths leave LFS tracking and where the result goes.

use std::collections::HashSet;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// A migration plan (TOML).
///
/// This file is intended to be edited by humans. Missing fields fall back to
/// the defaults below, which reproduce the original split-export migration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MigrationPlan {
    /// Repository-relative paths to move out of LFS tracking, in order.
    ///
    /// The same sequence drives both the untrack and the restage step, so a
    /// path can never be dropped or duplicated between the two.
    pub paths: Vec<String>,

    /// Attributes file controlling filter behavior, staged with the change.
    pub attributes_file: String,

    /// Commit message for the migration commit.
    pub message: String,

    /// Remote to push to.
    pub remote: String,

    /// Branch to push.
    pub branch: String,
}

impl Default for MigrationPlan {
    fn default() -> Self {
        let exports = ["data-export/chatgpt-export", "data-export/claude-export"];
        let buckets = ["last-3-months", "3-6-months", "6-12-months", "older"];
        let paths = exports
            .iter()
            .flat_map(|dir| {
                buckets
                    .iter()
                    .map(move |bucket| format!("{dir}/split/{bucket}.json"))
            })
            .collect();
        Self {
            paths,
            attributes_file: ".gitattributes".to_string(),
            message: "Remove split files from LFS".to_string(),
            remote: "origin".to_string(),
            branch: "main".to_string(),
        }
    }
}

impl MigrationPlan {
    /// Check the plan for structural problems before any git call is made.
    ///
    /// An empty `paths` list is valid (the untrack/restage steps become
    /// no-ops); empty strings and duplicate paths are not.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for path in &self.paths {
            if path.trim().is_empty() {
                return Err(anyhow!("paths must not contain empty entries"));
            }
            if !seen.insert(path.as_str()) {
                return Err(anyhow!("duplicate path in plan: '{path}'"));
            }
        }
        if self.attributes_file.trim().is_empty() {
            return Err(anyhow!("attributes_file must not be empty"));
        }
        if self.message.trim().is_empty() {
            return Err(anyhow!("message must not be empty"));
        }
        if self.remote.trim().is_empty() {
            return Err(anyhow!("remote must not be empty"));
        }
        if self.branch.trim().is_empty() {
            return Err(anyhow!("branch must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plan_is_valid() {
        let plan = MigrationPlan::default();
        plan.validate().expect("default plan validates");
        assert_eq!(plan.paths.len(), 8);
        assert!(
            plan.paths
                .iter()
                .all(|path| path.starts_with("data-export/") && path.ends_with(".json"))
        );
    }

    #[test]
    fn empty_path_list_is_valid() {
        let plan = MigrationPlan {
            paths: Vec::new(),
            ..MigrationPlan::default()
        };
        plan.validate().expect("empty path list validates");
    }

    #[test]
    fn rejects_duplicate_paths() {
        let plan = MigrationPlan {
            paths: vec!["a/x.json".to_string(), "a/x.json".to_string()],
            ..MigrationPlan::default()
        };
        let err = plan.validate().expect_err("duplicates rejected");
        assert!(err.to_string().contains("duplicate path"));
    }

    #[test]
    fn rejects_empty_path_entry() {
        let plan = MigrationPlan {
            paths: vec!["a/x.json".to_string(), "  ".to_string()],
            ..MigrationPlan::default()
        };
        assert!(plan.validate().is_err());
    }

    #[test]
    fn rejects_blank_fields() {
        for field in ["attributes_file", "message", "remote", "branch"] {
            let mut plan = MigrationPlan::default();
            match field {
                "attributes_file" => plan.attributes_file = String::new(),
                "message" => plan.message = String::new(),
                "remote" => plan.remote = String::new(),
                _ => plan.branch = String::new(),
            }
            assert!(plan.validate().is_err(), "blank {field} should fail");
        }
    }
}
