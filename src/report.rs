//! Ordered step records for a migration run.

use std::fmt;

/// One step kind in the migration sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Untrack,
    Restage,
    Verify,
    StageConfig,
    Commit,
    Push,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Untrack => "untrack",
            Step::Restage => "restage",
            Step::Verify => "verify",
            Step::StageConfig => "stage-config",
            Step::Commit => "commit",
            Step::Push => "push",
        };
        f.write_str(name)
    }
}

/// A completed step with human-readable detail (usually the path acted on).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: Step,
    pub detail: String,
}

/// Ordered record of every step a run completed. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    pub steps: Vec<StepReport>,
}

impl RunResult {
    pub fn record(&mut self, step: Step, detail: impl Into<String>) {
        self.steps.push(StepReport {
            step,
            detail: detail.into(),
        });
    }

    /// Number of completed steps of the given kind.
    pub fn count(&self, step: Step) -> usize {
        self.steps.iter().filter(|s| s.step == step).count()
    }

    /// Details of completed steps of the given kind, in completion order.
    pub fn details(&self, step: Step) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|s| s.step == step)
            .map(|s| s.detail.as_str())
            .collect()
    }
}
