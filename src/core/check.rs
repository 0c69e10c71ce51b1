//! Check command logic
//!
//! Validates a catalog against the filesystem and the search path and
//! reports what would run, without running anything.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::core::config::RunConfig;
use crate::core::step::{Step, StepKind};

/// Preflight result for one step
#[derive(Debug, Clone, Serialize)]
pub struct StepCheck {
    /// Step name
    pub name: String,
    /// Step kind
    pub kind: StepKind,
    /// Resolved step directory
    pub dir: PathBuf,
    /// Whether the directory exists
    pub dir_exists: bool,
    /// Program as written in the catalog
    pub program: String,
    /// Where the program resolves to, if anywhere
    pub program_path: Option<PathBuf>,
}

impl StepCheck {
    /// Whether this step could be started
    pub fn is_ok(&self) -> bool {
        self.dir_exists && self.program_path.is_some()
    }
}

/// Result of the check operation
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    /// Per-step results in catalog order
    pub steps: Vec<StepCheck>,
}

impl CheckReport {
    /// Check if all steps passed
    pub fn is_valid(&self) -> bool {
        self.steps.iter().all(StepCheck::is_ok)
    }

    /// Number of problems found
    pub fn problem_count(&self) -> usize {
        self.steps
            .iter()
            .map(|s| usize::from(!s.dir_exists) + usize::from(s.program_path.is_none()))
            .sum()
    }
}

/// Check every step of a catalog
pub fn check(config: &RunConfig, steps: &[Step]) -> CheckReport {
    let steps = steps
        .iter()
        .map(|step| {
            let dir = config.resolve(step.dir());
            let dir_exists = dir.is_dir();
            let program = step.command().program.clone();
            let program_path = locate_program(&program, &dir);
            if program_path.is_none() {
                tracing::debug!("'{program}' not found for step '{}'", step.name());
            }

            StepCheck {
                name: step.name().to_string(),
                kind: step.kind(),
                dir,
                dir_exists,
                program,
                program_path,
            }
        })
        .collect();

    CheckReport { steps }
}

/// Resolve `program` on the search path, relative paths against `dir`
fn locate_program(program: &str, dir: &Path) -> Option<PathBuf> {
    which::which_in(program, std::env::var_os("PATH"), dir).ok()
}
