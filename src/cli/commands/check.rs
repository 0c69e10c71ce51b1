//! Check command implementation
//!
//! Implements `lockstep check` to validate the catalog against the
//! filesystem and search path without running any step.

use anyhow::{Context, Result};

use crate::cli::output::format_check;
use crate::cli::{OutputMode, Project};
use crate::core::check;
use crate::core::config::RunConfig;
use crate::error::LockstepError;

/// Execute the check command
pub fn execute(project: &Project, output: &OutputMode) -> Result<()> {
    let config = RunConfig::new(project.location.base_dir());
    let report = check::check(&config, project.catalog.steps());

    if output.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        print!("{}", format_check(&report));
    }

    if report.is_valid() {
        Ok(())
    } else {
        Err(LockstepError::CheckFailed {
            problems: report.problem_count(),
        }
        .into())
    }
}
