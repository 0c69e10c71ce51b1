//! Plan command implementation
//!
//! Implements `lockstep plan` to show the ordered steps without running them.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::cli::output::format_plan;
use crate::cli::{OutputMode, Project};
use crate::core::step::Step;

/// JSON shape of `lockstep plan --json`
#[derive(Debug, Serialize)]
struct PlanOutput<'a> {
    base_dir: &'a Path,
    catalog: Option<&'a Path>,
    steps: &'a [Step],
}

/// Execute the plan command
pub fn execute(project: &Project, output: &OutputMode) -> Result<()> {
    let base_dir = project.location.base_dir();
    let steps = project.catalog.steps();

    if output.json {
        let plan = PlanOutput {
            base_dir,
            catalog: project.location.catalog_path(),
            steps,
        };
        let json = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
        println!("{json}");
    } else {
        print!("{}", format_plan(base_dir, steps));
    }
    Ok(())
}
