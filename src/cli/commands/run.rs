//! Run command implementation
//!
//! Implements `lockstep run` (and the bare `lockstep` invocation): every step
//! of the catalog, in order, stopping at the first failure.

use anyhow::Result;

use crate::cli::output::format_summary;
use crate::cli::{OutputMode, Project};
use crate::core::config::RunConfig;
use crate::core::sequencer::Sequencer;
use crate::error::LockstepError;
use crate::infra::executor::ProcessExecutor;

/// Execute the run command
pub fn execute(project: &Project, output: &OutputMode) -> Result<()> {
    let base_dir = project.location.base_dir();
    let config = RunConfig::new(base_dir).with_trace(!output.quiet);

    tracing::info!(
        "Running {} steps from {}",
        project.catalog.len(),
        base_dir.display()
    );

    let mut sequencer = Sequencer::new(ProcessExecutor::new(base_dir), config);
    let report = sequencer
        .run(project.catalog.steps())
        .map_err(LockstepError::from)?;

    if !output.quiet {
        eprintln!("{}", format_summary(&report));
    }
    Ok(())
}
