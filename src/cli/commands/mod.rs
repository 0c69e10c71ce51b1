//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod check;
pub mod plan;
pub mod run;

use anyhow::Result;
use clap::Subcommand;

use super::{OutputMode, Project};

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run every step in order, stopping at the first failure (default)
    Run,

    /// Show the steps that would run, in order, without running them
    Plan,

    /// Verify step directories and programs without running anything
    Check,
}

impl Commands {
    /// Execute the command
    pub fn run(self, project: &Project, output: &OutputMode) -> Result<()> {
        match self {
            Self::Run => run::execute(project, output),
            Self::Plan => plan::execute(project, output),
            Self::Check => check::execute(project, output),
        }
    }
}
