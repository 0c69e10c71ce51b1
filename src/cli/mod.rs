//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no orchestration logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::config::defaults::{ENV_BASE_DIR, ENV_CATALOG};
use crate::core::catalog::Catalog;
use crate::infra::dirs::ProjectLocation;
use commands::Commands;

/// Version string: crate version, commit and the target lockstep was built for
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("VERGEN_CARGO_TARGET_TRIPLE"),
    ")"
);

/// Lockstep - ordered, fail-fast multi-module build orchestrator
///
/// Builds every module in catalog order and stops at the first failure.
/// Running without a command builds everything.
#[derive(Parser, Debug)]
#[command(name = "lockstep")]
#[command(author, version = LONG_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose logging (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Do not echo commands before running them
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting (plan, check)
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory every step directory is relative to
    #[arg(long, global = true, env = ENV_BASE_DIR, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Catalog file to use instead of the discovered lockstep.toml
    #[arg(long, global = true, env = ENV_CATALOG, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Resolved project: where it lives and what to run
#[derive(Debug)]
pub struct Project {
    /// Base directory and catalog location
    pub location: ProjectLocation,
    /// Steps to run
    pub catalog: Catalog,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let project = self.load_project()?;
        let command = self.command.unwrap_or(Commands::Run);
        command.run(&project, &OutputMode::new(self.quiet, self.json))
    }

    /// Locate the base directory and load the catalog
    fn load_project(&self) -> Result<Project> {
        let cwd = std::env::current_dir().context("Failed to read the working directory")?;
        let location =
            ProjectLocation::resolve(self.base_dir.as_deref(), self.catalog.as_deref(), &cwd)?;

        let catalog = match location.catalog_path() {
            Some(path) => {
                tracing::info!("Loading catalog from {}", path.display());
                Catalog::load(path)?
            }
            None => {
                tracing::info!(
                    "Using the built-in catalog in {}",
                    location.base_dir().display()
                );
                Catalog::builtin()
            }
        };

        Ok(Project { location, catalog })
    }

    /// Log filter directive for the verbosity flags
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}

/// How command output is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputMode {
    /// Suppress the command echo and the success line
    pub quiet: bool,
    /// Machine-readable output
    pub json: bool,
}

impl OutputMode {
    pub fn new(quiet: bool, json: bool) -> Self {
        Self { quiet, json }
    }
}
