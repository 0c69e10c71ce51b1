//! Error types for lockstep
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::defaults::{GENERIC_FAILURE_EXIT_CODE, SIGNAL_EXIT_BASE};

/// Errors produced while running a single step
#[derive(Error, Debug)]
pub enum StepError {
    /// Step directory does not exist under the base directory
    #[error("Step directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Program could not be located on the search path
    #[error("Command not found: '{program}'")]
    CommandNotFound { program: String },

    /// Program was found but could not be started
    #[error("Failed to start '{program}': {error}")]
    Spawn { program: String, error: String },

    /// Program ran and exited with a non-zero status
    #[error("'{program}' exited with status {code}")]
    Failed { program: String, code: i32 },

    /// Program was killed by a signal
    #[error("'{program}' was terminated by signal {signal}")]
    Terminated { program: String, signal: i32 },
}

impl StepError {
    /// Process exit status to report for this failure
    ///
    /// Non-zero exit codes are forwarded verbatim, signals follow the shell
    /// convention of `128 + signal`, anything else maps to the generic code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Failed { code, .. } => *code,
            Self::Terminated { signal, .. } => SIGNAL_EXIT_BASE + signal,
            Self::DirectoryNotFound { .. } | Self::CommandNotFound { .. } | Self::Spawn { .. } => {
                GENERIC_FAILURE_EXIT_CODE
            }
        }
    }

    /// Whether the failure happened before the command was started
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::DirectoryNotFound { .. })
    }
}

/// The first failing step of a run
#[derive(Error, Debug)]
#[error("Step {} of {total} ('{name}') failed", .index + 1)]
pub struct SequenceError {
    /// Zero-based position of the step in the catalog
    pub index: usize,
    /// Number of steps in the catalog
    pub total: usize,
    /// Step name
    pub name: String,
    /// Underlying step failure
    #[source]
    pub source: StepError,
}

impl SequenceError {
    /// Exit status of the failed step
    pub fn exit_code(&self) -> i32 {
        self.source.exit_code()
    }
}

/// Catalog loading and validation errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Catalog file is not valid TOML or has an unexpected shape
    #[error("Failed to parse catalog '{path}': {error}")]
    Parse { path: PathBuf, error: String },

    /// Step has an empty command line
    #[error("Step '{step}' has an empty command")]
    EmptyCommand { step: String },

    /// Asset steps cannot derive a command from the toolchain
    #[error("Step '{step}' is an assets step and needs an explicit command")]
    MissingCommand { step: String },

    /// Step directory must be relative to the base directory
    #[error("Step '{step}' uses absolute directory '{dir}'; directories are relative to the base directory")]
    AbsoluteDirectory { step: String, dir: PathBuf },

    /// Two steps share a name
    #[error("Duplicate step name '{step}'")]
    DuplicateStep { step: String },
}

/// Top-level lockstep error type
#[derive(Error, Debug)]
pub enum LockstepError {
    /// Catalog error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A step failed during a run
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    /// Base directory could not be resolved
    #[error("Base directory '{path}' is not usable: {error}")]
    BaseDirectory { path: PathBuf, error: String },

    /// Preflight found problems
    #[error("Check failed: {problems} problem(s) found")]
    CheckFailed { problems: usize },

    /// No catalog file and no directory laid out like the project
    #[error("No lockstep.toml or project root found above '{start}'; pass --base-dir or --catalog")]
    ProjectRootNotFound { start: PathBuf },
}

impl LockstepError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Sequence(e) => e.exit_code(),
            _ => GENERIC_FAILURE_EXIT_CODE,
        }
    }
}
