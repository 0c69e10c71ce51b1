//! Lockstep - ordered, fail-fast multi-module build orchestrator
//!
//! This library drives an external toolchain over a hand-ordered list of
//! module directories: library builds, then asset generation, then example
//! modules cross-compiled for a constrained target. Steps run one at a time
//! and the first failure ends the run.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Steps, catalog, and the fail-fast sequencer
//! - [`infra`] - Infrastructure layer (processes, directories)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
