//! Core orchestration logic
//!
//! Steps, the catalog, and the fail-fast sequencer. Process spawning lives
//! in [`crate::infra`]; this module only sees it through
//! [`sequencer::CommandExecutor`].
//!
//! # Submodules
//!
//! - [`step`] - Step, step kind, and command line types
//! - [`catalog`] - Built-in catalog and `lockstep.toml` loading
//! - [`config`] - Run configuration
//! - [`sequencer`] - Ordered, fail-fast step runner
//! - [`check`] - Preflight validation without running anything

pub mod catalog;
pub mod check;
pub mod config;
pub mod sequencer;
pub mod step;
