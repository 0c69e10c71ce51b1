//! Run configuration
//!
//! Built once at start-up and handed to the sequencer. Nothing downstream
//! reads process-wide state for these values.

use std::path::{Path, PathBuf};

/// Settings for one orchestration run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Anchor every step directory resolves against
    base_dir: PathBuf,
    /// Echo each command line before it runs
    trace: bool,
}

impl RunConfig {
    /// Create a configuration anchored at `base_dir`, tracing enabled
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            trace: true,
        }
    }

    /// Enable or disable the command echo
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Whether command lines are echoed
    pub fn trace(&self) -> bool {
        self.trace
    }

    /// Absolute directory for a step's relative directory
    pub fn resolve(&self, dir: &Path) -> PathBuf {
        self.base_dir.join(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_on_by_default() {
        assert!(RunConfig::new("/work").trace());
        assert!(!RunConfig::new("/work").with_trace(false).trace());
    }

    #[test]
    fn test_resolve_is_relative_to_base() {
        let config = RunConfig::new("/work");
        assert_eq!(
            config.resolve(Path::new("examples/helloworld")),
            PathBuf::from("/work/examples/helloworld")
        );
    }
}
