//! Scoped working directory
//!
//! Tracks the directory external commands run in without touching the
//! process-wide current directory. Entering a directory hands out a guard;
//! dropping the guard restores the previous directory on every exit path.

use std::path::{Path, PathBuf};

use crate::error::StepError;

/// Logical working directory for spawned commands
#[derive(Debug, Clone)]
pub struct WorkDir {
    current: PathBuf,
}

impl WorkDir {
    /// Start at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            current: root.into(),
        }
    }

    /// Directory commands currently run in
    pub fn current(&self) -> &Path {
        &self.current
    }

    /// Enter `dir`, resolved against the current directory
    ///
    /// Fails with [`StepError::DirectoryNotFound`] if the target is not an
    /// existing directory, leaving the current directory unchanged.
    pub fn enter(&mut self, dir: &Path) -> Result<WorkDirGuard<'_>, StepError> {
        let target = self.current.join(dir);
        if !target.is_dir() {
            return Err(StepError::DirectoryNotFound { path: target });
        }

        let previous = std::mem::replace(&mut self.current, target);
        tracing::debug!("Entered {}", self.current.display());
        Ok(WorkDirGuard {
            workdir: self,
            previous: Some(previous),
        })
    }
}

/// Holds a [`WorkDir`] inside an entered directory until dropped
#[derive(Debug)]
pub struct WorkDirGuard<'a> {
    workdir: &'a mut WorkDir,
    previous: Option<PathBuf>,
}

impl WorkDirGuard<'_> {
    /// The entered directory
    pub fn path(&self) -> &Path {
        self.workdir.current()
    }
}

impl Drop for WorkDirGuard<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            tracing::debug!("Leaving {}", self.workdir.current.display());
            self.workdir.current = previous;
        }
    }
}
