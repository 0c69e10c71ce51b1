//! External command execution
//!
//! Runs one toolchain command at a time with inherited stdio and reports how
//! it terminated.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::core::sequencer::CommandExecutor;
use crate::core::step::CommandLine;
use crate::error::StepError;
use crate::infra::workdir::WorkDir;

/// Runs commands as child processes
#[derive(Debug)]
pub struct ProcessExecutor {
    workdir: WorkDir,
}

impl ProcessExecutor {
    /// Create an executor whose relative directories resolve against `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: WorkDir::new(base_dir),
        }
    }

    /// Directory the executor is currently scoped to
    pub fn current_dir(&self) -> &Path {
        self.workdir.current()
    }
}

impl CommandExecutor for ProcessExecutor {
    fn execute(&mut self, dir: &Path, command: &CommandLine) -> Result<(), StepError> {
        let scope = self.workdir.enter(dir)?;
        let program = resolve_program(scope.path(), &command.program);

        tracing::debug!(
            "Spawning {} {:?} in {}",
            program.display(),
            command.args,
            scope.path().display()
        );

        let status = Command::new(&program)
            .args(&command.args)
            .current_dir(scope.path())
            .status()
            .map_err(|e| spawn_error(&command.program, &e))?;

        check_status(&command.program, status)
    }
}

/// Anchor relative program paths like `./update-assets.sh` to the step directory
///
/// Bare names are left for the search path.
fn resolve_program(dir: &Path, program: &str) -> PathBuf {
    let path = Path::new(program);
    if path.is_relative() && path.components().count() > 1 {
        dir.join(path)
    } else {
        path.to_path_buf()
    }
}

fn spawn_error(program: &str, error: &io::Error) -> StepError {
    if error.kind() == io::ErrorKind::NotFound {
        StepError::CommandNotFound {
            program: program.to_string(),
        }
    } else {
        StepError::Spawn {
            program: program.to_string(),
            error: error.to_string(),
        }
    }
}

/// Map a termination status onto the step error taxonomy
pub fn check_status(program: &str, status: ExitStatus) -> Result<(), StepError> {
    if status.success() {
        return Ok(());
    }

    if let Some(code) = status.code() {
        return Err(StepError::Failed {
            program: program.to_string(),
            code,
        });
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return Err(StepError::Terminated {
                program: program.to_string(),
                signal,
            });
        }
    }

    Err(StepError::Spawn {
        program: program.to_string(),
        error: format!("terminated abnormally ({status})"),
    })
}
