//! Step sequencer
//!
//! Runs steps one at a time, in catalog order, and stops at the first
//! failure. There are no retries and nothing is skipped: either every step
//! succeeds or the run ends at the step that failed.

use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::defaults::TRACE_PREFIX;
use crate::core::config::RunConfig;
use crate::core::step::{CommandLine, Step, StepKind};
use crate::error::{SequenceError, StepError};

/// Runs one external command in a directory
///
/// `dir` is absolute. Implementations block until the command terminates.
pub trait CommandExecutor {
    /// Run `command` in `dir`
    fn execute(&mut self, dir: &Path, command: &CommandLine) -> Result<(), StepError>;
}

impl<E: CommandExecutor + ?Sized> CommandExecutor for &mut E {
    fn execute(&mut self, dir: &Path, command: &CommandLine) -> Result<(), StepError> {
        (**self).execute(dir, command)
    }
}

/// Receives each echoed command line
pub type TraceSink = Box<dyn FnMut(&str)>;

/// A step that completed successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    /// Step name
    pub name: String,
    /// Step kind
    pub kind: StepKind,
    /// Wall time spent in the command
    pub elapsed: Duration,
}

/// Result of a fully successful run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Completed steps in execution order
    pub steps: Vec<StepRecord>,
    /// Wall time for the whole run
    pub elapsed: Duration,
}

/// Fail-fast step runner
pub struct Sequencer<E> {
    executor: E,
    config: RunConfig,
    trace_sink: TraceSink,
}

impl<E: CommandExecutor> Sequencer<E> {
    /// Create a sequencer that echoes to stderr when tracing is enabled
    pub fn new(executor: E, config: RunConfig) -> Self {
        Self {
            executor,
            config,
            trace_sink: Box::new(|line| eprintln!("{line}")),
        }
    }

    /// Send echoed command lines somewhere other than stderr
    #[must_use]
    pub fn with_trace_sink(mut self, sink: impl FnMut(&str) + 'static) -> Self {
        self.trace_sink = Box::new(sink);
        self
    }

    /// Give back the executor
    pub fn into_executor(self) -> E {
        self.executor
    }

    /// Run `steps` in order, stopping at the first failure
    pub fn run(&mut self, steps: &[Step]) -> Result<RunReport, SequenceError> {
        let started = Instant::now();
        let total = steps.len();
        let mut report = RunReport::default();

        if steps.is_empty() {
            tracing::info!("Catalog is empty, nothing to run");
        }

        for (index, step) in steps.iter().enumerate() {
            let step_started = Instant::now();
            self.run_step(index, total, step)
                .map_err(|source| {
                    tracing::error!(
                        step = step.name(),
                        "Step {}/{total} failed: {source}",
                        index + 1
                    );
                    SequenceError {
                        index,
                        total,
                        name: step.name().to_string(),
                        source,
                    }
                })?;

            let elapsed = step_started.elapsed();
            tracing::info!(
                step = step.name(),
                "Step {}/{total} finished in {:.2}s",
                index + 1,
                elapsed.as_secs_f64()
            );
            report.steps.push(StepRecord {
                name: step.name().to_string(),
                kind: step.kind(),
                elapsed,
            });
        }

        report.elapsed = started.elapsed();
        Ok(report)
    }

    fn run_step(&mut self, index: usize, total: usize, step: &Step) -> Result<(), StepError> {
        tracing::info!(
            step = step.name(),
            kind = %step.kind(),
            "Step {}/{total}: {} in {}",
            index + 1,
            step.command(),
            step.dir().display()
        );

        if self.config.trace() {
            let line = format!("{TRACE_PREFIX} {}", step.shell_line());
            (self.trace_sink)(&line);
        }

        let dir = self.config.resolve(step.dir());
        if !dir.is_dir() {
            return Err(StepError::DirectoryNotFound { path: dir });
        }

        self.executor.execute(&dir, step.command())
    }
}
