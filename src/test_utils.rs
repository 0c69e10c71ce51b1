//! Test utilities for property-based testing
//!
//! This module provides generators for proptest and a recording executor
//! that stands in for the external toolchain.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::sequencer::CommandExecutor;
use crate::core::step::CommandLine;
use crate::error::StepError;

/// Executor that records every call and fails chosen programs
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    /// `(dir, command)` for every call, in order
    pub calls: Vec<(PathBuf, CommandLine)>,
    failures: HashMap<String, i32>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every invocation of `program` exit with `code`
    #[must_use]
    pub fn fail_program(mut self, program: &str, code: i32) -> Self {
        self.failures.insert(program.to_string(), code);
        self
    }

    /// Invoked directories relative to `base`, in call order
    pub fn invoked_dirs(&self, base: &Path) -> Vec<String> {
        self.calls
            .iter()
            .map(|(dir, _)| {
                dir.strip_prefix(base)
                    .unwrap_or(dir)
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute(&mut self, dir: &Path, command: &CommandLine) -> Result<(), StepError> {
        self.calls.push((dir.to_path_buf(), command.clone()));
        match self.failures.get(&command.program) {
            Some(code) => Err(StepError::Failed {
                program: command.program.clone(),
                code: *code,
            }),
            None => Ok(()),
        }
    }
}

/// Create one directory per step under `base`
pub fn create_step_dirs(base: &Path, dirs: &[&str]) {
    for dir in dirs {
        std::fs::create_dir_all(base.join(dir)).expect("Failed to create step directory");
    }
}

pub mod generators {
    use proptest::prelude::*;

    /// Generate a valid step directory name
    pub fn step_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,12}"
    }

    /// Generate up to eight distinct step names
    pub fn step_names() -> impl Strategy<Value = Vec<String>> {
        prop::collection::btree_set(step_name(), 0..8).prop_map(|set| set.into_iter().collect())
    }

    /// Step names paired with per-step outcomes, `Some(code)` marks a failure
    pub fn outcomes() -> impl Strategy<Value = (Vec<String>, Vec<Option<i32>>)> {
        step_names().prop_flat_map(|names| {
            let len = names.len();
            (
                Just(names),
                prop::collection::vec(prop::option::weighted(0.2, 1i32..=125), len),
            )
        })
    }

    /// Generate a target triple for cross-target steps
    pub fn target_triple() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("wasm32-unknown-unknown".to_string()),
            Just("thumbv7em-none-eabihf".to_string()),
            Just("riscv32imac-unknown-none-elf".to_string()),
            Just("aarch64-unknown-none".to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_recording_executor_fails_selected_program() {
        let mut executor = RecordingExecutor::new().fail_program("buildFAIL", 2);
        let dir = Path::new("/work/lib1");

        assert!(executor
            .execute(dir, &CommandLine::new("buildOK", Vec::<String>::new()))
            .is_ok());
        let err = executor
            .execute(dir, &CommandLine::new("buildFAIL", Vec::<String>::new()))
            .unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert_eq!(executor.calls.len(), 2);
        assert_eq!(executor.invoked_dirs(Path::new("/work")), vec!["lib1", "lib1"]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_step_names_are_distinct(names in step_names()) {
            let mut sorted = names.clone();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), names.len());
        }

        #[test]
        fn test_outcomes_match_step_count((names, results) in outcomes()) {
            prop_assert_eq!(names.len(), results.len());
            for code in results.into_iter().flatten() {
                prop_assert!(code != 0);
            }
        }
    }
}
