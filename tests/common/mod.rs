//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory laid out like a multi-module repository
/// and drives the lockstep binary against it.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    #[allow(dead_code)]
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    #[allow(dead_code)]
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Write `lockstep.toml` at the project root
    pub fn write_catalog(&self, content: &str) {
        self.create_file("lockstep.toml", content);
    }

    /// Lines appended to `invocations.log` by steps, in order
    #[allow(dead_code)]
    pub fn invocations(&self) -> Vec<String> {
        let path = self.dir.path().join("invocations.log");
        if !path.exists() {
            return Vec::new();
        }
        std::fs::read_to_string(path)
            .expect("Failed to read invocation log")
            .lines()
            .map(String::from)
            .collect()
    }

    /// Run lockstep from the project root
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_in(&self.path(), args)
    }

    /// Run lockstep from an arbitrary working directory
    pub fn run_in(&self, cwd: &std::path::Path, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_lockstep"));
        cmd.current_dir(cwd);
        cmd.env_remove("LOCKSTEP_BASE_DIR");
        cmd.env_remove("LOCKSTEP_CATALOG");
        cmd.env_remove("RUST_LOG");
        for arg in args {
            cmd.arg(arg);
        }
        cmd.output().expect("Failed to execute lockstep")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// A `[[step]]` entry whose command records its name then exits with `code`
///
/// The record goes to `invocations.log` in the base directory, found via
/// `../` segments so it works from nested step directories.
#[allow(dead_code)]
pub fn recording_step(dir: &str, code: i32) -> String {
    let depth = dir.split('/').filter(|s| !s.is_empty()).count();
    let up = "../".repeat(depth);
    format!(
        r#"
[[step]]
dir = "{dir}"
command = ["sh", "-c", "echo {dir} >> {up}invocations.log; exit {code}"]
"#
    )
}

/// Sample catalog mirroring the library / assets / examples layout
#[allow(dead_code)]
pub const SAMPLE_DIRS: &[&str] = &["sbor", "scrypto", "radix-engine", "assets", "examples/helloworld"];

/// Library module directories that mark the built-in catalog's project root
#[allow(dead_code)]
pub const LIBRARY_DIRS: &[&str] = &[
    "sbor",
    "sbor-derive",
    "scrypto",
    "scrypto-derive",
    "radix-engine",
    "simulator",
];
