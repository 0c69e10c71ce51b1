//! Step model
//!
//! A step is one unit of orchestrated work: a directory relative to the base
//! directory plus the external command to run there.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::defaults::DEFAULT_TOOLCHAIN;

/// What a step does
///
/// The kind is descriptive only. Every kind is executed the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    /// Build a module with the standard toolchain invocation
    Module,
    /// Regenerate derived assets
    Assets,
    /// Build a module for a constrained target, optimized
    CrossTarget,
}

impl StepKind {
    /// Short label used in listings
    pub fn label(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Assets => "assets",
            Self::CrossTarget => "cross-target",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An executable name plus its arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLine {
    /// Program to run, resolved on the search path
    pub program: String,
    /// Arguments passed verbatim
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandLine {
    /// Create a command line from a program and its arguments
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a `[program, args...]` vector, `None` when it is empty
    pub fn from_parts(parts: &[String]) -> Option<Self> {
        let (program, args) = parts.split_first()?;
        if program.trim().is_empty() {
            return None;
        }
        Some(Self::new(program.clone(), args.iter().cloned()))
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Quote `word` for a POSIX shell, leaving plain words untouched
pub fn shell_quote(word: &str) -> Cow<'_, str> {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if plain {
        Cow::Borrowed(word)
    } else {
        Cow::Owned(format!("'{}'", word.replace('\'', r"'\''")))
    }
}

/// One unit of orchestrated work
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    name: String,
    kind: StepKind,
    dir: PathBuf,
    command: CommandLine,
}

impl Step {
    /// Create a step from its parts
    pub fn new(
        name: impl Into<String>,
        kind: StepKind,
        dir: impl Into<PathBuf>,
        command: CommandLine,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            dir: dir.into(),
            command,
        }
    }

    /// Module build step: `cargo build` in the module root
    pub fn module(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self::new(
            name_from_dir(&dir),
            StepKind::Module,
            dir,
            module_command(DEFAULT_TOOLCHAIN),
        )
    }

    /// Asset pipeline step running `command` in the assets root
    pub fn assets(dir: impl Into<PathBuf>, command: CommandLine) -> Self {
        let dir = dir.into();
        Self::new(name_from_dir(&dir), StepKind::Assets, dir, command)
    }

    /// Cross-target step: optimized `cargo build` for `target`
    pub fn cross_target(dir: impl Into<PathBuf>, target: &str) -> Self {
        let dir = dir.into();
        Self::new(
            name_from_dir(&dir),
            StepKind::CrossTarget,
            dir,
            cross_target_command(DEFAULT_TOOLCHAIN, target),
        )
    }

    /// Step name, unique within a catalog
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Step kind
    pub fn kind(&self) -> StepKind {
        self.kind
    }

    /// Directory relative to the base directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Command to run
    pub fn command(&self) -> &CommandLine {
        &self.command
    }

    /// The step as one shell line, `cd <dir> && <command>`, relative to the base directory
    pub fn shell_line(&self) -> String {
        format!(
            "cd {} && {}",
            shell_quote(&name_from_dir(&self.dir)),
            self.command
        )
    }
}

/// `<toolchain> build`
pub fn module_command(toolchain: &str) -> CommandLine {
    CommandLine::new(toolchain, ["build"])
}

/// `<toolchain> build --target <target> --release`
pub fn cross_target_command(toolchain: &str, target: &str) -> CommandLine {
    CommandLine::new(toolchain, ["build", "--target", target, "--release"])
}

/// Default step name: the directory path with forward slashes
pub(crate) fn name_from_dir(dir: &Path) -> String {
    dir.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_step_uses_plain_build() {
        let step = Step::module("scrypto");
        assert_eq!(step.name(), "scrypto");
        assert_eq!(step.kind(), StepKind::Module);
        assert_eq!(step.command().to_string(), "cargo build");
    }

    #[test]
    fn test_cross_target_step_adds_target_and_release() {
        let step = Step::cross_target("examples/helloworld", "wasm32-unknown-unknown");
        assert_eq!(step.kind(), StepKind::CrossTarget);
        assert_eq!(step.name(), "examples/helloworld");
        assert_eq!(
            step.command().args,
            vec!["build", "--target", "wasm32-unknown-unknown", "--release"]
        );
    }

    #[test]
    fn test_cross_target_differs_from_module_only_in_flags() {
        let module = Step::module("examples/helloworld");
        let cross = Step::cross_target("examples/helloworld", "wasm32-unknown-unknown");
        assert_eq!(module.dir(), cross.dir());
        assert_eq!(module.command().program, cross.command().program);
        assert!(cross.command().args.starts_with(&module.command().args));
    }

    #[test]
    fn test_assets_step_keeps_command() {
        let step = Step::assets("assets", CommandLine::new("./update-assets.sh", Vec::<String>::new()));
        assert_eq!(step.kind(), StepKind::Assets);
        assert_eq!(step.command().to_string(), "./update-assets.sh");
    }

    #[test]
    fn test_command_line_display_quotes_spaces() {
        let cmd = CommandLine::new("sh", ["-c", "exit 3"]);
        assert_eq!(cmd.to_string(), "sh -c 'exit 3'");
    }

    #[test]
    fn test_command_line_display_quotes_metacharacters() {
        let cmd = CommandLine::new("sh", ["-c", "echo$HOME", "it's", "a\"b", ""]);
        assert_eq!(cmd.to_string(), r#"sh -c 'echo$HOME' 'it'\''s' 'a"b' ''"#);
    }

    #[test]
    fn test_plain_words_are_not_quoted() {
        for word in ["cargo", "--target", "wasm32-unknown-unknown", "./update-assets.sh", "KEY=v1.2"] {
            assert_eq!(shell_quote(word), word);
        }
    }

    #[test]
    fn test_shell_line_names_directory() {
        assert_eq!(Step::module("sbor").shell_line(), "cd sbor && cargo build");
        assert_eq!(
            Step::cross_target("examples/helloworld", "wasm32-unknown-unknown").shell_line(),
            "cd examples/helloworld && cargo build --target wasm32-unknown-unknown --release"
        );
        assert_eq!(
            Step::module("my module").shell_line(),
            "cd 'my module' && cargo build"
        );
    }

    #[test]
    fn test_command_line_from_parts() {
        let parts = vec!["cargo".to_string(), "build".to_string()];
        let cmd = CommandLine::from_parts(&parts).unwrap();
        assert_eq!(cmd.program, "cargo");
        assert_eq!(cmd.args, vec!["build"]);

        assert!(CommandLine::from_parts(&[]).is_none());
        assert!(CommandLine::from_parts(&[" ".to_string()]).is_none());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(StepKind::Module.to_string(), "module");
        assert_eq!(StepKind::Assets.to_string(), "assets");
        assert_eq!(StepKind::CrossTarget.to_string(), "cross-target");
    }
}
