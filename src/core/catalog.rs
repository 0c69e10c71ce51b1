//! Step catalog
//!
//! The ordered list of steps for one run. Order is the dependency order:
//! a module that later steps depend on comes first. The catalog is data, so
//! building another module means appending a step.
//!
//! The built-in catalog covers this repository's layout. A `lockstep.toml`
//! file replaces it:
//!
//! ```toml
//! [toolchain]
//! program = "cargo"
//!
//! [[step]]
//! name = "scrypto"
//! kind = "module"
//! dir = "scrypto"
//!
//! [[step]]
//! kind = "assets"
//! dir = "assets"
//! command = ["./update-assets.sh"]
//!
//! [[step]]
//! kind = "cross-target"
//! dir = "examples/helloworld"
//! target = "wasm32-unknown-unknown"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::defaults::{DEFAULT_CROSS_TARGET, DEFAULT_TOOLCHAIN};
use crate::core::step::{
    cross_target_command, module_command, name_from_dir, CommandLine, Step, StepKind,
};
use crate::error::CatalogError;

/// Library modules, in dependency order
///
/// A directory holding all of them is the project root for the built-in catalog.
pub const LIBRARY_MODULES: &[&str] = &[
    "sbor",
    "sbor-derive",
    "scrypto",
    "scrypto-derive",
    "radix-engine",
    "simulator",
];

/// Asset pipeline location and script
const ASSETS_DIR: &str = "assets";
const ASSETS_SCRIPT: &str = "./update-assets.sh";

/// Example modules cross-built for the constrained target
const EXAMPLE_MODULES: &[&str] = &[
    "examples/helloworld",
    "examples/gumball-machine",
    "examples/vendor",
];

/// Ordered step list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    steps: Vec<Step>,
}

impl Catalog {
    /// Create a catalog from steps in execution order
    pub fn new(steps: Vec<Step>) -> Result<Self, CatalogError> {
        let catalog = Self { steps };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The project catalog: libraries, then assets, then cross-target examples
    pub fn builtin() -> Self {
        let libraries = LIBRARY_MODULES.iter().map(|dir| Step::module(*dir));
        let assets = std::iter::once(Step::assets(
            ASSETS_DIR,
            CommandLine::new(ASSETS_SCRIPT, Vec::<String>::new()),
        ));
        let examples = EXAMPLE_MODULES
            .iter()
            .map(|dir| Step::cross_target(*dir, DEFAULT_CROSS_TARGET));

        Self {
            steps: libraries.chain(assets).chain(examples).collect(),
        }
    }

    /// Parse a catalog file's contents
    ///
    /// `path` is only used for error messages.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| CatalogError::Parse {
            path: path.to_path_buf(),
            error: e.message().to_string(),
        })?;
        file.into_catalog()
    }

    /// Read and parse a catalog file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_toml(&content, path)
    }

    /// Steps in execution order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the catalog has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for step in &self.steps {
            if step.command().program.trim().is_empty() {
                return Err(CatalogError::EmptyCommand {
                    step: step.name().to_string(),
                });
            }
            if step.dir().is_absolute() {
                return Err(CatalogError::AbsoluteDirectory {
                    step: step.name().to_string(),
                    dir: step.dir().to_path_buf(),
                });
            }
            if !seen.insert(step.name()) {
                return Err(CatalogError::DuplicateStep {
                    step: step.name().to_string(),
                });
            }
        }
        Ok(())
    }
}

/// On-disk catalog layout
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    toolchain: ToolchainConfig,

    #[serde(default, rename = "step")]
    steps: Vec<StepEntry>,
}

/// `[toolchain]` table
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ToolchainConfig {
    #[serde(default = "default_toolchain")]
    program: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            program: default_toolchain(),
        }
    }
}

fn default_toolchain() -> String {
    DEFAULT_TOOLCHAIN.to_string()
}

/// One `[[step]]` entry
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StepEntry {
    #[serde(default)]
    name: Option<String>,

    #[serde(default = "default_kind")]
    kind: StepKind,

    dir: PathBuf,

    /// Explicit `[program, args...]`, overrides the kind's default command
    #[serde(default)]
    command: Option<Vec<String>>,

    /// Target triple for cross-target steps
    #[serde(default)]
    target: Option<String>,
}

fn default_kind() -> StepKind {
    StepKind::Module
}

impl CatalogFile {
    fn into_catalog(self) -> Result<Catalog, CatalogError> {
        let toolchain = self.toolchain.program;
        let steps = self
            .steps
            .into_iter()
            .map(|entry| entry.into_step(&toolchain))
            .collect::<Result<Vec<_>, _>>()?;
        Catalog::new(steps)
    }
}

impl StepEntry {
    fn into_step(self, toolchain: &str) -> Result<Step, CatalogError> {
        let name = self.name.unwrap_or_else(|| name_from_dir(&self.dir));

        let command = match self.command {
            Some(parts) => CommandLine::from_parts(&parts)
                .ok_or_else(|| CatalogError::EmptyCommand { step: name.clone() })?,
            None => match self.kind {
                StepKind::Module => module_command(toolchain),
                StepKind::CrossTarget => cross_target_command(
                    toolchain,
                    self.target.as_deref().unwrap_or(DEFAULT_CROSS_TARGET),
                ),
                StepKind::Assets => {
                    return Err(CatalogError::MissingCommand { step: name });
                }
            },
        };

        Ok(Step::new(name, self.kind, self.dir, command))
    }
}
