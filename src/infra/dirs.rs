//! Base directory resolution
//!
//! Every step directory resolves against a single base directory, chosen once
//! at start-up so the caller's working directory does not matter.
//!
//! Resolution order:
//! 1. an explicit base directory (`--base-dir` or `LOCKSTEP_BASE_DIR`)
//! 2. the directory holding an explicit catalog (`--catalog` or `LOCKSTEP_CATALOG`)
//! 3. the nearest ancestor of the working directory containing `lockstep.toml`
//! 4. the built-in catalog's project root: the nearest ancestor of the working
//!    directory, then of the lockstep executable, that holds every library
//!    module directory

use std::path::{Path, PathBuf};

use crate::config::defaults::CATALOG_FILE_NAME;
use crate::core::catalog::LIBRARY_MODULES;
use crate::error::LockstepError;

/// Where a run is anchored and where its catalog comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLocation {
    base_dir: PathBuf,
    catalog_path: Option<PathBuf>,
}

impl ProjectLocation {
    /// Resolve the base directory and catalog file
    ///
    /// Relative overrides are taken relative to `cwd`.
    pub fn resolve(
        base_override: Option<&Path>,
        catalog_override: Option<&Path>,
        cwd: &Path,
    ) -> Result<Self, LockstepError> {
        let catalog_override = catalog_override.map(|p| cwd.join(p));

        let (base_dir, catalog_path) = match (base_override, catalog_override) {
            (Some(base), catalog) => {
                let base = cwd.join(base);
                let catalog = catalog.or_else(|| existing_catalog(&base));
                (base, catalog)
            }
            (None, Some(catalog)) => {
                let base = catalog
                    .parent()
                    .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
                (base, Some(catalog))
            }
            (None, None) => match find_catalog_upwards(cwd) {
                Some(catalog) => {
                    let base = catalog
                        .parent()
                        .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
                    (base, Some(catalog))
                }
                None => (builtin_root(cwd)?, None),
            },
        };

        let base_dir = canonical_dir(&base_dir)?;
        tracing::debug!("Base directory: {}", base_dir.display());

        Ok(Self {
            base_dir,
            catalog_path,
        })
    }

    /// Canonical base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Catalog file, `None` means the built-in catalog
    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }
}

/// Find `lockstep.toml` in `start` or the closest ancestor
pub fn find_catalog_upwards(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(existing_catalog)
}

/// Find the nearest ancestor of `start` holding every library module directory
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| LIBRARY_MODULES.iter().all(|module| dir.join(module).is_dir()))
        .map(Path::to_path_buf)
}

fn builtin_root(cwd: &Path) -> Result<PathBuf, LockstepError> {
    find_project_root(cwd)
        .or_else(|| {
            let exe = std::env::current_exe().ok()?;
            find_project_root(&exe)
        })
        .ok_or_else(|| LockstepError::ProjectRootNotFound {
            start: cwd.to_path_buf(),
        })
}

fn existing_catalog(dir: &Path) -> Option<PathBuf> {
    let candidate = dir.join(CATALOG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

fn canonical_dir(path: &Path) -> Result<PathBuf, LockstepError> {
    let canonical = std::fs::canonicalize(path).map_err(|e| LockstepError::BaseDirectory {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    if !canonical.is_dir() {
        return Err(LockstepError::BaseDirectory {
            path: path.to_path_buf(),
            error: "not a directory".to_string(),
        });
    }
    Ok(canonical)
}
