//! Command helper utilities

use std::path::PathBuf;

use crate::cache;
use crate::error::{Result, config, fs};
use crate::workspace::{ModuleModel, WORKSPACE_FILE};

/// Resolve the workspace root from an optional argument
///
/// An explicit path must contain the workspace file itself. Without one, the
/// workspace is searched upward from the current directory.
pub fn workspace_root(workspace: Option<PathBuf>) -> Result<PathBuf> {
    match workspace {
        Some(path) if ModuleModel::exists(&path) => Ok(path),
        Some(path) => Err(config::not_found(
            path.join(WORKSPACE_FILE).display().to_string(),
        )),
        None => {
            let current = current_dir()?;
            ModuleModel::find_from(&current).ok_or_else(|| {
                config::not_found(format!(
                    "{} (searched upward from {})",
                    WORKSPACE_FILE,
                    current.display()
                ))
            })
        }
    }
}

/// Artifact cache the commands operate on
///
/// Inside a workspace the project settings may relocate the cache; elsewhere
/// the user cache directory is used.
pub fn cache_root(workspace: Option<PathBuf>) -> Result<PathBuf> {
    let root = match workspace {
        Some(path) => Some(path).filter(|p| ModuleModel::exists(p)),
        None => ModuleModel::find_from(&current_dir()?),
    };
    match root {
        Some(root) => {
            let model = ModuleModel::open(&root)?;
            let guard = model.read();
            cache::cache_dir_for(guard.project_settings())
        }
        None => cache::cache_dir(),
    }
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir()
        .map_err(|e| fs::io_error(format!("Failed to get current directory: {e}")))
}
