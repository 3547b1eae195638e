//! Cache path utilities and constants
//!
//! Retrieved artifacts are laid out by coordinate:
//!
//! ```text
//! ~/.cache/ivyfetch/
//! └── <organisation>/
//!     └── <module>/
//!         └── <revision>/
//!             ├── module.yaml
//!             ├── core-1.0.jar
//!             └── core-1.0-sources.jar
//! ```

use std::path::{Path, PathBuf};

use crate::config::ResolveSettings;
use crate::domain::ModuleRevisionId;
use crate::error::{Result, cache};
use crate::path_utils::safe_segment;

/// Default cache directory name under user's cache directory
const CACHE_DIR: &str = "ivyfetch";

/// Environment variable overriding the cache directory
pub const CACHE_DIR_ENV: &str = "IVYFETCH_CACHE_DIR";

/// Get the default cache directory path
///
/// Uses the platform's standard cache location (e.g. XDG on Linux, Library/Caches on macOS)
/// with an `ivyfetch` subdirectory. Can be overridden with the `IVYFETCH_CACHE_DIR`
/// environment variable.
pub fn cache_dir() -> Result<PathBuf> {
    if let Ok(cache_dir) = std::env::var(CACHE_DIR_ENV) {
        if !cache_dir.is_empty() {
            return Ok(PathBuf::from(cache_dir));
        }
    }

    let base = dirs::cache_dir()
        .ok_or_else(|| cache::operation_failed("Could not determine cache directory"))?;

    Ok(base.join(CACHE_DIR))
}

/// Cache directory for a resolution run: the settings' own, else the default
pub fn cache_dir_for(settings: &ResolveSettings) -> Result<PathBuf> {
    match &settings.cache_dir {
        Some(dir) => Ok(dir.clone()),
        None => cache_dir(),
    }
}

/// Directory holding the files of one module revision
pub fn revision_dir(cache_root: &Path, mrid: &ModuleRevisionId) -> PathBuf {
    cache_root
        .join(safe_segment(mrid.organisation()))
        .join(safe_segment(mrid.name()))
        .join(safe_segment(&mrid.revision))
}

/// Cache path of one retrieved file
pub fn artifact_path(cache_root: &Path, mrid: &ModuleRevisionId, file_name: &str) -> PathBuf {
    revision_dir(cache_root, mrid).join(safe_segment(file_name))
}
