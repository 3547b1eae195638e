//! Workspace and module model
//!
//! This module handles:
//! - Locating the workspace file (`ivyfetch.yaml`) by searching upward
//! - Loading project settings with relative paths anchored at the workspace
//! - Read access to per-module facet settings under a shared lock
//!
//! ## Workspace Structure
//!
//! ```text
//! project/
//! ├── ivyfetch.yaml         # Project settings and module list
//! ├── app/module.yaml       # Module descriptor
//! └── tools/
//!     ├── module.yaml
//!     └── settings.yaml     # Custom settings (use_project_settings: false)
//! ```

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use tracing::debug;

use crate::config::{ModuleDescriptor, ResolveSettings, WorkspaceConfig};
use crate::error::{Result, resolve};

/// Workspace config filename
pub const WORKSPACE_FILE: &str = "ivyfetch.yaml";

/// The modules of a workspace, shared between resolution runs
///
/// A resolution holds a [`ModelGuard`] for its whole run; [`ModuleModel::reload`]
/// waits until no resolution is in progress.
#[derive(Debug)]
pub struct ModuleModel {
    root: PathBuf,
    config: RwLock<WorkspaceConfig>,
}

/// Everything a resolution needs to know about one module
#[derive(Debug, Clone)]
pub struct ModuleFacet {
    pub name: String,

    /// Absolute path of the module's descriptor
    pub descriptor_path: PathBuf,

    /// Absolute path of the custom settings file, if one is configured
    pub settings_path: Option<PathBuf>,

    pub use_project_settings: bool,

    pub descriptor: ModuleDescriptor,

    /// Settings in effect: the project's, or the custom file's
    pub settings: ResolveSettings,
}

impl ModuleModel {
    /// Detect if a workspace file exists at the given path
    pub fn exists(root: &Path) -> bool {
        root.join(WORKSPACE_FILE).is_file()
    }

    /// Find a workspace by searching upward from the given path
    pub fn find_from(start: &Path) -> Option<PathBuf> {
        let mut current = dunce::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());

        loop {
            if Self::exists(&current) {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Open the workspace rooted at `root`
    pub fn open(root: &Path) -> Result<Self> {
        let root = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        let config = Self::load(&root)?;
        Ok(Self {
            root,
            config: RwLock::new(config),
        })
    }

    fn load(root: &Path) -> Result<WorkspaceConfig> {
        let path = root.join(WORKSPACE_FILE);
        debug!("Loading workspace from {}", path.display());
        let mut config = WorkspaceConfig::from_file(&path)?;
        config.settings.anchor(root);
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Shared read access to the module configuration
    pub fn read(&self) -> ModelGuard<'_> {
        ModelGuard {
            root: &self.root,
            config: self.config.read().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Re-read the workspace file
    ///
    /// Blocks while any resolution holds the model. The current configuration
    /// is kept when the file no longer parses.
    pub fn reload(&self) -> Result<()> {
        let fresh = Self::load(&self.root)?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = fresh;
        Ok(())
    }
}

/// Read guard over the module model
pub struct ModelGuard<'a> {
    root: &'a Path,
    config: RwLockReadGuard<'a, WorkspaceConfig>,
}

impl ModelGuard<'_> {
    /// Module names in declaration order
    pub fn module_names(&self) -> Vec<String> {
        self.config.modules.iter().map(|m| m.name.clone()).collect()
    }

    pub fn project_settings(&self) -> &ResolveSettings {
        &self.config.settings
    }

    /// Facet settings and descriptor of the named module
    pub fn module(&self, name: &str) -> Result<ModuleFacet> {
        let module = self
            .config
            .find_module(name)
            .ok_or_else(|| resolve::module_not_found(name))?;

        let descriptor_path = self.root.join(&module.descriptor);
        let descriptor = ModuleDescriptor::from_file(&descriptor_path)?;

        let settings_path = module.settings.as_ref().map(|p| self.root.join(p));
        let settings = match (&settings_path, module.use_project_settings) {
            (Some(path), false) => ResolveSettings::from_file(path)?,
            _ => self.config.settings.clone(),
        };

        Ok(ModuleFacet {
            name: module.name.clone(),
            descriptor_path,
            settings_path,
            use_project_settings: module.use_project_settings,
            descriptor,
            settings,
        })
    }
}
