//! Workspace configuration (ivyfetch.yaml) data structures
//!
//! The workspace file holds the project-wide resolution settings and the
//! per-module facet settings:
//!
//! ```yaml
//! settings:
//!   repositories:
//!     - name: local
//!       root: file:repo/
//! modules:
//!   - name: app
//!     descriptor: app/module.yaml
//!   - name: tools
//!     descriptor: tools/module.yaml
//!     settings: tools/settings.yaml
//!     use_project_settings: false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::settings::ResolveSettings;
use crate::error::{IvyError, Result, config};

/// Workspace configuration (ivyfetch.yaml)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WorkspaceConfig {
    /// Project-wide resolution settings
    #[serde(default)]
    pub settings: ResolveSettings,

    /// Modules of the workspace
    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

/// Facet settings of one module
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleConfig {
    /// Module name, unique within the workspace
    pub name: String,

    /// Path to the module's descriptor, relative to the workspace root
    pub descriptor: PathBuf,

    /// Custom settings file, used when `use_project_settings` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<PathBuf>,

    /// Use the project-wide settings instead of `settings`
    #[serde(default = "default_true")]
    pub use_project_settings: bool,
}

fn default_true() -> bool {
    true
}

impl WorkspaceConfig {
    /// Parse workspace configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the workspace file at `path`
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(config::not_found(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::fs::read_failed(path.display().to_string(), e.to_string()))?;
        Self::from_yaml(&content).map_err(|e| match e {
            IvyError::ConfigParseFailed { reason, .. } => {
                config::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }

    /// Find a module by name
    pub fn find_module(&self, name: &str) -> Option<&ModuleConfig> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Validate the workspace configuration
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()?;

        let mut seen = std::collections::HashSet::new();
        for module in &self.modules {
            if module.name.is_empty() {
                return Err(config::invalid("module entries require a 'name'"));
            }
            if !seen.insert(module.name.as_str()) {
                return Err(config::invalid(format!(
                    "module '{}' is declared more than once",
                    module.name
                )));
            }
            if !module.use_project_settings && module.settings.is_none() {
                return Err(config::invalid(format!(
                    "module '{}' opts out of project settings but names no settings file",
                    module.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_workspace() {
        let yaml = r#"
settings:
  resolve_in_background: false
  repositories:
    - name: local
      root: file:repo/
modules:
  - name: app
    descriptor: app/module.yaml
  - name: tools
    descriptor: tools/module.yaml
    settings: tools/settings.yaml
    use_project_settings: false
"#;
        let config = WorkspaceConfig::from_yaml(yaml).expect("valid workspace");
        assert!(!config.settings.resolve_in_background);
        assert_eq!(config.modules.len(), 2);

        let app = config.find_module("app").expect("app module");
        assert!(app.use_project_settings);
        assert!(app.settings.is_none());

        let tools = config.find_module("tools").expect("tools module");
        assert!(!tools.use_project_settings);
        assert_eq!(tools.settings, Some(PathBuf::from("tools/settings.yaml")));

        assert!(config.find_module("missing").is_none());
    }

    #[test]
    fn test_duplicate_module_rejected() {
        let yaml = r#"
modules:
  - name: app
    descriptor: a.yaml
  - name: app
    descriptor: b.yaml
"#;
        assert!(matches!(
            WorkspaceConfig::from_yaml(yaml),
            Err(IvyError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn test_custom_settings_required_when_opting_out() {
        let yaml = r#"
modules:
  - name: app
    descriptor: a.yaml
    use_project_settings: false
"#;
        assert!(matches!(
            WorkspaceConfig::from_yaml(yaml),
            Err(IvyError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn test_from_file_reports_path_on_parse_error() {
        let temp = crate::test_fixtures::create_temp_dir();
        let path = temp.path().join("ivyfetch.yaml");
        std::fs::write(&path, "modules: [unclosed").expect("write");
        match WorkspaceConfig::from_file(&path) {
            Err(IvyError::ConfigParseFailed { path: reported, .. }) => {
                assert!(reported.ends_with("ivyfetch.yaml"));
            }
            other => panic!("expected ConfigParseFailed, got {other:?}"),
        }
    }
}
