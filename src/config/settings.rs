//! Resolution settings
//!
//! Settings are read once by the caller (from the workspace file or from a
//! module's custom settings file) and passed explicitly into a resolution run.
//! The resolution core never looks them up on its own.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::pattern::{DEFAULT_ARTIFACT_PATTERN, DEFAULT_DESCRIPTOR_PATTERN};
use crate::error::{Result, config};

/// How competing revisions of one module are reduced to a single revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictStrategy {
    /// Keep the greatest revision
    #[default]
    Latest,
    /// Fail when two different revisions are requested
    Strict,
}

/// Settings for one resolution run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolveSettings {
    /// Run resolution on a background worker
    #[serde(default = "default_true")]
    pub resolve_in_background: bool,

    /// Conflict strategy for competing revisions
    #[serde(default)]
    pub conflict_strategy: ConflictStrategy,

    /// Artifact cache directory; defaults to the user cache directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Repositories searched in order
    #[serde(default)]
    pub repositories: Vec<RepositoryConfig>,
}

fn default_true() -> bool {
    true
}

impl Default for ResolveSettings {
    fn default() -> Self {
        Self {
            resolve_in_background: true,
            conflict_strategy: ConflictStrategy::default(),
            cache_dir: None,
            repositories: Vec::new(),
        }
    }
}

/// One repository in the search chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepositoryConfig {
    /// Display name used in logs
    pub name: String,

    /// Root location (`http://`, `https://` or `file://`)
    pub root: String,

    /// Layout of module descriptors below the root
    #[serde(default = "default_descriptor_pattern")]
    pub descriptor_pattern: String,

    /// Layout of artifacts below the root
    #[serde(default = "default_artifact_pattern")]
    pub artifact_pattern: String,
}

fn default_descriptor_pattern() -> String {
    DEFAULT_DESCRIPTOR_PATTERN.to_string()
}

fn default_artifact_pattern() -> String {
    DEFAULT_ARTIFACT_PATTERN.to_string()
}

impl RepositoryConfig {
    /// Repository with default layout patterns
    pub fn new(name: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            descriptor_pattern: default_descriptor_pattern(),
            artifact_pattern: default_artifact_pattern(),
        }
    }
}

impl ResolveSettings {
    /// Parse settings from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read a standalone settings file
    ///
    /// Relative `file:` roots and cache directories are resolved against the
    /// directory containing the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(config::not_found(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::fs::read_failed(path.display().to_string(), e.to_string()))?;
        let mut settings = Self::from_yaml(&content).map_err(|e| match e {
            crate::error::IvyError::ConfigParseFailed { reason, .. } => {
                config::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })?;
        if let Some(base) = path.parent() {
            settings.anchor(base);
        }
        Ok(settings)
    }

    /// Resolve relative paths in the settings against `base`
    pub fn anchor(&mut self, base: &Path) {
        if let Some(cache_dir) = &self.cache_dir {
            if cache_dir.is_relative() {
                self.cache_dir = Some(base.join(cache_dir));
            }
        }
        for repository in &mut self.repositories {
            if let Some(relative) = relative_file_root(&repository.root) {
                let absolute = base.join(relative);
                let mut root = format!("file://{}", absolute.display());
                if repository.root.ends_with('/') && !root.ends_with('/') {
                    root.push('/');
                }
                repository.root = root;
            }
        }
    }

    /// Validate repository entries
    pub fn validate(&self) -> Result<()> {
        for repository in &self.repositories {
            if repository.name.is_empty() {
                return Err(config::invalid("repository entries require a 'name'"));
            }
            if !(repository.root.starts_with("http") || repository.root.starts_with("file")) {
                return Err(config::invalid(format!(
                    "repository '{}' has unsupported root '{}'",
                    repository.name, repository.root
                )));
            }
        }
        Ok(())
    }
}

/// `file:relative/path` roots written without a leading slash
fn relative_file_root(root: &str) -> Option<&str> {
    let rest = root.strip_prefix("file:")?;
    if rest.starts_with('/') {
        None
    } else {
        Some(rest)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::IvyError;

    #[test]
    fn test_defaults() {
        let settings = ResolveSettings::from_yaml("{}").expect("empty settings");
        assert!(settings.resolve_in_background);
        assert_eq!(settings.conflict_strategy, ConflictStrategy::Latest);
        assert!(settings.repositories.is_empty());
        assert_eq!(settings, ResolveSettings::default());
    }

    #[test]
    fn test_parse_repositories() {
        let yaml = r#"
resolve_in_background: false
conflict_strategy: strict
repositories:
  - name: central
    root: https://repo.example.org/ivy/
  - name: local
    root: file:///opt/repo
    artifact_pattern: "[module]/[artifact]-[revision].[ext]"
"#;
        let settings = ResolveSettings::from_yaml(yaml).expect("valid settings");
        assert!(!settings.resolve_in_background);
        assert_eq!(settings.conflict_strategy, ConflictStrategy::Strict);
        assert_eq!(settings.repositories.len(), 2);
        assert_eq!(settings.repositories[0].descriptor_pattern, DEFAULT_DESCRIPTOR_PATTERN);
        assert_eq!(
            settings.repositories[1].artifact_pattern,
            "[module]/[artifact]-[revision].[ext]"
        );
    }

    #[test]
    fn test_unsupported_root_rejected() {
        let yaml = "repositories:\n  - name: ftp\n    root: ftp://example.org\n";
        let result = ResolveSettings::from_yaml(yaml);
        assert!(matches!(result, Err(IvyError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_anchor_relative_paths() {
        let mut settings = ResolveSettings {
            cache_dir: Some(PathBuf::from("cache")),
            repositories: vec![
                RepositoryConfig::new("local", "file:repo/"),
                RepositoryConfig::new("abs", "file:///opt/repo"),
            ],
            ..ResolveSettings::default()
        };
        settings.anchor(Path::new("/work"));
        assert_eq!(settings.cache_dir, Some(PathBuf::from("/work/cache")));
        assert_eq!(settings.repositories[0].root, "file:///work/repo/");
        assert_eq!(settings.repositories[1].root, "file:///opt/repo");
    }
}
