//! Module descriptor (module.yaml) data structures
//!
//! A descriptor names a module and declares its dependencies. The same format
//! is used for the workspace's own modules and for descriptors published next
//! to artifacts in a repository:
//!
//! ```yaml
//! info:
//!   organisation: org.acme
//!   module: app
//!   revision: "1.0"
//! dependencies:
//!   - org: org.acme
//!     name: core
//!     rev: "2.+"
//!     javadoc: true
//!     exclude:
//!       - org: org.legacy
//! excludes:
//!   - module: commons-logging
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{ModuleId, ModuleRevisionId};
use crate::error::{Result, config};

/// Configuration used when a declaration does not name one
pub const DEFAULT_CONF: &str = "default";

/// Artifact extension used when a declaration does not name one
pub const DEFAULT_EXT: &str = "jar";

/// Module descriptor from module.yaml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleDescriptor {
    /// Identity of the described module
    pub info: ModuleInfo,

    /// Declared dependencies in declaration order
    #[serde(default)]
    pub dependencies: Vec<DependencyDeclaration>,

    /// Exclusion rules applying to the whole dependency graph of this module
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<ExclusionRule>,
}

/// Identity block of a descriptor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleInfo {
    pub organisation: String,
    pub module: String,
    #[serde(default = "default_revision")]
    pub revision: String,
}

fn default_revision() -> String {
    "working".to_string()
}

fn default_conf() -> String {
    DEFAULT_CONF.to_string()
}

fn default_ext() -> String {
    DEFAULT_EXT.to_string()
}

fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// A dependency declaration in module.yaml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DependencyDeclaration {
    /// Organisation of the dependency
    pub org: String,

    /// Module name of the dependency
    pub name: String,

    /// Requested revision, possibly dynamic (`latest.integration`, `1.+`)
    pub rev: String,

    /// Configuration this dependency belongs to
    #[serde(default = "default_conf")]
    pub conf: String,

    /// Primary artifact extension
    #[serde(default = "default_ext")]
    pub ext: String,

    /// Whether the dependency's own dependencies are resolved too
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub transitive: bool,

    /// Attach the javadoc classifier artifact
    #[serde(default)]
    pub javadoc: bool,

    /// Attach the sources classifier artifact
    #[serde(default)]
    pub sources: bool,

    /// Exclusion rules applying to this dependency's subtree
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<ExclusionRule>,
}

/// Rule removing matching modules from a dependency graph
///
/// Both fields accept `*` wildcards; an omitted field matches everything.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ExclusionRule {
    #[serde(default = "wildcard")]
    pub org: String,
    #[serde(default = "wildcard")]
    pub module: String,
}

fn wildcard() -> String {
    "*".to_string()
}

impl ExclusionRule {
    pub fn new(org: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            module: module.into(),
        }
    }

    /// Whether this rule excludes the given module
    pub fn matches(&self, module: &ModuleId) -> bool {
        wildcard_match(&self.org, &module.organisation) && wildcard_match(&self.module, &module.name)
    }
}

/// Match `text` against a pattern where `*` stands for any run of characters
fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let (mut p, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] != '*' && pattern[p] == text[t] {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, t));
            p += 1;
        } else if let Some((star_p, star_t)) = star {
            p = star_p + 1;
            t = star_t + 1;
            star = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}

impl DependencyDeclaration {
    /// Create a declaration with default configuration and flags
    pub fn new(org: impl Into<String>, name: impl Into<String>, rev: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            name: name.into(),
            rev: rev.into(),
            conf: default_conf(),
            ext: default_ext(),
            transitive: true,
            javadoc: false,
            sources: false,
            exclude: Vec::new(),
        }
    }

    /// Module this declaration points at
    pub fn module_id(&self) -> ModuleId {
        ModuleId::new(&self.org, &self.name)
    }

    /// Module at the declared (possibly dynamic) revision
    pub fn revision_id(&self) -> ModuleRevisionId {
        self.module_id().with_revision(&self.rev)
    }
}

impl ModuleDescriptor {
    /// Create an empty descriptor for a module
    pub fn new(organisation: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            info: ModuleInfo {
                organisation: organisation.into(),
                module: module.into(),
                revision: default_revision(),
            },
            dependencies: Vec::new(),
            excludes: Vec::new(),
        }
    }

    /// Parse a descriptor from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let descriptor: Self = serde_yaml::from_str(yaml)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Read and parse a descriptor file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(config::not_found(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::fs::read_failed(path.display().to_string(), e.to_string()))?;
        Self::from_yaml(&content).map_err(|e| match e {
            crate::error::IvyError::ConfigParseFailed { reason, .. } => {
                config::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }

    /// Identity of the described module
    pub fn revision_id(&self) -> ModuleRevisionId {
        ModuleRevisionId::new(&self.info.organisation, &self.info.module, &self.info.revision)
    }

    /// Validate required fields
    pub fn validate(&self) -> Result<()> {
        if self.info.organisation.is_empty() || self.info.module.is_empty() {
            return Err(config::invalid(
                "descriptor info requires 'organisation' and 'module'",
            ));
        }
        for dep in &self.dependencies {
            if dep.org.is_empty() || dep.name.is_empty() || dep.rev.is_empty() {
                return Err(config::invalid(format!(
                    "dependency '{}#{}' of {} requires 'org', 'name' and 'rev'",
                    dep.org,
                    dep.name,
                    self.revision_id()
                )));
            }
        }
        Ok(())
    }
}
