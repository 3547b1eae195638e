//! Module coordinates
//!
//! A [`ModuleId`] names a module independent of its revision (the unit of
//! conflict resolution); a [`ModuleRevisionId`] pins one revision of it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Organisation and name of a module
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId {
    pub organisation: String,
    pub name: String,
}

impl ModuleId {
    pub fn new(organisation: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            organisation: organisation.into(),
            name: name.into(),
        }
    }

    /// Pin this module to a revision
    pub fn with_revision(&self, revision: impl Into<String>) -> ModuleRevisionId {
        ModuleRevisionId {
            module: self.clone(),
            revision: revision.into(),
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.organisation, self.name)
    }
}

/// A module at one revision, e.g. `org.acme#core;1.2`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleRevisionId {
    pub module: ModuleId,
    pub revision: String,
}

impl ModuleRevisionId {
    pub fn new(
        organisation: impl Into<String>,
        name: impl Into<String>,
        revision: impl Into<String>,
    ) -> Self {
        Self {
            module: ModuleId::new(organisation, name),
            revision: revision.into(),
        }
    }

    pub fn organisation(&self) -> &str {
        &self.module.organisation
    }

    pub fn name(&self) -> &str {
        &self.module.name
    }
}

impl fmt::Display for ModuleRevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.module, self.revision)
    }
}
