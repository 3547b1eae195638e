//! Resolved dependency types
//!
//! A [`ResolvedDependency`] is the outcome of resolving one declaration: the
//! winning revision, the local path of its primary artifact and any auxiliary
//! classifier artifacts (javadoc, sources) that could be retrieved.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::coordinate::ModuleRevisionId;
use crate::config::DependencyDeclaration;

/// Kind of classpath root a local artifact is attached as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RootType {
    Classes,
    Javadoc,
    Sources,
}

impl std::fmt::Display for RootType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RootType::Classes => "classes",
            RootType::Javadoc => "javadoc",
            RootType::Sources => "sources",
        };
        f.write_str(name)
    }
}

/// Auxiliary artifact kinds that can be attached to a dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AuxiliaryKind {
    JavaDoc,
    Sources,
}

impl AuxiliaryKind {
    /// Classifier used to locate the artifact in a repository
    pub fn classifier(self) -> &'static str {
        match self {
            AuxiliaryKind::JavaDoc => "javadoc",
            AuxiliaryKind::Sources => "sources",
        }
    }

    /// Root type the artifact is attached as
    pub fn root_type(self) -> RootType {
        match self {
            AuxiliaryKind::JavaDoc => RootType::Javadoc,
            AuxiliaryKind::Sources => RootType::Sources,
        }
    }

    /// Kinds requested by a declaration, in attachment order
    pub fn requested_by(declaration: &DependencyDeclaration) -> Vec<AuxiliaryKind> {
        let mut kinds = Vec::new();
        if declaration.javadoc {
            kinds.push(AuxiliaryKind::JavaDoc);
        }
        if declaration.sources {
            kinds.push(AuxiliaryKind::Sources);
        }
        kinds
    }
}

/// A retrieved auxiliary artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalDependency {
    pub kind: AuxiliaryKind,
    pub local_artifact_file: PathBuf,
}

impl ExternalDependency {
    pub fn new(kind: AuxiliaryKind, local_artifact_file: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            local_artifact_file: local_artifact_file.into(),
        }
    }

    pub fn root_type(&self) -> RootType {
        self.kind.root_type()
    }
}

/// A local path to attach to a module's classpath, tagged with its root type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryRoot {
    pub path: PathBuf,
    pub root_type: RootType,
}

/// A declaration resolved to a concrete revision and local artifacts
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDependency {
    /// Declaration that led to this dependency
    pub declaration: DependencyDeclaration,

    /// Revision selected by conflict resolution
    pub revision: ModuleRevisionId,

    /// Local path of the primary artifact
    pub artifact_path: PathBuf,

    /// Auxiliary artifacts that were retrieved, in request order
    pub auxiliary: Vec<ExternalDependency>,
}

impl ResolvedDependency {
    pub fn new(
        declaration: DependencyDeclaration,
        revision: ModuleRevisionId,
        artifact_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            declaration,
            revision,
            artifact_path: artifact_path.into(),
            auxiliary: Vec::new(),
        }
    }

    /// Identity used for deduplication: organisation, name and configuration
    pub fn key(&self) -> (&str, &str, &str) {
        (
            self.revision.organisation(),
            self.revision.name(),
            &self.declaration.conf,
        )
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// Auxiliary artifact of the given kind, if it was retrieved
    pub fn auxiliary(&self, kind: AuxiliaryKind) -> Option<&ExternalDependency> {
        self.auxiliary.iter().find(|a| a.kind == kind)
    }

    /// All paths to attach for this dependency, primary artifact first
    pub fn library_roots(&self) -> Vec<LibraryRoot> {
        std::iter::once(LibraryRoot {
            path: self.artifact_path.clone(),
            root_type: RootType::Classes,
        })
        .chain(self.auxiliary.iter().map(|a| LibraryRoot {
            path: a.local_artifact_file.clone(),
            root_type: a.root_type(),
        }))
        .collect()
    }
}
