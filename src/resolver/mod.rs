//! Dependency resolution
//!
//! This module handles:
//! - Walking a module's dependency graph across the configured repositories
//! - Expanding dynamic revisions (`latest.integration`, `1.+`)
//! - Applying path-scoped and module-wide exclusions
//! - Settling revision conflicts once the walk is complete
//! - Retrieving primary artifacts and best-effort javadoc/sources
//!
//! A missing primary artifact fails the whole resolution with a
//! `Resolution` error naming the module. A missing auxiliary artifact only
//! produces a warning through the supplied [`MessageLogger`].

pub mod cancel;
pub mod conflict;
pub mod dynamic;
pub mod fetcher;
pub mod graph;
pub mod repositories;

use std::path::{Path, PathBuf};

use tracing::debug;

pub use cancel::CancellationToken;
pub use repositories::RepositorySet;

use crate::config::{ConflictStrategy, ModuleDescriptor};
use crate::domain::{AuxiliaryKind, ExternalDependency, ResolvedDependency};
use crate::error::{IvyError, Result, resolve};
use crate::logging::MessageLogger;
use crate::repository::{NoopObserver, TransferObserver};
use conflict::Selected;
use fetcher::Fetcher;
use graph::GraphWalker;

/// Resolves a module's declarations against a repository chain
pub struct DependencyResolver<'a> {
    repositories: &'a RepositorySet,
    cache_dir: PathBuf,
    strategy: ConflictStrategy,
    observer: &'a dyn TransferObserver,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(
        repositories: &'a RepositorySet,
        cache_dir: impl Into<PathBuf>,
        strategy: ConflictStrategy,
    ) -> Self {
        Self {
            repositories,
            cache_dir: cache_dir.into(),
            strategy,
            observer: &NoopObserver,
        }
    }

    /// Report transfers to `observer`
    #[must_use]
    pub fn with_observer(mut self, observer: &'a dyn TransferObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Resolve the dependencies declared by `module`
    ///
    /// Returns one entry per (organisation, name, configuration), in
    /// depth-first declaration order. Either the whole list is returned or a
    /// single error; cancellation yields `Cancelled`, never a partial list.
    pub fn resolve(
        &self,
        module: &ModuleDescriptor,
        logger: &dyn MessageLogger,
        cancel: &CancellationToken,
    ) -> Result<Vec<ResolvedDependency>> {
        let fetcher = Fetcher::new(self.repositories, &self.cache_dir, self.observer);

        let graph = GraphWalker::new(self.repositories, &fetcher, logger, cancel).walk(module)?;
        debug!(
            "Walked {} nodes below {}",
            graph.nodes.len(),
            module.revision_id()
        );

        let selected = conflict::resolve_conflicts(&graph, self.strategy, logger)?;

        selected
            .into_iter()
            .map(|entry| self.retrieve(entry, &fetcher, logger, cancel))
            .collect()
    }

    fn retrieve(
        &self,
        entry: Selected,
        fetcher: &Fetcher<'_>,
        logger: &dyn MessageLogger,
        cancel: &CancellationToken,
    ) -> Result<ResolvedDependency> {
        let Selected {
            declaration,
            revision,
        } = entry;

        cancel.check()?;
        let primary = fetcher
            .artifact(&revision, &declaration.ext, None)
            .map_err(|e| graph::escalate(&revision, e))?
            .ok_or_else(|| {
                resolve::failed(
                    revision.to_string(),
                    format!(
                        "artifact {}.{} not found in any repository",
                        revision.name(),
                        declaration.ext
                    ),
                )
            })?;

        let mut resolved = ResolvedDependency::new(declaration, revision, primary);

        for kind in AuxiliaryKind::requested_by(&resolved.declaration) {
            cancel.check()?;
            match fetcher.artifact(&resolved.revision, "jar", Some(kind.classifier())) {
                Ok(Some(path)) => resolved.auxiliary.push(ExternalDependency::new(kind, path)),
                Ok(None) => logger.warn(&format!(
                    "No {} artifact for {}",
                    kind.classifier(),
                    resolved.revision
                )),
                Err(IvyError::Cancelled) => return Err(IvyError::Cancelled),
                Err(e) => logger.warn(&format!(
                    "Could not retrieve {} artifact for {}: {e}",
                    kind.classifier(),
                    resolved.revision
                )),
            }
        }

        Ok(resolved)
    }
}
