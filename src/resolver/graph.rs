//! Dependency graph walk
//!
//! The walk starts at the root module's declarations and proceeds depth
//! first in declaration order. Each node is one declaration pinned to a
//! concrete revision, together with the exclusion rules in force for its
//! subtree:
//!
//! ```text
//! app
//! ├── core;1.0            exclusions: [org.legacy#*]
//! │   └── util;2.0        exclusions: [org.legacy#*]
//! └── web;1.1
//!     └── util;2.1
//! ```
//!
//! Nodes are shared when the same revision is reached again under the same
//! conditions, so the graph is a DAG. Conflicts are not resolved here: every
//! revision requested for a module is recorded in [`DependencyGraph::requests`]
//! and settled once the walk has finished.

use std::collections::HashMap;

use tracing::debug;

use super::cancel::CancellationToken;
use super::dynamic;
use super::fetcher::Fetcher;
use super::repositories::RepositorySet;
use crate::config::{DependencyDeclaration, ExclusionRule, ModuleDescriptor};
use crate::domain::{ModuleId, ModuleRevisionId, revision};
use crate::error::{IvyError, Result, resolve};
use crate::logging::MessageLogger;

pub type NodeId = usize;

/// One declaration pinned to a concrete revision
#[derive(Debug, Clone)]
pub struct Node {
    pub declaration: DependencyDeclaration,
    pub revision: ModuleRevisionId,
    pub children: Vec<NodeId>,
}

/// A revision requested for a module, and by whom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub revision: String,
    pub requested_by: String,
}

/// Result of the walk
#[derive(Debug, Default)]
pub struct DependencyGraph {
    pub nodes: Vec<Node>,
    pub roots: Vec<NodeId>,
    /// Requests per module, in the order modules were first reached
    pub requests: Vec<(ModuleId, Vec<Request>)>,
}

impl DependencyGraph {
    fn record_request(&mut self, module: &ModuleId, request: Request) {
        match self.requests.iter_mut().find(|(m, _)| m == module) {
            Some((_, requests)) => {
                if !requests.contains(&request) {
                    requests.push(request);
                }
            }
            None => self.requests.push((module.clone(), vec![request])),
        }
    }
}

/// Node identity: the same revision under the same conditions is one node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct NodeKey {
    revision: ModuleRevisionId,
    conf: String,
    transitive: bool,
    exclusions: Vec<ExclusionRule>,
}

pub(crate) struct GraphWalker<'a> {
    repositories: &'a RepositorySet,
    fetcher: &'a Fetcher<'a>,
    logger: &'a dyn MessageLogger,
    cancel: &'a CancellationToken,
    descriptors: HashMap<ModuleRevisionId, Option<ModuleDescriptor>>,
    expansions: HashMap<(ModuleId, String), ModuleRevisionId>,
    index: HashMap<NodeKey, NodeId>,
    graph: DependencyGraph,
}

impl<'a> GraphWalker<'a> {
    pub(crate) fn new(
        repositories: &'a RepositorySet,
        fetcher: &'a Fetcher<'a>,
        logger: &'a dyn MessageLogger,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self {
            repositories,
            fetcher,
            logger,
            cancel,
            descriptors: HashMap::new(),
            expansions: HashMap::new(),
            index: HashMap::new(),
            graph: DependencyGraph::default(),
        }
    }

    /// Walk the graph below `root`
    ///
    /// The root's own `excludes` apply to its whole graph.
    pub(crate) fn walk(mut self, root: &ModuleDescriptor) -> Result<DependencyGraph> {
        let root_id = root.revision_id();
        let mut path = vec![root_id.module.clone()];
        let exclusions = merge_exclusions(&[], &root.excludes);

        for declaration in &root.dependencies {
            if let Some(id) = self.visit(declaration, &exclusions, &mut path)? {
                self.graph.roots.push(id);
            }
        }
        Ok(self.graph)
    }

    fn visit(
        &mut self,
        declaration: &DependencyDeclaration,
        inherited: &[ExclusionRule],
        path: &mut Vec<ModuleId>,
    ) -> Result<Option<NodeId>> {
        let module = declaration.module_id();
        let requested_by = display_path(path);

        if let Some(rule) = inherited.iter().find(|rule| rule.matches(&module)) {
            self.logger.verbose(&format!(
                "{module} excluded by rule {}#{} (via {requested_by})",
                rule.org, rule.module
            ));
            return Ok(None);
        }
        if path.contains(&module) {
            self.logger.verbose(&format!(
                "Circular dependency on {module} cut (via {requested_by})"
            ));
            return Ok(None);
        }

        let revision = self.pin(declaration)?;
        self.graph.record_request(
            &module,
            Request {
                revision: revision.revision.clone(),
                requested_by,
            },
        );

        let exclusions = merge_exclusions(inherited, &declaration.exclude);
        let key = NodeKey {
            revision: revision.clone(),
            conf: declaration.conf.clone(),
            transitive: declaration.transitive,
            exclusions: exclusions.clone(),
        };
        if let Some(id) = self.index.get(&key) {
            return Ok(Some(*id));
        }

        let id = self.graph.nodes.len();
        self.graph.nodes.push(Node {
            declaration: declaration.clone(),
            revision: revision.clone(),
            children: Vec::new(),
        });
        self.index.insert(key, id);

        if !declaration.transitive {
            return Ok(Some(id));
        }

        let Some(descriptor) = self.descriptor(&revision)? else {
            return Ok(Some(id));
        };
        let child_exclusions = merge_exclusions(&exclusions, &descriptor.excludes);

        path.push(module);
        let mut children = Vec::new();
        for child in &descriptor.dependencies {
            if let Some(child_id) = self.visit(child, &child_exclusions, path)? {
                children.push(child_id);
            }
        }
        path.pop();

        self.graph.nodes[id].children = children;
        Ok(Some(id))
    }

    /// Concrete revision for a declaration, expanding dynamic requests once
    fn pin(&mut self, declaration: &DependencyDeclaration) -> Result<ModuleRevisionId> {
        if !revision::is_dynamic(&declaration.rev) {
            return Ok(declaration.revision_id());
        }

        let key = (declaration.module_id(), declaration.rev.clone());
        if let Some(pinned) = self.expansions.get(&key) {
            return Ok(pinned.clone());
        }
        self.cancel.check()?;
        let pinned = dynamic::expand(self.repositories, &key.0, &declaration.rev)?;
        self.expansions.insert(key, pinned.clone());
        Ok(pinned)
    }

    /// Descriptor of a revision, fetched at most once per walk
    fn descriptor(&mut self, revision: &ModuleRevisionId) -> Result<Option<ModuleDescriptor>> {
        if let Some(known) = self.descriptors.get(revision) {
            return Ok(known.clone());
        }
        self.cancel.check()?;

        let fetched = self
            .fetcher
            .descriptor(revision)
            .map_err(|e| escalate(revision, e))?;
        let descriptor = match fetched {
            Some(path) => Some(
                ModuleDescriptor::from_file(&path).map_err(|e| escalate(revision, e))?,
            ),
            None => {
                debug!("No descriptor for {}, assuming no dependencies", revision);
                None
            }
        };

        self.descriptors.insert(revision.clone(), descriptor.clone());
        Ok(descriptor)
    }
}

/// Turn a failure into a resolution error naming `revision`
pub(crate) fn escalate(revision: &ModuleRevisionId, error: IvyError) -> IvyError {
    match error {
        IvyError::Cancelled | IvyError::Resolution { .. } => error,
        other => resolve::failed(revision.to_string(), other.to_string()),
    }
}

fn merge_exclusions(inherited: &[ExclusionRule], own: &[ExclusionRule]) -> Vec<ExclusionRule> {
    let mut merged = inherited.to_vec();
    for rule in own {
        if !merged.contains(rule) {
            merged.push(rule.clone());
        }
    }
    merged
}

fn display_path(path: &[ModuleId]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
