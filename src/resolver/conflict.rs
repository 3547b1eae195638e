//! Conflict resolution
//!
//! Runs after the walk. Each module keeps one revision, chosen by the
//! configured [`ConflictStrategy`]. Subtrees below an evicted revision drop
//! out, which can remove the only request for some other revision, so
//! selection is repeated over the requests that are still reachable until it
//! settles.

use std::collections::{HashMap, HashSet};

use super::graph::{DependencyGraph, NodeId, Request};
use crate::config::{ConflictStrategy, DependencyDeclaration};
use crate::domain::{ModuleId, ModuleRevisionId, revision};
use crate::error::{Result, resolve};
use crate::logging::MessageLogger;

/// Winning revision per module
pub type Winners = HashMap<ModuleId, String>;

/// A dependency that survived conflict resolution
#[derive(Debug, Clone)]
pub struct Selected {
    pub declaration: DependencyDeclaration,
    pub revision: ModuleRevisionId,
}

/// Settle conflicts and return the surviving dependencies in pre-order
///
/// Entries are unique by organisation, name and configuration. When several
/// declarations collapse into one entry, their auxiliary requests are merged.
pub fn resolve_conflicts(
    graph: &DependencyGraph,
    strategy: ConflictStrategy,
    logger: &dyn MessageLogger,
) -> Result<Vec<Selected>> {
    let mut requests = graph.requests.clone();
    let mut winners = select(&requests, strategy)?;

    // Each round can only change winners of modules with several requests;
    // bound the rounds so a pathological graph still terminates.
    for _ in 0..=graph.nodes.len() {
        let reachable = reachable_requests(graph, &winners);
        let next = select(&reachable, strategy)?;
        requests = reachable;
        if next == winners {
            break;
        }
        winners = next;
    }

    report_evictions(&requests, &winners, logger);
    Ok(collect(graph, &winners))
}

/// One revision per module
fn select(requests: &[(ModuleId, Vec<Request>)], strategy: ConflictStrategy) -> Result<Winners> {
    let mut winners = Winners::new();
    for (module, module_requests) in requests {
        let mut distinct: Vec<&str> = Vec::new();
        for request in module_requests {
            if !distinct.contains(&request.revision.as_str()) {
                distinct.push(&request.revision);
            }
        }

        let winner = match (distinct.as_slice(), strategy) {
            ([only], _) => (*only).to_string(),
            (_, ConflictStrategy::Strict) => {
                return Err(resolve::conflict(module.to_string(), distinct.join(", ")));
            }
            (_, ConflictStrategy::Latest) => revision::latest(distinct.iter().copied())
                .unwrap_or_default()
                .to_string(),
        };
        winners.insert(module.clone(), winner);
    }
    Ok(winners)
}

/// Requests made by nodes that are still reachable under `winners`
///
/// A node whose revision lost still counts as a request (it asked for the
/// module) but its children are not visited.
fn reachable_requests(graph: &DependencyGraph, winners: &Winners) -> Vec<(ModuleId, Vec<Request>)> {
    let mut kept: HashSet<(ModuleId, String)> = HashSet::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut stack: Vec<NodeId> = graph.roots.iter().rev().copied().collect();

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let node = &graph.nodes[id];
        kept.insert((node.revision.module.clone(), node.revision.revision.clone()));
        if is_winner(winners, &node.revision) {
            stack.extend(node.children.iter().rev().copied());
        }
    }

    graph
        .requests
        .iter()
        .filter_map(|(module, requests)| {
            let requests: Vec<Request> = requests
                .iter()
                .filter(|r| kept.contains(&(module.clone(), r.revision.clone())))
                .cloned()
                .collect();
            (!requests.is_empty()).then(|| (module.clone(), requests))
        })
        .collect()
}

fn is_winner(winners: &Winners, revision: &ModuleRevisionId) -> bool {
    winners
        .get(&revision.module)
        .is_none_or(|winner| *winner == revision.revision)
}

fn report_evictions(
    requests: &[(ModuleId, Vec<Request>)],
    winners: &Winners,
    logger: &dyn MessageLogger,
) {
    for (module, module_requests) in requests {
        let Some(winner) = winners.get(module) else {
            continue;
        };
        for request in module_requests.iter().filter(|r| r.revision != *winner) {
            logger.info(&format!(
                "{module}: evicted revision {} requested by {} in favour of {winner}",
                request.revision, request.requested_by
            ));
        }
    }
}

/// Surviving entries in pre-order, unique by (organisation, name, conf)
fn collect(graph: &DependencyGraph, winners: &Winners) -> Vec<Selected> {
    let mut selected: Vec<Selected> = Vec::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut stack: Vec<NodeId> = graph.roots.iter().rev().copied().collect();

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let node = &graph.nodes[id];
        if !is_winner(winners, &node.revision) {
            continue;
        }

        let existing = selected.iter_mut().find(|s| {
            s.revision.module == node.revision.module && s.declaration.conf == node.declaration.conf
        });
        match existing {
            Some(entry) => {
                entry.declaration.javadoc |= node.declaration.javadoc;
                entry.declaration.sources |= node.declaration.sources;
            }
            None => selected.push(Selected {
                declaration: node.declaration.clone(),
                revision: node.revision.clone(),
            }),
        }
        stack.extend(node.children.iter().rev().copied());
    }

    selected
}
