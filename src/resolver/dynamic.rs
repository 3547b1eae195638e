//! Dynamic revision expansion
//!
//! `latest.integration`, `latest.release` and prefix requests such as `1.+`
//! are expanded by listing each repository's revision directory and picking
//! the greatest revision that satisfies the request.

use tracing::debug;

use super::repositories::RepositorySet;
use crate::domain::{ModuleId, ModuleRevisionId, revision};
use crate::error::{Result, resolve};

/// Concrete revision of `module` satisfying `request`
pub(crate) fn expand(
    repositories: &RepositorySet,
    module: &ModuleId,
    request: &str,
) -> Result<ModuleRevisionId> {
    let requested = module.with_revision(request);
    let mut candidates: Vec<String> = Vec::new();
    let mut enumerable = false;

    for configured in repositories.iter() {
        let Some(directory) = configured.revisions_location(&requested) else {
            continue;
        };
        let listing = configured
            .repository()
            .list(&directory)
            .map_err(|e| resolve::failed(requested.to_string(), e.to_string()))?;
        let Some(children) = listing else {
            debug!("{} cannot enumerate {}", configured.name(), directory);
            continue;
        };
        enumerable = true;

        for child in children {
            let Some(name) = child.trim_end_matches('/').rsplit('/').next() else {
                continue;
            };
            if revision::matches_dynamic(request, name) && !candidates.iter().any(|c| c == name) {
                candidates.push(name.to_string());
            }
        }
    }

    if !enumerable {
        return Err(resolve::failed(
            requested.to_string(),
            "no repository can list the available revisions",
        ));
    }

    let latest = revision::latest(candidates.iter().map(String::as_str)).ok_or_else(|| {
        resolve::failed(
            requested.to_string(),
            format!("no revision matches '{request}'"),
        )
    })?;

    debug!("Expanded {} to {}", requested, latest);
    Ok(module.with_revision(latest))
}
