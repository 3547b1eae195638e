//! Retrieval of descriptors and artifacts into the local cache
//!
//! Repositories are searched in order; the first one where the resource
//! exists serves it. A file already in the cache is reused when its length
//! matches the length the repository reports.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::repositories::{ConfiguredRepository, RepositorySet};
use crate::cache;
use crate::domain::ModuleRevisionId;
use crate::error::Result;
use crate::repository::{Resource, TransferObserver};

/// File name the cache stores descriptors under
const DESCRIPTOR_FILE: &str = "module.yaml";

pub(crate) struct Fetcher<'a> {
    repositories: &'a RepositorySet,
    cache_dir: &'a Path,
    observer: &'a dyn TransferObserver,
}

impl<'a> Fetcher<'a> {
    pub(crate) fn new(
        repositories: &'a RepositorySet,
        cache_dir: &'a Path,
        observer: &'a dyn TransferObserver,
    ) -> Self {
        Self {
            repositories,
            cache_dir,
            observer,
        }
    }

    /// Cached descriptor of a module revision, `None` if no repository has one
    pub(crate) fn descriptor(&self, mrid: &ModuleRevisionId) -> Result<Option<PathBuf>> {
        self.fetch_first(mrid, DESCRIPTOR_FILE, |repository| {
            repository.descriptor_location(mrid)
        })
    }

    /// Cached artifact of a module revision, `None` if no repository has it
    pub(crate) fn artifact(
        &self,
        mrid: &ModuleRevisionId,
        ext: &str,
        classifier: Option<&str>,
    ) -> Result<Option<PathBuf>> {
        let file_name = match classifier {
            Some(classifier) => format!("{}-{}-{classifier}.{ext}", mrid.name(), mrid.revision),
            None => format!("{}-{}.{ext}", mrid.name(), mrid.revision),
        };
        self.fetch_first(mrid, &file_name, |repository| {
            repository.artifact_location(mrid, ext, classifier)
        })
    }

    fn fetch_first<F>(
        &self,
        mrid: &ModuleRevisionId,
        file_name: &str,
        locate: F,
    ) -> Result<Option<PathBuf>>
    where
        F: Fn(&ConfiguredRepository) -> String,
    {
        for configured in self.repositories.iter() {
            let location = locate(configured);
            let resource = configured.repository().resolve(&location)?;
            if !resource.exists() {
                debug!("{} not in {}", location, configured.name());
                continue;
            }

            let destination = cache::artifact_path(self.cache_dir, mrid, file_name);
            if is_cached(&destination, &resource) {
                debug!("Reusing cached {}", destination.display());
            } else {
                configured
                    .repository()
                    .get(&location, &destination, self.observer)?;
            }
            return Ok(Some(destination));
        }
        Ok(None)
    }
}

/// Whether `destination` already holds `resource`
fn is_cached(destination: &Path, resource: &Resource) -> bool {
    let Some(expected) = resource.content_length() else {
        return false;
    };
    std::fs::metadata(destination)
        .map(|metadata| metadata.is_file() && metadata.len() == expected)
        .unwrap_or(false)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::ResolveSettings;
    use crate::repository::TransferEventKind;
    use crate::test_fixtures::{RecordingObserver, RepoFixture, create_temp_dir};

    fn set_for(repos: &[&RepoFixture]) -> RepositorySet {
        let settings = ResolveSettings {
            repositories: repos
                .iter()
                .enumerate()
                .map(|(i, r)| r.config(&format!("repo{i}")))
                .collect(),
            ..ResolveSettings::default()
        };
        RepositorySet::from_settings(&settings).expect("repositories")
    }

    #[test]
    fn test_first_repository_with_artifact_wins() {
        let first = RepoFixture::new();
        let second = RepoFixture::new();
        second.publish("org.acme", "core", "1.0", &[]);
        let repositories = set_for(&[&first, &second]);
        let cache = create_temp_dir();
        let observer = RecordingObserver::default();

        let fetcher = Fetcher::new(&repositories, cache.path(), &observer);
        let mrid = ModuleRevisionId::new("org.acme", "core", "1.0");
        let path = fetcher.artifact(&mrid, "jar", None).expect("fetch").expect("found");

        assert_eq!(path, cache.path().join("org.acme/core/1.0/core-1.0.jar"));
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "org.acme#core;1.0");
        assert!(fetcher.descriptor(&mrid).expect("fetch").is_some());
    }

    #[test]
    fn test_missing_everywhere_is_none() {
        let repo = RepoFixture::new();
        let repositories = set_for(&[&repo]);
        let cache = create_temp_dir();
        let observer = RecordingObserver::default();

        let fetcher = Fetcher::new(&repositories, cache.path(), &observer);
        let mrid = ModuleRevisionId::new("org.acme", "ghost", "1.0");
        assert!(fetcher.artifact(&mrid, "jar", None).expect("fetch").is_none());
        assert!(fetcher.descriptor(&mrid).expect("fetch").is_none());
        assert!(observer.events().is_empty());
    }

    #[test]
    fn test_cached_file_of_same_length_is_reused() {
        let repo = RepoFixture::new();
        repo.publish("org.acme", "core", "1.0", &[]);
        let repositories = set_for(&[&repo]);
        let cache = create_temp_dir();
        let mrid = ModuleRevisionId::new("org.acme", "core", "1.0");

        let observer = RecordingObserver::default();
        Fetcher::new(&repositories, cache.path(), &observer)
            .artifact(&mrid, "jar", None)
            .expect("fetch");
        assert_eq!(observer.kinds().last(), Some(&TransferEventKind::Completed));

        let again = RecordingObserver::default();
        Fetcher::new(&repositories, cache.path(), &again)
            .artifact(&mrid, "jar", None)
            .expect("fetch");
        assert!(again.events().is_empty());
    }
}
