//! The ordered repository chain searched during resolution

use crate::config::pattern::{PatternTokens, revisions_directory, substitute};
use crate::config::{RepositoryConfig, ResolveSettings};
use crate::domain::ModuleRevisionId;
use crate::error::Result;
use crate::repository::Repository;

/// A repository together with its layout patterns
#[derive(Debug)]
pub struct ConfiguredRepository {
    repository: Repository,
    descriptor_pattern: String,
    artifact_pattern: String,
}

impl ConfiguredRepository {
    /// Open the repository described by `config`
    pub fn open(config: &RepositoryConfig) -> Result<Self> {
        Ok(Self {
            repository: Repository::open(&config.name, &config.root)?,
            descriptor_pattern: config.descriptor_pattern.clone(),
            artifact_pattern: config.artifact_pattern.clone(),
        })
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn name(&self) -> &str {
        self.repository.name()
    }

    /// Location of a module revision's descriptor
    pub fn descriptor_location(&self, mrid: &ModuleRevisionId) -> String {
        let relative = substitute(&self.descriptor_pattern, &PatternTokens::descriptor(mrid));
        self.repository.location_of(&relative)
    }

    /// Location of an artifact of a module revision
    pub fn artifact_location(
        &self,
        mrid: &ModuleRevisionId,
        ext: &str,
        classifier: Option<&str>,
    ) -> String {
        let relative = substitute(
            &self.artifact_pattern,
            &PatternTokens::artifact(mrid, ext, classifier),
        );
        self.repository.location_of(&relative)
    }

    /// Directory listing the revisions of a module, if the layout has one
    pub fn revisions_location(&self, mrid: &ModuleRevisionId) -> Option<String> {
        revisions_directory(&self.descriptor_pattern, mrid)
            .or_else(|| revisions_directory(&self.artifact_pattern, mrid))
            .map(|relative| self.repository.location_of(&relative))
    }
}

/// Repositories in search order
#[derive(Debug, Default)]
pub struct RepositorySet {
    repositories: Vec<ConfiguredRepository>,
}

impl RepositorySet {
    pub fn new(repositories: Vec<ConfiguredRepository>) -> Self {
        Self { repositories }
    }

    /// Open every repository named in the settings, keeping their order
    pub fn from_settings(settings: &ResolveSettings) -> Result<Self> {
        let repositories = settings
            .repositories
            .iter()
            .map(ConfiguredRepository::open)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(repositories))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfiguredRepository> {
        self.repositories.iter()
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}
