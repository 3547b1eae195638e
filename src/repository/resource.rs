//! Repository resources
//!
//! A [`Resource`] describes one fetchable unit at a repository location. It is
//! created on first reference to a location and never mutated afterwards;
//! two resources are equal when they describe the same location.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};

/// Metadata of one repository-addressable artifact
#[derive(Debug, Clone)]
pub struct Resource {
    location: String,
    exists: bool,
    content_length: Option<u64>,
    last_modified: Option<DateTime<Utc>>,
}

impl Resource {
    pub fn new(
        location: impl Into<String>,
        exists: bool,
        content_length: Option<u64>,
        last_modified: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            location: location.into(),
            exists,
            content_length,
            last_modified,
        }
    }

    /// A resource known not to exist
    pub fn missing(location: impl Into<String>) -> Self {
        Self::new(location, false, None, None)
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Size in bytes, if the backend reported one
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    /// Last path segment of the location
    pub fn name(&self) -> &str {
        self.location
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(&self.location)
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location
    }
}

impl Eq for Resource {}

impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location.hash(state);
    }
}
