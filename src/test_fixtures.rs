//! Test fixtures and utilities for reducing test setup duplication.
//!
//! This module provides helpers to create common test environments with a
//! single call:
//!
//! ```ignore
//! use crate::test_fixtures::{RepoFixture, create_temp_dir};
//!
//! #[test]
//! fn my_test() {
//!     // Simple temp directory
//!     let temp = create_temp_dir();
//!
//!     // file: repository with one published module
//!     let repo = RepoFixture::new();
//!     repo.publish("org.acme", "core", "1.0", &[]);
//! }
//! ```
//!
//! HTTP backends are tested against `httpmock::MockServer`, reached through
//! [`http_client`]:
//!
//! ```ignore
//! let server = MockServer::start();
//! server.mock(|when, then| {
//!     when.method(GET).path("/repo/a.jar");
//!     then.status(200).body("bytes");
//! });
//! let transport = HttpTransport::with_client(http_client());
//! ```

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tempfile::TempDir;

use crate::config::pattern::{DEFAULT_ARTIFACT_PATTERN, PatternTokens, substitute};
use crate::config::{DependencyDeclaration, ModuleDescriptor, RepositoryConfig};
use crate::domain::ModuleRevisionId;
use crate::error::Result;
use crate::logging::MessageLogger;
use crate::repository::{Resource, Transport, TransferEvent, TransferEventKind, TransferObserver};

/// System temp location, never relative to the working directory
fn temp_base() -> PathBuf {
    let base = std::env::temp_dir();
    if base.is_absolute() {
        base
    } else {
        PathBuf::from("/tmp")
    }
}

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(temp_base()).expect("Failed to create temp directory")
}

/// Create test files in a directory.
///
/// Takes a list of (path, content) tuples and creates those files.
/// Paths are relative to the provided base directory.
///
/// # Panics
///
/// Panics if any file cannot be created.
pub fn create_test_files(temp: &TempDir, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = temp.path().join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&full_path, content).expect("Failed to write test file");
    }
}

/// Observer keeping every event it receives
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<TransferEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<TransferEvent> {
        self.events.lock().expect("observer lock").clone()
    }

    pub fn kinds(&self) -> Vec<TransferEventKind> {
        self.events().into_iter().map(|e| e.kind).collect()
    }
}

impl TransferObserver for RecordingObserver {
    fn on_transfer(&self, event: &TransferEvent) {
        self.events.lock().expect("observer lock").push(event.clone());
    }
}

/// Logger keeping every message it receives, tagged with its level
#[derive(Debug, Default)]
pub struct RecordingLogger {
    messages: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingLogger {
    fn record(&self, level: &'static str, message: &str) {
        self.messages
            .lock()
            .expect("logger lock")
            .push((level, message.to_string()));
    }

    fn at(&self, level: &str) -> Vec<String> {
        self.messages
            .lock()
            .expect("logger lock")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.at("warn")
    }

    pub fn infos(&self) -> Vec<String> {
        self.at("info")
    }

    pub fn verbose_messages(&self) -> Vec<String> {
        self.at("verbose")
    }
}

impl MessageLogger for RecordingLogger {
    fn verbose(&self, message: &str) {
        self.record("verbose", message);
    }

    fn info(&self, message: &str) {
        self.record("info", message);
    }

    fn warn(&self, message: &str) {
        self.record("warn", message);
    }
}

/// Transport double counting backend probes
///
/// Serves `file:` locations; every probed location exists with three bytes
/// of content.
#[derive(Debug, Default)]
pub struct CountingTransport {
    probes: AtomicUsize,
}

impl CountingTransport {
    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

impl Transport for CountingTransport {
    fn kind(&self) -> &'static str {
        "counting"
    }

    fn serves(&self, location: &str) -> bool {
        location.starts_with("file")
    }

    fn probe(&self, location: &str) -> Result<Resource> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        Ok(Resource::new(location, true, Some(3), None))
    }

    fn open(&self, _resource: &Resource) -> Result<Box<dyn Read + Send>> {
        Ok(Box::new(Cursor::new(b"abc".to_vec())))
    }

    fn list(&self, _parent: &str) -> Result<Option<Vec<String>>> {
        Ok(Some(Vec::new()))
    }
}

/// A `file:` repository in a temp directory, laid out with the default
/// patterns
pub struct RepoFixture {
    dir: TempDir,
}

impl Default for RepoFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl RepoFixture {
    pub fn new() -> Self {
        Self {
            dir: create_temp_dir(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Root location with a trailing `/`
    pub fn root(&self) -> String {
        let location =
            crate::repository::location::from_file_path(self.dir.path()).expect("file url");
        crate::repository::location::with_trailing_slash(&location)
    }

    pub fn config(&self, name: &str) -> RepositoryConfig {
        RepositoryConfig::new(name, self.root())
    }

    /// Publish a module revision: descriptor plus primary jar
    pub fn publish(&self, org: &str, name: &str, rev: &str, dependencies: &[DependencyDeclaration]) {
        let mut descriptor = ModuleDescriptor::new(org, name);
        descriptor.info.revision = rev.to_string();
        descriptor.dependencies = dependencies.to_vec();
        self.publish_descriptor(&descriptor);
        self.publish_artifact(org, name, rev, None);
    }

    /// Write a descriptor at its default location
    pub fn publish_descriptor(&self, descriptor: &ModuleDescriptor) {
        let mrid = descriptor.revision_id();
        let path = self
            .revision_dir(&mrid)
            .join("module.yaml");
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(&path, serde_yaml::to_string(descriptor).expect("yaml")).expect("write descriptor");
    }

    /// Write a jar (optionally with a classifier) containing its coordinate
    pub fn publish_artifact(&self, org: &str, name: &str, rev: &str, classifier: Option<&str>) -> PathBuf {
        let mrid = ModuleRevisionId::new(org, name, rev);
        let relative = substitute(
            DEFAULT_ARTIFACT_PATTERN,
            &PatternTokens::artifact(&mrid, "jar", classifier),
        );
        let path = self.dir.path().join(relative);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        let content = format!("{mrid}{}", classifier.map(|c| format!(" {c}")).unwrap_or_default());
        std::fs::write(&path, content).expect("write artifact");
        path
    }

    fn revision_dir(&self, mrid: &ModuleRevisionId) -> PathBuf {
        self.dir
            .path()
            .join(mrid.organisation())
            .join(mrid.name())
            .join(&mrid.revision)
    }
}

/// HTTP client for tests against a local `httpmock::MockServer`
///
/// Never goes through an environment proxy.
pub fn http_client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .expect("http client")
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_temp_dir() {
        let temp = create_temp_dir();
        assert!(temp.path().exists());
    }

    #[test]
    fn test_create_test_files() {
        let temp = create_temp_dir();
        create_test_files(&temp, &[("org/core/1.0/module.yaml", "info: {}")]);
        let content = std::fs::read_to_string(temp.path().join("org/core/1.0/module.yaml"))
            .expect("Failed to read");
        assert_eq!(content, "info: {}");
    }

    #[test]
    fn test_repo_fixture_layout() {
        let repo = RepoFixture::new();
        repo.publish("org.acme", "core", "1.0", &[]);
        assert!(repo.path().join("org.acme/core/1.0/module.yaml").is_file());
        assert!(repo.path().join("org.acme/core/1.0/core-1.0.jar").is_file());
        let sources = repo.publish_artifact("org.acme", "core", "1.0", Some("sources"));
        assert!(sources.ends_with("org.acme/core/1.0/core-1.0-sources.jar"));
        assert!(repo.root().ends_with('/'));
    }
}
