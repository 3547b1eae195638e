//! Artifact repositories
//!
//! A [`Repository`] locates, fetches, lists and (where the backend allows it)
//! uploads resources below a root location. The backend is picked once, at
//! construction, by the scheme prefix of the root:
//!
//! - `http…`: [`HttpTransport`], read-only
//! - `file…`: [`FileTransport`]
//!
//! Each repository owns a [`ResourceCache`] for its lifetime, so a location is
//! probed at most once per resolution session.

pub mod cache;
pub mod file;
pub mod http;
pub mod lister;
pub mod location;
pub mod resource;
pub mod transfer;

use std::io::Read;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

pub use cache::ResourceCache;
pub use file::FileTransport;
pub use http::HttpTransport;
pub use location::Scheme;
pub use resource::Resource;
pub use transfer::{
    Direction, NoopObserver, TransferEvent, TransferEventKind, TransferObserver, TransferTracker,
};

use crate::error::{IvyError, Result, fs, repository};
use transfer::CopyOutcome;

/// Backend operations behind a [`Repository`]
pub trait Transport: Send + Sync {
    /// Backend name used in errors and logs
    fn kind(&self) -> &'static str;

    /// Whether this backend can address `location` at all
    fn serves(&self, location: &str) -> bool;

    /// Query the backend for the metadata of `location`
    fn probe(&self, location: &str) -> Result<Resource>;

    /// Open the content of an existing resource
    fn open(&self, resource: &Resource) -> Result<Box<dyn Read + Send>>;

    /// Error for a failed read from an opened resource
    fn read_error(&self, location: &str, error: std::io::Error) -> IvyError {
        repository::network(location, error.to_string())
    }

    /// Children of `parent`; see [`lister::DirectoryLister`]
    fn list(&self, parent: &str) -> Result<Option<Vec<String>>>;

    fn can_put(&self) -> bool {
        false
    }

    /// Upload `source` to `location`, reporting through `tracker`
    fn put(
        &self,
        _source: &Path,
        _location: &str,
        _overwrite: bool,
        _tracker: &mut TransferTracker<'_>,
    ) -> Result<()> {
        Err(repository::unsupported("put", self.kind()))
    }
}

/// The closed set of backends
#[derive(Debug, Clone)]
pub enum Backend {
    Http(HttpTransport),
    File(FileTransport),
}

impl Backend {
    /// Backend serving the scheme of `root`
    pub fn for_location(root: &str) -> Result<Self> {
        match Scheme::of(root) {
            Some(Scheme::Http) => Ok(Backend::Http(HttpTransport::new()?)),
            Some(Scheme::File) => Ok(Backend::File(FileTransport::new())),
            None => Err(repository::malformed_location(
                root,
                "no repository backend serves this scheme",
            )),
        }
    }

    fn inner(&self) -> &dyn Transport {
        match self {
            Backend::Http(transport) => transport,
            Backend::File(transport) => transport,
        }
    }
}

impl Transport for Backend {
    fn kind(&self) -> &'static str {
        self.inner().kind()
    }

    fn serves(&self, location: &str) -> bool {
        self.inner().serves(location)
    }

    fn probe(&self, location: &str) -> Result<Resource> {
        self.inner().probe(location)
    }

    fn open(&self, resource: &Resource) -> Result<Box<dyn Read + Send>> {
        self.inner().open(resource)
    }

    fn read_error(&self, location: &str, error: std::io::Error) -> IvyError {
        self.inner().read_error(location, error)
    }

    fn list(&self, parent: &str) -> Result<Option<Vec<String>>> {
        self.inner().list(parent)
    }

    fn can_put(&self) -> bool {
        self.inner().can_put()
    }

    fn put(
        &self,
        source: &Path,
        location: &str,
        overwrite: bool,
        tracker: &mut TransferTracker<'_>,
    ) -> Result<()> {
        self.inner().put(source, location, overwrite, tracker)
    }
}

/// A named repository rooted at one location
#[derive(Debug)]
pub struct Repository<T: Transport = Backend> {
    name: String,
    root: String,
    transport: T,
    cache: ResourceCache,
}

impl Repository<Backend> {
    /// Open a repository, choosing the backend by the root's scheme
    pub fn open(name: impl Into<String>, root: impl Into<String>) -> Result<Self> {
        let root = root.into();
        let transport = Backend::for_location(&root)?;
        Ok(Self::with_transport(name, root, transport))
    }
}

impl<T: Transport> Repository<T> {
    pub fn with_transport(name: impl Into<String>, root: impl Into<String>, transport: T) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            transport,
            cache: ResourceCache::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Backend name ("http" or "file")
    pub fn kind(&self) -> &'static str {
        self.transport.kind()
    }

    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    /// Absolute location of a path relative to the root
    pub fn location_of(&self, relative: &str) -> String {
        location::join(&self.root, relative)
    }

    /// Metadata of `location`, probing the backend only on a cache miss
    pub fn resolve(&self, location: &str) -> Result<Resource> {
        if let Some(resource) = self.cache.get(location) {
            return Ok(resource);
        }
        if !self.transport.serves(location) {
            return Err(repository::malformed_location(
                location,
                format!("not addressable by the {} backend", self.kind()),
            ));
        }

        let probed = self.transport.probe(location)?;
        debug!(
            "Resolved {} in {} (exists: {})",
            location,
            self.name,
            probed.exists()
        );
        Ok(self.cache.insert_or_get(probed))
    }

    /// Fetch `location` into `destination`
    ///
    /// Resolve errors surface before any event is emitted. Once the transfer
    /// has started, exactly one terminal event follows. Bytes are staged next
    /// to the destination and only moved into place when the whole resource
    /// arrived.
    pub fn get(
        &self,
        location: &str,
        destination: &Path,
        observer: &dyn TransferObserver,
    ) -> Result<Resource> {
        let resource = self.resolve(location)?;
        let mut tracker = TransferTracker::start(
            observer,
            resource.clone(),
            Direction::Get,
            resource.content_length(),
        );

        match self.download(&resource, destination, &mut tracker) {
            Ok(()) => {
                tracker.complete();
                Ok(resource)
            }
            Err(e) => {
                tracker.fail(&e);
                Err(e)
            }
        }
    }

    fn download(
        &self,
        resource: &Resource,
        destination: &Path,
        tracker: &mut TransferTracker<'_>,
    ) -> Result<()> {
        if !resource.exists() {
            return Err(repository::not_found(resource.location()));
        }

        let destination_display = destination.display().to_string();
        let parent = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)
            .map_err(|e| fs::write_failed(parent.display().to_string(), e.to_string()))?;

        let mut reader = self.transport.open(resource)?;
        let mut staged = NamedTempFile::new_in(parent)
            .map_err(|e| fs::write_failed(&destination_display, e.to_string()))?;

        let received = match tracker.copy(&mut reader, staged.as_file_mut()) {
            Ok(CopyOutcome::Done(received)) => received,
            Ok(CopyOutcome::ReadFailed(e)) => {
                return Err(self.transport.read_error(resource.location(), e));
            }
            Err(e) => return Err(fs::write_failed(&destination_display, e.to_string())),
        };

        if let Some(expected) = resource.content_length() {
            if expected != received {
                let short = std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    format!("expected {expected} bytes, received {received}"),
                );
                return Err(self.transport.read_error(resource.location(), short));
            }
        }

        staged
            .persist(destination)
            .map_err(|e| fs::write_failed(&destination_display, e.error.to_string()))?;
        Ok(())
    }

    /// Upload `source` to `location`
    ///
    /// Read-only backends fail with `UnsupportedOperation` before looking at
    /// any argument.
    pub fn put(
        &self,
        source: &Path,
        location: &str,
        overwrite: bool,
        observer: &dyn TransferObserver,
    ) -> Result<()> {
        if !self.transport.can_put() {
            return Err(repository::unsupported("put", self.kind()));
        }
        if !self.transport.serves(location) {
            return Err(repository::malformed_location(
                location,
                format!("not addressable by the {} backend", self.kind()),
            ));
        }

        let length = std::fs::metadata(source).ok().map(|m| m.len());
        let resource = Resource::new(location, true, length, None);
        let mut tracker = TransferTracker::start(observer, resource, Direction::Put, length);

        match self.transport.put(source, location, overwrite, &mut tracker) {
            Ok(()) => {
                tracker.complete();
                self.cache.evict(location);
                Ok(())
            }
            Err(e) => {
                tracker.fail(&e);
                Err(e)
            }
        }
    }

    /// Children of `parent`
    ///
    /// `None` means the location cannot be enumerated by this backend, which
    /// is different from `Some(vec![])` (no children).
    pub fn list(&self, parent: &str) -> Result<Option<Vec<String>>> {
        if !self.transport.serves(parent) {
            return Ok(None);
        }
        self.transport.list(parent)
    }
}
