//! Filesystem backend

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

use super::Transport;
use super::lister::{DirectoryLister, FsLister};
use super::location::{self, Scheme};
use super::resource::Resource;
use super::transfer::{CopyOutcome, TransferTracker};
use crate::error::{IvyError, Result, fs, repository};

/// Transport for `file:` locations
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTransport;

impl FileTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for FileTransport {
    fn kind(&self) -> &'static str {
        Scheme::File.name()
    }

    fn serves(&self, location: &str) -> bool {
        Scheme::of(location) == Some(Scheme::File)
    }

    fn probe(&self, location: &str) -> Result<Resource> {
        let path = location::file_path(location)?;
        match std::fs::metadata(&path) {
            Ok(metadata) => {
                let last_modified = metadata.modified().ok().map(DateTime::<Utc>::from);
                let content_length = metadata.is_file().then(|| metadata.len());
                Ok(Resource::new(location, true, content_length, last_modified))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Resource::missing(location)),
            Err(e) => Err(fs::read_failed(path.display().to_string(), e.to_string())),
        }
    }

    fn open(&self, resource: &Resource) -> Result<Box<dyn Read + Send>> {
        let path = location::file_path(resource.location())?;
        match File::open(&path) {
            Ok(file) => Ok(Box::new(file)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(repository::not_found(resource.location()))
            }
            Err(e) => Err(fs::read_failed(path.display().to_string(), e.to_string())),
        }
    }

    fn read_error(&self, location: &str, error: std::io::Error) -> IvyError {
        fs::read_failed(location, error.to_string())
    }

    fn list(&self, parent: &str) -> Result<Option<Vec<String>>> {
        FsLister.list(parent)
    }

    fn can_put(&self) -> bool {
        true
    }

    fn put(
        &self,
        source: &Path,
        location: &str,
        overwrite: bool,
        tracker: &mut TransferTracker<'_>,
    ) -> Result<()> {
        let target = location::file_path(location)?;
        let target_display = target.display().to_string();
        if target.exists() && !overwrite {
            return Err(fs::write_failed(
                &target_display,
                "target exists and overwrite was not requested",
            ));
        }

        let mut input = File::open(source)
            .map_err(|e| fs::read_failed(source.display().to_string(), e.to_string()))?;

        let parent = target
            .parent()
            .ok_or_else(|| fs::write_failed(&target_display, "target has no parent directory"))?;
        std::fs::create_dir_all(parent)
            .map_err(|e| fs::write_failed(parent.display().to_string(), e.to_string()))?;

        let mut staged = NamedTempFile::new_in(parent)
            .map_err(|e| fs::write_failed(&target_display, e.to_string()))?;
        match tracker.copy(&mut input, staged.as_file_mut()) {
            Ok(CopyOutcome::Done(_)) => {}
            Ok(CopyOutcome::ReadFailed(e)) => {
                return Err(fs::read_failed(source.display().to_string(), e.to_string()));
            }
            Err(e) => return Err(fs::write_failed(&target_display, e.to_string())),
        }

        staged
            .persist(&target)
            .map_err(|e| fs::write_failed(&target_display, e.error.to_string()))?;
        Ok(())
    }
}
