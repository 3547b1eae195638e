//! Location strings
//!
//! Repository locations are scheme-prefixed strings. Backend choice is made
//! on the prefix alone (`http…` or `file…`); the `url` crate is only consulted
//! once a backend has been picked and needs to address the location.

use std::path::PathBuf;

use url::Url;

use crate::error::{Result, repository};

/// Backend scheme of a location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    File,
}

impl Scheme {
    /// Scheme of a location by prefix, or `None` if no backend serves it
    pub fn of(location: &str) -> Option<Scheme> {
        if location.starts_with("http") {
            Some(Scheme::Http)
        } else if location.starts_with("file") {
            Some(Scheme::File)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::File => "file",
        }
    }
}

/// Parse a location into a URL
pub fn parse(location: &str) -> Result<Url> {
    Url::parse(location).map_err(|e| repository::malformed_location(location, e.to_string()))
}

/// Local path of a `file:` location
pub fn file_path(location: &str) -> Result<PathBuf> {
    let url = parse(location)?;
    url.to_file_path()
        .map_err(|()| repository::malformed_location(location, "not a local file path"))
}

/// `file:` location of an absolute local path
pub fn from_file_path(path: &std::path::Path) -> Result<String> {
    Url::from_file_path(path)
        .map(String::from)
        .map_err(|()| {
            repository::malformed_location(path.display().to_string(), "path is not absolute")
        })
}

/// The location with exactly one trailing `/`
pub fn with_trailing_slash(location: &str) -> String {
    format!("{}/", location.trim_end_matches('/'))
}

/// Append a relative path to a root location
pub fn join(root: &str, relative: &str) -> String {
    format!("{}{}", with_trailing_slash(root), relative.trim_start_matches('/'))
}
