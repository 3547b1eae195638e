//! Directory listing
//!
//! "Directory" has no uniform meaning across backends, so each backend brings
//! its own [`DirectoryLister`]:
//!
//! - [`HtmlIndexLister`] scrapes anchors out of an HTTP directory index page.
//!   A missing or unparseable page lists as empty.
//! - [`FsLister`] enumerates a local directory exactly.
//!
//! Both return absolute child locations. An empty directory and a
//! nonexistent one are indistinguishable: both list as `Some(vec![])`.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;
use url::Url;

use super::location;
use crate::error::{Result, fs, repository};

/// Enumerates the children of a parent location
pub trait DirectoryLister: Send + Sync {
    /// Child locations, `Some(vec![])` if the parent is not a directory,
    /// `None` if the location cannot be enumerated at all
    fn list(&self, parent: &str) -> Result<Option<Vec<String>>>;
}

#[allow(clippy::expect_used)]
fn anchor_pattern() -> &'static Regex {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    ANCHOR.get_or_init(|| {
        Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>"']+))"#)
            .expect("anchor pattern is a valid regex")
    })
}

/// Extract child locations from an index page
///
/// Links are resolved against `base` (a directory URL with a trailing `/`).
/// Only direct children of `base` are kept, so parent links, sorting links
/// (`?C=N;O=D`) and links to other hosts fall out. Order of first appearance
/// is preserved.
pub fn parse_index(base: &Url, html: &str) -> Vec<String> {
    let base_str = base.as_str();
    let mut children: Vec<String> = Vec::new();

    for captures in anchor_pattern().captures_iter(html) {
        let Some(href) = captures
            .get(1)
            .or_else(|| captures.get(2))
            .or_else(|| captures.get(3))
            .map(|m| m.as_str().trim())
        else {
            continue;
        };
        if href.is_empty() || href.starts_with('?') || href.starts_with('#') {
            continue;
        }

        let Ok(mut resolved) = base.join(href) else {
            continue;
        };
        resolved.set_fragment(None);
        resolved.set_query(None);
        let resolved = String::from(resolved);

        let Some(rest) = resolved.strip_prefix(base_str) else {
            continue;
        };
        let name = rest.trim_end_matches('/');
        if name.is_empty() || name.contains('/') {
            continue;
        }
        if !children.contains(&resolved) {
            children.push(resolved);
        }
    }

    children
}

/// Lists HTTP directories by scraping their index page
#[derive(Debug, Clone)]
pub struct HtmlIndexLister {
    client: reqwest::blocking::Client,
}

impl HtmlIndexLister {
    pub fn new(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl DirectoryLister for HtmlIndexLister {
    fn list(&self, parent: &str) -> Result<Option<Vec<String>>> {
        let index = location::with_trailing_slash(parent);
        let base = location::parse(&index)?;

        let response = self
            .client
            .get(base.clone())
            .send()
            .map_err(|e| repository::network(&index, e.to_string()))?;

        if !response.status().is_success() {
            debug!("No directory index at {} ({})", index, response.status());
            return Ok(Some(Vec::new()));
        }

        let Ok(html) = response.text() else {
            debug!("Unreadable directory index at {}", index);
            return Ok(Some(Vec::new()));
        };

        Ok(Some(parse_index(&base, &html)))
    }
}

/// Lists local directories
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn list(&self, parent: &str) -> Result<Option<Vec<String>>> {
        let directory = location::file_path(parent)?;
        if !directory.is_dir() {
            return Ok(Some(Vec::new()));
        }

        let base = location::parse(&location::with_trailing_slash(parent))?;
        let entries = std::fs::read_dir(&directory)
            .map_err(|e| fs::read_failed(directory.display().to_string(), e.to_string()))?;

        let mut names: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        names
            .iter()
            .map(|name| {
                let mut child = base.clone();
                child
                    .path_segments_mut()
                    .map_err(|()| {
                        repository::malformed_location(parent, "location cannot have children")
                    })?
                    .pop_if_empty()
                    .push(name);
                Ok(String::from(child))
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }
}
