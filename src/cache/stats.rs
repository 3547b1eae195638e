//! Cache statistics and management
//!
//! This module provides functions for listing, removing, and
//! getting statistics about cached module revisions.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, cache};
use crate::path_utils::safe_segment;

/// Cached module information (aggregated across revisions)
#[derive(Debug, Clone)]
pub struct CachedModule {
    /// Module coordinate (`org#name`)
    pub name: String,
    /// Cached revisions, in directory order
    pub revisions: Vec<String>,
    /// Total size in bytes
    pub size: u64,
}

impl CachedModule {
    /// Format size as human-readable string
    pub fn formatted_size(&self) -> String {
        format_size(self.size)
    }
}

/// Cache statistics
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Number of cached modules (organisation + name)
    pub modules: usize,
    /// Number of cached module revisions
    pub revisions: usize,
    /// Number of cached files
    pub files: usize,
    /// Total size in bytes
    pub total_size: u64,
}

impl CacheStats {
    /// Format total size as human-readable string
    pub fn formatted_size(&self) -> String {
        format_size(self.total_size)
    }
}

#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    let size = bytes as f64;
    if size < 1024.0 {
        format!("{bytes} B")
    } else if size < 1024.0 * 1024.0 {
        format!("{:.1} KB", size / 1024.0)
    } else if size < 1024.0 * 1024.0 * 1024.0 {
        format!("{:.1} MB", size / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", size / (1024.0 * 1024.0 * 1024.0))
    }
}

fn subdirectories(path: &Path) -> Result<Vec<std::path::PathBuf>> {
    let entries = fs::read_dir(path)
        .map_err(|e| cache::operation_failed(format!("Failed to read cache directory: {e}")))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| cache::operation_failed(format!("Failed to read entry: {e}")))?;
        if entry.path().is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// List cached modules under `root`
pub fn list_cached_modules(root: &Path) -> Result<Vec<CachedModule>> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut modules: BTreeMap<String, CachedModule> = BTreeMap::new();
    for org_dir in subdirectories(root)? {
        for module_dir in subdirectories(&org_dir)? {
            let name = format!("{}#{}", file_name(&org_dir), file_name(&module_dir));
            let revisions: Vec<String> = subdirectories(&module_dir)?
                .iter()
                .map(|dir| file_name(dir))
                .collect();
            if revisions.is_empty() {
                continue;
            }
            let size = dir_size(&module_dir)?;
            modules.insert(
                name.clone(),
                CachedModule {
                    name,
                    revisions,
                    size,
                },
            );
        }
    }

    Ok(modules.into_values().collect())
}

/// Get cache statistics for the cache at `root`
pub fn cache_stats(root: &Path) -> Result<CacheStats> {
    let modules = list_cached_modules(root)?;
    let mut stats = CacheStats {
        modules: modules.len(),
        revisions: modules.iter().map(|m| m.revisions.len()).sum(),
        ..CacheStats::default()
    };

    if root.exists() {
        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            if entry.file_type().is_file() {
                stats.files += 1;
            }
        }
        stats.total_size = dir_size(root)?;
    }

    Ok(stats)
}

/// Remove one module (`org#name`) from the cache
pub fn remove_cached_module(root: &Path, coordinate: &str) -> Result<()> {
    let (org, name) = coordinate.split_once('#').ok_or_else(|| {
        cache::operation_failed(format!(
            "Invalid module coordinate '{coordinate}', expected 'organisation#name'"
        ))
    })?;

    let path = root.join(safe_segment(org)).join(safe_segment(name));
    if !path.exists() {
        return Err(cache::operation_failed(format!(
            "Module not found in cache: {coordinate}"
        )));
    }

    fs::remove_dir_all(&path)
        .map_err(|e| cache::operation_failed(format!("Failed to remove cached module: {e}")))?;

    // Drop the organisation directory once its last module is gone
    if let Some(org_dir) = path.parent() {
        if subdirectories(org_dir).map(|d| d.is_empty()).unwrap_or(false) {
            let _ = fs::remove_dir(org_dir);
        }
    }
    Ok(())
}

/// Clear the entire artifact cache
pub fn clear_cache(root: &Path) -> Result<()> {
    if root.exists() {
        fs::remove_dir_all(root)
            .map_err(|e| cache::operation_failed(format!("Failed to clear cache: {e}")))?;
    }
    Ok(())
}

/// Calculate directory size recursively
fn dir_size(path: &Path) -> Result<u64> {
    let mut size = 0u64;
    for entry in WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        if entry.file_type().is_file() {
            size += entry
                .metadata()
                .map_err(|e| cache::operation_failed(format!("Failed to get metadata: {e}")))?
                .len();
        }
    }
    Ok(size)
}
