//! Artifact cache
//!
//! Files retrieved during resolution are kept on disk by coordinate, so a
//! later resolution can reuse them without another transfer. See
//! [`paths`] for the layout.

pub mod paths;
pub mod stats;

pub use paths::{artifact_path, cache_dir, cache_dir_for};
pub use stats::{cache_stats, clear_cache, list_cached_modules, remove_cached_module};
