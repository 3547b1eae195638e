//! Domain models for ivyfetch
//!
//! This module contains pure domain objects: module coordinates, revision
//! ordering and the resolved dependencies handed to the host.

pub mod coordinate;
pub mod resolved;
pub mod revision;

pub use coordinate::{ModuleId, ModuleRevisionId};
pub use resolved::{AuxiliaryKind, ExternalDependency, LibraryRoot, ResolvedDependency};
