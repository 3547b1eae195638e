//! Configuration file handling for ivyfetch
//!
//! This module contains data structures for:
//! - `ivyfetch.yaml` - Workspace configuration (project settings and modules)
//! - `module.yaml` - Module descriptors
//! - Resolution settings and repository layout patterns

pub mod descriptor;
pub mod pattern;
pub mod settings;
pub mod workspace;

// Re-export commonly used types
pub use descriptor::{DependencyDeclaration, ExclusionRule, ModuleDescriptor};
pub use settings::{ConflictStrategy, RepositoryConfig, ResolveSettings};
pub use workspace::WorkspaceConfig;
