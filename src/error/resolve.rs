//! Dependency resolution errors

use super::IvyError;

/// Creates a resolution failure naming the offending module coordinate
pub fn failed(module: impl Into<String>, reason: impl Into<String>) -> IvyError {
    IvyError::Resolution {
        module: module.into(),
        reason: reason.into(),
    }
}

/// Creates a revision conflict error
pub fn conflict(module: impl Into<String>, revisions: impl Into<String>) -> IvyError {
    IvyError::Conflict {
        module: module.into(),
        revisions: revisions.into(),
    }
}

/// Creates a module not found error
pub fn module_not_found(name: impl Into<String>) -> IvyError {
    IvyError::ModuleNotFound { name: name.into() }
}

/// Creates an error for an executor that could not start a worker
pub fn worker_unavailable(reason: impl Into<String>) -> IvyError {
    IvyError::WorkerUnavailable {
        reason: reason.into(),
    }
}
