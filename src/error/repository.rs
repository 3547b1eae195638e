//! Repository backend errors

use super::IvyError;

/// Creates a malformed location error
pub fn malformed_location(location: impl Into<String>, reason: impl Into<String>) -> IvyError {
    IvyError::MalformedLocation {
        location: location.into(),
        reason: reason.into(),
    }
}

/// Creates a network (transport) error
pub fn network(location: impl Into<String>, reason: impl Into<String>) -> IvyError {
    IvyError::Network {
        location: location.into(),
        reason: reason.into(),
    }
}

/// Creates a resource not found error
pub fn not_found(location: impl Into<String>) -> IvyError {
    IvyError::ResourceNotFound {
        location: location.into(),
    }
}

/// Creates an unsupported operation error
pub fn unsupported(operation: impl Into<String>, backend: impl Into<String>) -> IvyError {
    IvyError::UnsupportedOperation {
        operation: operation.into(),
        backend: backend.into(),
    }
}
