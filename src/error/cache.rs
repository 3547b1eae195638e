//! Cache errors

use super::IvyError;

/// Creates a cache operation failed error
pub fn operation_failed(message: impl Into<String>) -> IvyError {
    IvyError::CacheOperationFailed {
        message: message.into(),
    }
}
