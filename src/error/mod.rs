//! Error types and handling for ivyfetch
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`repository`]: Location parsing, transport and backend capability errors
//! - [`resolve`]: Dependency resolution errors
//! - [`config`]: Configuration and descriptor errors
//! - [`fs`]: File system errors
//! - [`cache`]: Artifact cache errors

pub mod cache;
pub mod config;
pub mod fs;
pub mod repository;
pub mod resolve;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for ivyfetch operations
#[derive(Error, Diagnostic, Debug)]
pub enum IvyError {
    // Repository errors
    #[error("Malformed location '{location}': {reason}")]
    #[diagnostic(
        code(ivyfetch::repository::malformed_location),
        help("Repository locations must start with http://, https:// or file://")
    )]
    MalformedLocation { location: String, reason: String },

    #[error("Network error for '{location}': {reason}")]
    #[diagnostic(code(ivyfetch::repository::network))]
    Network { location: String, reason: String },

    #[error("Resource not found: {location}")]
    #[diagnostic(code(ivyfetch::repository::not_found))]
    ResourceNotFound { location: String },

    #[error("Operation '{operation}' is not supported by the {backend} repository")]
    #[diagnostic(code(ivyfetch::repository::unsupported))]
    UnsupportedOperation { operation: String, backend: String },

    // Resolution errors
    #[error("Failed to resolve {module}: {reason}")]
    #[diagnostic(
        code(ivyfetch::resolve::failed),
        help("Check that the module exists in one of the configured repositories")
    )]
    Resolution { module: String, reason: String },

    #[error("Conflicting revisions for {module}: {revisions}")]
    #[diagnostic(
        code(ivyfetch::resolve::conflict),
        help("Align the declared revisions or use the 'latest' conflict strategy")
    )]
    Conflict { module: String, revisions: String },

    #[error("Resolution cancelled")]
    #[diagnostic(code(ivyfetch::resolve::cancelled))]
    Cancelled,

    #[error("Module '{name}' not found in workspace")]
    #[diagnostic(
        code(ivyfetch::resolve::module_not_found),
        help("Declare the module under 'modules' in ivyfetch.yaml")
    )]
    ModuleNotFound { name: String },

    #[error("Cannot start resolution worker: {reason}")]
    #[diagnostic(code(ivyfetch::resolve::worker_unavailable))]
    WorkerUnavailable { reason: String },

    // Config errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(ivyfetch::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(ivyfetch::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(ivyfetch::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(ivyfetch::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(ivyfetch::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(ivyfetch::io))]
    Io { message: String },

    // Cache errors
    #[error("Cache operation failed: {message}")]
    #[diagnostic(code(ivyfetch::cache::operation_failed))]
    CacheOperationFailed { message: String },
}

impl From<std::io::Error> for IvyError {
    fn from(err: std::io::Error) -> Self {
        IvyError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for IvyError {
    fn from(err: serde_yaml::Error) -> Self {
        IvyError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for IvyError {
    fn from(err: serde_json::Error) -> Self {
        IvyError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for IvyError {
    fn from(err: reqwest::Error) -> Self {
        let location = err
            .url()
            .map_or_else(|| "unknown".to_string(), ToString::to_string);
        IvyError::Network {
            location,
            reason: err.to_string(),
        }
    }
}

impl From<url::ParseError> for IvyError {
    fn from(err: url::ParseError) -> Self {
        IvyError::MalformedLocation {
            location: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, IvyError>;
