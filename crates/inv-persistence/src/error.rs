//! Persistence error types.
//!
//! All persistence operations return structured errors that provide
//! user-friendly messages and optional remediation hints.

use std::path::PathBuf;
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key cannot be mapped to a storage location.
    #[error("Invalid store key: {key:?}")]
    InvalidKey { key: String },

    /// Stored value was written by a newer schema.
    #[error("Stored value for '{key}' has schema version {found} (maximum: {max_supported})")]
    UnsupportedVersion {
        key: String,
        found: u32,
        max_supported: u32,
    },

    /// Serialization error.
    #[error("Failed to serialize value for '{key}'")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization error.
    #[error("Failed to deserialize value for '{key}'")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Backend refused the operation.
    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::InvalidKey { key } => {
                format!("'{}' cannot be used as a storage name.", key)
            }
            Self::UnsupportedVersion {
                key,
                found,
                max_supported,
            } => {
                format!(
                    "The saved {} data was written by a newer version of the app \
                    (data version {}, your version supports up to {}).",
                    key, found, max_supported
                )
            }
            Self::Serialization { key, .. } => {
                format!("An error occurred while saving the {} data.", key)
            }
            Self::Deserialization { key, .. } => {
                format!(
                    "An error occurred while reading the {} data. The file may be corrupted.",
                    key
                )
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::Unavailable { reason } => {
                format!("The storage is not available: {}", reason)
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::InvalidKey { .. } => None,
            Self::UnsupportedVersion { .. } => Some("Update the application.".into()),
            Self::Serialization { .. } => None,
            Self::Deserialization { .. } => {
                Some("Restore the data directory from a backup if you have one.".into())
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or choose a different data directory.".into())
            }
            Self::Unavailable { .. } => Some("Try again once the storage is reachable.".into()),
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
