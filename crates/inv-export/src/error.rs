//! Export error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing the rendered document failed.
    #[error("Failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The share target could not take the document.
    #[error("Failed to share {path}")]
    Share {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Message suitable for an alert shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { path, .. } => format!(
                "There was an error creating the report document at {}.",
                path.display()
            ),
            Self::Share { path, .. } => format!(
                "The report was saved to {} but could not be shared.",
                path.display()
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
