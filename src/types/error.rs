//! Error types for bucketize

use std::io::{Error as IoError, ErrorKind};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error types for bucketize operations
#[derive(Debug, Error)]
pub enum BucketizeError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or incomplete command-line configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Permission denied for specific path
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Destination already present under a non-overwriting policy
    #[error("file {path} already exists. skipping...")]
    AlreadyExists { path: PathBuf },

    /// Rename across filesystems is not performed
    #[error("Cannot move {from} to {to}: source and target are on different filesystems")]
    CrossDevice { from: PathBuf, to: PathBuf },

    /// Reading or writing a timestamp failed
    #[error("Timestamp error on {path}: {reason}")]
    Timestamp { path: PathBuf, reason: String },
}

impl BucketizeError {
    /// Check if this error stems from configuration parsing
    pub fn is_config_error(&self) -> bool {
        matches!(self, BucketizeError::Config(_))
    }

    /// Check if this error is a destination conflict (not a failure)
    pub fn is_conflict(&self) -> bool {
        matches!(self, BucketizeError::AlreadyExists { .. })
    }

    /// Check if this error is related to permissions
    pub fn is_permission_error(&self) -> bool {
        matches!(self, BucketizeError::PermissionDenied { .. })
    }
}

/// Attach path context to an IO error where a typed variant exists.
pub fn map_io_error(path: &Path, error: IoError) -> BucketizeError {
    match error.kind() {
        ErrorKind::PermissionDenied => BucketizeError::PermissionDenied {
            path: path.to_path_buf(),
        },
        ErrorKind::AlreadyExists => BucketizeError::AlreadyExists {
            path: path.to_path_buf(),
        },
        _ => BucketizeError::Io(error),
    }
}
