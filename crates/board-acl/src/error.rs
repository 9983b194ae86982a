//! Error types for board-acl

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::memory::AclId;

/// Result type alias for board-acl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in board-acl
///
/// A missing resource is never an error here: ownership and permission checks
/// against an unknown resource simply come back denied.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A collaborator (resource lookup, ACL listing, group membership) failed.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Configuration could not be parsed or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O failure while reading a file.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A permission name that is not one of read, edit, manage, share.
    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    /// An ACL management operation referenced an entry that does not exist.
    #[error("ACL entry not found: {0}")]
    AclNotFound(AclId),
}

impl Error {
    /// Create a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Wrap an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
