//! Storage backend abstraction for uploaded assets.
//!
//! Serving files to citizens is handled elsewhere; the admin API only
//! needs to store paths and purge them when a record is permanently
//! deleted.

pub mod local;

use async_trait::async_trait;

/// Storage operation errors.
#[derive(Debug)]
pub enum StorageError {
    /// File not found
    NotFound(String),
    /// I/O error
    Io(std::io::Error),
    /// Path escapes the storage root or is otherwise malformed
    InvalidPath(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::NotFound(msg) => write!(f, "Not found: {}", msg),
            StorageError::Io(e) => write!(f, "I/O error: {}", e),
            StorageError::InvalidPath(msg) => write!(f, "Invalid path: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound(e.to_string())
        } else {
            StorageError::Io(e)
        }
    }
}

/// Trait for storage backends.
///
/// All storage backends must implement this trait to provide
/// a unified interface for file storage operations.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Store a file under the given relative path.
    async fn put_object(&self, data: Vec<u8>, path: &str) -> Result<(), StorageError>;

    /// Remove a file by its relative path.
    async fn delete_object(&self, path: &str) -> Result<(), StorageError>;

    /// Check if a file exists.
    async fn exists(&self, path: &str) -> Result<bool, StorageError>;
}
