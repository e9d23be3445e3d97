//! Local filesystem storage backend.

use super::{StorageBackend, StorageError};
use actix_web::web;
use async_trait::async_trait;
use std::fs;
use std::path::{Component, PathBuf};

/// Local filesystem storage backend.
pub struct LocalStorage {
    /// Base path for file storage
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new local storage backend.
    ///
    /// The `base_path` directory will be created if it doesn't exist.
    pub fn new(base_path: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path)?;
        log::info!("LocalStorage initialized at {:?}", base_path);
        Ok(Self { base_path })
    }

    /// Resolve a stored relative path against the base directory.
    /// Rejects absolute paths and parent-directory segments.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = PathBuf::from(path);
        let sane = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if path.is_empty() || !sane {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.base_path.join(relative))
    }
}

#[async_trait]
impl StorageBackend for LocalStorage {
    async fn put_object(&self, data: Vec<u8>, path: &str) -> Result<(), StorageError> {
        let full_path = self.resolve(path)?;

        // Use blocking I/O in a thread pool to avoid blocking the async runtime
        web::block(move || -> Result<(), std::io::Error> {
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&full_path, &data)
        })
        .await
        .map_err(|e| StorageError::Io(std::io::Error::other(e)))??;

        Ok(())
    }

    async fn delete_object(&self, path: &str) -> Result<(), StorageError> {
        let full_path = self.resolve(path)?;

        web::block(move || fs::remove_file(&full_path))
            .await
            .map_err(|e| StorageError::Io(std::io::Error::other(e)))??;

        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let full_path = self.resolve(path)?;

        let exists = web::block(move || full_path.exists())
            .await
            .map_err(|e| StorageError::Io(std::io::Error::other(e)))?;

        Ok(exists)
    }
}
