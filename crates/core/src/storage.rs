//! File storage abstraction for uploaded media.
//!
//! Handlers only need "store these bytes, give me a public URL". The local
//! implementation writes under a media root that the HTTP layer serves
//! statically; other backends can implement [`FileStorage`] without touching
//! the handlers.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage path: {0}")]
    InvalidPath(String),
}

/// A file persisted by a [`FileStorage`] backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Backend-relative path, used for later deletion.
    pub path: String,
    /// Publicly resolvable URL.
    pub url: String,
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn save(
        &self,
        folder: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, StorageError>;

    /// Remove a previously stored file. Missing files are not an error.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}

/// Stores files on the local filesystem under `root`, served at `base_url`.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn resolve(&self, relative: &str) -> Result<PathBuf, StorageError> {
        let rel = Path::new(relative);
        let safe = rel
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || relative.is_empty() {
            return Err(StorageError::InvalidPath(relative.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn save(
        &self,
        folder: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, StorageError> {
        let relative = format!("{folder}/{file_name}");
        let full = self.resolve(&relative)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full, bytes).await?;
        tracing::debug!(path = %full.display(), size = bytes.len(), "Stored file");

        Ok(StoredFile {
            url: format!("{}/{relative}", self.base_url),
            path: relative,
        })
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
