//! Attachment content storage
//!
//! Cloning an attachment duplicates metadata only; the content path keeps
//! pointing at the original blob. When a policy requests true binary
//! duplication, the facade routes every cloned attachment through
//! [`AttachmentStorage::copy_content`] and re-points it at the new path.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Storage failures
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No content stored under the given path
    #[error("content not found: {0}")]
    NotFound(String),

    /// Underlying filesystem failure
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Duplicates stored attachment content
pub trait AttachmentStorage: Send + Sync {
    /// Copy the blob at `path`, returning the copy's path
    ///
    /// # Errors
    /// [`StorageError::NotFound`] if nothing is stored at `path`, or an
    /// [`StorageError::Io`] from the underlying store.
    fn copy_content(&self, path: &str) -> Result<String, StorageError>;
}

/// In-memory blob store
#[derive(Debug, Default)]
pub struct InMemoryAttachmentStorage {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryAttachmentStorage {
    /// Create an empty blob store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store content under a path
    pub fn put(&self, path: impl Into<String>, content: Vec<u8>) {
        self.blobs.write().insert(path.into(), content);
    }

    /// Fetch content by path
    #[must_use]
    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.blobs.read().get(path).cloned()
    }
}

impl AttachmentStorage for InMemoryAttachmentStorage {
    fn copy_content(&self, path: &str) -> Result<String, StorageError> {
        let mut blobs = self.blobs.write();
        let content = blobs
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_string()))?;
        let new_path = format!("{path}-{}", Uuid::new_v4());
        blobs.insert(new_path.clone(), content);
        Ok(new_path)
    }
}

/// Filesystem blob store rooted at a directory
#[derive(Debug, Clone)]
pub struct FsAttachmentStorage {
    root: PathBuf,
}

impl FsAttachmentStorage {
    /// Create a store that places copies under `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AttachmentStorage for FsAttachmentStorage {
    fn copy_content(&self, path: &str) -> Result<String, StorageError> {
        let source = Path::new(path);
        if !source.is_file() {
            return Err(StorageError::NotFound(path.to_string()));
        }
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let target = self.root.join(format!("{}-{file_name}", Uuid::new_v4()));
        std::fs::copy(source, &target)?;
        Ok(target.to_string_lossy().into_owned())
    }
}
