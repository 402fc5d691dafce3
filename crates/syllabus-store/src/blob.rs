//! Blob storage collaborator. The catalog keeps only a [`BlobRef`]; bytes
//! live behind a [`BlobStore`].

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use syllabus_core::BlobRef;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("blob not found: {0}")]
    NotFound(String),
    #[error("invalid blob locator: {0}")]
    InvalidLocator(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub trait BlobStore: Send + Sync {
    /// Store `bytes` and return a reference to them.
    fn put(&self, bytes: &[u8], media_type: &str) -> Result<BlobRef, BlobError>;

    fn open(&self, locator: &str) -> Result<Vec<u8>, BlobError>;

    /// Remove a blob. Removing a missing blob is not an error.
    fn remove(&self, locator: &str) -> Result<(), BlobError>;
}

fn new_locator() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}/{}", &id[..2], id)
}

/// Blobs as files under a root directory, fanned out by locator prefix.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, locator: &str) -> Result<PathBuf, BlobError> {
        let relative = Path::new(locator);
        let safe = !locator.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(BlobError::InvalidLocator(locator.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl BlobStore for FsBlobStore {
    fn put(&self, bytes: &[u8], media_type: &str) -> Result<BlobRef, BlobError> {
        let locator = new_locator();
        let path = self.path_for(&locator)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;

        Ok(BlobRef {
            locator,
            media_type: media_type.to_string(),
            size: bytes.len() as u64,
        })
    }

    fn open(&self, locator: &str) -> Result<Vec<u8>, BlobError> {
        let path = self.path_for(locator)?;
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => BlobError::NotFound(locator.to_string()),
            _ => BlobError::Io(e),
        })
    }

    fn remove(&self, locator: &str) -> Result<(), BlobError> {
        let path = self.path_for(locator)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process blob store, for tests and ephemeral catalogs.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStore for MemoryBlobStore {
    fn put(&self, bytes: &[u8], media_type: &str) -> Result<BlobRef, BlobError> {
        let locator = new_locator();
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(locator.clone(), bytes.to_vec());
        Ok(BlobRef {
            locator,
            media_type: media_type.to_string(),
            size: bytes.len() as u64,
        })
    }

    fn open(&self, locator: &str) -> Result<Vec<u8>, BlobError> {
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(locator)
            .cloned()
            .ok_or_else(|| BlobError::NotFound(locator.to_string()))
    }

    fn remove(&self, locator: &str) -> Result<(), BlobError> {
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(locator);
        Ok(())
    }
}
