//! Virtual file store layered over a raw [`KeyValueStore`] substrate.
//!
//! Every file lives under a single substrate key (`fs:<path>`). There are no directory nodes:
//! directory structure is implied by path prefixes and by keys ending in `/`.

use std::rc::Rc;

use thiserror::Error;

use super::types::{
    FileEntry, ListingMode, SeedFile, DEFAULT_SEED_FILES, FS_INITIALIZED_KEY, FS_KEY_PREFIX,
};
use crate::storage::kv::KeyValueStore;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// File store failures.
pub enum FsError {
    /// No file is stored under exactly this path.
    #[error("File not found: {0}")]
    NotFound(String),
    /// The substrate rejected or failed the operation.
    #[error("storage backend error: {0}")]
    Backend(String),
}

#[derive(Clone)]
/// Flat path-keyed text store. Clones share the same substrate.
pub struct VirtualFileStore {
    backend: Rc<dyn KeyValueStore>,
    mode: ListingMode,
}

impl std::fmt::Debug for VirtualFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualFileStore")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

fn storage_key(path: &str) -> String {
    format!("{FS_KEY_PREFIX}{path}")
}

impl VirtualFileStore {
    /// Creates a store over `backend` with the default prefix listing mode.
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self::with_listing_mode(backend, ListingMode::default())
    }

    /// Creates a store over `backend` using `mode` for [`Self::list`].
    pub fn with_listing_mode(backend: Rc<dyn KeyValueStore>, mode: ListingMode) -> Self {
        Self { backend, mode }
    }

    /// Returns the active listing mode.
    pub fn listing_mode(&self) -> ListingMode {
        self.mode
    }

    /// Reads the content stored at exactly `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotFound`] when the key is absent and [`FsError::Backend`] on substrate
    /// failure.
    pub async fn read(&self, path: &str) -> Result<String, FsError> {
        self.backend
            .get(&storage_key(path))
            .await
            .map_err(FsError::Backend)?
            .ok_or_else(|| FsError::NotFound(path.to_string()))
    }

    /// Creates or replaces the content at `path`. The path shape is not validated.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::Backend`] on substrate failure.
    pub async fn write(&self, path: &str, content: &str) -> Result<(), FsError> {
        self.backend
            .set(&storage_key(path), content)
            .await
            .map_err(FsError::Backend)
    }

    /// Removes the file at exactly `path`. Absent paths are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::Backend`] on substrate failure.
    pub async fn delete(&self, path: &str) -> Result<(), FsError> {
        self.backend
            .remove(&storage_key(path))
            .await
            .map_err(FsError::Backend)
    }

    /// Lists stored paths under `path`, in substrate order.
    ///
    /// In [`ListingMode::Prefix`] this is a plain string-prefix match. In
    /// [`ListingMode::Directory`] a trailing `/` is appended first so sibling names sharing a
    /// prefix do not leak into the result. The seeding sentinel is never returned.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::Backend`] on substrate failure.
    pub async fn list(&self, path: &str) -> Result<Vec<String>, FsError> {
        let prefix = match self.mode {
            ListingMode::Prefix => path.to_string(),
            ListingMode::Directory => super::path::directory_prefix(path),
        };
        let keys = self.backend.keys().await.map_err(FsError::Backend)?;
        Ok(keys
            .into_iter()
            .filter(|key| key != FS_INITIALIZED_KEY)
            .filter_map(|key| key.strip_prefix(FS_KEY_PREFIX).map(str::to_string))
            .filter(|stored| stored.starts_with(&prefix))
            .collect())
    }

    /// Lists entries under `path` as parsed [`FileEntry`] values.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::Backend`] on substrate failure.
    pub async fn entries(&self, path: &str) -> Result<Vec<FileEntry>, FsError> {
        Ok(self
            .list(path)
            .await?
            .iter()
            .map(|stored| FileEntry::from_key(stored))
            .collect())
    }

    /// Returns `true` when a file is stored at exactly `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::Backend`] on substrate failure.
    pub async fn exists(&self, path: &str) -> Result<bool, FsError> {
        match self.read(path).await {
            Ok(_) => Ok(true),
            Err(FsError::NotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Writes [`DEFAULT_SEED_FILES`] on first run.
    ///
    /// Returns `true` when seeding ran and `false` when the sentinel was already present.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::Backend`] on substrate failure.
    pub async fn seed_defaults(&self) -> Result<bool, FsError> {
        self.seed_with(&DEFAULT_SEED_FILES).await
    }

    /// Writes `files` then the sentinel, unless the sentinel is already present.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::Backend`] on substrate failure.
    pub async fn seed_with(&self, files: &[SeedFile]) -> Result<bool, FsError> {
        let initialized = self
            .backend
            .get(FS_INITIALIZED_KEY)
            .await
            .map_err(FsError::Backend)?
            .is_some();
        if initialized {
            log::debug!("virtual file store already initialized");
            return Ok(false);
        }

        for file in files {
            self.write(file.path, file.content).await?;
        }
        // Written last so a failure part-way retries the whole seed next boot.
        self.backend
            .set(FS_INITIALIZED_KEY, "true")
            .await
            .map_err(FsError::Backend)?;
        log::info!("seeded virtual file store with {} files", files.len());
        Ok(true)
    }
}
