//! Key-value blob backends for the persistence adapter.

use std::{
    collections::HashMap,
    future::Future,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use tokio::fs;
use tracing::trace;
use uuid::Uuid;

use crate::errors::{Error, Result};

/// Durable string storage addressed by key.
pub trait BlobStorage: Send + Sync + 'static {
    /// Returns the stored value, or `None` if nothing was ever written under `key`.
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Replaces the value under `key`. A reader sees either the old or the new
    /// value in full, never a mix.
    fn write(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;
}

/// One JSON file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Uses `dir` as the data directory. It is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9_-]` become `-`,
    /// so `persist:root` maps to `persist-root.json`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

fn storage_error(action: &str, path: &Path, err: &std::io::Error) -> Error {
    Error::Storage {
        message: format!("{action} {}: {err}", path.display()),
    }
}

impl BlobStorage for FileStorage {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error("Failed to read", &path, &e)),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| storage_error("Failed to create", &self.dir, &e))?;

        // Write next to the target, fsync, then rename over it
        let tmp = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
        fs::write(&tmp, value)
            .await
            .map_err(|e| storage_error("Failed to write", &tmp, &e))?;
        let file = fs::OpenOptions::new()
            .write(true)
            .open(&tmp)
            .await
            .map_err(|e| storage_error("Failed to open", &tmp, &e))?;
        file.sync_all()
            .await
            .map_err(|e| storage_error("Failed to sync", &tmp, &e))?;
        drop(file);

        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(storage_error("Failed to replace", &path, &e));
        }
        trace!(path = %path.display(), bytes = value.len(), "Blob written");
        Ok(())
    }
}

/// Process-local storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `key` with `value`, bypassing the async interface.
    pub fn insert(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Current value under `key`.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries.lock().map_err(|_| Error::Storage {
            message: "memory storage lock poisoned".to_string(),
        })
    }
}

impl BlobStorage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        self.get(key)
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.insert(key, value)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_root_key_file_name() {
        let storage = FileStorage::new("/data");
        assert_eq!(
            storage.path_for("persist:root"),
            PathBuf::from("/data/persist-root.json")
        );
    }

    #[tokio::test]
    async fn test_file_storage_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.read("persist:root").await?, None);

        storage.write("persist:root", "{\"a\":1}").await?;
        storage.write("persist:root", "{\"a\":2}").await?;
        assert_eq!(
            storage.read("persist:root").await?.as_deref(),
            Some("{\"a\":2}")
        );

        // Only the target file remains; temp files were renamed away
        let names: Vec<String> = std::fs::read_dir(storage.dir())?
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["persist-root.json".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_memory_storage_clones_share_entries() -> Result<()> {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.write("k", "v").await?;
        assert_eq!(other.read("k").await?.as_deref(), Some("v"));
        assert_eq!(other.read("missing").await?, None);
        Ok(())
    }
}
