//! Key/value storage backends: the engine's localStorage analogue.
//!
//! The gallery treats storage as a best-effort mirror; backends report
//! failures through `Result` and the caller decides whether to degrade.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// String key/value store with same-origin semantics: values written here
/// are only ever read back by this engine's own future loads.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Volatile in-memory storage; the default backend and the test double.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Durable storage: one file per key under a directory, written via a
/// temp file and rename so readers never observe a torn value.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| Error::StorageError(format!("failed to create {}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::StorageError(format!(
                "failed to read key {}: {}",
                key, e
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let final_path = self.key_path(key);
        let tmp_path = self.dir.join(format!("{}.tmp", key));
        fs::write(&tmp_path, value)
            .map_err(|e| Error::StorageError(format!("failed to write key {}: {}", key, e)))?;
        match fs::rename(&tmp_path, &final_path) {
            Ok(()) => Ok(()),
            Err(rename_err) => {
                if final_path.exists() {
                    fs::remove_file(&final_path)?;
                    fs::rename(&tmp_path, &final_path)?;
                    Ok(())
                } else {
                    Err(Error::StorageError(format!(
                        "failed to store key {}: {}",
                        key, rename_err
                    )))
                }
            }
        }
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::StorageError(format!(
                "failed to remove key {}: {}",
                key, e
            ))),
        }
    }
}
