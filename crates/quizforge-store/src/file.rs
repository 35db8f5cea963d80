//! Disk-backed storage: one file per key inside a data directory.

use std::io;
use std::path::{Path, PathBuf};

use crate::storage::{KeyValueStorage, StorageError};

/// A [`KeyValueStorage`] that keeps each key as `<dir>/<key>.json`.
///
/// The directory is created lazily on the first write; reading a key that
/// was never written yields `None`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get("rankings").unwrap(), None);
    }

    #[test]
    fn values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();

        let mut storage = FileStorage::new(dir.path());
        storage.set("rankings", r#"{"topic":[]}"#).unwrap();

        let reopened = FileStorage::new(dir.path());
        assert_eq!(
            reopened.get("rankings").unwrap().as_deref(),
            Some(r#"{"topic":[]}"#)
        );
    }

    #[test]
    fn creates_nested_data_dir_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("data");

        let mut storage = FileStorage::new(&nested);
        storage.set("rankings", "{}").unwrap();
        assert!(nested.join("rankings.json").exists());
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());

        storage.set("k", "v").unwrap();
        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }
}
