// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! In-process double of the Shared Store, for driving the manager/worker
//! state machines in unit tests without touching a real filesystem.

use crate::error::StoreError;
use crate::store::Store;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// An in-memory `Store` backed by a sorted map from path to file contents.
///
/// Cloning shares the underlying map (`Arc`), so a test can hand out one
/// `MemoryStore` to several simulated nodes and have them observe each
/// other's writes, matching how `FsStore` instances sharing a base
/// directory behave.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn create_dir_all(&self, _path: &Path) -> Result<(), StoreError> {
        // Directories are implicit in the path map; nothing to create.
        Ok(())
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        self.files.lock().insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn read_bytes(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        self.files
            .lock()
            .get(path)
            .cloned()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn unlink(&self, path: &Path) -> Result<(), StoreError> {
        self.files.lock().remove(path);
        Ok(())
    }

    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
        let files = self.files.lock();
        let entries = files
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .cloned()
            .collect();
        Ok(entries)
    }

    fn touch(&self, path: &Path) -> Result<(), StoreError> {
        let mut files = self.files.lock();
        files.entry(path.to_path_buf()).or_default();
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().contains_key(path)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
