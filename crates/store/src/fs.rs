// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! Real filesystem implementation of the Shared Store.

use crate::error::StoreError;
use crate::store::Store;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem-backed [`Store`] rooted at an arbitrary base directory.
///
/// Whole-file writes go through a temp file in the same directory followed
/// by a rename, so a concurrent reader never observes a partially written
/// document (spec.md §2's atomic-whole-file-write assumption). The temp
/// file's name is unique per writer thread/process but not otherwise
/// significant — nothing reads it directly.
#[derive(Debug, Clone, Default)]
pub struct FsStore;

impl FsStore {
    pub fn new() -> Self {
        Self
    }

    fn tmp_path(path: &Path) -> PathBuf {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let unique = format!(".{file_name}.{}.{}.tmp", std::process::id(), uuid::Uuid::new_v4());
        path.with_file_name(unique)
    }
}

impl Store for FsStore {
    fn create_dir_all(&self, path: &Path) -> Result<(), StoreError> {
        fs::create_dir_all(path)
            .map_err(|source| StoreError::CreateDir { path: path.to_path_buf(), source })
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent)?;
        }
        let tmp = Self::tmp_path(path);
        fs::write(&tmp, bytes).map_err(|source| StoreError::Write { path: tmp.clone(), source })?;
        fs::rename(&tmp, path).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            StoreError::Write { path: path.to_path_buf(), source }
        })
    }

    fn read_bytes(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn unlink(&self, path: &Path) -> Result<(), StoreError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Unlink { path: path.to_path_buf(), source }),
        }
    }

    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::List { path: dir.to_path_buf(), source }),
        };
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::List { path: dir.to_path_buf(), source })?;
            paths.push(entry.path());
        }
        Ok(paths)
    }

    fn touch(&self, path: &Path) -> Result<(), StoreError> {
        if self.exists(path) {
            return Ok(());
        }
        self.write_bytes(path, b"")
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
#[path = "fs_tests.rs"]
mod tests;
