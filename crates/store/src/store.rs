// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! The Shared Store capability (spec.md §2, §9).
//!
//! Every coordinating component is generic over `S: Store` rather than
//! reaching for a global filesystem path directly, so the protocol's state
//! machines can be driven against an in-memory double in unit tests — the
//! Design Notes' "inject a Store capability" recommendation.

use crate::error::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Create/read/write-whole-file/unlink/list/exists/touch over a directory
/// tree (spec.md §2). Implementors assume whole-file writes are atomic at
/// the reader's granularity (spec.md §2) — `FsStore` achieves this with a
/// write-then-rename; `MemoryStore` is atomic by construction.
pub trait Store: Send + Sync + 'static {
    /// Create a directory and all missing parent components. Idempotent.
    fn create_dir_all(&self, path: &Path) -> Result<(), StoreError>;

    /// Atomically replace the whole contents of `path`.
    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError>;

    /// Read the whole contents of `path`. Callers needing torn-read/lag
    /// tolerance should go through [`crate::safe_read`] instead of calling
    /// this directly.
    fn read_bytes(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    /// Remove `path` if present; a missing file is not an error.
    fn unlink(&self, path: &Path) -> Result<(), StoreError>;

    /// List immediate entries of `dir` (spec.md §4.3-§4.5 directory scans).
    /// A missing directory yields an empty list.
    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>, StoreError>;

    /// Create `path` if it does not already exist, leaving existing
    /// contents untouched (spec.md §4.6, availability token re-touch).
    fn touch(&self, path: &Path) -> Result<(), StoreError>;

    fn exists(&self, path: &Path) -> bool;

    /// Serialize `value` and write it whole, per the "no partial-update
    /// operation" data model rule (spec.md §3).
    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)
            .map_err(|source| StoreError::Serialize { path: path.to_path_buf(), source })?;
        self.write_bytes(path, &bytes)
    }
}

/// Read a JSON document without Safe-Reader retry — used where a missing or
/// torn file is an unconditional bug (e.g. a working ticket's referenced
/// job must exist, spec.md §4.5 `check_working_tasks`'s `assert`).
pub fn read_json_strict<S: Store, T: DeserializeOwned>(
    store: &S,
    path: &Path,
) -> std::io::Result<T> {
    let bytes = store.read_bytes(path)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
