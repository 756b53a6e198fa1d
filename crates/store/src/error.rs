// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the Shared Store.
///
/// Per spec.md §7, transient I/O (torn reads, producer lag) is masked by
/// the Safe Reader and never reaches callers as an error — these variants
/// are for operations that are not read-retried: directory creation,
/// atomic rename, and listing.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir { path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to unlink {path}: {source}")]
    Unlink { path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to list {path}: {source}")]
    List { path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to serialize document for {path}: {source}")]
    Serialize { path: PathBuf, #[source] source: serde_json::Error },
}
