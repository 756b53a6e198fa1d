// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

use fleet_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Required Shared Store directories are missing and `wait_manager` is
    /// not set (spec.md §7: fatal, aborts before any state is published).
    #[error("missing required directories (manager has not started?): {}", .0.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "))]
    MissingDirectories(Vec<std::path::PathBuf>),
}
