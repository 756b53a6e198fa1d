// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

use fleet_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A working ticket references a job status file that does not exist —
    /// an unconditional bug per spec.md §4.5 (`check_working_tasks`'s
    /// `assert task_status_file.exists()`), never a transient condition.
    #[error("working ticket {ticket} references missing job status {job_status}")]
    DanglingWorkingTicket { ticket: std::path::PathBuf, job_status: std::path::PathBuf },
}
