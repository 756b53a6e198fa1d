// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! Configuration records (spec.md §6).
//!
//! The CLI crate is the only place that knows about argument parsing; it
//! builds these records and hands them to the manager/worker, which never
//! see a `clap` type directly (mirroring the teacher's separation between
//! its `oj` CLI crate and `oj-core`/`oj-daemon`).

use std::path::PathBuf;
use std::time::Duration;

/// Retry/back-off tuning for the Safe Reader (spec.md §4.1).
///
/// The Python original hard-codes 60 retries / 1s back-off; the Design
/// Notes call for parameterizing this, so it is a field here instead.
#[derive(Debug, Clone)]
pub struct StoreTuning {
    pub safe_read_max_retries: u32,
    pub safe_read_retry_backoff: Duration,
}

impl Default for StoreTuning {
    fn default() -> Self {
        Self { safe_read_max_retries: 60, safe_read_retry_backoff: Duration::from_secs(1) }
    }
}

/// Manager-side configuration.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Root of the Shared Store for this run.
    pub base_dir: PathBuf,
    /// Max heartbeat age before a node is declared dead (GLOSSARY default 120s).
    pub heartbeat_timeout: Duration,
    /// Assignment loop idle poll interval (spec.md §4.4 step 3, ~100ms).
    pub assignment_poll_interval: Duration,
    /// Reconciliation loop tick interval. The Python original has no
    /// explicit sleep here because each pass is I/O-bound; an async Rust
    /// loop needs an explicit yield point to avoid busy-spinning when the
    /// store is fast (e.g. a local tempdir in tests).
    pub reconcile_tick_interval: Duration,
    /// How often the throttled status line may be emitted (spec.md §4.5 step 4).
    pub status_log_interval: Duration,
    pub store: StoreTuning,
}

impl ManagerConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            heartbeat_timeout: Duration::from_secs(120),
            assignment_poll_interval: Duration::from_millis(100),
            reconcile_tick_interval: Duration::from_millis(50),
            status_log_interval: Duration::from_secs(1),
            store: StoreTuning::default(),
        }
    }
}

/// Worker-side configuration (spec.md §6).
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub base_dir: PathBuf,
    /// Optional human prefix; a UUID suffix is always appended (spec.md §6).
    pub node_id_prefix: Option<String>,
    /// Per-job wall-clock timeout; absent ⇒ inline, no timeout.
    pub timeout: Option<Duration>,
    /// If set, poll until required sub-directories exist instead of
    /// failing fast at startup.
    pub wait_manager: bool,
    /// Voluntary exit after this many completed jobs.
    pub max_job: Option<u64>,
    /// Voluntary exit after this many seconds of wall time.
    pub max_work_time: Option<Duration>,
    /// Heartbeat write period (spec.md §4.3, "≤ a few seconds").
    pub heartbeat_period: Duration,
    /// Consecutive empty-poll cycles before switching from fast to slow
    /// backoff (spec.md §4.6 step 2).
    pub fast_poll_cycles: u32,
    pub fast_poll_interval: Duration,
    pub slow_poll_interval: Duration,
    /// Poll interval while waiting for the manager's directories to appear.
    pub wait_manager_poll_interval: Duration,
    pub store: StoreTuning,
}

impl WorkerConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            node_id_prefix: None,
            timeout: None,
            wait_manager: false,
            max_job: None,
            max_work_time: None,
            heartbeat_period: Duration::from_secs(10),
            fast_poll_cycles: 20,
            fast_poll_interval: Duration::from_millis(100),
            slow_poll_interval: Duration::from_millis(500),
            wait_manager_poll_interval: Duration::from_secs(1),
            store: StoreTuning::default(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
