// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! `clap`-derive argument surfaces for the manager and worker binaries
//! (spec.md §4.8). This is the only module in the workspace that knows
//! about argument parsing; every field here converts into the plain
//! `fleet_core::{ManagerConfig, WorkerConfig}` records the library crates
//! actually consume.

use anyhow::{Context, Result};
use clap::Args;
use fleet_core::{ManagerConfig, StoreTuning, WorkerConfig};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct ManagerArgs {
    /// Root of the Shared Store for this run.
    #[arg(long)]
    pub base_dir: PathBuf,

    /// Run `0..job_count` as the job input list (matches the toy example's
    /// `list(range(100))`). Ignored if `--jobs-file` is given.
    #[arg(long, default_value_t = 100)]
    pub job_count: u64,

    /// Path to a JSON array of job inputs, overriding `--job-count`.
    #[arg(long)]
    pub jobs_file: Option<PathBuf>,

    /// Max heartbeat age before a node is declared dead.
    #[arg(long, default_value_t = 120)]
    pub heartbeat_timeout_secs: u64,

    #[arg(long, default_value_t = 100)]
    pub assignment_poll_interval_ms: u64,

    #[arg(long, default_value_t = 50)]
    pub reconcile_tick_interval_ms: u64,

    #[arg(long, default_value_t = 1000)]
    pub status_log_interval_ms: u64,

    #[arg(long, default_value_t = 60)]
    pub safe_read_max_retries: u32,

    #[arg(long, default_value_t = 1000)]
    pub safe_read_retry_backoff_ms: u64,
}

impl ManagerArgs {
    pub fn into_config(self) -> ManagerConfig {
        ManagerConfig {
            base_dir: self.base_dir,
            heartbeat_timeout: Duration::from_secs(self.heartbeat_timeout_secs),
            assignment_poll_interval: Duration::from_millis(self.assignment_poll_interval_ms),
            reconcile_tick_interval: Duration::from_millis(self.reconcile_tick_interval_ms),
            status_log_interval: Duration::from_millis(self.status_log_interval_ms),
            store: StoreTuning {
                safe_read_max_retries: self.safe_read_max_retries,
                safe_read_retry_backoff: Duration::from_millis(self.safe_read_retry_backoff_ms),
            },
        }
    }

    /// Build the job input list from `--jobs-file` if given, else
    /// `0..job_count` (spec.md §8 S1's `job_list = [1,2,3,4]`-style lists).
    pub fn job_inputs(&self) -> Result<Vec<Value>> {
        match &self.jobs_file {
            Some(path) => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("reading jobs file {}", path.display()))?;
                let inputs: Vec<Value> = serde_json::from_slice(&bytes)
                    .with_context(|| format!("parsing jobs file {} as a JSON array", path.display()))?;
                Ok(inputs)
            }
            None => Ok((0..self.job_count).map(Value::from).collect()),
        }
    }
}

#[derive(Args, Debug)]
pub struct WorkerArgs {
    /// Root of the Shared Store for this run.
    #[arg(long)]
    pub base_dir: PathBuf,

    /// Optional human-readable prefix; a UUID suffix is always appended.
    #[arg(long)]
    pub node_id_prefix: Option<String>,

    /// Name of the builtin job function to run (see `fleet_cli::jobs`).
    #[arg(long, default_value = "add-one")]
    pub job: String,

    /// Per-job wall-clock timeout in seconds; absent runs inline with no
    /// process isolation.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Poll until the manager's required directories exist instead of
    /// failing fast at startup.
    #[arg(long)]
    pub wait_manager: bool,

    /// Voluntary exit after this many completed jobs.
    #[arg(long)]
    pub max_job: Option<u64>,

    /// Voluntary exit after this many seconds of wall time.
    #[arg(long)]
    pub max_work_time_secs: Option<u64>,

    #[arg(long, default_value_t = 10)]
    pub heartbeat_period_secs: u64,

    #[arg(long, default_value_t = 20)]
    pub fast_poll_cycles: u32,

    #[arg(long, default_value_t = 100)]
    pub fast_poll_interval_ms: u64,

    #[arg(long, default_value_t = 500)]
    pub slow_poll_interval_ms: u64,

    #[arg(long, default_value_t = 1000)]
    pub wait_manager_poll_interval_ms: u64,

    #[arg(long, default_value_t = 60)]
    pub safe_read_max_retries: u32,

    #[arg(long, default_value_t = 1000)]
    pub safe_read_retry_backoff_ms: u64,
}

impl WorkerArgs {
    pub fn into_config(&self) -> WorkerConfig {
        WorkerConfig {
            base_dir: self.base_dir.clone(),
            node_id_prefix: self.node_id_prefix.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
            wait_manager: self.wait_manager,
            max_job: self.max_job,
            max_work_time: self.max_work_time_secs.map(Duration::from_secs),
            heartbeat_period: Duration::from_secs(self.heartbeat_period_secs),
            fast_poll_cycles: self.fast_poll_cycles,
            fast_poll_interval: Duration::from_millis(self.fast_poll_interval_ms),
            slow_poll_interval: Duration::from_millis(self.slow_poll_interval_ms),
            wait_manager_poll_interval: Duration::from_millis(self.wait_manager_poll_interval_ms),
            store: StoreTuning {
                safe_read_max_retries: self.safe_read_max_retries,
                safe_read_retry_backoff: Duration::from_millis(self.safe_read_retry_backoff_ms),
            },
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
