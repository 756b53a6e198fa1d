// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! Worker Main Loop (spec.md §4.6). Grounded on
//! `original_source/fleet/worker.py`'s `Worker.run`/`process_job`/
//! `check_worker_status`.

use crate::error::WorkerError;
use crate::exec::{run_inline, run_isolated, ChildProcessSpawner};
use crate::heartbeat::HeartbeatTask;
use fleet_core::{Clock, JobFn, JobStatusDoc, NodeId, NodeStatusDoc, WorkerConfig};
use fleet_store::{safe_read_json, ReadOutcome, Store};
use serde_json::Value;
use std::time::{Duration, Instant};

/// The five-way classification from spec.md §4.6 step 3. `Running` is
/// modeled as `None` by [`check_worker_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerExitReason {
    MaxJobReached,
    MaxWorkTimeReached,
    FinishedFileExists,
    HeartDead,
}

/// Block on the four required directories existing, per `wait_manager`
/// (spec.md §4.6, §6). Fatal if not set and a directory is missing.
async fn await_manager_ready<S: Store>(store: &S, config: &WorkerConfig) -> Result<(), WorkerError> {
    loop {
        let missing: Vec<_> = tokio::task::block_in_place(|| {
            fleet_core::layout::required_dirs(&config.base_dir)
                .into_iter()
                .filter(|dir| !store.exists(dir))
                .collect()
        });
        if missing.is_empty() {
            return Ok(());
        }
        if !config.wait_manager {
            return Err(WorkerError::MissingDirectories(missing));
        }
        tracing::info!(?missing, "waiting for manager to create required directories");
        tokio::time::sleep(config.wait_manager_poll_interval).await;
    }
}

fn register_node<S: Store>(store: &S, config: &WorkerConfig, node: &NodeId) -> Result<(), WorkerError> {
    store.write_json(&fleet_core::layout::node_path(&config.base_dir, node), &NodeStatusDoc::idle())?;
    store.touch(&fleet_core::layout::available_path(&config.base_dir, node))?;
    tracing::info!(node = %node, "node registered");
    Ok(())
}

/// Run one job to completion and write its terminal status (spec.md §4.6
/// step 1). Returns `true` if a job was found and processed.
fn process_job<S: Store>(
    store: &S,
    config: &WorkerConfig,
    node: &NodeId,
    job_fn: &dyn JobFn,
    info: &Value,
    spawner: Option<&dyn ChildProcessSpawner>,
) -> Result<bool, WorkerError> {
    let node_path = fleet_core::layout::node_path(&config.base_dir, node);
    let node_doc = match safe_read_json::<S, NodeStatusDoc>(store, &node_path, &config.store) {
        ReadOutcome::Value(doc) => doc,
        ReadOutcome::Unreadable => return Ok(false),
    };
    if !node_doc.is_busy() {
        return Ok(false);
    }
    let Some(job_path) = node_doc.task_status_path.clone() else { return Ok(false) };

    let mut job: JobStatusDoc = match safe_read_json::<S, JobStatusDoc>(store, &job_path, &config.store) {
        ReadOutcome::Value(doc) => doc,
        ReadOutcome::Unreadable => return Ok(false),
    };

    tracing::info!(node = %node, task = ?node_doc.task, "processing job");

    let outcome = match (config.timeout, spawner) {
        (Some(timeout), Some(spawner)) => {
            let output_path = job_path.with_extension("output.json");
            run_isolated(spawner, &job_path, &output_path, timeout)
        }
        _ => run_inline(job_fn, &job.input, info),
    };

    job.complete(&outcome);
    store.write_json(&job_path, &job)?;
    store.write_json(&node_path, &NodeStatusDoc::idle())?;

    Ok(true)
}

/// The `max_job_reached` / `max_work_time_reached` / `finished_file_exists`
/// / `heart_dead` classification (spec.md §4.6 step 3). `None` means
/// `running`.
fn check_worker_status<S: Store>(
    store: &S,
    config: &WorkerConfig,
    node: &NodeId,
    start: Instant,
    finished_job_num: u64,
) -> Option<WorkerExitReason> {
    if let Some(max_job) = config.max_job {
        if finished_job_num >= max_job {
            return Some(WorkerExitReason::MaxJobReached);
        }
    }
    if let Some(max_work_time) = config.max_work_time {
        if start.elapsed() > max_work_time {
            return Some(WorkerExitReason::MaxWorkTimeReached);
        }
    }
    if store.exists(&fleet_core::layout::finished_path(&config.base_dir)) {
        return Some(WorkerExitReason::FinishedFileExists);
    }
    let heart_path = fleet_core::layout::heart_path(&config.base_dir, node);
    if !crate::heartbeat::is_alive(store, &heart_path, &config.store) {
        return Some(WorkerExitReason::HeartDead);
    }
    None
}

fn is_busy<S: Store>(store: &S, config: &WorkerConfig, node: &NodeId) -> bool {
    let node_path = fleet_core::layout::node_path(&config.base_dir, node);
    matches!(safe_read_json::<S, NodeStatusDoc>(store, &node_path, &config.store), ReadOutcome::Value(doc) if doc.is_busy())
}

/// Run a worker to voluntary exit or manager-signaled completion
/// (spec.md §4.6). Always writes a final `dead` heartbeat and unlinks its
/// availability token on the way out, regardless of exit reason (spec.md
/// §9 open question, resolved: unconditional cleanup).
pub async fn run_worker<S, C>(
    store: S,
    config: &WorkerConfig,
    clock: C,
    job_fn: &dyn JobFn,
    info: Value,
    spawner: Option<std::sync::Arc<dyn ChildProcessSpawner>>,
) -> Result<(NodeId, u64, WorkerExitReason), WorkerError>
where
    S: Store + Clone,
    C: Clock + 'static,
{
    await_manager_ready(&store, config).await?;

    let node = NodeId::generate(config.node_id_prefix.as_deref());
    tokio::task::block_in_place(|| register_node(&store, config, &node))?;

    let heart_path = fleet_core::layout::heart_path(&config.base_dir, &node);
    let heartbeat = HeartbeatTask::spawn(store.clone(), heart_path.clone(), config.heartbeat_period, clock.clone());

    let start = Instant::now();
    let mut finished_job_num = 0u64;
    let mut not_find_job_num: u32 = 0;

    let exit_reason = loop {
        let found =
            tokio::task::block_in_place(|| process_job(&store, config, &node, job_fn, &info, spawner.as_deref()))?;
        if found {
            finished_job_num += 1;
            not_find_job_num = 0;
            let running = tokio::task::block_in_place(|| check_worker_status(&store, config, &node, start, finished_job_num)).is_none();
            if running {
                tokio::task::block_in_place(|| store.touch(&fleet_core::layout::available_path(&config.base_dir, &node)))?;
            }
        } else {
            let interval = if not_find_job_num < config.fast_poll_cycles {
                config.fast_poll_interval
            } else {
                config.slow_poll_interval
            };
            tokio::time::sleep(interval).await;
            not_find_job_num += 1;
        }

        let status = tokio::task::block_in_place(|| check_worker_status(&store, config, &node, start, finished_job_num));
        match status {
            Some(WorkerExitReason::FinishedFileExists) if tokio::task::block_in_place(|| is_busy(&store, config, &node)) => continue,
            Some(reason) => break reason,
            None => continue,
        }
    };

    tracing::info!(node = %node, reason = ?exit_reason, "worker exiting");
    heartbeat.stop(&store, &heart_path, &clock).await;
    tokio::task::block_in_place(|| store.unlink(&fleet_core::layout::available_path(&config.base_dir, &node)))?;

    Ok((node, finished_job_num, exit_reason))
}

#[cfg(test)]
#[path = "run_loop_tests.rs"]
mod tests;
