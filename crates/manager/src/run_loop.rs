// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! Manager Main Loop (spec.md §2, §4.5): initializes jobs, starts the
//! assignment loop, runs reconciliation until all jobs are terminal, then
//! publishes the `finished` marker. Grounded on
//! `original_source/fleet/manager.py`'s `Manager.run`/`initialize_tasks`.

use crate::assign::run_assignment_loop;
use crate::error::ManagerError;
use crate::progress::ProgressSink;
use crate::reconcile::{
    cascade_dead_nodes, monitor_heartbeats, report_status, sweep_working_tickets, update_finished_marker,
    ReconcileState,
};
use crate::time_tracker::TimeTracker;
use fleet_core::{Clock, JobStatus, JobStatusDoc, ManagerConfig, TaskName};
use fleet_store::{safe_read_json, ReadOutcome, Store};
use std::collections::HashMap;
use std::time::Instant;

/// Create the Shared Store's directory layout (spec.md §3's five entities
/// plus `working/`, all under `base_dir`).
fn ensure_directories<S: Store>(store: &S, config: &ManagerConfig) -> Result<(), ManagerError> {
    store.create_dir_all(&config.base_dir)?;
    for dir in fleet_core::layout::required_dirs(&config.base_dir) {
        store.create_dir_all(&dir)?;
    }
    store.create_dir_all(&fleet_core::layout::working_dir(&config.base_dir))?;
    Ok(())
}

/// Seed or resume job status documents for the given inputs (spec.md §4.2,
/// "accepts its recorded state as authoritative, enabling resume").
/// Returns the jobs still needing assignment and the initial counters.
fn initialize_tasks<S: Store>(
    store: &S,
    config: &ManagerConfig,
    job_inputs: Vec<serde_json::Value>,
) -> Result<(HashMap<TaskName, JobStatusDoc>, ReconcileState), ManagerError> {
    let mut unassigned = HashMap::new();
    let mut state = ReconcileState::new(job_inputs.len() as u64);

    for (idx, input) in job_inputs.into_iter().enumerate() {
        let task = TaskName::for_index(idx + 1);
        let path = fleet_core::layout::status_path(&config.base_dir, &task);

        let doc = if store.exists(&path) {
            match safe_read_json::<S, JobStatusDoc>(store, &path, &config.store) {
                ReadOutcome::Value(doc) => doc,
                ReadOutcome::Unreadable => {
                    tracing::warn!(task = %task, "could not read existing job status at init, skipping this run");
                    continue;
                }
            }
        } else {
            let doc = JobStatusDoc::new_unassigned(input, path.clone());
            store.write_json(&path, &doc)?;
            doc
        };

        match doc.status {
            JobStatus::Unassigned => {
                unassigned.insert(task, doc);
            }
            JobStatus::Assigned => {
                let working_path = fleet_core::layout::working_path(&config.base_dir, &task);
                if !store.exists(&working_path) {
                    store.write_json(&working_path, &doc)?;
                }
            }
            terminal => {
                state.finished += 1;
                match terminal {
                    JobStatus::Success => state.success += 1,
                    JobStatus::Failed => state.failed += 1,
                    JobStatus::Crashed => state.crashed += 1,
                    _ => unreachable!("matched only terminal statuses"),
                }
            }
        }
    }

    Ok((unassigned, state))
}

/// Run a manager to completion against `job_inputs`, publishing `finished`
/// once every job reaches a terminal status (spec.md §4.5 step 5). Resumes
/// correctly against a `base_dir` left over from a previous run (spec.md
/// §4.2, §8 scenario S6).
pub async fn run_manager<S, C>(
    store: S,
    config: &ManagerConfig,
    clock: C,
    job_inputs: Vec<serde_json::Value>,
    progress: &dyn ProgressSink,
) -> Result<ReconcileState, ManagerError>
where
    S: Store + Clone,
    C: Clock + 'static,
{
    tokio::task::block_in_place(|| ensure_directories(&store, config))?;
    let (unassigned, mut state) = tokio::task::block_in_place(|| initialize_tasks(&store, config, job_inputs))?;
    let total = state.total_jobs;

    let mut time_tracker = TimeTracker::new(clock.clone(), total.max(1));
    for _ in 0..state.finished {
        time_tracker.update(1);
    }

    let assign_handle = tokio::spawn(run_assignment_loop(
        store.clone(),
        config.base_dir.clone(),
        unassigned,
        config.assignment_poll_interval,
    ));

    let mut last_report = Instant::now() - config.status_log_interval;
    loop {
        let (live, finished) = tokio::task::block_in_place(|| -> Result<_, ManagerError> {
            let (live, newly_dead) = monitor_heartbeats(
                &store,
                &config.base_dir,
                &mut state,
                config.heartbeat_timeout.as_secs() as i64,
                &clock,
                &config.store,
            )?;
            cascade_dead_nodes(&store, &config.base_dir, &newly_dead, &config.store)?;
            sweep_working_tickets(&store, &config.base_dir, &mut state, &mut time_tracker, &config.store)?;
            let finished = update_finished_marker(&store, &config.base_dir, &state)?;
            Ok((live, finished))
        })?;

        if last_report.elapsed() >= config.status_log_interval || state.finished == total {
            report_status(progress, &state, live, &time_tracker);
            last_report = Instant::now();
        }

        if finished {
            break;
        }

        tokio::time::sleep(config.reconcile_tick_interval).await;
    }

    assign_handle.abort();
    tracing::info!(total, success = state.success, failed = state.failed, crashed = state.crashed, "manager run finished");
    Ok(state)
}

#[cfg(test)]
#[path = "run_loop_tests.rs"]
mod tests;
