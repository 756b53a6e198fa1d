// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! Reconciliation Loop (spec.md §4.5): heartbeat scan, dead-node cascade,
//! working-ticket sweep, throttled status report, finished-marker logic.
//! Grounded on `original_source/fleet/manager.py`'s
//! `check_task_status_and_assign`/`monitor_heartbeats`/`check_working_tasks`.

use crate::error::ManagerError;
use crate::progress::{ProgressSink, ProgressSnapshot};
use crate::time_tracker::TimeTracker;
use fleet_core::{Clock, HeartbeatDoc, JobStatus, JobStatusDoc, NodeId, NodeStatusDoc, StoreTuning};
use fleet_store::{safe_read_json, ReadOutcome, Store};
use std::collections::HashSet;
use std::path::Path;

/// Counters tracked across a manager run, updated in place by each
/// reconciliation pass.
#[derive(Debug)]
pub struct ReconcileState {
    pub total_jobs: u64,
    pub finished: u64,
    pub working: u64,
    pub success: u64,
    pub failed: u64,
    pub crashed: u64,
    /// Sticky across the run (spec.md §4.3): once dead, always dead.
    dead_nodes: HashSet<NodeId>,
}

impl ReconcileState {
    pub fn new(total_jobs: u64) -> Self {
        Self {
            total_jobs,
            finished: 0,
            working: 0,
            success: 0,
            failed: 0,
            crashed: 0,
            dead_nodes: HashSet::new(),
        }
    }

    pub fn dead_node_count(&self) -> u64 {
        self.dead_nodes.len() as u64
    }
}

/// Heartbeat scan (spec.md §4.3, §4.5 step 1). Iterates `heart/`,
/// classifying each not-already-dead node as alive or newly dead, and
/// writing `dead` back for nodes that just lost liveness.
pub fn monitor_heartbeats<S: Store, C: Clock>(
    store: &S,
    base_dir: &Path,
    state: &mut ReconcileState,
    heartbeat_timeout_secs: i64,
    clock: &C,
    tuning: &StoreTuning,
) -> Result<(u64, Vec<NodeId>), ManagerError> {
    let dir = fleet_core::layout::heart_dir(base_dir);
    let mut live = 0u64;
    let mut newly_dead = Vec::new();
    let now = clock.epoch_secs();

    for path in store.list(&dir)? {
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else { continue };
        let node = NodeId::new(stem);
        if state.dead_nodes.contains(&node) {
            continue;
        }

        match safe_read_json::<S, HeartbeatDoc>(store, &path, tuning) {
            ReadOutcome::Value(doc) if doc.is_alive(now, heartbeat_timeout_secs) => {
                live += 1;
            }
            ReadOutcome::Value(doc) => {
                let reason = if doc.status == fleet_core::HeartbeatStatus::Dead {
                    "worker declared itself dead".to_string()
                } else {
                    format!("no heartbeat since {}", doc.last_heartbeat)
                };
                store.write_json(&path, &HeartbeatDoc::dead(now, reason))?;
                state.dead_nodes.insert(node.clone());
                newly_dead.push(node);
            }
            ReadOutcome::Unreadable => {
                store.write_json(&path, &HeartbeatDoc::dead(now, "heartbeat file unreadable"))?;
                state.dead_nodes.insert(node.clone());
                newly_dead.push(node);
            }
        }
    }

    Ok((live, newly_dead))
}

/// Dead-node cascade (spec.md §4.5 step 2): a newly-dead node that was
/// `busy` has its in-flight job demoted to `crashed`, if still `assigned`.
pub fn cascade_dead_nodes<S: Store>(
    store: &S,
    base_dir: &Path,
    newly_dead: &[NodeId],
    tuning: &StoreTuning,
) -> Result<(), ManagerError> {
    for node in newly_dead {
        let node_path = fleet_core::layout::node_path(base_dir, node);
        let ReadOutcome::Value(node_doc) = safe_read_json::<S, NodeStatusDoc>(store, &node_path, tuning) else {
            continue;
        };
        if !node_doc.is_busy() {
            continue;
        }
        let Some(job_path) = node_doc.task_status_path.clone() else { continue };
        let ReadOutcome::Value(mut job_doc) = safe_read_json::<S, JobStatusDoc>(store, &job_path, tuning) else {
            continue;
        };
        if job_doc.status == JobStatus::Assigned {
            job_doc.cascade_crash();
            store.write_json(&job_path, &job_doc)?;
            store.write_json(&node_path, &NodeStatusDoc::dead("assigned worker was declared dead"))?;
            tracing::info!(node = %node, "cascaded in-flight job to crashed after dead-node detection");
        }
    }
    Ok(())
}

/// Working-ticket sweep (spec.md §4.5 step 3): promote terminal jobs out of
/// `working/`, updating counters and the time tracker.
pub fn sweep_working_tickets<S: Store, C: Clock>(
    store: &S,
    base_dir: &Path,
    state: &mut ReconcileState,
    time_tracker: &mut TimeTracker<C>,
    tuning: &StoreTuning,
) -> Result<(), ManagerError> {
    let dir = fleet_core::layout::working_dir(base_dir);
    state.working = 0;

    for ticket_path in store.list(&dir)? {
        let ReadOutcome::Value(ticket) = safe_read_json::<S, JobStatusDoc>(store, &ticket_path, tuning) else {
            continue;
        };
        let job_path = ticket.task_status_path.clone();
        if !store.exists(&job_path) {
            return Err(ManagerError::DanglingWorkingTicket { ticket: ticket_path, job_status: job_path });
        }

        let ReadOutcome::Value(job_doc) = safe_read_json::<S, JobStatusDoc>(store, &job_path, tuning) else {
            continue;
        };

        if job_doc.status == JobStatus::Assigned {
            state.working += 1;
            continue;
        }

        match job_doc.status {
            JobStatus::Success => state.success += 1,
            JobStatus::Crashed => state.crashed += 1,
            JobStatus::Failed => state.failed += 1,
            JobStatus::Assigned | JobStatus::Unassigned => unreachable!("filtered above"),
        }
        store.unlink(&ticket_path)?;
        state.finished += 1;
        time_tracker.update(1);
    }
    Ok(())
}

/// Finished-marker logic (spec.md §4.5 step 5). Returns `true` once the run
/// is fully complete (`finished == total`), at which point the caller's
/// reconciliation loop should stop.
pub fn update_finished_marker<S: Store>(store: &S, base_dir: &Path, state: &ReconcileState) -> Result<bool, ManagerError> {
    let all_accounted = state.finished == state.total_jobs || state.working + state.finished == state.total_jobs;
    if all_accounted {
        let path = fleet_core::layout::finished_path(base_dir);
        store.touch(&path)?;
    }
    Ok(state.finished == state.total_jobs)
}

/// Emit the throttled status report (spec.md §4.5 step 4) through a
/// [`ProgressSink`]. Callers should only call this when the throttle
/// interval has elapsed (tracked by the caller, per spec.md's
/// "at most once per second").
pub fn report_status<C: Clock>(
    sink: &dyn ProgressSink,
    state: &ReconcileState,
    live_nodes: u64,
    time_tracker: &TimeTracker<C>,
) {
    let summary = time_tracker.summary();
    sink.report(ProgressSnapshot {
        total_jobs: state.total_jobs,
        finished: state.finished,
        working: state.working,
        success: state.success,
        failed: state.failed,
        crashed: state.crashed,
        live_nodes,
        dead_nodes: state.dead_node_count(),
        summary: &summary,
    });
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
