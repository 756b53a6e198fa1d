// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! Assignment Loop (spec.md §4.4). Matches unassigned jobs to advertised
//! availability tokens and performs the four-step assignment transaction.
//! Grounded on `original_source/fleet/manager_utils/assign_jobs.py`.

use crate::error::ManagerError;
use fleet_core::{JobStatusDoc, NodeId, NodeStatusDoc, TaskName};
use fleet_store::Store;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// One assignment transaction (spec.md §4.4 steps a-d). `node` must have an
/// advertised availability token that the caller has already resolved to a
/// concrete id; this function performs the writes in the specified order
/// so a crash between any two steps leaves a recoverable state.
pub fn assign_job_to_node<S: Store>(
    store: &S,
    base_dir: &Path,
    task: &TaskName,
    job: &mut JobStatusDoc,
    node: &NodeId,
) -> Result<(), ManagerError> {
    job.assign(node.clone());
    let job_status_path = fleet_core::layout::status_path(base_dir, task);
    store.write_json(&job_status_path, job)?;

    let node_path = fleet_core::layout::node_path(base_dir, node);
    let node_doc = NodeStatusDoc::busy(task.clone(), job_status_path);
    store.write_json(&node_path, &node_doc)?;

    let available_path = fleet_core::layout::available_path(base_dir, node);
    store.unlink(&available_path)?;

    let working_path = fleet_core::layout::working_path(base_dir, task);
    store.write_json(&working_path, job)?;

    tracing::info!(task = %task, node = %node, "assigned task to node");
    Ok(())
}

/// List the nodes currently advertising availability (spec.md §4.4 step 1).
/// A missing `available/` directory yields an empty set, not an error.
pub fn snapshot_available_nodes<S: Store>(store: &S, base_dir: &Path) -> Result<Vec<NodeId>, ManagerError> {
    let dir = fleet_core::layout::available_dir(base_dir);
    let entries = store.list(&dir)?;
    Ok(entries
        .into_iter()
        .filter_map(|path| path.file_name().map(|n| NodeId::new(n.to_string_lossy().into_owned())))
        .collect())
}

/// Drive the assignment loop to completion: repeatedly snapshot available
/// nodes and assign as many unassigned jobs as tokens allow, sleeping
/// briefly between rounds that made no progress (spec.md §4.4 step 3).
/// Returns once `unassigned` is empty.
pub async fn run_assignment_loop<S: Store>(
    store: S,
    base_dir: std::path::PathBuf,
    mut unassigned: HashMap<TaskName, JobStatusDoc>,
    poll_interval: Duration,
) -> Result<(), ManagerError> {
    while !unassigned.is_empty() {
        let assigned_this_round = tokio::task::block_in_place(|| -> Result<usize, ManagerError> {
            let mut available = snapshot_available_nodes(&store, &base_dir)?;
            let mut assigned_this_round = 0usize;

            let tasks: Vec<TaskName> = unassigned.keys().cloned().collect();
            for task in tasks {
                let Some(node) = available.pop() else { break };
                let mut job = unassigned.remove(&task).expect("task present in unassigned map");
                assign_job_to_node(&store, &base_dir, &task, &mut job, &node)?;
                assigned_this_round += 1;
            }
            Ok(assigned_this_round)
        })?;

        if assigned_this_round == 0 {
            tokio::time::sleep(poll_interval).await;
        }
    }
    tracing::info!("all tasks are assigned");
    Ok(())
}

#[cfg(test)]
#[path = "assign_tests.rs"]
mod tests;
