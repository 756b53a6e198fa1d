// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! Node status document (spec.md §3).

use crate::ids::TaskName;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Idle,
    Busy,
    Dead,
}

crate::simple_display! {
    NodeStatus {
        Idle => "idle",
        Busy => "busy",
        Dead => "dead",
    }
}

/// The node status document persisted at `nodes/{node_id}.status`.
///
/// Ownership flips between the worker (idle transitions) and the manager
/// (on assignment), never contended at the same state (spec.md §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeStatusDoc {
    pub status: NodeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_status_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dead_reason: Option<String>,
}

impl NodeStatusDoc {
    pub fn idle() -> Self {
        Self { status: NodeStatus::Idle, task: None, task_status_path: None, dead_reason: None }
    }

    /// Manager-authorized transition written by the assignment transaction
    /// (spec.md §4.4 step b).
    pub fn busy(task: TaskName, task_status_path: PathBuf) -> Self {
        Self {
            status: NodeStatus::Busy,
            task: Some(task),
            task_status_path: Some(task_status_path),
            dead_reason: None,
        }
    }

    /// Manager-authorized transition on dead-node cascade (spec.md §4.5 step 2).
    pub fn dead(reason: impl Into<String>) -> Self {
        Self { status: NodeStatus::Dead, task: None, task_status_path: None, dead_reason: Some(reason.into()) }
    }

    pub fn is_busy(&self) -> bool {
        self.status == NodeStatus::Busy
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
