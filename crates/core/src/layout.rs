// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! Well-known paths under a run's `base_dir` (spec.md §3).

use crate::ids::{NodeId, TaskName};
use std::path::{Path, PathBuf};

/// The sub-directories a worker checks for at startup (spec.md §4.6,
/// `wait_manager`). The manager creates all of these plus `working/` on
/// init; `working/` is not in this list because a worker never reads it.
pub fn required_dirs(base_dir: &Path) -> [PathBuf; 4] {
    [status_dir(base_dir), nodes_dir(base_dir), heart_dir(base_dir), available_dir(base_dir)]
}

pub fn status_dir(base_dir: &Path) -> PathBuf {
    base_dir.join("status")
}

pub fn nodes_dir(base_dir: &Path) -> PathBuf {
    base_dir.join("nodes")
}

pub fn heart_dir(base_dir: &Path) -> PathBuf {
    base_dir.join("heart")
}

pub fn available_dir(base_dir: &Path) -> PathBuf {
    base_dir.join("available")
}

pub fn working_dir(base_dir: &Path) -> PathBuf {
    base_dir.join("working")
}

pub fn status_path(base_dir: &Path, task: &TaskName) -> PathBuf {
    status_dir(base_dir).join(format!("{task}.status"))
}

pub fn node_path(base_dir: &Path, node: &NodeId) -> PathBuf {
    nodes_dir(base_dir).join(format!("{node}.status"))
}

pub fn heart_path(base_dir: &Path, node: &NodeId) -> PathBuf {
    heart_dir(base_dir).join(format!("{node}.heart"))
}

pub fn available_path(base_dir: &Path, node: &NodeId) -> PathBuf {
    available_dir(base_dir).join(node.to_string())
}

pub fn working_path(base_dir: &Path, task: &TaskName) -> PathBuf {
    working_dir(base_dir).join(task.to_string())
}

pub fn finished_path(base_dir: &Path) -> PathBuf {
    base_dir.join("finished")
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
