// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! Job status document and state machine (spec.md §3, §4.2).

use crate::ids::NodeId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Terminal/non-terminal job states. Transitions are restricted to the
/// edges in spec.md §4.2: `unassigned -> assigned -> {success|failed|crashed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Unassigned,
    Assigned,
    Success,
    Failed,
    Crashed,
}

crate::simple_display! {
    JobStatus {
        Unassigned => "unassigned",
        Assigned => "assigned",
        Success => "success",
        Failed => "failed",
        Crashed => "crashed",
    }
}

impl JobStatus {
    /// Terminal states are never revisited (spec.md §3 invariant 1).
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Success | JobStatus::Failed | JobStatus::Crashed)
    }
}

/// The job status document persisted at `status/task{i}.status`.
///
/// Exclusively owned by the manager while `unassigned` or during
/// crash-recovery cascades, and by the assigned worker while `assigned`
/// (spec.md §3, "Ownership").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusDoc {
    pub status: JobStatus,
    pub input: Value,
    /// Self-reference so a worker can locate this file given only the node
    /// record (spec.md §3).
    pub task_status_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobStatusDoc {
    /// Construct the document written once at manager init time.
    pub fn new_unassigned(input: Value, task_status_path: PathBuf) -> Self {
        Self {
            status: JobStatus::Unassigned,
            input,
            task_status_path,
            assigned_to: None,
            error: None,
        }
    }

    /// Manager-authorized transition: `unassigned -> assigned`.
    pub fn assign(&mut self, node: NodeId) {
        self.status = JobStatus::Assigned;
        self.assigned_to = Some(node);
    }

    /// Worker-authorized transition on job completion: `assigned -> terminal`.
    ///
    /// The returned status is propagated verbatim; a missing/absent status
    /// from the user function is represented upstream as `JobOutcome::crashed`
    /// before reaching here, so this always receives a concrete terminal
    /// status (spec.md §4.2).
    pub fn complete(&mut self, outcome: &JobOutcome) {
        self.status = outcome.status;
        self.error = outcome.error.clone();
    }

    /// Manager-authorized transition on dead-node cascade: `assigned -> crashed`
    /// (spec.md §4.5 step 2). Never applied to an already-terminal job.
    pub fn cascade_crash(&mut self) {
        if !self.status.is_terminal() {
            self.status = JobStatus::Crashed;
        }
    }
}

/// Result of the user job function: `(input, info) -> result` (spec.md §6).
///
/// `status` is required; `error` is present on failure/crash. `result`
/// carries the job function's return payload — present in the original
/// Python toy examples and reinstated here since nothing in spec.md
/// excludes it and a job runner that discards the computed value would not
/// be useful as a library (see SPEC_FULL.md §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOutcome {
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobOutcome {
    pub fn success(result: impl Into<Value>) -> Self {
        Self { status: JobStatus::Success, result: Some(result.into()), error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { status: JobStatus::Failed, result: None, error: Some(error.into()) }
    }

    /// A job function that raised/panicked yields this (spec.md §4.7).
    pub fn crashed(error: impl Into<String>) -> Self {
        Self { status: JobStatus::Crashed, result: None, error: Some(error.into()) }
    }
}

/// The pure user job function the worker invokes for each input
/// (spec.md §6, "User job contract").
pub trait JobFn: Send + Sync + 'static {
    fn call(&self, input: &Value, info: &Value) -> JobOutcome;
}

impl<F> JobFn for F
where
    F: Fn(&Value, &Value) -> JobOutcome + Send + Sync + 'static,
{
    fn call(&self, input: &Value, info: &Value) -> JobOutcome {
        self(input, info)
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
