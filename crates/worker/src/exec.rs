// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! Per-Job Timeout Wrapper (spec.md §4.7).
//!
//! Without a configured timeout the job function runs inline and a panic
//! is caught and turned into a `crashed` outcome (spec.md §4.7, "Without a
//! timeout... exceptions are caught by the worker main loop"). With a
//! timeout, the job runs in a genuine child OS process so a hung or
//! deadlocked job cannot block the worker's heartbeat or poll loop —
//! the isolation the spec requires and a `tokio` task cannot provide.
//!
//! This crate does not know how to re-exec itself to run a single job in
//! isolation (that depends on the binary's own CLI surface); callers
//! supply a [`ChildProcessSpawner`] that builds the concrete `Command`.
//! Grounded on `tumf-agent-exec`'s process-group kill idiom for the
//! wait/terminate loop.

use fleet_core::JobOutcome;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use serde_json::Value;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use std::time::{Duration, Instant};

/// Builds the `Command` that runs a single job in a fresh process.
///
/// The child is expected to read the job input from `job_status_path`,
/// invoke the same job function this worker was configured with, and
/// write a JSON-encoded [`JobOutcome`] to `output_path` before exiting
/// zero. A non-zero exit or a missing/unparsable `output_path` is treated
/// as a crash by [`run_isolated`].
pub trait ChildProcessSpawner: Send + Sync + 'static {
    fn build_command(&self, job_status_path: &Path, output_path: &Path) -> std::process::Command;
}

/// Run `job_fn` inline, with no process isolation (spec.md §4.7, no
/// timeout configured). A panic is caught and reported as `crashed`.
pub fn run_inline(job_fn: &dyn fleet_core::JobFn, input: &Value, info: &Value) -> JobOutcome {
    match catch_unwind(AssertUnwindSafe(|| job_fn.call(input, info))) {
        Ok(outcome) => outcome,
        Err(payload) => JobOutcome::crashed(panic_message(&payload)),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "job panicked with a non-string payload".to_string()
    }
}

/// Run a job in an isolated child process with a wall-clock deadline
/// (spec.md §4.7). Blocking — callers in async worker code must run this
/// through `tokio::task::block_in_place`, matching the Shared Store's own
/// synchronous I/O contract.
pub fn run_isolated(
    spawner: &dyn ChildProcessSpawner,
    job_status_path: &Path,
    output_path: &Path,
    timeout: Duration,
) -> JobOutcome {
    let mut child = match spawner.build_command(job_status_path, output_path).spawn() {
        Ok(child) => child,
        Err(err) => return JobOutcome::crashed(format!("failed to spawn job process: {err}")),
    };

    let pid = Pid::from_raw(child.id() as i32);
    let deadline = Instant::now() + timeout;

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                return if status.success() {
                    read_outcome(output_path)
                } else {
                    JobOutcome::crashed(format!("job process exited with {status}"))
                };
            }
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = signal::kill(pid, Signal::SIGKILL);
                    let _ = child.wait();
                    return JobOutcome::crashed("job timeout");
                }
                std::thread::sleep(Duration::from_millis(20));
            }
            Err(err) => return JobOutcome::crashed(format!("failed to wait on job process: {err}")),
        }
    }
}

fn read_outcome(output_path: &Path) -> JobOutcome {
    match std::fs::read(output_path) {
        Ok(bytes) => serde_json::from_slice(&bytes)
            .unwrap_or_else(|err| JobOutcome::crashed(format!("job output was not valid JSON: {err}"))),
        Err(err) => JobOutcome::crashed(format!("job process exited without writing output: {err}")),
    }
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
