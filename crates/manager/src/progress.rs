// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! Progress-display sink (spec.md §1, "out of scope" console logging).
//!
//! Kept as a distinct concern from `tracing` structured logging: the
//! reconciliation loop emits a throttled human-readable summary through
//! this trait, while `tracing` events record individual lifecycle
//! transitions. A CLI can swap in a `rich`-style renderer without the
//! core depending on a terminal library.

/// A snapshot of run-wide counters, handed to [`ProgressSink::report`] at
/// most once per `status_log_interval` (spec.md §4.5 step 4).
#[derive(Debug, Clone, Copy)]
pub struct ProgressSnapshot<'a> {
    pub total_jobs: u64,
    pub finished: u64,
    pub working: u64,
    pub success: u64,
    pub failed: u64,
    pub crashed: u64,
    pub live_nodes: u64,
    pub dead_nodes: u64,
    pub summary: &'a str,
}

pub trait ProgressSink: Send + Sync {
    fn report(&self, snapshot: ProgressSnapshot<'_>);
}

/// Default sink: renders the snapshot as a single `tracing::info!` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgressSink;

impl ProgressSink for TracingProgressSink {
    fn report(&self, snapshot: ProgressSnapshot<'_>) {
        let success_rate = if snapshot.finished == 0 {
            0.0
        } else {
            snapshot.success as f64 / snapshot.finished as f64 * 100.0
        };
        tracing::info!(
            success_rate,
            finished = snapshot.finished,
            working = snapshot.working,
            total = snapshot.total_jobs,
            success = snapshot.success,
            failed = snapshot.failed,
            crashed = snapshot.crashed,
            live_nodes = snapshot.live_nodes,
            dead_nodes = snapshot.dead_nodes,
            "{}",
            snapshot.summary,
        );
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
