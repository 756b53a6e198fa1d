// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! Heartbeat Subsystem, worker side (spec.md §4.3). Grounded on
//! `original_source/fleet/worker.py`'s `heartbeat_daemon`/`send_heartbeat`.

use fleet_core::{Clock, HeartbeatDoc, HeartbeatStatus, StoreTuning};
use fleet_store::{safe_read_json, ReadOutcome, Store};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Bounded write retries before a failed heartbeat write is logged and
/// tolerated (spec.md §4.3); matches the Python original's `retry_time > 20`.
const MAX_WRITE_RETRIES: u32 = 20;

/// Write one heartbeat document, retrying on failure up to
/// [`MAX_WRITE_RETRIES`] times before giving up for this cycle (the next
/// period will try again).
pub async fn write_heartbeat<S: Store>(store: &S, path: &Path, last_heartbeat: i64, status: HeartbeatStatus, reason: Option<String>) {
    let doc = match status {
        HeartbeatStatus::Available => HeartbeatDoc::available(last_heartbeat),
        HeartbeatStatus::Dead => HeartbeatDoc::dead(last_heartbeat, reason.unwrap_or_default()),
    };
    for attempt in 1..=MAX_WRITE_RETRIES {
        match store.write_json(path, &doc) {
            Ok(()) => return,
            Err(err) => {
                tracing::warn!(path = %path.display(), attempt, error = %err, "failed to write heartbeat, retrying");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }
    tracing::error!(path = %path.display(), "failed to write heartbeat after {} attempts", MAX_WRITE_RETRIES);
}

/// The running heartbeat background task (spec.md §4.3, §5: "a heartbeat
/// task runs in parallel with the main loop").
pub struct HeartbeatTask {
    handle: tokio::task::JoinHandle<()>,
}

impl HeartbeatTask {
    pub fn spawn<S: Store + Clone, C: Clock + 'static>(store: S, path: PathBuf, period: Duration, clock: C) -> Self {
        let handle = tokio::spawn(async move {
            loop {
                write_heartbeat(&store, &path, clock.epoch_secs(), HeartbeatStatus::Available, None).await;
                tokio::time::sleep(period).await;
            }
        });
        Self { handle }
    }

    /// Stop the background task and publish a final `dead` heartbeat, so a
    /// watching manager's timeout wait is short-circuited (spec.md §4.3).
    pub async fn stop<S: Store, C: Clock>(self, store: &S, path: &Path, clock: &C) {
        self.handle.abort();
        write_heartbeat(store, path, clock.epoch_secs(), HeartbeatStatus::Dead, Some("worker shut down".to_string())).await;
    }
}

/// The worker's own watchdog read (spec.md §4.3, §4.6 `heart_dead`):
/// `true` unless the manager has externally declared this worker dead, or
/// the heartbeat file is unreadable (treated the same way the Python
/// original's `check_heart` treats `None`).
pub fn is_alive<S: Store>(store: &S, path: &Path, tuning: &StoreTuning) -> bool {
    match safe_read_json::<S, HeartbeatDoc>(store, path, tuning) {
        ReadOutcome::Value(doc) => doc.status != HeartbeatStatus::Dead,
        ReadOutcome::Unreadable => false,
    }
}

#[cfg(test)]
#[path = "heartbeat_tests.rs"]
mod tests;
