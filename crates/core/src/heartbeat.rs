// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! Heartbeat document and liveness classification (spec.md §3, §4.3).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeartbeatStatus {
    Available,
    Dead,
}

crate::simple_display! {
    HeartbeatStatus {
        Available => "available",
        Dead => "dead",
    }
}

/// The heartbeat document persisted at `heart/{node_id}.heart`.
///
/// Written periodically by the worker; only ever flipped to `dead` by the
/// manager's liveness check (spec.md §3), or by the worker itself on
/// voluntary shutdown to short-circuit the timeout wait (spec.md §4.3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatDoc {
    pub status: HeartbeatStatus,
    pub last_heartbeat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dead_reason: Option<String>,
}

impl HeartbeatDoc {
    pub fn available(now_epoch_secs: i64) -> Self {
        Self { status: HeartbeatStatus::Available, last_heartbeat: now_epoch_secs, dead_reason: None }
    }

    pub fn dead(now_epoch_secs: i64, reason: impl Into<String>) -> Self {
        Self { status: HeartbeatStatus::Dead, last_heartbeat: now_epoch_secs, dead_reason: Some(reason.into()) }
    }

    /// The manager's per-cycle liveness classification (spec.md §4.3):
    /// `available` and not stale beyond `heartbeat_timeout` ⇒ alive.
    pub fn is_alive(&self, now_epoch_secs: i64, heartbeat_timeout_secs: i64) -> bool {
        self.status == HeartbeatStatus::Available
            && now_epoch_secs.saturating_sub(self.last_heartbeat) <= heartbeat_timeout_secs
    }
}

#[cfg(test)]
#[path = "heartbeat_tests.rs"]
mod tests;
