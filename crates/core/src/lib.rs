// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fleet-core: data model and state machines for the shared-file-system
//! task dispatch protocol.
//!
//! This crate has no I/O of its own — it defines the on-disk document
//! shapes (job/node/heartbeat), their typed state transitions, and the
//! configuration records the manager, worker, and CLI crates share.
//! Reading and writing those documents lives in `fleet-store`.

pub mod macros;

pub mod clock;
pub mod config;
pub mod heartbeat;
pub mod ids;
pub mod job;
pub mod layout;
pub mod node;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ManagerConfig, StoreTuning, WorkerConfig};
pub use heartbeat::{HeartbeatDoc, HeartbeatStatus};
pub use ids::{NodeId, TaskName};
pub use job::{JobFn, JobOutcome, JobStatus, JobStatusDoc};
pub use node::{NodeStatus, NodeStatusDoc};
