// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fleet-store: the Shared Store capability (spec.md §2) and the Safe
//! Reader (spec.md §4.1).
//!
//! Manager and worker code is generic over [`Store`] rather than hardcoding
//! a filesystem path, so the coordination protocol can run against
//! [`MemoryStore`] in unit tests and [`FsStore`] in production.

pub mod error;
pub mod fs;
pub mod memory;
pub mod safe_read;
pub mod store;

pub use error::StoreError;
pub use fs::FsStore;
pub use memory::MemoryStore;
pub use safe_read::{safe_read_json, ReadOutcome};
pub use store::{read_json_strict, Store};
