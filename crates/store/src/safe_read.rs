// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! Safe Reader (spec.md §4.1): bounded-retry JSON load.
//!
//! Masks two transient failure modes — the file not yet existing because
//! its producer is lagging, and a reader observing a truncated/empty view
//! mid-rewrite. Every other component treats [`ReadOutcome::Unreadable`] as
//! a skip-this-cycle signal, never as a terminal failure.

use crate::store::Store;
use fleet_core::StoreTuning;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::thread;

/// The result of a Safe-Reader load attempt.
#[derive(Debug)]
pub enum ReadOutcome<T> {
    Value(T),
    /// Persistent failure after the retry budget is exhausted. Never
    /// treated as corruption — the next cycle will re-read.
    Unreadable,
}

impl<T> ReadOutcome<T> {
    pub fn value(self) -> Option<T> {
        match self {
            ReadOutcome::Value(v) => Some(v),
            ReadOutcome::Unreadable => None,
        }
    }
}

/// Load and parse a JSON document with bounded retry (spec.md §4.1).
///
/// Blocking — callers from async code must run this through
/// `tokio::task::block_in_place`, matching the rest of the Shared Store's
/// synchronous I/O contract (SPEC_FULL.md §5).
pub fn safe_read_json<S: Store, T: DeserializeOwned>(
    store: &S,
    path: &Path,
    tuning: &StoreTuning,
) -> ReadOutcome<T> {
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match store.read_bytes(path) {
            Ok(bytes) => match serde_json::from_slice::<T>(&bytes) {
                Ok(value) => return ReadOutcome::Value(value),
                Err(err) => {
                    tracing::warn!(path = %path.display(), attempt, error = %err, "torn or invalid JSON, retrying");
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), attempt, "file not yet present, retrying");
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), attempt, error = %err, "read failed, retrying");
            }
        }

        if attempt >= tuning.safe_read_max_retries {
            tracing::warn!(path = %path.display(), attempt, "safe read exhausted retry budget, returning unreadable");
            return ReadOutcome::Unreadable;
        }
        thread::sleep(tuning.safe_read_retry_backoff);
    }
}

#[cfg(test)]
#[path = "safe_read_tests.rs"]
mod tests;
