// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! Builtin demo job functions.
//!
//! The user job function is explicitly out of scope for this framework
//! (spec.md §1, "a pure callable with a fixed signature"); real callers
//! link `fleet-worker` as a library and supply their own `JobFn`. This
//! binary only needs *something* runnable end to end, so it ships the one
//! job function every `original_source/fleet` example used:
//! `add_one(x, info) -> {status: success, result: x + 1}`.

use anyhow::{bail, Result};
use fleet_core::{JobFn, JobOutcome};
use serde_json::Value;
use std::sync::Arc;

fn add_one(input: &Value, _info: &Value) -> JobOutcome {
    match input.as_i64() {
        Some(n) => JobOutcome::success(Value::from(n + 1)),
        None => JobOutcome::failed(format!("add-one expects an integer input, got {input}")),
    }
}

/// Resolve a builtin job by name, as named on `--job`/`__exec-job --job`.
pub fn lookup(name: &str) -> Result<Arc<dyn JobFn>> {
    match name {
        "add-one" => Ok(Arc::new(add_one)),
        other => bail!("unknown builtin job {other:?}; known jobs: add-one"),
    }
}

#[cfg(test)]
#[path = "jobs_tests.rs"]
mod tests;
