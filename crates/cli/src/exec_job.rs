// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! Handler for the hidden `__exec-job` subcommand: the child side of
//! [`crate::spawner::ReExecSpawner`]. Reads the job's input, runs the
//! builtin job function inline (panics are still caught by
//! `fleet_worker::run_inline`), and writes the resulting `JobOutcome` to
//! `--output-path`. Always exits zero: a crashed/failed outcome is
//! reported through the JSON payload, not the process exit code, so the
//! parent's `run_isolated` only ever sees a non-zero exit for a genuine
//! process failure.

use anyhow::{Context, Result};
use clap::Args;
use fleet_core::JobStatusDoc;
use fleet_store::{FsStore, Store};
use serde_json::json;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ExecJobArgs {
    #[arg(long)]
    pub job: String,

    #[arg(long)]
    pub job_status_path: PathBuf,

    #[arg(long)]
    pub output_path: PathBuf,
}

pub fn run(args: ExecJobArgs) -> Result<()> {
    let job_fn = crate::jobs::lookup(&args.job)?;

    let store = FsStore;
    let bytes = store
        .read_bytes(&args.job_status_path)
        .with_context(|| format!("reading job status {}", args.job_status_path.display()))?;
    let job: JobStatusDoc = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing job status {} as JSON", args.job_status_path.display()))?;

    let outcome = fleet_worker::run_inline(job_fn.as_ref(), &job.input, &json!({}));

    store
        .write_json(&args.output_path, &outcome)
        .with_context(|| format!("writing job output to {}", args.output_path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "exec_job_tests.rs"]
mod tests;
