// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! `fleet`: the manager/worker binary (spec.md §4.8). A thin CLI over
//! `fleet-core`/`fleet-store`/`fleet-manager`/`fleet-worker` — argument
//! parsing and process wiring are the only things this crate owns; the
//! coordination protocol itself lives in the library crates.

mod config;
mod exec_job;
mod jobs;
mod spawner;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::{ManagerArgs, WorkerArgs};
use exec_job::ExecJobArgs;
use fleet_core::SystemClock;
use fleet_manager::TracingProgressSink;
use fleet_store::FsStore;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "fleet", version, about = "Shared-filesystem task dispatch")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the manager: seed/resume jobs and coordinate workers until done.
    Manager(ManagerArgs),
    /// Run a worker: register, poll for assigned jobs, execute them.
    Worker(WorkerArgs),
    /// Child-process entry point used by the per-job timeout wrapper.
    /// Not part of the public interface.
    #[command(name = "__exec-job", hide = true)]
    ExecJob(ExecJobArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Manager(args) => run_manager(args),
        Command::Worker(args) => run_worker(args),
        Command::ExecJob(args) => exec_job::run(args),
    }
}

fn run_manager(args: ManagerArgs) -> Result<()> {
    let job_inputs = args.job_inputs()?;
    let config = args.into_config();
    let sink = TracingProgressSink;

    let runtime = tokio::runtime::Runtime::new()?;
    let state = runtime.block_on(fleet_manager::run_manager(FsStore, &config, SystemClock, job_inputs, &sink))?;

    tracing::info!(
        total = state.total_jobs,
        success = state.success,
        failed = state.failed,
        crashed = state.crashed,
        "manager finished"
    );
    Ok(())
}

fn run_worker(args: WorkerArgs) -> Result<()> {
    let config = args.into_config();
    let job_fn = jobs::lookup(&args.job)?;
    let spawner: Option<Arc<dyn fleet_worker::ChildProcessSpawner>> =
        config.timeout.map(|_| Arc::new(spawner::ReExecSpawner { job: args.job.clone() }) as Arc<dyn fleet_worker::ChildProcessSpawner>);

    let runtime = tokio::runtime::Runtime::new()?;
    let (node, finished, reason) = runtime.block_on(fleet_worker::run_worker(
        FsStore,
        &config,
        SystemClock,
        job_fn.as_ref(),
        serde_json::json!({}),
        spawner,
    ))?;

    tracing::info!(node = %node, finished, reason = ?reason, "worker exiting");
    Ok(())
}
