// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! The concrete [`ChildProcessSpawner`] for this binary: re-exec itself
//! as `__exec-job` (spec.md §4.7). `fleet-worker` has no knowledge of its
//! caller's own CLI surface, so this glue lives here, the one crate that
//! does.

use fleet_worker::ChildProcessSpawner;
use std::path::Path;
use std::process::Command;

pub struct ReExecSpawner {
    pub job: String,
}

impl ChildProcessSpawner for ReExecSpawner {
    fn build_command(&self, job_status_path: &Path, output_path: &Path) -> Command {
        let exe = std::env::current_exe().unwrap_or_else(|_| "fleet".into());
        let mut cmd = Command::new(exe);
        cmd.arg("__exec-job")
            .arg("--job")
            .arg(&self.job)
            .arg("--job-status-path")
            .arg(job_status_path)
            .arg("--output-path")
            .arg(output_path);
        cmd
    }
}
