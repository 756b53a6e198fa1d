use super::*;
use fleet_core::JobStatus;
use serde_json::json;
use tempfile::tempdir;

#[test]
fn run_inline_returns_the_job_functions_outcome() {
    let job_fn = |_input: &Value, _info: &Value| JobOutcome::success(json!(42));
    let outcome = run_inline(&job_fn, &json!(1), &json!({}));
    assert_eq!(outcome.status, JobStatus::Success);
    assert_eq!(outcome.result, Some(json!(42)));
}

#[test]
fn run_inline_catches_a_panicking_job_function() {
    let job_fn = |_input: &Value, _info: &Value| -> JobOutcome { panic!("boom") };
    let outcome = run_inline(&job_fn, &json!(1), &json!({}));
    assert_eq!(outcome.status, JobStatus::Crashed);
    assert_eq!(outcome.error.as_deref(), Some("boom"));
}

struct ShellSpawner {
    script: String,
}

impl ChildProcessSpawner for ShellSpawner {
    fn build_command(&self, _job_status_path: &Path, _output_path: &Path) -> std::process::Command {
        let mut cmd = std::process::Command::new("sh");
        cmd.arg("-c").arg(&self.script);
        cmd
    }
}

#[test]
fn run_isolated_reads_output_written_by_a_fast_child() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.json");
    let job_status = dir.path().join("status.json");
    let spawner = ShellSpawner { script: format!("echo '{{\"status\":\"success\",\"result\":7}}' > {}", output.display()) };

    let outcome = run_isolated(&spawner, &job_status, &output, Duration::from_secs(5));
    assert_eq!(outcome.status, JobStatus::Success);
    assert_eq!(outcome.result, Some(json!(7)));
}

#[test]
fn run_isolated_kills_a_child_that_outlives_the_deadline() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.json");
    let job_status = dir.path().join("status.json");
    let spawner = ShellSpawner { script: "sleep 30".to_string() };

    let start = Instant::now();
    let outcome = run_isolated(&spawner, &job_status, &output, Duration::from_millis(200));
    assert_eq!(outcome.status, JobStatus::Crashed);
    assert_eq!(outcome.error.as_deref(), Some("job timeout"));
    assert!(start.elapsed() < Duration::from_secs(5), "child should be killed promptly, not waited out to completion");
}

#[test]
fn run_isolated_reports_crash_for_nonzero_exit() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.json");
    let job_status = dir.path().join("status.json");
    let spawner = ShellSpawner { script: "exit 1".to_string() };

    let outcome = run_isolated(&spawner, &job_status, &output, Duration::from_secs(5));
    assert_eq!(outcome.status, JobStatus::Crashed);
    assert!(outcome.error.unwrap().contains("exited"));
}

#[test]
fn run_isolated_reports_crash_when_spawn_fails() {
    struct BadSpawner;
    impl ChildProcessSpawner for BadSpawner {
        fn build_command(&self, _job_status_path: &Path, _output_path: &Path) -> std::process::Command {
            std::process::Command::new("/nonexistent/fleet-child-binary")
        }
    }
    let dir = tempdir().unwrap();
    let outcome = run_isolated(&BadSpawner, &dir.path().join("s"), &dir.path().join("o"), Duration::from_secs(1));
    assert_eq!(outcome.status, JobStatus::Crashed);
    assert!(outcome.error.unwrap().contains("failed to spawn"));
}
