use super::*;
use fleet_core::layout;
use fleet_core::{FakeClock, JobOutcome, NodeStatusDoc};
use fleet_store::MemoryStore;
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;

fn manager_config() -> ManagerConfig {
    let mut config = ManagerConfig::new(PathBuf::from("/run"));
    config.assignment_poll_interval = Duration::from_millis(2);
    config.reconcile_tick_interval = Duration::from_millis(2);
    config.status_log_interval = Duration::from_millis(5);
    config
}

#[test]
fn initialize_tasks_creates_fresh_unassigned_jobs() {
    let store = MemoryStore::new();
    let config = manager_config();
    let (unassigned, state) =
        initialize_tasks(&store, &config, vec![json!(1), json!(2), json!(3)]).unwrap();

    assert_eq!(unassigned.len(), 3);
    assert_eq!(state.total_jobs, 3);
    assert_eq!(state.finished, 0);
    for idx in 1..=3 {
        assert!(store.exists(&layout::status_path(&config.base_dir, &TaskName::for_index(idx))));
    }
}

#[test]
fn initialize_tasks_resumes_terminal_jobs_without_reassigning() {
    let store = MemoryStore::new();
    let config = manager_config();

    for idx in 1..=4 {
        let task = TaskName::for_index(idx);
        let path = layout::status_path(&config.base_dir, &task);
        let mut doc = JobStatusDoc::new_unassigned(json!(idx), path.clone());
        doc.assign(fleet_core::NodeId::new("n1"));
        doc.complete(&JobOutcome::success(json!(idx)));
        store.write_json(&path, &doc).unwrap();
    }

    let (unassigned, state) = initialize_tasks(&store, &config, vec![json!(1), json!(2), json!(3), json!(4)]).unwrap();

    assert!(unassigned.is_empty());
    assert_eq!(state.finished, 4);
    assert_eq!(state.success, 4);
}

#[test]
fn initialize_tasks_rehydrates_missing_working_ticket_for_assigned_job() {
    let store = MemoryStore::new();
    let config = manager_config();
    let task = TaskName::for_index(1);
    let path = layout::status_path(&config.base_dir, &task);
    let mut doc = JobStatusDoc::new_unassigned(json!(1), path.clone());
    doc.assign(fleet_core::NodeId::new("n1"));
    store.write_json(&path, &doc).unwrap();

    let (unassigned, _state) = initialize_tasks(&store, &config, vec![json!(1)]).unwrap();

    assert!(unassigned.is_empty());
    assert!(store.exists(&layout::working_path(&config.base_dir, &task)));
}

/// Simulates a single worker: waits for its node to go `busy`, "executes"
/// the job instantly, writes the terminal status, goes back to `idle`, and
/// re-advertises availability — standing in for `fleet-worker`'s main loop
/// (not yet built when this crate's tests run).
async fn fake_worker_loop<S: Store + Clone>(store: S, base_dir: PathBuf, node: fleet_core::NodeId) {
    let node_path = layout::node_path(&base_dir, &node);
    store.write_json(&node_path, &NodeStatusDoc::idle()).unwrap();
    store.touch(&layout::available_path(&base_dir, &node)).unwrap();

    loop {
        if let ReadOutcome::Value(node_doc) = safe_read_json::<S, NodeStatusDoc>(&store, &node_path, &fleet_core::StoreTuning::default()) {
            if node_doc.is_busy() {
                let job_path = node_doc.task_status_path.clone().unwrap();
                let mut job: JobStatusDoc = serde_json::from_slice(&store.read_bytes(&job_path).unwrap()).unwrap();
                job.complete(&JobOutcome::success(job.input.clone()));
                store.write_json(&job_path, &job).unwrap();
                store.write_json(&node_path, &NodeStatusDoc::idle()).unwrap();
                store.touch(&layout::available_path(&base_dir, &node)).unwrap();
            }
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn run_manager_completes_toy_happy_path() {
    let store = MemoryStore::new();
    let config = manager_config();
    let worker_handle = tokio::spawn(fake_worker_loop(store.clone(), config.base_dir.clone(), fleet_core::NodeId::new("w1")));

    let sink = crate::progress::TracingProgressSink;
    let result = tokio::time::timeout(
        Duration::from_secs(5),
        run_manager(store.clone(), &config, FakeClock::new(), vec![json!(1), json!(2), json!(3), json!(4)], &sink),
    )
    .await
    .expect("manager should finish within timeout")
    .unwrap();

    worker_handle.abort();
    assert_eq!(result.finished, 4);
    assert_eq!(result.success, 4);
    assert!(store.exists(&layout::finished_path(&config.base_dir)));
}

#[tokio::test(flavor = "multi_thread")]
async fn run_manager_resume_terminates_immediately_with_no_live_workers() {
    let store = MemoryStore::new();
    let config = manager_config();

    for idx in 1..=4 {
        let task = TaskName::for_index(idx);
        let path = layout::status_path(&config.base_dir, &task);
        let mut doc = JobStatusDoc::new_unassigned(json!(idx), path.clone());
        doc.assign(fleet_core::NodeId::new("w1"));
        doc.complete(&JobOutcome::success(json!(idx)));
        store.write_json(&path, &doc).unwrap();
    }

    let sink = crate::progress::TracingProgressSink;
    let result = tokio::time::timeout(
        Duration::from_secs(2),
        run_manager(store.clone(), &config, FakeClock::new(), vec![json!(1), json!(2), json!(3), json!(4)], &sink),
    )
    .await
    .expect("resumed manager should terminate immediately")
    .unwrap();

    assert_eq!(result.finished, 4);
}
