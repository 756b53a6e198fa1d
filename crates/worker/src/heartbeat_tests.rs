use super::*;
use fleet_core::{FakeClock, HeartbeatDoc};
use fleet_store::MemoryStore;
use std::path::PathBuf;

fn fast_tuning() -> StoreTuning {
    StoreTuning { safe_read_max_retries: 2, safe_read_retry_backoff: Duration::from_millis(0) }
}

#[tokio::test]
async fn write_heartbeat_available_round_trips() {
    let store = MemoryStore::new();
    let path = PathBuf::from("/heart/n1.heart");
    write_heartbeat(&store, &path, 123, HeartbeatStatus::Available, None).await;

    let doc: HeartbeatDoc = serde_json::from_slice(&store.read_bytes(&path).unwrap()).unwrap();
    assert_eq!(doc.status, HeartbeatStatus::Available);
    assert_eq!(doc.last_heartbeat, 123);
}

#[tokio::test]
async fn write_heartbeat_dead_carries_a_reason() {
    let store = MemoryStore::new();
    let path = PathBuf::from("/heart/n1.heart");
    write_heartbeat(&store, &path, 5, HeartbeatStatus::Dead, Some("bye".to_string())).await;

    let doc: HeartbeatDoc = serde_json::from_slice(&store.read_bytes(&path).unwrap()).unwrap();
    assert_eq!(doc.status, HeartbeatStatus::Dead);
    assert_eq!(doc.dead_reason.as_deref(), Some("bye"));
}

#[test]
fn is_alive_true_for_available_heartbeat() {
    let store = MemoryStore::new();
    let path = PathBuf::from("/heart/n1.heart");
    store.write_json(&path, &HeartbeatDoc::available(1)).unwrap();
    assert!(is_alive(&store, &path, &fast_tuning()));
}

#[test]
fn is_alive_false_once_manager_declares_dead() {
    let store = MemoryStore::new();
    let path = PathBuf::from("/heart/n1.heart");
    store.write_json(&path, &HeartbeatDoc::dead(1, "manager says so")).unwrap();
    assert!(!is_alive(&store, &path, &fast_tuning()));
}

#[test]
fn is_alive_false_when_heartbeat_file_is_unreadable() {
    let store = MemoryStore::new();
    let path = PathBuf::from("/heart/missing.heart");
    assert!(!is_alive(&store, &path, &fast_tuning()));
}

#[tokio::test(start_paused = true)]
async fn heartbeat_task_writes_periodically() {
    let store = MemoryStore::new();
    let path = PathBuf::from("/heart/n1.heart");
    let clock = FakeClock::new();
    let task = HeartbeatTask::spawn(store.clone(), path.clone(), Duration::from_millis(10), clock.clone());

    tokio::time::advance(Duration::from_millis(35)).await;
    tokio::task::yield_now().await;

    assert!(store.exists(&path));
    let doc: HeartbeatDoc = serde_json::from_slice(&store.read_bytes(&path).unwrap()).unwrap();
    assert_eq!(doc.status, HeartbeatStatus::Available);

    task.stop(&store, &path, &clock).await;
    let final_doc: HeartbeatDoc = serde_json::from_slice(&store.read_bytes(&path).unwrap()).unwrap();
    assert_eq!(final_doc.status, HeartbeatStatus::Dead);
}
