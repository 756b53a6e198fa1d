use super::*;

#[test]
fn fresh_available_heartbeat_is_alive() {
    let hb = HeartbeatDoc::available(1000);
    assert!(hb.is_alive(1010, 120));
}

#[test]
fn stale_available_heartbeat_is_dead() {
    let hb = HeartbeatDoc::available(1000);
    assert!(!hb.is_alive(1121, 120));
}

#[test]
fn exactly_at_timeout_boundary_is_still_alive() {
    let hb = HeartbeatDoc::available(1000);
    assert!(hb.is_alive(1120, 120));
}

#[test]
fn self_declared_dead_is_never_alive_regardless_of_age() {
    let hb = HeartbeatDoc::dead(1000, "worker sends dead");
    assert!(!hb.is_alive(1000, 120));
    assert!(!hb.is_alive(1001, 120));
}

#[test]
fn heartbeat_doc_round_trips_through_json() {
    let hb = HeartbeatDoc::available(42);
    let raw = serde_json::to_vec(&hb).unwrap();
    let back: HeartbeatDoc = serde_json::from_slice(&raw).unwrap();
    assert_eq!(back.last_heartbeat, 42);
    assert_eq!(back.status, HeartbeatStatus::Available);
}
