use super::*;
use std::path::Path;

#[test]
fn status_path_matches_spec_pattern() {
    let base = Path::new("/tmp/run1");
    let task = TaskName::for_index(3);
    assert_eq!(status_path(base, &task), Path::new("/tmp/run1/status/task3.status"));
}

#[test]
fn node_and_heart_and_available_paths() {
    let base = Path::new("/tmp/run1");
    let node = NodeId::new("abc");
    assert_eq!(node_path(base, &node), Path::new("/tmp/run1/nodes/abc.status"));
    assert_eq!(heart_path(base, &node), Path::new("/tmp/run1/heart/abc.heart"));
    assert_eq!(available_path(base, &node), Path::new("/tmp/run1/available/abc"));
}

#[test]
fn working_and_finished_paths() {
    let base = Path::new("/tmp/run1");
    let task = TaskName::for_index(1);
    assert_eq!(working_path(base, &task), Path::new("/tmp/run1/working/task1"));
    assert_eq!(finished_path(base), Path::new("/tmp/run1/finished"));
}

#[test]
fn required_dirs_covers_the_four_worker_checked_directories() {
    let base = Path::new("/tmp/run1");
    let dirs = required_dirs(base);
    assert!(dirs.contains(&base.join("status")));
    assert!(dirs.contains(&base.join("nodes")));
    assert!(dirs.contains(&base.join("heart")));
    assert!(dirs.contains(&base.join("available")));
    assert!(!dirs.contains(&base.join("working")));
}
