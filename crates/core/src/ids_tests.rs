use super::*;

#[test]
fn task_name_for_index_is_one_indexed() {
    assert_eq!(TaskName::for_index(1).as_str(), "task1");
    assert_eq!(TaskName::for_index(42).as_str(), "task42");
}

#[test]
fn node_id_generate_with_prefix_joins_with_underscore() {
    let id = NodeId::generate(Some("gpu"));
    assert!(id.as_str().starts_with("gpu_"));
    assert_eq!(id.as_str().len(), "gpu_".len() + 36);
}

#[test]
fn node_id_generate_without_prefix_is_bare_uuid() {
    let id = NodeId::generate(None);
    assert_eq!(id.as_str().len(), 36);
    assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
}

#[test]
fn node_id_generate_with_empty_prefix_is_bare_uuid() {
    let id = NodeId::generate(Some(""));
    assert_eq!(id.as_str().len(), 36);
}

#[test]
fn ids_compare_equal_to_str() {
    let t = TaskName::new("task1");
    assert_eq!(t, "task1");
    assert_eq!(t.as_str(), "task1");
}

#[test]
fn ids_are_distinct_per_call() {
    let a = NodeId::generate(None);
    let b = NodeId::generate(None);
    assert_ne!(a, b);
}
