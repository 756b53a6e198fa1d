use super::*;
use serde_json::json;

#[test]
fn add_one_job_succeeds_on_integers() {
    let job = lookup("add-one").unwrap();
    let outcome = job.call(&json!(41), &json!({}));
    assert_eq!(outcome.status, fleet_core::JobStatus::Success);
    assert_eq!(outcome.result, Some(json!(42)));
}

#[test]
fn add_one_job_fails_on_non_integer_input() {
    let job = lookup("add-one").unwrap();
    let outcome = job.call(&json!("not a number"), &json!({}));
    assert_eq!(outcome.status, fleet_core::JobStatus::Failed);
    assert!(outcome.error.unwrap().contains("integer"));
}

#[test]
fn lookup_rejects_unknown_job_names() {
    assert!(lookup("does-not-exist").is_err());
}
