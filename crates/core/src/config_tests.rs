use super::*;

#[test]
fn manager_config_defaults_match_spec_glossary() {
    let cfg = ManagerConfig::new("/tmp/base");
    assert_eq!(cfg.heartbeat_timeout, Duration::from_secs(120));
    assert_eq!(cfg.base_dir, PathBuf::from("/tmp/base"));
}

#[test]
fn worker_config_defaults_match_spec() {
    let cfg = WorkerConfig::new("/tmp/base");
    assert!(cfg.timeout.is_none());
    assert!(!cfg.wait_manager);
    assert!(cfg.max_job.is_none());
    assert_eq!(cfg.heartbeat_period, Duration::from_secs(10));
    assert_eq!(cfg.fast_poll_cycles, 20);
}

#[test]
fn store_tuning_defaults_match_spec() {
    let tuning = StoreTuning::default();
    assert_eq!(tuning.safe_read_max_retries, 60);
    assert_eq!(tuning.safe_read_retry_backoff, Duration::from_secs(1));
}
