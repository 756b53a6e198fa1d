use super::*;
use std::sync::Mutex;

#[derive(Default)]
struct RecordingSink {
    reports: Mutex<Vec<(u64, u64)>>,
}

impl ProgressSink for RecordingSink {
    fn report(&self, snapshot: ProgressSnapshot<'_>) {
        self.reports.lock().unwrap().push((snapshot.finished, snapshot.total_jobs));
    }
}

#[test]
fn recording_sink_observes_reports() {
    let sink = RecordingSink::default();
    sink.report(ProgressSnapshot {
        total_jobs: 4,
        finished: 1,
        working: 1,
        success: 1,
        failed: 0,
        crashed: 0,
        live_nodes: 1,
        dead_nodes: 0,
        summary: "elapsed 1.00 sec eta unknown speed unknown",
    });
    assert_eq!(sink.reports.lock().unwrap().as_slice(), &[(1, 4)]);
}

#[test]
fn tracing_sink_does_not_panic_on_zero_finished() {
    let sink = TracingProgressSink;
    sink.report(ProgressSnapshot {
        total_jobs: 4,
        finished: 0,
        working: 0,
        success: 0,
        failed: 0,
        crashed: 0,
        live_nodes: 0,
        dead_nodes: 0,
        summary: "elapsed 0.00 sec eta unknown speed unknown",
    });
}
