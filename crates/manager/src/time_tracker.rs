// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! Elapsed/ETA/throughput bookkeeping, driven by "one finished" pulses
//! (spec.md §2, "Time Tracker"). Grounded on
//! `original_source/fleet/utils/time_tracker.py`'s `TimeTracker`.

use fleet_core::Clock;

fn format_duration_secs(secs: f64) -> String {
    if secs < 60.0 {
        format!("{secs:.2} sec")
    } else if secs < 3600.0 {
        format!("{:.2} min", secs / 60.0)
    } else if secs < 86_400.0 {
        format!("{:.2} h", secs / 3600.0)
    } else {
        format!("{:.2} day", secs / 86_400.0)
    }
}

/// Per-manager-run progress tracker over a fixed total task count.
pub struct TimeTracker<C: Clock> {
    clock: C,
    total_tasks: u64,
    finished_tasks: u64,
    start: std::time::Instant,
    now: std::time::Instant,
}

impl<C: Clock> TimeTracker<C> {
    /// `total_tasks` must be positive (`original_source`'s `TimeTracker.__init__` asserts this).
    pub fn new(clock: C, total_tasks: u64) -> Self {
        let start = clock.now();
        Self { now: start, start, clock, total_tasks, finished_tasks: 0 }
    }

    /// Record one or more pulses of completed work.
    pub fn update(&mut self, count: u64) {
        self.finished_tasks += count;
        self.now = self.clock.now();
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.clock.now().saturating_duration_since(self.start)
    }

    /// Estimated remaining time, or `None` before the first pulse.
    pub fn eta(&self) -> Option<std::time::Duration> {
        if self.finished_tasks == 0 {
            return None;
        }
        let elapsed = self.now.saturating_duration_since(self.start).as_secs_f64();
        let per_task = elapsed / self.finished_tasks as f64;
        let remaining = self.total_tasks.saturating_sub(self.finished_tasks) as f64 * per_task;
        Some(std::time::Duration::from_secs_f64(remaining.max(0.0)))
    }

    /// Throughput as items/sec once sub-second per task, else sec/item.
    pub fn speed_label(&self) -> String {
        if self.finished_tasks == 0 {
            return "unknown".to_string();
        }
        let elapsed = self.now.saturating_duration_since(self.start).as_secs_f64();
        let per_task = elapsed / self.finished_tasks as f64;
        if per_task < 1.0 && per_task > 0.0 {
            format!("{:.2} item/s", 1.0 / per_task)
        } else {
            format!("{per_task:.2} s/item")
        }
    }

    /// A one-line human-readable summary, matching the shape of
    /// `original_source`'s `TimeTracker.summary` property.
    pub fn summary(&self) -> String {
        let eta = self.eta().map(|d| format_duration_secs(d.as_secs_f64())).unwrap_or_else(|| "unknown".to_string());
        format!(
            "elapsed {} eta {} speed {}",
            format_duration_secs(self.elapsed().as_secs_f64()),
            eta,
            self.speed_label()
        )
    }
}

#[cfg(test)]
#[path = "time_tracker_tests.rs"]
mod tests;
