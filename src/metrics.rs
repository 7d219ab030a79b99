use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchMetricsSnapshot {
    pub dispatched: u64,
    pub rejected: u64,
    pub sentinel_divisions: u64,
    pub history_appends: u64,
}

#[derive(Default)]
pub struct DispatchMetrics {
    dispatched: AtomicU64,
    rejected: AtomicU64,
    sentinel_divisions: AtomicU64,
    history_appends: AtomicU64,
}

impl DispatchMetrics {
    pub fn snapshot(&self) -> DispatchMetricsSnapshot {
        DispatchMetricsSnapshot {
            dispatched: self.dispatched.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            sentinel_divisions: self.sentinel_divisions.load(Ordering::Relaxed),
            history_appends: self.history_appends.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        self.sentinel_divisions.store(0, Ordering::Relaxed);
        self.history_appends.store(0, Ordering::Relaxed);
    }

    pub fn record_dispatch(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejection(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sentinel_division(&self) {
        self.sentinel_divisions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_history_append(&self) {
        self.history_appends.fetch_add(1, Ordering::Relaxed);
    }
}
