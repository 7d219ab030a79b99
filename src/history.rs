use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub op: String,
    pub a: f64,
    pub b: f64,
    pub result: f64,
}

impl HistoryEntry {
    pub fn new<T: Into<String>>(op: T, a: f64, b: f64, result: f64) -> Self {
        Self {
            op: op.into(),
            a,
            b,
            result,
        }
    }
}

/// Destination for successful dispatches. Injected into a dispatcher only when
/// history is enabled; its absence is what makes history unavailable.
pub trait HistorySink: Send + Sync {
    fn record(&self, entry: HistoryEntry);
    fn entries(&self) -> Vec<HistoryEntry>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Append-only in-process history.
#[derive(Default)]
pub struct MemoryHistory {
    inner: RwLock<Vec<HistoryEntry>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }
}

impl HistorySink for MemoryHistory {
    fn record(&self, entry: HistoryEntry) {
        self.inner.write().push(entry);
    }

    fn entries(&self) -> Vec<HistoryEntry> {
        self.inner.read().clone()
    }

    fn len(&self) -> usize {
        self.inner.read().len()
    }
}
