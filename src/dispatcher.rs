//! The operation dispatcher: resolves an operation name against the enabled
//! operation table and invokes it.
//!
//! The table is built once from a [`FeatureSet`] and never mutated afterwards.
//! History is an optional collaborator; a dispatcher built without one reports
//! [`CalcError::CapabilityDisabled`] for every history request.

use ahash::AHashMap;
use tracing::{debug, warn};

use crate::{
    errors::CalcError,
    features::{Feature, FeatureSet},
    history::{HistoryEntry, HistorySink, MemoryHistory},
    metrics::{DispatchMetrics, DispatchMetricsSnapshot},
    operation::{DIVISION_SENTINEL, Operation, OperationFn},
};

pub const HISTORY_CAPABILITY: &str = "History";

pub struct DispatcherBuilder {
    features: FeatureSet,
    ops: AHashMap<String, OperationFn>,
    history: Option<Box<dyn HistorySink>>,
}

impl DispatcherBuilder {
    pub fn new(features: FeatureSet) -> Self {
        let ops = features
            .enabled_operations()
            .map(|op| (op.name().to_string(), op.function()))
            .collect();
        Self {
            features,
            ops,
            history: None,
        }
    }

    /// Adds an operation. Registering an existing name replaces its function;
    /// registering a built-in name turns its feature on.
    pub fn register<T: Into<String>>(mut self, name: T, function: OperationFn) -> Self {
        let name = name.into();
        if let Some(op) = Operation::parse(&name) {
            self.features = self.features.with(Feature::from(op), true);
        }
        self.ops.insert(name, function);
        self
    }

    /// Injects a history recorder and turns the history feature on.
    pub fn history<H: HistorySink + 'static>(mut self, sink: H) -> Self {
        self.features = self.features.with(Feature::History, true);
        self.history = Some(Box::new(sink));
        self
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher {
            features: self.features,
            ops: self.ops,
            history: self.history,
            metrics: DispatchMetrics::default(),
        }
    }
}

pub struct Dispatcher {
    features: FeatureSet,
    ops: AHashMap<String, OperationFn>,
    history: Option<Box<dyn HistorySink>>,
    metrics: DispatchMetrics,
}

impl Dispatcher {
    /// Builds a dispatcher whose history recorder is present exactly when the
    /// `history` feature is on.
    pub fn new(features: &FeatureSet) -> Self {
        let builder = DispatcherBuilder::new(*features);
        if features.is_enabled(Feature::History) {
            builder.history(MemoryHistory::new()).build()
        } else {
            builder.build()
        }
    }

    pub fn builder(features: FeatureSet) -> DispatcherBuilder {
        DispatcherBuilder::new(features)
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn supports(&self, op: &str) -> bool {
        self.ops.contains_key(op)
    }

    pub fn operations(&self) -> Vec<String> {
        let mut names: Vec<String> = self.ops.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn has_history(&self) -> bool {
        self.history.is_some()
    }

    pub fn dispatch(&self, op: &str, a: f64, b: f64) -> Result<f64, CalcError> {
        let Some(function) = self.ops.get(op) else {
            self.metrics.record_rejection();
            warn!(op, "operation rejected");
            return Err(CalcError::unsupported(op));
        };
        let result = function(a, b);
        self.metrics.record_dispatch();
        if op == Operation::Divide.name() && b == 0.0 && result == DIVISION_SENTINEL {
            self.metrics.record_sentinel_division();
        }
        debug!(op, a, b, result, "dispatched");

        if let Some(history) = &self.history {
            history.record(HistoryEntry::new(op, a, b, result));
            self.metrics.record_history_append();
        }
        Ok(result)
    }

    pub fn history(&self) -> Result<Vec<HistoryEntry>, CalcError> {
        self.history
            .as_ref()
            .map(|sink| sink.entries())
            .ok_or_else(|| CalcError::capability_disabled(HISTORY_CAPABILITY))
    }

    pub fn metrics_snapshot(&self) -> DispatchMetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }
}
