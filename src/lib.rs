//! Feature-toggled calculator: an operation dispatcher gated by an enablement
//! table, with optional call history and a small command-line front end.

pub mod backlog;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod features;
pub mod history;
pub mod logging;
pub mod metrics;
pub mod operation;
pub mod self_check;
pub mod variant;
pub mod workload;

pub use crate::dispatcher::{Dispatcher, DispatcherBuilder};
pub use crate::errors::CalcError;
pub use crate::features::{Feature, FeatureSet};
pub use crate::history::{HistoryEntry, HistorySink, MemoryHistory};
pub use crate::operation::{DIVISION_SENTINEL, Operation, OperationFn};
pub use crate::variant::Methodology;
