use std::{env, io, sync::OnceLock};

use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::errors::CalcError;

pub const LOG_ENV: &str = "FEATURECALC_LOG";
const DEFAULT_FILTER: &str = "warn";

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Installs the global subscriber. Events go to stderr; stdout carries
/// command output only. Once a call succeeds, later calls are no-ops; a
/// failed call leaves nothing installed and may be retried.
pub fn init_tracing() -> Result<(), CalcError> {
    if INITIALISED.get().is_some() {
        return Ok(());
    }
    let filter = EnvFilter::try_new(filter_directives())
        .map_err(|e| CalcError::config(format!("invalid log filter: {e}")))?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(io::stderr);
    Registry::default()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| CalcError::config(format!("tracing init failed: {e}")))?;
    let _ = INITIALISED.set(());
    Ok(())
}

fn filter_directives() -> String {
    env::var(LOG_ENV)
        .or_else(|_| env::var("RUST_LOG"))
        .ok()
        .filter(|raw| !raw.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}
