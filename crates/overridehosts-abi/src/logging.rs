//! Opt-in diagnostics for the preloaded shim.
//!
//! The shim lives inside someone else's process, so it stays silent unless
//! `OVERRIDEHOSTS_LOG` names a filter. The subscriber is private to this
//! library's copy of `tracing` and never touches the host's logging.

use overridehosts_core::config::{LOG_ENV, non_empty_var};
use tracing_subscriber::EnvFilter;

pub(crate) fn init_from_env() {
    let Some(directive) = non_empty_var(LOG_ENV) else {
        return;
    };
    // A second initialization (several contexts in one test binary) is a no-op.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
