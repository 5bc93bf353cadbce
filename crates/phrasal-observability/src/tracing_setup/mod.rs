//! Tracing setup: structured logging and event helpers.

pub mod events;

use phrasal_core::config::ObservabilityConfig;
use phrasal_core::constants::LOG_ENV_VAR;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Respects the `PHRASAL_LOG` environment variable for filtering and falls
/// back to `config.log_level`. Safe to call more than once; later calls are
/// ignored.
pub fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Initialize tracing with a custom filter string (for tests or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::new(filter);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_test_writer()
        .try_init();
}
