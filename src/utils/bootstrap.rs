//! Bootstrap utilities for programs embedding the tree.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LOG_ENV_VAR;

/// Initialize tracing with the REDBLACK_LOG environment variable.
///
/// Defaults to "info" level if REDBLACK_LOG is not set. Fixup cases and
/// rotations are logged at trace level under the `redblack_tree` target.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
