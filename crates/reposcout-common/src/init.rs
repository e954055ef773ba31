//! One-time process initialization utilities

use std::sync::Once;

static ENV_INIT: Once = Once::new();
static TRACING_INIT: Once = Once::new();

/// Load environment variables from a `.env` file if one exists.
///
/// Safe to call multiple times - will only run once.
pub fn initialize_environment() {
    ENV_INIT.call_once(|| {
        // Loads from the current directory or searches up the tree
        dotenvy::dotenv().ok();
    });
}

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG` when set, defaults to `info` otherwise. Safe to call
/// multiple times; later calls (including from tests that already installed
/// a subscriber) are no-ops.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .ok();
    });
}
