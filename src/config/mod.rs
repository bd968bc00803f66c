//! Application configuration and constants.

pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::Config;

/// Initialize tracing with an env-filter subscriber.
///
/// Intended for composition roots and integration tests; calling it twice
/// is harmless (the second call is ignored).
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let _ = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .try_init();
}
