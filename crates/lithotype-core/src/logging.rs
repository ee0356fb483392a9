//! Logging setup based on `tracing-subscriber`.
//!
//! Library code only emits `tracing` events; binaries, examples and tests call
//! [`init`] once to see them.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,lithotype_geometry=debug";

/// Install a fmt subscriber honoring `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter);
}

/// Install a fmt subscriber with an explicit filter directive, ignoring `RUST_LOG`.
pub fn init_with_filter(directive: &str) {
    install(EnvFilter::new(directive));
}

fn install(filter: EnvFilter) {
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::trace!("Global subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_with_filter("warn");
        init();
        tracing::warn!("still logging after a second init");
    }
}
