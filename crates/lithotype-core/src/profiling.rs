//! Profiling utilities based on the `puffin` crate.
//!
//! With the `profiling` feature disabled the macros expand to nothing, so hot
//! paths can keep their `profile_function!()` markers unconditionally.

#[cfg(feature = "profiling")]
use std::sync::OnceLock;

use crate::config::ProfilingMode;

#[cfg(feature = "profiling")]
pub use puffin::{profile_function, profile_scope};

/// No-op stand-in for `puffin::profile_function!` when profiling is disabled.
#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_function {
    ($($arg:tt)*) => {};
}

/// No-op stand-in for `puffin::profile_scope!` when profiling is disabled.
#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_scope {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "profiling"))]
pub use crate::{profile_function, profile_scope};

/// Profiling backend options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingBackend {
    /// Send profiling data to puffin_viewer via HTTP.
    PuffinHttp,
}

/// Global profiling server instance.
#[cfg(feature = "profiling")]
static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

/// Initialize profiling with the specified backend.
///
/// # Example
/// ```no_run
/// use lithotype_core::profiling::{init_profiling, ProfilingBackend};
///
/// init_profiling(ProfilingBackend::PuffinHttp);
/// ```
#[cfg(feature = "profiling")]
pub fn init_profiling(backend: ProfilingBackend) {
    match backend {
        ProfilingBackend::PuffinHttp => {
            puffin::set_scopes_on(true);

            // Default puffin port
            match puffin_http::Server::new("0.0.0.0:8585") {
                Ok(server) => {
                    tracing::info!("Puffin profiler server started on http://0.0.0.0:8585");
                    let _ = PROFILING_SERVER.set(server);
                }
                Err(e) => {
                    tracing::error!("Failed to start puffin server: {}", e);
                }
            }
        }
    }
}

/// Initialize profiling; a no-op when the `profiling` feature is disabled.
#[cfg(not(feature = "profiling"))]
pub fn init_profiling(backend: ProfilingBackend) {
    tracing::debug!(?backend, "Profiling feature disabled, ignoring init request");
}

/// Mark the start of a new profiling frame.
///
/// The session calls this once per reflow so puffin groups scopes by reflow.
#[inline]
pub fn new_frame() {
    #[cfg(feature = "profiling")]
    puffin::GlobalProfiler::lock().new_frame();
}

/// Apply the profiling mode from the pipeline configuration.
pub fn init_with_mode(mode: ProfilingMode) {
    match mode {
        ProfilingMode::Off => {}
        ProfilingMode::On => {
            #[cfg(feature = "profiling")]
            puffin::set_scopes_on(true);
        }
        ProfilingMode::WithWebserver => init_profiling(ProfilingBackend::PuffinHttp),
    }
}
