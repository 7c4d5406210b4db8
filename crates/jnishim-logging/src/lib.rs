//! jnishim-logging - Diagnostics for the JNI trampoline layer
//!
//! The shim has exactly one place where it reports anything on its own (a
//! failed VM creation) plus the defensive paths for broken function tables.
//! Those go through `tracing`; this crate decides where the events end up:
//! - [`HostLogLayer`] hands them to a callback registered by the host
//! - a `fmt` layer prints them to stderr, filtered by `JNISHIM_LOG`

mod callback;
mod layer;

pub use callback::{LogCallback, LogSink};
pub use jnishim_core::LogLevel;
pub use layer::{HostLogLayer, LOG_ENV_VAR, init_logging};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{HostLogLayer, LogCallback, LogLevel, LogSink, init_logging};
}
