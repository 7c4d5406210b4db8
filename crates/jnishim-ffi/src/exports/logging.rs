//! Host logging control

use jnishim_core::LogLevel;
use jnishim_logging::{LogCallback, LogSink};

/// Install (or, with null, remove) the host log callback and make sure the
/// shim's subscriber is running.
///
/// The callback may be invoked from any thread that calls into the shim.
#[unsafe(no_mangle)]
pub extern "C" fn jnishim_set_log_callback(callback: Option<LogCallback>) {
    LogSink::global().set_callback(callback);
    jnishim_logging::init_logging();
}

/// Set the minimum level forwarded to the host callback.
///
/// `0`=Trace, `1`=Debug, `2`=Info, `3`=Warn, `4`=Error; anything else turns
/// forwarding off.
#[unsafe(no_mangle)]
pub extern "C" fn jnishim_set_log_level(level: u8) {
    LogSink::global().set_level(LogLevel::from_u8(level));
}
