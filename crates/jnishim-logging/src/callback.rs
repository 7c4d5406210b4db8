//! Host log callback registration

use jnishim_core::LogLevel;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::ffi::{CString, c_char};
use std::sync::atomic::{AtomicU8, Ordering};

/// Host function receiving shim diagnostics.
///
/// # Parameters
/// - `level`: 0=Trace, 1=Debug, 2=Info, 3=Warn, 4=Error
/// - `target`: module path that emitted the event, NUL-terminated
/// - `message`: event text, NUL-terminated
///
/// Both strings are only valid for the duration of the call.
pub type LogCallback =
    extern "C" fn(level: u8, target: *const c_char, message: *const c_char);

static GLOBAL_SINK: OnceCell<LogSink> = OnceCell::new();

/// Where host-bound log events go, and the level below which they are dropped
pub struct LogSink {
    callback: RwLock<Option<LogCallback>>,
    level: AtomicU8,
}

impl LogSink {
    pub fn new() -> Self {
        Self {
            callback: RwLock::new(None),
            level: AtomicU8::new(LogLevel::Warn as u8),
        }
    }

    /// The sink the exported `jnishim_set_log_*` functions configure
    pub fn global() -> &'static LogSink {
        GLOBAL_SINK.get_or_init(LogSink::new)
    }

    pub fn set_callback(&self, callback: Option<LogCallback>) {
        *self.callback.write() = callback;
    }

    pub fn callback(&self) -> Option<LogCallback> {
        *self.callback.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::SeqCst))
    }

    /// True when a callback is installed and `level` passes the filter
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.level() && self.callback().is_some()
    }

    /// Hand one event to the host callback.
    ///
    /// Interior NUL bytes cannot cross a C string boundary; they are
    /// replaced so the rest of the message still arrives.
    pub fn emit(&self, level: LogLevel, target: &str, message: &str) {
        if !self.is_enabled(level) {
            return;
        }
        let Some(callback) = self.callback() else {
            return;
        };

        let target = to_c_string(target);
        let message = to_c_string(message);
        callback(level as u8, target.as_ptr(), message.as_ptr());
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

fn to_c_string(text: &str) -> CString {
    CString::new(text.replace('\0', "\u{FFFD}")).unwrap_or_default()
}

#[cfg(test)]
#[path = "callback/callback_tests.rs"]
mod callback_tests;
