//! tracing layer that forwards events to the host callback

use crate::callback::LogSink;
use jnishim_core::LogLevel;
use once_cell::sync::OnceCell;
use std::fmt::Write as _;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

/// Environment variable holding the `EnvFilter` directive for stderr output
pub const LOG_ENV_VAR: &str = "JNISHIM_LOG";

const DEFAULT_STDERR_FILTER: &str = "warn";

/// Forwards tracing events to a [`LogSink`]
pub struct HostLogLayer {
    sink: &'static LogSink,
}

impl HostLogLayer {
    /// Layer feeding the global sink
    pub fn new() -> Self {
        Self {
            sink: LogSink::global(),
        }
    }

    pub fn with_sink(sink: &'static LogSink) -> Self {
        Self { sink }
    }

    fn convert_level(level: &Level) -> LogLevel {
        match *level {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warn,
            Level::ERROR => LogLevel::Error,
        }
    }
}

impl Default for HostLogLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for HostLogLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    // No `enabled` override: returning false there would also silence the
    // stderr layer sharing this registry.
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::convert_level(metadata.level());
        if !self.sink.is_enabled(level) {
            return;
        }

        let mut visitor = EventText::default();
        event.record(&mut visitor);

        self.sink.emit(level, metadata.target(), &visitor.finish());
    }
}

/// Renders an event as `message key=value key=value`
#[derive(Default)]
struct EventText {
    message: String,
    fields: String,
}

impl EventText {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl Visit for EventText {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }
}

/// Install the global subscriber: the host callback layer plus stderr output
/// filtered by `JNISHIM_LOG` (default `warn`).
///
/// Safe to call repeatedly; only the first call does anything. If the host
/// process already installed its own global subscriber, that one is kept.
pub fn init_logging() {
    static INIT: OnceCell<()> = OnceCell::new();

    INIT.get_or_init(|| {
        use tracing_subscriber::prelude::*;

        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_STDERR_FILTER));
        let stderr = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(filter);

        let subscriber = tracing_subscriber::registry()
            .with(HostLogLayer::new())
            .with(stderr);

        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

#[cfg(test)]
#[path = "layer/layer_tests.rs"]
mod layer_tests;
