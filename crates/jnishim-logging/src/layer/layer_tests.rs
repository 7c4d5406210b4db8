#![allow(non_snake_case)]

use super::*;
use std::ffi::{CStr, c_char};
use std::sync::Mutex;
use tracing_subscriber::prelude::*;

static RECEIVED: Mutex<Vec<(u8, String)>> = Mutex::new(Vec::new());
static LAYER_TEST_LOCK: Mutex<()> = Mutex::new(());

extern "C" fn recording_callback(level: u8, _target: *const c_char, message: *const c_char) {
    let message = unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned();
    if let Ok(mut received) = RECEIVED.lock() {
        received.push((level, message));
    }
}

fn leaked_sink(level: LogLevel) -> &'static LogSink {
    let sink = Box::leak(Box::new(LogSink::new()));
    sink.set_callback(Some(recording_callback));
    sink.set_level(level);
    sink
}

fn take_received() -> Vec<(u8, String)> {
    std::mem::take(&mut *RECEIVED.lock().unwrap())
}

#[test]
fn HostLogLayer___convert_level___maps_all_levels() {
    assert_eq!(HostLogLayer::convert_level(&Level::TRACE), LogLevel::Trace);
    assert_eq!(HostLogLayer::convert_level(&Level::DEBUG), LogLevel::Debug);
    assert_eq!(HostLogLayer::convert_level(&Level::INFO), LogLevel::Info);
    assert_eq!(HostLogLayer::convert_level(&Level::WARN), LogLevel::Warn);
    assert_eq!(HostLogLayer::convert_level(&Level::ERROR), LogLevel::Error);
}

#[test]
fn HostLogLayer___error_event___reaches_callback_with_fields() {
    let _guard = LAYER_TEST_LOCK.lock().unwrap();
    take_received();
    let subscriber = tracing_subscriber::registry().with(HostLogLayer::with_sink(leaked_sink(
        LogLevel::Warn,
    )));

    tracing::subscriber::with_default(subscriber, || {
        tracing::error!(status = -1, "Can't create Java VM");
    });

    let received = take_received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0, LogLevel::Error as u8);
    assert_eq!(received[0].1, "Can't create Java VM status=-1");
}

#[test]
fn HostLogLayer___event_below_level___is_not_forwarded() {
    let _guard = LAYER_TEST_LOCK.lock().unwrap();
    take_received();
    let subscriber = tracing_subscriber::registry().with(HostLogLayer::with_sink(leaked_sink(
        LogLevel::Error,
    )));

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!("attached thread");
    });

    assert!(take_received().is_empty());
}

#[test]
fn EventText___fields_only___drops_leading_space() {
    let text = EventText {
        message: String::new(),
        fields: " slot=FindClass".to_string(),
    };

    assert_eq!(text.finish(), "slot=FindClass");
}

#[test]
fn init_logging___can_be_called_multiple_times() {
    init_logging();
    init_logging();
}
