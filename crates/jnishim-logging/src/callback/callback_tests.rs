#![allow(non_snake_case)]

use super::*;
use std::ffi::CStr;
use std::sync::Mutex;

static RECEIVED: Mutex<Vec<(u8, String, String)>> = Mutex::new(Vec::new());
static CALLBACK_TEST_LOCK: Mutex<()> = Mutex::new(());

extern "C" fn recording_callback(level: u8, target: *const c_char, message: *const c_char) {
    let target = unsafe { CStr::from_ptr(target) }.to_string_lossy().into_owned();
    let message = unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned();
    if let Ok(mut received) = RECEIVED.lock() {
        received.push((level, target, message));
    }
}

fn take_received() -> Vec<(u8, String, String)> {
    std::mem::take(&mut *RECEIVED.lock().unwrap())
}

#[test]
fn LogSink___new___defaults_to_warn_without_callback() {
    let sink = LogSink::new();

    assert_eq!(sink.level(), LogLevel::Warn);
    assert!(sink.callback().is_none());
}

#[test]
fn LogSink___is_enabled___false_without_callback() {
    let sink = LogSink::new();

    assert!(!sink.is_enabled(LogLevel::Error));
}

#[test]
fn LogSink___is_enabled___respects_level_ordering() {
    let sink = LogSink::new();
    sink.set_callback(Some(recording_callback));
    sink.set_level(LogLevel::Info);

    assert!(!sink.is_enabled(LogLevel::Debug));
    assert!(sink.is_enabled(LogLevel::Info));
    assert!(sink.is_enabled(LogLevel::Error));
}

#[test]
fn LogSink___level_off___disables_everything() {
    let sink = LogSink::new();
    sink.set_callback(Some(recording_callback));
    sink.set_level(LogLevel::Off);

    assert!(!sink.is_enabled(LogLevel::Error));
}

#[test]
fn LogSink___emit___delivers_target_and_message() {
    let _guard = CALLBACK_TEST_LOCK.lock().unwrap();
    take_received();
    let sink = LogSink::new();
    sink.set_callback(Some(recording_callback));

    sink.emit(LogLevel::Error, "jnishim_ffi::launcher", "Can't create Java VM");

    let received = take_received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0, LogLevel::Error as u8);
    assert_eq!(received[0].1, "jnishim_ffi::launcher");
    assert_eq!(received[0].2, "Can't create Java VM");
}

#[test]
fn LogSink___emit_below_level___is_dropped() {
    let _guard = CALLBACK_TEST_LOCK.lock().unwrap();
    take_received();
    let sink = LogSink::new();
    sink.set_callback(Some(recording_callback));

    sink.emit(LogLevel::Debug, "target", "quiet");

    assert!(take_received().is_empty());
}

#[test]
fn LogSink___emit_with_interior_nul___still_delivers() {
    let _guard = CALLBACK_TEST_LOCK.lock().unwrap();
    take_received();
    let sink = LogSink::new();
    sink.set_callback(Some(recording_callback));

    sink.emit(LogLevel::Warn, "target", "before\0after");

    let received = take_received();
    assert_eq!(received.len(), 1);
    assert!(received[0].2.starts_with("before"));
    assert!(received[0].2.ends_with("after"));
}

#[test]
fn LogSink___set_callback_none___clears_callback() {
    let sink = LogSink::new();
    sink.set_callback(Some(recording_callback));

    sink.set_callback(None);

    assert!(sink.callback().is_none());
}
