#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn LogLevel___ordering___increases_with_severity() {
    assert!(LogLevel::Trace < LogLevel::Debug);
    assert!(LogLevel::Debug < LogLevel::Info);
    assert!(LogLevel::Info < LogLevel::Warn);
    assert!(LogLevel::Warn < LogLevel::Error);
    assert!(LogLevel::Error < LogLevel::Off);
}

#[test_case(0, LogLevel::Trace)]
#[test_case(1, LogLevel::Debug)]
#[test_case(2, LogLevel::Info)]
#[test_case(3, LogLevel::Warn)]
#[test_case(4, LogLevel::Error)]
#[test_case(5, LogLevel::Off)]
#[test_case(200, LogLevel::Off)]
fn LogLevel___from_u8___maps_value(value: u8, expected: LogLevel) {
    assert_eq!(LogLevel::from_u8(value), expected);
}

#[test]
fn LogLevel___display___uses_uppercase_names() {
    assert_eq!(LogLevel::Warn.to_string(), "WARN");
    assert_eq!(LogLevel::Off.to_string(), "OFF");
}
