#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case(ShimError::LibjvmNotFound("x".into()), 1)]
#[test_case(ShimError::LibraryLoad("x".into()), 2)]
#[test_case(ShimError::SymbolNotFound("x".into()), 3)]
#[test_case(ShimError::InvalidOption("x".into()), 4)]
#[test_case(ShimError::Config("x".into()), 5)]
#[test_case(ShimError::VmCreation { status: JniStatus::Error }, 6)]
#[test_case(ShimError::Status { operation: "GetEnv", status: JniStatus::Detached }, 7)]
#[test_case(ShimError::NullHandle("FindClass"), 8)]
#[test_case(ShimError::JavaException("x".into()), 9)]
#[test_case(ShimError::Panic("x".into()), 10)]
#[test_case(ShimError::InvalidArgument("x".into()), 11)]
fn ShimError___variant___maps_to_code(error: ShimError, expected: u32) {
    assert_eq!(error.error_code(), expected);
}

#[test]
fn ShimError___vm_creation___keeps_original_diagnostic() {
    let err = ShimError::VmCreation {
        status: JniStatus::AlreadyExists,
    };

    assert_eq!(err.to_string(), "Can't create Java VM (JNI_EEXIST)");
}

#[test]
fn ShimError___status___names_operation() {
    let err = ShimError::Status {
        operation: "AttachCurrentThread",
        status: JniStatus::NoMemory,
    };

    assert_eq!(err.to_string(), "AttachCurrentThread failed: JNI_ENOMEM");
    assert_eq!(err.status(), Some(JniStatus::NoMemory));
}

#[test]
fn ShimError___java_exception___has_no_status() {
    let err = ShimError::JavaException("java.lang.NoClassDefFoundError: nope".into());

    assert!(err.status().is_none());
    assert!(err.to_string().contains("NoClassDefFoundError"));
}

#[test]
fn ShimError___from_serde_error___converts_to_config() {
    let json_err = serde_json::from_str::<u32>("nope").unwrap_err();

    let err: ShimError = json_err.into();

    assert!(matches!(err, ShimError::Config(_)));
}

#[test]
fn ShimError___from_nul_error___converts_to_invalid_option() {
    let nul_err = std::ffi::CString::new("-Xmx\01g").unwrap_err();

    let err: ShimError = nul_err.into();

    assert!(matches!(err, ShimError::InvalidOption(_)));
}
