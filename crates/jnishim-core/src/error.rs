//! Error types for jnishim

use crate::status::JniStatus;
use thiserror::Error;

/// Result type alias for Rust-side shim operations
pub type ShimResult<T> = Result<T, ShimError>;

/// Errors raised on the Rust side of the shim.
///
/// The exported functions never return these: they forward status codes and
/// null handles unchanged. `ShimError` is used by VM creation (which has to
/// locate and load libjvm first) and by the host integration layer.
#[derive(Error, Debug)]
pub enum ShimError {
    /// No libjvm could be located
    #[error("libjvm not found: {0}")]
    LibjvmNotFound(String),

    /// libjvm was found but could not be loaded
    #[error("failed to load library: {0}")]
    LibraryLoad(String),

    /// A required symbol is missing from the loaded library
    #[error("symbol not found: {0}")]
    SymbolNotFound(String),

    /// A VM option string contains an interior NUL byte
    #[error("invalid VM option: {0}")]
    InvalidOption(String),

    /// The VM configuration could not be parsed
    #[error("configuration error: {0}")]
    Config(String),

    /// `JNI_CreateJavaVM` reported a negative status
    #[error("Can't create Java VM ({status})")]
    VmCreation { status: JniStatus },

    /// An invocation-interface call returned a non-OK status
    #[error("{operation} failed: {status}")]
    Status {
        operation: &'static str,
        status: JniStatus,
    },

    /// A call returned a null handle without leaving a pending exception
    #[error("{0} returned null")]
    NullHandle(&'static str),

    /// A Java exception was pending; carries its `toString()`
    #[error("java exception: {0}")]
    JavaException(String),

    /// A panic was caught before it could cross the FFI boundary
    #[error("panic: {0}")]
    Panic(String),

    /// An argument the operation cannot accept, such as a name with an
    /// interior NUL byte or a `void` field type
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ShimError {
    /// Returns an error code suitable for FFI
    pub fn error_code(&self) -> u32 {
        match self {
            ShimError::LibjvmNotFound(_) => 1,
            ShimError::LibraryLoad(_) => 2,
            ShimError::SymbolNotFound(_) => 3,
            ShimError::InvalidOption(_) => 4,
            ShimError::Config(_) => 5,
            ShimError::VmCreation { .. } => 6,
            ShimError::Status { .. } => 7,
            ShimError::NullHandle(_) => 8,
            ShimError::JavaException(_) => 9,
            ShimError::Panic(_) => 10,
            ShimError::InvalidArgument(_) => 11,
        }
    }

    /// The interface status carried by this error, if any.
    pub fn status(&self) -> Option<JniStatus> {
        match self {
            ShimError::VmCreation { status } | ShimError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ShimError {
    fn from(err: serde_json::Error) -> Self {
        ShimError::Config(err.to_string())
    }
}

impl From<std::ffi::NulError> for ShimError {
    fn from(err: std::ffi::NulError) -> Self {
        ShimError::InvalidOption(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
