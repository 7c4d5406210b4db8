//! jnishim-core - Shared types for the JNI trampoline layer
//!
//! This crate provides the types that both the exported shim and Rust hosts
//! agree on:
//! - [`JniStatus`] for the interface's integer status codes
//! - [`JValue`] and [`JavaType`] for invocation arguments and results
//! - [`ReleaseMode`] for releasing pinned array elements
//! - [`VmConfig`] for embedded VM creation
//! - [`ShimError`] for Rust-side error handling

mod config;
mod error;
mod status;
mod value;

pub use config::VmConfig;
pub use error::{ShimError, ShimResult};
pub use status::JniStatus;
pub use value::{JValue, JavaType, ReleaseMode, to_jvalues};

/// Raw JNI types re-exported so downstream crates agree on one `jni-sys`.
pub use jni::sys;

/// Log levels for the host log callback
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        JValue, JavaType, JniStatus, LogLevel, ReleaseMode, ShimError, ShimResult, VmConfig,
    };
}

#[cfg(test)]
mod lib_tests;
