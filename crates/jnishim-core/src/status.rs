//! JNI status codes

use jni::sys::{
    JNI_EDETACHED, JNI_EEXIST, JNI_EINVAL, JNI_ENOMEM, JNI_ERR, JNI_EVERSION, JNI_OK, jint,
};

/// Status returned by the invocation interface (`AttachCurrentThread`,
/// `GetEnv`, `JNI_CreateJavaVM`, ...).
///
/// The shim itself never translates status codes; this type exists for Rust
/// hosts that want to match on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JniStatus {
    /// `JNI_OK`
    Ok,
    /// `JNI_ERR`: unknown error
    Error,
    /// `JNI_EDETACHED`: thread is not attached to the VM
    Detached,
    /// `JNI_EVERSION`: requested interface version is not supported
    Version,
    /// `JNI_ENOMEM`: not enough memory
    NoMemory,
    /// `JNI_EEXIST`: a VM already exists in this process
    AlreadyExists,
    /// `JNI_EINVAL`: invalid arguments
    InvalidArguments,
    /// Any code the interface did not define
    Other(jint),
}

impl JniStatus {
    pub fn from_code(code: jint) -> Self {
        match code {
            JNI_OK => JniStatus::Ok,
            JNI_ERR => JniStatus::Error,
            JNI_EDETACHED => JniStatus::Detached,
            JNI_EVERSION => JniStatus::Version,
            JNI_ENOMEM => JniStatus::NoMemory,
            JNI_EEXIST => JniStatus::AlreadyExists,
            JNI_EINVAL => JniStatus::InvalidArguments,
            other => JniStatus::Other(other),
        }
    }

    pub fn code(&self) -> jint {
        match self {
            JniStatus::Ok => JNI_OK,
            JniStatus::Error => JNI_ERR,
            JniStatus::Detached => JNI_EDETACHED,
            JniStatus::Version => JNI_EVERSION,
            JniStatus::NoMemory => JNI_ENOMEM,
            JniStatus::AlreadyExists => JNI_EEXIST,
            JniStatus::InvalidArguments => JNI_EINVAL,
            JniStatus::Other(code) => *code,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, JniStatus::Ok)
    }

    /// Convert to a `Result`, keeping the status as the error.
    pub fn into_result(self) -> Result<(), JniStatus> {
        if self.is_ok() { Ok(()) } else { Err(self) }
    }
}

impl From<jint> for JniStatus {
    fn from(code: jint) -> Self {
        JniStatus::from_code(code)
    }
}

impl std::fmt::Display for JniStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JniStatus::Ok => write!(f, "JNI_OK"),
            JniStatus::Error => write!(f, "JNI_ERR"),
            JniStatus::Detached => write!(f, "JNI_EDETACHED"),
            JniStatus::Version => write!(f, "JNI_EVERSION"),
            JniStatus::NoMemory => write!(f, "JNI_ENOMEM"),
            JniStatus::AlreadyExists => write!(f, "JNI_EEXIST"),
            JniStatus::InvalidArguments => write!(f, "JNI_EINVAL"),
            JniStatus::Other(code) => write!(f, "status {code}"),
        }
    }
}
