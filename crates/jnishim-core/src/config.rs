//! Embedded VM configuration

use jni::sys::{JNI_VERSION_1_6, jint};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for creating the embedded VM.
///
/// The defaults reproduce the fixed policy of the plain creation entry
/// point: interface version 1.6 and unrecognized options rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmConfig {
    /// `JavaVMInitArgs.version`
    #[serde(default = "default_version")]
    pub version: jint,

    /// `JavaVMInitArgs.ignoreUnrecognized`
    #[serde(default)]
    pub ignore_unrecognized: bool,

    /// Option strings such as `-Xmx512m` or `-Djava.class.path=app.jar`.
    /// Passed to the VM uninterpreted, in order.
    #[serde(default)]
    pub options: Vec<String>,

    /// Explicit libjvm to load instead of searching for one
    #[serde(default)]
    pub libjvm_path: Option<PathBuf>,
}

fn default_version() -> jint {
    JNI_VERSION_1_6
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            ignore_unrecognized: false,
            options: Vec::new(),
            libjvm_path: None,
        }
    }
}

impl VmConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    /// Default configuration carrying the given option strings
    pub fn with_options<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Append one option string
    pub fn option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }
}
