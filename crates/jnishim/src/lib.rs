//! # jnishim
//!
//! Checked Rust access to a Java VM through the jnishim trampolines.
//!
//! [`jnishim_ffi`] exports one C-ABI function per JNI operation and forwards
//! everything unchanged. This crate is the Rust host side built on the same
//! adapter types:
//! - [`JavaVm`] creates or wraps a VM and manages thread attachment
//! - [`Env`] turns null results and pending exceptions into [`ShimError`]s
//! - [`GlobalRef`], [`ByteArrayElements`] and [`StringChars`] release what
//!   they hold when dropped
//!
//! ## Example
//!
//! ```ignore
//! use jnishim::prelude::*;
//!
//! let vm = JavaVm::create(&VmConfig::new().option("-Xmx256m"))?;
//! let answer = vm.with_env(|env| {
//!     let math = env.find_class("java/lang/Math")?;
//!     let abs = env.get_static_method_id(math, "abs", "(I)I")?;
//!     env.call_static_method(math, abs, JavaType::Int, &[JValue::Int(-42)])
//! })?;
//! assert_eq!(answer.as_int(), Some(42));
//! ```

mod elements;
mod env;
mod refs;
mod vm;

pub use elements::{ByteArrayElements, StringChars};
pub use env::Env;
pub use refs::GlobalRef;
pub use vm::{AttachGuard, JavaVm};

pub use jnishim_core::{
    JValue, JavaType, JniStatus, ReleaseMode, ShimError, ShimResult, VmConfig,
};
pub use jnishim_ffi::{EnvHandle, VmHandle};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AttachGuard, ByteArrayElements, Env, GlobalRef, JavaVm, StringChars,
    };
    pub use jnishim_core::prelude::*;
}
