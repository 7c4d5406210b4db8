//! Panic handling for FFI boundaries
//!
//! Unwinding out of an `extern "C"` function aborts the host process. The
//! exported entry points that do real work on the Rust side (VM creation,
//! config parsing) run inside [`catch_panic`].

use jnishim_core::ShimError;
use std::any::Any;
use std::panic;

/// Run `f`, converting a panic into [`ShimError::Panic`].
///
/// The panic is logged at error level together with `operation`, the name of
/// the exported function that caught it.
///
/// # Example
///
/// ```ignore
/// #[unsafe(no_mangle)]
/// pub unsafe extern "C" fn jnishim_create_java_vm(...) -> VmHandle {
///     catch_panic("jnishim_create_java_vm", AssertUnwindSafe(|| create(...)))
///         .unwrap_or_else(|_| VmHandle::null())
/// }
/// ```
pub fn catch_panic<F, R>(operation: &'static str, f: F) -> Result<R, ShimError>
where
    F: FnOnce() -> R + panic::UnwindSafe,
{
    panic::catch_unwind(f).map_err(|payload| {
        let message = panic_to_string(&payload);
        tracing::error!(operation, "FFI panic caught: {}", message);
        ShimError::Panic(message)
    })
}

fn panic_to_string(payload: &Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
