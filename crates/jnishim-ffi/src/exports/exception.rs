//! Pending exception inspection

use crate::handle::EnvHandle;
use crate::interface::JniInterface;
use jni::sys::jthrowable;

/// The pending exception as a local reference, or null if none is pending.
/// Does not clear it.
///
/// # Safety
/// `env` must be the calling thread's environment handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_exception_occurred(env: EnvHandle) -> jthrowable {
    unsafe { env.exception_occurred() }
}

/// Clear the pending exception, if any.
///
/// # Safety
/// `env` must be the calling thread's environment handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_exception_clear(env: EnvHandle) {
    unsafe { env.exception_clear() }
}
