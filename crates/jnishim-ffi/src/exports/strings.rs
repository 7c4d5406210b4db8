//! UTF-16 string access
//!
//! # Safety
//! `env` must be the calling thread's environment handle and string
//! references must be live `java.lang.String` instances.

#![allow(clippy::missing_safety_doc)]

use crate::handle::EnvHandle;
use crate::interface::JniInterface;
use jni::sys::{jchar, jsize, jstring};

/// Length in UTF-16 code units.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_string_length(env: EnvHandle, string: jstring) -> jsize {
    unsafe { env.get_string_length(string) }
}

/// The string's UTF-16 code units, not NUL-terminated. The "is copy"
/// out-parameter is always passed as null. Pair every call with
/// [`jnishim_release_string_chars`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_string_chars(env: EnvHandle, string: jstring) -> *const jchar {
    unsafe { env.get_string_chars(string) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_release_string_chars(
    env: EnvHandle,
    string: jstring,
    chars: *const jchar,
) {
    unsafe { env.release_string_chars(string, chars) }
}

/// Construct a string from `length` UTF-16 code units.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_new_string(
    env: EnvHandle,
    unicode: *const jchar,
    length: jsize,
) -> jstring {
    unsafe { env.new_string(unicode, length) }
}
