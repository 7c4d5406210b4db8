//! Byte arrays and object arrays
//!
//! # Safety
//! `env` must be the calling thread's environment handle and array
//! references must be live arrays of the matching kind.

#![allow(clippy::missing_safety_doc)]

use crate::handle::EnvHandle;
use crate::interface::JniInterface;
use jni::sys::{jarray, jbyte, jbyteArray, jclass, jint, jobject, jobjectArray, jsize};

/// Allocate a zero-filled `byte[]` of `length` elements.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_new_byte_array(env: EnvHandle, length: jsize) -> jbyteArray {
    unsafe { env.new_byte_array(length) }
}

/// Pin (or copy) the elements of `array`.
///
/// The "is copy" out-parameter is always passed as null, so the caller
/// cannot tell a pinned array from a copy. Every successful call must be
/// paired with [`jnishim_release_byte_array_elements`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_byte_array_elements(
    env: EnvHandle,
    array: jbyteArray,
) -> *mut jbyte {
    unsafe { env.get_byte_array_elements(array) }
}

/// Release elements obtained from [`jnishim_get_byte_array_elements`].
///
/// `mode` is `0` (copy back and free), `JNI_COMMIT` (copy back, keep the
/// buffer) or `JNI_ABORT` (free without copying back).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_release_byte_array_elements(
    env: EnvHandle,
    array: jbyteArray,
    elems: *mut jbyte,
    mode: jint,
) {
    unsafe { env.release_byte_array_elements(array, elems, mode) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_array_length(env: EnvHandle, array: jarray) -> jsize {
    unsafe { env.get_array_length(array) }
}

/// Allocate an array of `length` references to `element_class`, every slot
/// set to `initial` (which may be null).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_new_object_array(
    env: EnvHandle,
    length: jsize,
    element_class: jclass,
    initial: jobject,
) -> jobjectArray {
    unsafe { env.new_object_array(length, element_class, initial) }
}

/// Element `index` as a new local reference. An index out of bounds returns
/// null with `ArrayIndexOutOfBoundsException` pending.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_object_array_element(
    env: EnvHandle,
    array: jobjectArray,
    index: jsize,
) -> jobject {
    unsafe { env.get_object_array_element(array, index) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_set_object_array_element(
    env: EnvHandle,
    array: jobjectArray,
    index: jsize,
    value: jobject,
) {
    unsafe { env.set_object_array_element(array, index, value) }
}
