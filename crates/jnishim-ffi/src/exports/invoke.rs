//! Object construction and method invocation
//!
//! Only the `*A` variants are exported: arguments arrive as a contiguous
//! `jvalue` array, positionally matching the method signature. Nothing
//! checks the array against the signature; it may be null for methods that
//! take no arguments. Results are returned exactly as the VM produced them.
//!
//! # Safety
//! `env` must be the calling thread's environment handle, `method` must
//! belong to the target's class, and `args` must hold one correctly typed
//! entry per parameter.

#![allow(clippy::missing_safety_doc)]

use crate::handle::EnvHandle;
use crate::interface::JniInterface;
use jni::sys::{
    jboolean, jbyte, jchar, jclass, jdouble, jfloat, jint, jlong, jmethodID, jobject, jshort,
    jvalue,
};

/// Construct a new instance of `cls` with the constructor `method`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_new_object_a(
    env: EnvHandle,
    cls: jclass,
    method: jmethodID,
    args: *const jvalue,
) -> jobject {
    unsafe { env.new_object_a(cls, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_void_method_a(
    env: EnvHandle,
    obj: jobject,
    method: jmethodID,
    args: *const jvalue,
) {
    unsafe { env.call_void_method_a(obj, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_object_method_a(
    env: EnvHandle,
    obj: jobject,
    method: jmethodID,
    args: *const jvalue,
) -> jobject {
    unsafe { env.call_object_method_a(obj, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_boolean_method_a(
    env: EnvHandle,
    obj: jobject,
    method: jmethodID,
    args: *const jvalue,
) -> jboolean {
    unsafe { env.call_boolean_method_a(obj, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_byte_method_a(
    env: EnvHandle,
    obj: jobject,
    method: jmethodID,
    args: *const jvalue,
) -> jbyte {
    unsafe { env.call_byte_method_a(obj, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_char_method_a(
    env: EnvHandle,
    obj: jobject,
    method: jmethodID,
    args: *const jvalue,
) -> jchar {
    unsafe { env.call_char_method_a(obj, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_short_method_a(
    env: EnvHandle,
    obj: jobject,
    method: jmethodID,
    args: *const jvalue,
) -> jshort {
    unsafe { env.call_short_method_a(obj, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_int_method_a(
    env: EnvHandle,
    obj: jobject,
    method: jmethodID,
    args: *const jvalue,
) -> jint {
    unsafe { env.call_int_method_a(obj, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_long_method_a(
    env: EnvHandle,
    obj: jobject,
    method: jmethodID,
    args: *const jvalue,
) -> jlong {
    unsafe { env.call_long_method_a(obj, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_float_method_a(
    env: EnvHandle,
    obj: jobject,
    method: jmethodID,
    args: *const jvalue,
) -> jfloat {
    unsafe { env.call_float_method_a(obj, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_double_method_a(
    env: EnvHandle,
    obj: jobject,
    method: jmethodID,
    args: *const jvalue,
) -> jdouble {
    unsafe { env.call_double_method_a(obj, method, args) }
}

/// Static calls take the class reference where instance calls take the
/// object.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_static_void_method_a(
    env: EnvHandle,
    cls: jclass,
    method: jmethodID,
    args: *const jvalue,
) {
    unsafe { env.call_static_void_method_a(cls, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_static_object_method_a(
    env: EnvHandle,
    cls: jclass,
    method: jmethodID,
    args: *const jvalue,
) -> jobject {
    unsafe { env.call_static_object_method_a(cls, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_static_boolean_method_a(
    env: EnvHandle,
    cls: jclass,
    method: jmethodID,
    args: *const jvalue,
) -> jboolean {
    unsafe { env.call_static_boolean_method_a(cls, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_static_byte_method_a(
    env: EnvHandle,
    cls: jclass,
    method: jmethodID,
    args: *const jvalue,
) -> jbyte {
    unsafe { env.call_static_byte_method_a(cls, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_static_char_method_a(
    env: EnvHandle,
    cls: jclass,
    method: jmethodID,
    args: *const jvalue,
) -> jchar {
    unsafe { env.call_static_char_method_a(cls, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_static_short_method_a(
    env: EnvHandle,
    cls: jclass,
    method: jmethodID,
    args: *const jvalue,
) -> jshort {
    unsafe { env.call_static_short_method_a(cls, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_static_int_method_a(
    env: EnvHandle,
    cls: jclass,
    method: jmethodID,
    args: *const jvalue,
) -> jint {
    unsafe { env.call_static_int_method_a(cls, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_static_long_method_a(
    env: EnvHandle,
    cls: jclass,
    method: jmethodID,
    args: *const jvalue,
) -> jlong {
    unsafe { env.call_static_long_method_a(cls, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_static_float_method_a(
    env: EnvHandle,
    cls: jclass,
    method: jmethodID,
    args: *const jvalue,
) -> jfloat {
    unsafe { env.call_static_float_method_a(cls, method, args) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_call_static_double_method_a(
    env: EnvHandle,
    cls: jclass,
    method: jmethodID,
    args: *const jvalue,
) -> jdouble {
    unsafe { env.call_static_double_method_a(cls, method, args) }
}
