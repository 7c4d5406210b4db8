//! Field reads
//!
//! Read-only: the shim exposes no field setters. Values are returned exactly
//! as stored.
//!
//! # Safety
//! `env` must be the calling thread's environment handle and `field` must
//! have been looked up on the target's class with a matching type.

#![allow(clippy::missing_safety_doc)]

use crate::handle::EnvHandle;
use crate::interface::JniInterface;
use jni::sys::{
    jboolean, jbyte, jchar, jclass, jdouble, jfieldID, jfloat, jint, jlong, jobject, jshort,
};

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_object_field(
    env: EnvHandle,
    obj: jobject,
    field: jfieldID,
) -> jobject {
    unsafe { env.get_object_field(obj, field) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_boolean_field(
    env: EnvHandle,
    obj: jobject,
    field: jfieldID,
) -> jboolean {
    unsafe { env.get_boolean_field(obj, field) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_byte_field(
    env: EnvHandle,
    obj: jobject,
    field: jfieldID,
) -> jbyte {
    unsafe { env.get_byte_field(obj, field) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_char_field(
    env: EnvHandle,
    obj: jobject,
    field: jfieldID,
) -> jchar {
    unsafe { env.get_char_field(obj, field) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_short_field(
    env: EnvHandle,
    obj: jobject,
    field: jfieldID,
) -> jshort {
    unsafe { env.get_short_field(obj, field) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_int_field(
    env: EnvHandle,
    obj: jobject,
    field: jfieldID,
) -> jint {
    unsafe { env.get_int_field(obj, field) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_long_field(
    env: EnvHandle,
    obj: jobject,
    field: jfieldID,
) -> jlong {
    unsafe { env.get_long_field(obj, field) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_float_field(
    env: EnvHandle,
    obj: jobject,
    field: jfieldID,
) -> jfloat {
    unsafe { env.get_float_field(obj, field) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_double_field(
    env: EnvHandle,
    obj: jobject,
    field: jfieldID,
) -> jdouble {
    unsafe { env.get_double_field(obj, field) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_static_object_field(
    env: EnvHandle,
    cls: jclass,
    field: jfieldID,
) -> jobject {
    unsafe { env.get_static_object_field(cls, field) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_static_boolean_field(
    env: EnvHandle,
    cls: jclass,
    field: jfieldID,
) -> jboolean {
    unsafe { env.get_static_boolean_field(cls, field) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_static_byte_field(
    env: EnvHandle,
    cls: jclass,
    field: jfieldID,
) -> jbyte {
    unsafe { env.get_static_byte_field(cls, field) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_static_char_field(
    env: EnvHandle,
    cls: jclass,
    field: jfieldID,
) -> jchar {
    unsafe { env.get_static_char_field(cls, field) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_static_short_field(
    env: EnvHandle,
    cls: jclass,
    field: jfieldID,
) -> jshort {
    unsafe { env.get_static_short_field(cls, field) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_static_int_field(
    env: EnvHandle,
    cls: jclass,
    field: jfieldID,
) -> jint {
    unsafe { env.get_static_int_field(cls, field) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_static_long_field(
    env: EnvHandle,
    cls: jclass,
    field: jfieldID,
) -> jlong {
    unsafe { env.get_static_long_field(cls, field) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_static_float_field(
    env: EnvHandle,
    cls: jclass,
    field: jfieldID,
) -> jfloat {
    unsafe { env.get_static_float_field(cls, field) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_static_double_field(
    env: EnvHandle,
    cls: jclass,
    field: jfieldID,
) -> jdouble {
    unsafe { env.get_static_double_field(cls, field) }
}
