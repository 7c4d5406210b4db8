//! Class, method and field lookups
//!
//! Each lookup returns null on failure and leaves the VM's pending exception
//! (`NoClassDefFoundError`, `NoSuchMethodError`, ...) in place.
//!
//! # Safety
//! `env` must be the calling thread's environment handle; names and
//! signatures must be NUL-terminated modified-UTF-8 strings.

#![allow(clippy::missing_safety_doc)]

use crate::handle::EnvHandle;
use crate::interface::JniInterface;
use jni::sys::{jclass, jfieldID, jmethodID, jobject};
use std::ffi::c_char;

/// `FindClass` with a slash-separated name such as `java/lang/String`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_find_class(env: EnvHandle, name: *const c_char) -> jclass {
    unsafe { env.find_class(name) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_object_class(env: EnvHandle, obj: jobject) -> jclass {
    unsafe { env.get_object_class(obj) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_method_id(
    env: EnvHandle,
    cls: jclass,
    name: *const c_char,
    sig: *const c_char,
) -> jmethodID {
    unsafe { env.get_method_id(cls, name, sig) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_static_method_id(
    env: EnvHandle,
    cls: jclass,
    name: *const c_char,
    sig: *const c_char,
) -> jmethodID {
    unsafe { env.get_static_method_id(cls, name, sig) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_field_id(
    env: EnvHandle,
    cls: jclass,
    name: *const c_char,
    sig: *const c_char,
) -> jfieldID {
    unsafe { env.get_field_id(cls, name, sig) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_static_field_id(
    env: EnvHandle,
    cls: jclass,
    name: *const c_char,
    sig: *const c_char,
) -> jfieldID {
    unsafe { env.get_static_field_id(cls, name, sig) }
}
