//! Reference identity and lifetime
//!
//! No bookkeeping happens here: every global reference must be deleted
//! exactly once by the caller, and local references die with their thread's
//! native frame or on detach.
//!
//! # Safety
//! `env` must be the calling thread's environment handle and every
//! reference argument must be live (or null where the interface allows it).

#![allow(clippy::missing_safety_doc)]

use crate::handle::EnvHandle;
use crate::interface::JniInterface;
use jni::sys::{jboolean, jclass, jobject};

/// `JNI_TRUE` if both references denote the same object. Two nulls compare
/// equal.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_is_same_object(
    env: EnvHandle,
    ref1: jobject,
    ref2: jobject,
) -> jboolean {
    unsafe { env.is_same_object(ref1, ref2) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_is_instance_of(
    env: EnvHandle,
    obj: jobject,
    cls: jclass,
) -> jboolean {
    unsafe { env.is_instance_of(obj, cls) }
}

/// Promote `obj` to a global reference, valid on any thread until deleted.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_new_global_ref(env: EnvHandle, obj: jobject) -> jobject {
    unsafe { env.new_global_ref(obj) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_delete_global_ref(env: EnvHandle, obj: jobject) {
    unsafe { env.delete_global_ref(obj) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_new_local_ref(env: EnvHandle, obj: jobject) -> jobject {
    unsafe { env.new_local_ref(obj) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_delete_local_ref(env: EnvHandle, obj: jobject) {
    unsafe { env.delete_local_ref(obj) }
}
