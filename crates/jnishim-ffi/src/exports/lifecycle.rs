//! VM creation and thread attachment

use crate::handle::{EnvHandle, VmHandle};
use crate::interface::JavaVmInterface;
#[cfg(not(target_os = "android"))]
use crate::launcher::{InitArgs, create_java_vm, create_with, load_create_fn};
#[cfg(not(target_os = "android"))]
use crate::panic_guard::catch_panic;
#[cfg(not(target_os = "android"))]
use jni::sys::JNI_VERSION_1_6;
use jni::sys::jint;
#[cfg(not(target_os = "android"))]
use jnishim_core::{ShimError, VmConfig};
#[cfg(not(target_os = "android"))]
use std::ffi::{CStr, CString, c_char, c_int};
use std::ffi::c_void;
#[cfg(not(target_os = "android"))]
use std::panic::AssertUnwindSafe;

/// Create the embedded VM.
///
/// Builds one `JavaVMOption` per string, in order and uninterpreted, and
/// calls `JNI_CreateJavaVM` with `JNI_VERSION_1_6` and unrecognized options
/// rejected. The calling thread is left attached; its environment handle is
/// available through [`jnishim_get_env`].
///
/// # Parameters
/// - `optstrings`: array of `n_options` NUL-terminated option strings
/// - `n_options`: number of entries in `optstrings`
///
/// # Returns
/// The VM handle, or null if creation failed. The failure is logged as
/// "Can't create Java VM" together with the status code.
///
/// # Safety
/// - `optstrings` must point to `n_options` readable pointers if non-null
/// - each non-null entry must be a valid NUL-terminated string
///
/// A null `optstrings` or a non-positive `n_options` means no options.
#[cfg(not(target_os = "android"))]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_create_java_vm(
    optstrings: *const *const c_char,
    n_options: c_int,
) -> VmHandle {
    catch_panic(
        "jnishim_create_java_vm",
        AssertUnwindSafe(|| unsafe { create_java_vm_impl(optstrings, n_options) }),
    )
    .unwrap_or_else(|_| VmHandle::null())
}

#[cfg(not(target_os = "android"))]
unsafe fn create_java_vm_impl(optstrings: *const *const c_char, n_options: c_int) -> VmHandle {
    jnishim_logging::init_logging();

    let strings = unsafe { copy_option_strings(optstrings, n_options) };
    let mut args = InitArgs::new(strings, JNI_VERSION_1_6, false);

    let created = load_create_fn(None).and_then(|create| unsafe { create_with(create, &mut args) });
    match created {
        Ok((vm, _env)) => vm,
        Err(e) => {
            report_creation_failure(&e);
            VmHandle::null()
        }
    }
}

#[cfg(not(target_os = "android"))]
unsafe fn copy_option_strings(optstrings: *const *const c_char, n_options: c_int) -> Vec<CString> {
    let count = match usize::try_from(n_options) {
        Ok(count) if !optstrings.is_null() => count,
        _ => return Vec::new(),
    };

    let raw = unsafe { std::slice::from_raw_parts(optstrings, count) };
    raw.iter()
        .enumerate()
        .filter_map(|(index, &option)| {
            if option.is_null() {
                tracing::warn!(index, "skipping null VM option string");
                None
            } else {
                Some(unsafe { CStr::from_ptr(option) }.to_owned())
            }
        })
        .collect()
}

/// Create the embedded VM from a JSON [`VmConfig`].
///
/// Same as [`jnishim_create_java_vm`], but the interface version, the
/// unrecognized-option policy and the libjvm location come from the config.
/// A null or empty config selects the defaults.
///
/// # Safety
/// `config_json` must be valid for `config_len` bytes if not null.
#[cfg(not(target_os = "android"))]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_create_java_vm_with_config(
    config_json: *const u8,
    config_len: usize,
) -> VmHandle {
    catch_panic(
        "jnishim_create_java_vm_with_config",
        AssertUnwindSafe(|| unsafe { create_java_vm_with_config_impl(config_json, config_len) }),
    )
    .unwrap_or_else(|_| VmHandle::null())
}

#[cfg(not(target_os = "android"))]
unsafe fn create_java_vm_with_config_impl(config_json: *const u8, config_len: usize) -> VmHandle {
    jnishim_logging::init_logging();

    let bytes = if config_json.is_null() || config_len == 0 {
        &[][..]
    } else {
        unsafe { std::slice::from_raw_parts(config_json, config_len) }
    };

    let created = VmConfig::from_json(bytes)
        .map_err(ShimError::from)
        .and_then(|config| create_java_vm(&config));
    match created {
        Ok((vm, _env)) => vm,
        Err(e) => {
            report_creation_failure(&e);
            VmHandle::null()
        }
    }
}

#[cfg(not(target_os = "android"))]
fn report_creation_failure(error: &ShimError) {
    // Negative statuses were already reported by the launcher
    if !matches!(error, ShimError::VmCreation { .. }) {
        tracing::error!(error = %error, code = error.error_code(), "Can't create Java VM");
    }
}

/// Attach the calling thread. On `JNI_OK`, `*p_env` holds its environment
/// handle.
///
/// # Safety
/// `vm` must be a live VM handle and `p_env` writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_attach_current_thread(
    vm: VmHandle,
    p_env: *mut EnvHandle,
    thr_args: *mut c_void,
) -> jint {
    unsafe { vm.attach_current_thread(p_env, thr_args) }
}

/// Detach the calling thread, invalidating its environment handle and local
/// references.
///
/// # Safety
/// `vm` must be a live VM handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_detach_current_thread(vm: VmHandle) -> jint {
    unsafe { vm.detach_current_thread() }
}

/// Look up the calling thread's environment handle. Returns `JNI_EDETACHED`
/// when the thread is not attached.
///
/// # Safety
/// `vm` must be a live VM handle and `p_env` writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jnishim_get_env(
    vm: VmHandle,
    p_env: *mut EnvHandle,
    version: jint,
) -> jint {
    unsafe { vm.get_env(p_env, version) }
}
