//! jnishim-ffi - Stable C ABI trampolines for the JNI function tables
//!
//! JNI is reached through tables of function pointers hanging off the
//! `JNIEnv*` and `JavaVM*` handles, which most foreign-function layers cannot
//! call directly. This crate exports one plain `extern "C"` symbol per
//! operation, each forwarding its arguments to the table entry unchanged and
//! returning the result unchanged.
//!
//! - [`EnvHandle`] / [`VmHandle`] wrap the raw handles and implement
//!   [`JniInterface`] / [`JavaVmInterface`] by dispatching through the tables
//! - the exported `jnishim_*` functions are thin calls into those traits
//! - VM creation loads libjvm at runtime (not on Android, where the VM
//!   already exists)
//!
//! # FFI Functions
//!
//! | Group | Functions |
//! |---|---|
//! | Lifecycle | `jnishim_create_java_vm`, `jnishim_create_java_vm_with_config`, `jnishim_attach_current_thread`, `jnishim_detach_current_thread`, `jnishim_get_env` |
//! | Lookup | `jnishim_find_class`, `jnishim_get_object_class`, `jnishim_get_method_id`, `jnishim_get_static_method_id`, `jnishim_get_field_id`, `jnishim_get_static_field_id` |
//! | Exceptions | `jnishim_exception_occurred`, `jnishim_exception_clear` |
//! | References | `jnishim_is_same_object`, `jnishim_is_instance_of`, `jnishim_new_global_ref`, `jnishim_delete_global_ref`, `jnishim_new_local_ref`, `jnishim_delete_local_ref` |
//! | Calls | `jnishim_new_object_a`, `jnishim_call_<type>_method_a`, `jnishim_call_static_<type>_method_a` |
//! | Fields | `jnishim_get_<type>_field`, `jnishim_get_static_<type>_field` |
//! | Arrays | `jnishim_new_byte_array`, `jnishim_get_byte_array_elements`, `jnishim_release_byte_array_elements`, `jnishim_get_array_length`, `jnishim_new_object_array`, `jnishim_get_object_array_element`, `jnishim_set_object_array_element` |
//! | Strings | `jnishim_get_string_length`, `jnishim_get_string_chars`, `jnishim_release_string_chars`, `jnishim_new_string` |
//! | Logging | `jnishim_set_log_callback`, `jnishim_set_log_level` |

mod exports;
mod handle;
mod interface;
#[cfg(not(target_os = "android"))]
pub mod launcher;
mod panic_guard;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use exports::*;
pub use handle::{EnvHandle, VmHandle};
pub use interface::{JavaVmInterface, JniInterface};
pub use panic_guard::catch_panic;

pub use jnishim_core::{
    JValue, JavaType, JniStatus, LogLevel, ReleaseMode, ShimError, ShimResult, VmConfig,
};
pub use jnishim_logging::LogCallback;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{EnvHandle, JavaVmInterface, JniInterface, VmHandle};
    pub use jnishim_core::prelude::*;
    pub use jnishim_logging::prelude::*;
}
