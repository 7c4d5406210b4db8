//! Global references

use crate::vm::JavaVm;
use jni::sys::jobject;
use jnishim_ffi::JniInterface;
use std::mem::ManuallyDrop;

/// A global reference, deleted when dropped.
///
/// Global references are valid on every thread, so this may be sent and
/// shared. Dropping it on a thread that is not attached attaches that thread
/// just long enough to delete the reference.
#[derive(Debug)]
pub struct GlobalRef {
    vm: JavaVm,
    obj: jobject,
}

// A global reference is not tied to the thread that created it.
unsafe impl Send for GlobalRef {}
unsafe impl Sync for GlobalRef {}

impl GlobalRef {
    /// # Safety
    /// `obj` must be a global reference created in `vm`, owned by nobody else.
    pub unsafe fn from_raw(vm: JavaVm, obj: jobject) -> Self {
        Self { vm, obj }
    }

    pub fn as_obj(&self) -> jobject {
        self.obj
    }

    pub fn vm(&self) -> JavaVm {
        self.vm
    }

    /// Give up ownership without deleting the reference.
    pub fn into_raw(self) -> jobject {
        ManuallyDrop::new(self).obj
    }
}

impl Drop for GlobalRef {
    fn drop(&mut self) {
        if self.obj.is_null() {
            return;
        }
        let obj = self.obj;
        let deleted = self.vm.with_env(|env| {
            unsafe { env.handle().delete_global_ref(obj) };
            Ok(())
        });
        if let Err(e) = deleted {
            tracing::warn!(error = %e, "leaking global reference");
        }
    }
}

#[cfg(test)]
#[path = "refs/refs_tests.rs"]
mod refs_tests;
