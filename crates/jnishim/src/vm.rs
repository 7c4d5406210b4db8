//! VM handle and thread attachment

use crate::env::Env;
use jni::sys::{JNI_VERSION_1_6, JavaVM};
use jnishim_core::{JniStatus, ShimError, ShimResult};
#[cfg(not(target_os = "android"))]
use jnishim_core::VmConfig;
use jnishim_ffi::{EnvHandle, JavaVmInterface, VmHandle};
use std::ptr;

/// A Java VM running in this process.
///
/// This is a plain handle: it does not own the VM and never destroys it.
/// Copies are cheap and may be sent to other threads, which then attach
/// through [`JavaVm::attach_current_thread`] or [`JavaVm::with_env`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JavaVm {
    handle: VmHandle,
}

impl JavaVm {
    /// Create the embedded VM described by `config`.
    ///
    /// The calling thread is left attached; [`JavaVm::get_env`] returns its
    /// environment.
    #[cfg(not(target_os = "android"))]
    pub fn create(config: &VmConfig) -> ShimResult<Self> {
        jnishim_logging::init_logging();

        let (handle, _env) = jnishim_ffi::launcher::create_java_vm(config)?;
        tracing::info!(
            options = config.options.len(),
            version = config.version,
            "Java VM created"
        );
        Ok(Self { handle })
    }

    /// Wrap a VM handle obtained elsewhere, e.g. from `JNI_OnLoad`.
    pub fn from_handle(handle: VmHandle) -> ShimResult<Self> {
        if handle.is_null() {
            return Err(ShimError::NullHandle("JavaVM"));
        }
        Ok(Self { handle })
    }

    /// # Safety
    /// `raw` must be null or point to a live `JavaVM`.
    pub unsafe fn from_raw(raw: *mut JavaVM) -> ShimResult<Self> {
        Self::from_handle(VmHandle::from_raw(raw))
    }

    pub fn handle(&self) -> VmHandle {
        self.handle
    }

    /// The calling thread's environment.
    ///
    /// Fails with [`ShimError::Status`] carrying [`JniStatus::Detached`] when
    /// the thread is not attached.
    pub fn get_env(&self) -> ShimResult<Env<'_>> {
        let env = self.current_env()?;
        Ok(unsafe { Env::new(self.handle, env) })
    }

    fn current_env(&self) -> ShimResult<EnvHandle> {
        let mut env = EnvHandle::null();
        let status = unsafe { self.handle.get_env(&mut env, JNI_VERSION_1_6) };
        check_status("GetEnv", status)?;
        Ok(env)
    }

    /// Attach the calling thread until the returned guard is dropped.
    ///
    /// A thread that is already attached gets a guard that leaves it attached
    /// on drop; only the attachment made by this call is undone.
    pub fn attach_current_thread(&self) -> ShimResult<AttachGuard<'_>> {
        match self.current_env() {
            Ok(env) => {
                return Ok(AttachGuard {
                    vm: self,
                    env: unsafe { Env::new(self.handle, env) },
                    detach_on_drop: false,
                });
            }
            Err(ShimError::Status {
                status: JniStatus::Detached,
                ..
            }) => {}
            Err(e) => return Err(e),
        }

        let mut env = EnvHandle::null();
        let status =
            unsafe { self.handle.attach_current_thread(&mut env, ptr::null_mut()) };
        check_status("AttachCurrentThread", status)?;
        if env.is_null() {
            return Err(ShimError::NullHandle("AttachCurrentThread"));
        }

        tracing::debug!(thread = ?std::thread::current().id(), "attached thread");
        Ok(AttachGuard {
            vm: self,
            env: unsafe { Env::new(self.handle, env) },
            detach_on_drop: true,
        })
    }

    /// Run `f` with the calling thread's environment.
    ///
    /// An already attached thread is used as is. Otherwise the thread is
    /// attached for the duration of `f` and detached afterwards, whatever `f`
    /// returns.
    pub fn with_env<F, R>(&self, f: F) -> ShimResult<R>
    where
        F: FnOnce(&Env<'_>) -> ShimResult<R>,
    {
        let guard = self.attach_current_thread()?;
        f(guard.env())
    }
}

/// Keeps the calling thread attached; detaches it on drop if the guard
/// attached it.
///
/// Not `Send`: attachment belongs to the thread that created the guard.
pub struct AttachGuard<'vm> {
    vm: &'vm JavaVm,
    env: Env<'vm>,
    detach_on_drop: bool,
}

impl<'vm> AttachGuard<'vm> {
    pub fn env(&self) -> &Env<'vm> {
        &self.env
    }

    pub fn vm(&self) -> &JavaVm {
        self.vm
    }

    /// Whether dropping the guard detaches the thread.
    pub fn detaches_on_drop(&self) -> bool {
        self.detach_on_drop
    }
}

impl Drop for AttachGuard<'_> {
    fn drop(&mut self) {
        if !self.detach_on_drop {
            return;
        }
        let status = unsafe { self.vm.handle.detach_current_thread() };
        if let Err(e) = check_status("DetachCurrentThread", status) {
            tracing::warn!(error = %e, "failed to detach thread");
        } else {
            tracing::debug!(thread = ?std::thread::current().id(), "detached thread");
        }
    }
}

fn check_status(operation: &'static str, status: jni::sys::jint) -> ShimResult<()> {
    JniStatus::from_code(status)
        .into_result()
        .map_err(|status| ShimError::Status { operation, status })
}

#[cfg(test)]
#[path = "vm/vm_tests.rs"]
mod vm_tests;
