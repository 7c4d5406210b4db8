//! Embedded VM creation
//!
//! A cdylib cannot link against libjvm at build time, so `JNI_CreateJavaVM`
//! is resolved at runtime. Search order:
//!
//! 1. an explicit path (`VmConfig::libjvm_path`)
//! 2. the `JNISHIM_LIBJVM` environment variable
//! 3. symbols already present in the process (libjvm linked by the host)
//! 4. the usual locations under `JAVA_HOME`
//!
//! The library stays loaded for the rest of the process.

use crate::handle::{EnvHandle, VmHandle};
use jni::sys::{
    JNI_FALSE, JNI_TRUE, JNIEnv, JavaVM, JavaVMInitArgs, JavaVMOption, jint,
};
use jnishim_core::{JniStatus, ShimError, ShimResult, VmConfig};
use libloading::Library;
use once_cell::sync::OnceCell;
use std::ffi::{CString, c_char, c_void};
use std::path::{Path, PathBuf};
use std::ptr;

/// Signature of `JNI_CreateJavaVM`
pub type CreateJavaVmFn = unsafe extern "system" fn(
    pvm: *mut *mut JavaVM,
    penv: *mut *mut c_void,
    args: *mut c_void,
) -> jint;

/// Environment variable naming the libjvm to load
pub const LIBJVM_ENV_VAR: &str = "JNISHIM_LIBJVM";

const CREATE_SYMBOL: &[u8] = b"JNI_CreateJavaVM\0";

struct Libjvm {
    _library: Library,
    create: CreateJavaVmFn,
}

static LIBJVM: OnceCell<Libjvm> = OnceCell::new();

/// The transient option table handed to `JNI_CreateJavaVM`.
///
/// Owns the option strings and the `JavaVMOption` array that
/// `JavaVMInitArgs::options` points into; both live until this is dropped.
pub struct InitArgs {
    strings: Vec<CString>,
    options: Vec<JavaVMOption>,
    args: JavaVMInitArgs,
}

impl InitArgs {
    pub fn new(strings: Vec<CString>, version: jint, ignore_unrecognized: bool) -> Self {
        let mut options: Vec<JavaVMOption> = strings
            .iter()
            .map(|s| JavaVMOption {
                optionString: s.as_ptr() as *mut c_char,
                extraInfo: ptr::null_mut(),
            })
            .collect();

        let args = JavaVMInitArgs {
            version,
            nOptions: options.len() as jint,
            options: if options.is_empty() {
                ptr::null_mut()
            } else {
                options.as_mut_ptr()
            },
            ignoreUnrecognized: if ignore_unrecognized {
                JNI_TRUE
            } else {
                JNI_FALSE
            },
        };

        Self {
            strings,
            options,
            args,
        }
    }

    /// Option table for `config`. Fails if an option contains a NUL byte.
    pub fn from_config(config: &VmConfig) -> ShimResult<Self> {
        let strings = config
            .options
            .iter()
            .map(|option| CString::new(option.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(strings, config.version, config.ignore_unrecognized))
    }

    pub fn version(&self) -> jint {
        self.args.version
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn option_strings(&self) -> &[CString] {
        &self.strings
    }

    pub fn as_mut_ptr(&mut self) -> *mut JavaVMInitArgs {
        &mut self.args
    }
}

/// Call `create` with `args`.
///
/// A negative status is logged as "Can't create Java VM" and returned as
/// [`ShimError::VmCreation`]. On success the calling thread is attached and
/// the returned environment handle belongs to it.
///
/// # Safety
/// `create` must be a valid `JNI_CreateJavaVM`, and the library it came from
/// must stay loaded while the VM is in use.
pub unsafe fn create_with(
    create: CreateJavaVmFn,
    args: &mut InitArgs,
) -> ShimResult<(VmHandle, EnvHandle)> {
    let mut vm: *mut JavaVM = ptr::null_mut();
    let mut env: *mut JNIEnv = ptr::null_mut();

    let res = unsafe {
        create(
            &mut vm,
            (&mut env as *mut *mut JNIEnv).cast::<*mut c_void>(),
            args.as_mut_ptr().cast::<c_void>(),
        )
    };
    if res < 0 {
        tracing::error!(status = res, "Can't create Java VM");
        return Err(ShimError::VmCreation {
            status: JniStatus::from_code(res),
        });
    }
    if vm.is_null() {
        return Err(ShimError::NullHandle("JNI_CreateJavaVM"));
    }

    tracing::debug!(options = args.len(), version = args.version(), "created Java VM");
    Ok((VmHandle::from_raw(vm), EnvHandle::from_raw(env)))
}

/// Locate libjvm for `config` and create the VM.
pub fn create_java_vm(config: &VmConfig) -> ShimResult<(VmHandle, EnvHandle)> {
    let mut args = InitArgs::from_config(config)?;
    let create = load_create_fn(config.libjvm_path.as_deref())?;
    unsafe { create_with(create, &mut args) }
}

/// Resolve `JNI_CreateJavaVM`, loading libjvm on first use.
///
/// Once a library is loaded it is reused; later `explicit` paths are ignored.
pub fn load_create_fn(explicit: Option<&Path>) -> ShimResult<CreateJavaVmFn> {
    LIBJVM
        .get_or_try_init(|| resolve_libjvm(explicit))
        .map(|libjvm| libjvm.create)
}

fn resolve_libjvm(explicit: Option<&Path>) -> ShimResult<Libjvm> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }

    if let Some(path) = std::env::var_os(LIBJVM_ENV_VAR) {
        return load_from_path(Path::new(&path));
    }

    if let Some(libjvm) = from_current_process() {
        tracing::debug!("using JNI_CreateJavaVM already linked into the process");
        return Ok(libjvm);
    }

    let java_home = std::env::var_os("JAVA_HOME").ok_or_else(|| {
        ShimError::LibjvmNotFound(format!(
            "JAVA_HOME is not set. Set JAVA_HOME or {LIBJVM_ENV_VAR} to locate libjvm."
        ))
    })?;
    let java_home = PathBuf::from(java_home);
    let candidate = candidates_from_java_home(&java_home)
        .into_iter()
        .find(|p| p.exists())
        .ok_or_else(|| {
            ShimError::LibjvmNotFound(format!(
                "Could not find {} under JAVA_HOME={}",
                libjvm_filename(),
                java_home.display()
            ))
        })?;
    load_from_path(&candidate)
}

fn load_from_path(path: &Path) -> ShimResult<Libjvm> {
    let library = unsafe { Library::new(path) }
        .map_err(|e| ShimError::LibraryLoad(format!("{}: {}", path.display(), e)))?;

    let create = unsafe { library.get::<CreateJavaVmFn>(CREATE_SYMBOL) }
        .map(|symbol| *symbol)
        .map_err(|e| ShimError::SymbolNotFound(format!("JNI_CreateJavaVM: {e}")))?;

    tracing::debug!(path = %path.display(), "loaded libjvm");
    Ok(Libjvm {
        _library: library,
        create,
    })
}

fn from_current_process() -> Option<Libjvm> {
    #[cfg(unix)]
    let library: Library = libloading::os::unix::Library::this().into();
    #[cfg(windows)]
    let library: Library = libloading::os::windows::Library::this().ok()?.into();

    let create = unsafe { library.get::<CreateJavaVmFn>(CREATE_SYMBOL) }
        .map(|symbol| *symbol)
        .ok()?;
    Some(Libjvm {
        _library: library,
        create,
    })
}

fn libjvm_filename() -> &'static str {
    if cfg!(target_os = "windows") {
        "jvm.dll"
    } else if cfg!(target_os = "macos") {
        "libjvm.dylib"
    } else {
        "libjvm.so"
    }
}

/// Where a JDK or JRE rooted at `java_home` keeps libjvm
pub fn candidates_from_java_home(java_home: &Path) -> Vec<PathBuf> {
    let filename = libjvm_filename();
    let arch = std::env::consts::ARCH;

    let mut rels = vec![
        format!("lib/server/{filename}"),
        format!("jre/lib/server/{filename}"),
        format!("lib/{arch}/server/{filename}"),
        format!("jre/lib/{arch}/server/{filename}"),
    ];

    if cfg!(target_os = "windows") {
        rels.push(format!("bin/server/{filename}"));
        rels.push(format!("jre/bin/server/{filename}"));
        rels.push(format!("bin/client/{filename}"));
        rels.push(format!("jre/bin/client/{filename}"));
    }

    rels.into_iter().map(|r| java_home.join(r)).collect()
}

#[cfg(test)]
#[path = "launcher/launcher_tests.rs"]
mod launcher_tests;
