#![allow(non_snake_case)]

use super::*;
use jni::sys::{JNI_EEXIST, JNI_OK, JNI_VERSION_1_6, JNI_VERSION_1_8};
use std::ffi::CStr;
use std::sync::Mutex;

#[derive(Debug, Clone, Default, PartialEq)]
struct Recorded {
    version: jint,
    n_options: jint,
    ignore_unrecognized: u8,
    options: Vec<String>,
    null_options_pointer: bool,
}

static RECORDED: Mutex<Option<Recorded>> = Mutex::new(None);
static LAUNCHER_TEST_LOCK: Mutex<()> = Mutex::new(());

const FAKE_VM: usize = 0x100;
const FAKE_ENV: usize = 0x200;

unsafe fn record(args: *mut c_void) {
    let args = unsafe { &*args.cast::<JavaVMInitArgs>() };
    let options = (0..args.nOptions as usize)
        .map(|i| {
            let option = unsafe { &*args.options.add(i) };
            unsafe { CStr::from_ptr(option.optionString) }
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    *RECORDED.lock().unwrap() = Some(Recorded {
        version: args.version,
        n_options: args.nOptions,
        ignore_unrecognized: args.ignoreUnrecognized,
        options,
        null_options_pointer: args.options.is_null(),
    });
}

unsafe extern "system" fn fake_create_ok(
    pvm: *mut *mut JavaVM,
    penv: *mut *mut c_void,
    args: *mut c_void,
) -> jint {
    unsafe {
        record(args);
        *pvm = FAKE_VM as *mut JavaVM;
        *penv = FAKE_ENV as *mut c_void;
    }
    JNI_OK
}

unsafe extern "system" fn fake_create_exists(
    _pvm: *mut *mut JavaVM,
    _penv: *mut *mut c_void,
    args: *mut c_void,
) -> jint {
    unsafe { record(args) };
    JNI_EEXIST
}

unsafe extern "system" fn fake_create_ok_without_vm(
    _pvm: *mut *mut JavaVM,
    _penv: *mut *mut c_void,
    _args: *mut c_void,
) -> jint {
    JNI_OK
}

fn take_recorded() -> Option<Recorded> {
    RECORDED.lock().unwrap().take()
}

fn c_strings(options: &[&str]) -> Vec<CString> {
    options.iter().map(|o| CString::new(*o).unwrap()).collect()
}

#[test]
fn InitArgs___new___fills_fixed_policy_fields() {
    let mut args = InitArgs::new(c_strings(&["-Xmx64m"]), JNI_VERSION_1_6, false);

    let raw = unsafe { &*args.as_mut_ptr() };
    assert_eq!(raw.version, 0x0001_0006);
    assert_eq!(raw.nOptions, 1);
    assert_eq!(raw.ignoreUnrecognized, JNI_FALSE);
}

#[test]
fn InitArgs___no_options___passes_null_array() {
    let mut args = InitArgs::new(Vec::new(), JNI_VERSION_1_6, false);

    let raw = unsafe { &*args.as_mut_ptr() };
    assert!(args.is_empty());
    assert_eq!(raw.nOptions, 0);
    assert!(raw.options.is_null());
}

#[test]
fn InitArgs___from_config___keeps_option_order() {
    let config = VmConfig::with_options(["-Xmx64m", "-Djava.class.path=app.jar", "-verbose:gc"]);

    let args = InitArgs::from_config(&config).unwrap();

    let strings: Vec<&str> = args
        .option_strings()
        .iter()
        .map(|s| s.to_str().unwrap())
        .collect();
    assert_eq!(strings, ["-Xmx64m", "-Djava.class.path=app.jar", "-verbose:gc"]);
}

#[test]
fn InitArgs___from_config_with_nul___returns_invalid_option() {
    let config = VmConfig::with_options(["-Dbad=\0value"]);

    let result = InitArgs::from_config(&config);

    assert!(matches!(result, Err(ShimError::InvalidOption(_))));
}

#[test]
fn create_with___successful_create___returns_handles_and_forwards_args() {
    let _guard = LAUNCHER_TEST_LOCK.lock().unwrap();
    take_recorded();
    let mut args = InitArgs::new(c_strings(&["-Xmx64m", "-Dfoo=bar"]), JNI_VERSION_1_6, false);

    let (vm, env) = unsafe { create_with(fake_create_ok, &mut args) }.unwrap();

    assert_eq!(vm.as_raw() as usize, FAKE_VM);
    assert_eq!(env.as_raw() as usize, FAKE_ENV);
    let recorded = take_recorded().unwrap();
    assert_eq!(recorded.version, JNI_VERSION_1_6);
    assert_eq!(recorded.n_options, 2);
    assert_eq!(recorded.ignore_unrecognized, 0);
    assert_eq!(recorded.options, ["-Xmx64m", "-Dfoo=bar"]);
}

#[test]
fn create_with___zero_options___passes_null_option_array() {
    let _guard = LAUNCHER_TEST_LOCK.lock().unwrap();
    take_recorded();
    let mut args = InitArgs::new(Vec::new(), JNI_VERSION_1_6, false);

    unsafe { create_with(fake_create_ok, &mut args) }.unwrap();

    let recorded = take_recorded().unwrap();
    assert_eq!(recorded.n_options, 0);
    assert!(recorded.null_options_pointer);
}

#[test]
fn create_with___config_policy___is_forwarded() {
    let _guard = LAUNCHER_TEST_LOCK.lock().unwrap();
    take_recorded();
    let config = VmConfig {
        version: JNI_VERSION_1_8,
        ignore_unrecognized: true,
        ..VmConfig::default()
    };
    let mut args = InitArgs::from_config(&config).unwrap();

    unsafe { create_with(fake_create_ok, &mut args) }.unwrap();

    let recorded = take_recorded().unwrap();
    assert_eq!(recorded.version, JNI_VERSION_1_8);
    assert_eq!(recorded.ignore_unrecognized, 1);
}

#[test]
fn create_with___negative_status___returns_vm_creation_error() {
    let _guard = LAUNCHER_TEST_LOCK.lock().unwrap();
    let mut args = InitArgs::new(c_strings(&["-Xmx64m"]), JNI_VERSION_1_6, false);

    let result = unsafe { create_with(fake_create_exists, &mut args) };

    match result {
        Err(ShimError::VmCreation { status }) => assert_eq!(status, JniStatus::AlreadyExists),
        other => panic!("Expected VmCreation error, got {other:?}"),
    }
}

#[test]
fn create_with___ok_without_vm___returns_null_handle_error() {
    let mut args = InitArgs::new(Vec::new(), JNI_VERSION_1_6, false);

    let result = unsafe { create_with(fake_create_ok_without_vm, &mut args) };

    assert!(matches!(result, Err(ShimError::NullHandle("JNI_CreateJavaVM"))));
}

#[test]
fn load_create_fn___missing_explicit_path___returns_library_load_error() {
    let result = load_create_fn(Some(Path::new("/nonexistent/jnishim/libjvm.so")));

    match result {
        Err(ShimError::LibraryLoad(message)) => assert!(message.contains("/nonexistent/jnishim")),
        Err(other) => panic!("Expected LibraryLoad error, got {other:?}"),
        Ok(_) => panic!("Expected LibraryLoad error, got a create function"),
    }
}

#[test]
fn candidates_from_java_home___lists_server_vm_first() {
    let home = Path::new("/opt/jdk");

    let candidates = candidates_from_java_home(home);

    assert_eq!(
        candidates[0],
        home.join("lib").join("server").join(libjvm_filename())
    );
    assert!(candidates.iter().all(|c| c.starts_with(home)));
}
