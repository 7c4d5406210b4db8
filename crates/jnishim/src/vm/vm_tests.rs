#![allow(non_snake_case)]

use super::*;
use jnishim_ffi::testing::FakeJvm;

#[test]
fn JavaVm___from_null_handle___is_rejected() {
    let result = JavaVm::from_handle(VmHandle::null());

    assert!(matches!(result, Err(ShimError::NullHandle("JavaVM"))));
}

#[test]
fn JavaVm___get_env_on_creating_thread___returns_shared_env() {
    let fake = FakeJvm::new();
    let vm = JavaVm::from_handle(fake.vm()).unwrap();

    let env = vm.get_env().unwrap();

    assert_eq!(env.handle(), fake.env());
}

#[test]
fn JavaVm___get_env_on_detached_thread___reports_detached_status() {
    let fake = FakeJvm::new();
    let vm = JavaVm::from_handle(fake.vm()).unwrap();

    let status = std::thread::spawn(move || vm.get_env().map(|_| ()).unwrap_err().status())
        .join()
        .unwrap();

    assert_eq!(status, Some(JniStatus::Detached));
}

#[test]
fn AttachGuard___dropped___detaches_thread() {
    let fake = FakeJvm::new();
    let vm = JavaVm::from_handle(fake.vm()).unwrap();

    let (attached_inside, detached_after) = std::thread::spawn(move || {
        let guard = vm.attach_current_thread().unwrap();
        let attached_inside = !guard.env().handle().is_null() && vm.get_env().is_ok();
        drop(guard);
        (attached_inside, vm.get_env().is_err())
    })
    .join()
    .unwrap();

    assert!(attached_inside);
    assert!(detached_after);
    assert_eq!(fake.attached_thread_count(), 1);
}

#[test]
fn JavaVm___with_env_on_attached_thread___keeps_thread_attached() {
    let fake = FakeJvm::new();
    let vm = JavaVm::from_handle(fake.vm()).unwrap();

    let value = vm.with_env(|env| Ok(env.handle())).unwrap();

    assert_eq!(value, fake.env());
    assert!(fake.is_current_thread_attached());
}

#[test]
fn JavaVm___with_env_on_detached_thread___attaches_only_for_closure() {
    let fake = FakeJvm::new();
    let vm = JavaVm::from_handle(fake.vm()).unwrap();

    let (inside, after) = std::thread::spawn(move || {
        let inside = vm.with_env(|_env| Ok(vm.get_env().is_ok())).unwrap();
        (inside, vm.get_env().is_ok())
    })
    .join()
    .unwrap();

    assert!(inside);
    assert!(!after);
    assert_eq!(fake.attached_thread_count(), 1);
}

#[test]
fn JavaVm___with_env_closure_error___still_detaches() {
    let fake = FakeJvm::new();
    let vm = JavaVm::from_handle(fake.vm()).unwrap();

    let result = std::thread::spawn(move || {
        vm.with_env(|env| env.find_class("does/not/Exist").map(|_| ()))
    })
    .join()
    .unwrap();

    assert!(matches!(result, Err(ShimError::JavaException(_))));
    assert_eq!(fake.attached_thread_count(), 1);
}

#[test]
fn JavaVm___emptied_get_env_slot___reports_jni_err() {
    let mut fake = FakeJvm::new();
    fake.vm_table_mut().GetEnv = None;
    let vm = JavaVm::from_handle(fake.vm()).unwrap();

    let err = vm.with_env(|_env| Ok(())).unwrap_err();

    assert_eq!(err.status(), Some(JniStatus::Error));
}

#[test]
fn AttachGuard___on_already_attached_thread___leaves_thread_attached() {
    let fake = FakeJvm::new();
    let vm = JavaVm::from_handle(fake.vm()).unwrap();
    let outer = vm.get_env().unwrap();

    {
        let guard = vm.attach_current_thread().unwrap();
        assert!(!guard.detaches_on_drop());
        assert_eq!(guard.env().handle(), outer.handle());
    }

    assert!(fake.is_current_thread_attached());
    assert!(vm.get_env().is_ok());
    assert!(outer.find_class("java/lang/String").is_ok());
}

#[test]
fn AttachGuard___on_detached_thread___owns_the_attachment() {
    let fake = FakeJvm::new();
    let vm = JavaVm::from_handle(fake.vm()).unwrap();

    let (owned, nested_owned) = std::thread::spawn(move || {
        let guard = vm.attach_current_thread().unwrap();
        let nested = vm.attach_current_thread().unwrap();
        (guard.detaches_on_drop(), nested.detaches_on_drop())
    })
    .join()
    .unwrap();

    assert!(owned);
    assert!(!nested_owned);
    assert_eq!(fake.attached_thread_count(), 1);
}
