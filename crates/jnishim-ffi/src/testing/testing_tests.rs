#![allow(non_snake_case)]

use super::*;
use crate::interface::{JavaVmInterface, JniInterface};

#[test]
fn FakeJvm___new___attaches_creating_thread() {
    let fake = FakeJvm::new();

    assert!(fake.is_current_thread_attached());
    assert_eq!(fake.attached_thread_count(), 1);
}

#[test]
fn FakeJvm___get_env_on_other_thread___reports_detached() {
    let fake = FakeJvm::new();
    let vm = fake.vm();

    let status = std::thread::scope(|s| {
        s.spawn(|| {
            let mut env = EnvHandle::null();
            unsafe { vm.get_env(&mut env, jni::sys::JNI_VERSION_1_6) }
        })
        .join()
        .unwrap()
    });

    assert_eq!(status, JNI_EDETACHED);
}

#[test]
fn FakeJvm___get_env_unknown_version___reports_eversion() {
    let fake = FakeJvm::new();
    let mut env = EnvHandle::null();

    let status = unsafe { fake.vm().get_env(&mut env, 0x7fff_0000) };

    assert_eq!(status, JNI_EVERSION);
    assert!(env.is_null());
}

#[test]
fn FakeJvm___global_ref___aliases_same_object() {
    let fake = FakeJvm::new();
    let env = fake.env();

    unsafe {
        let class = env.find_class(c"java/lang/Object".as_ptr());
        let global = env.new_global_ref(class);

        assert_ne!(class, global);
        assert_eq!(env.is_same_object(class, global), JNI_TRUE);
        assert_eq!(fake.global_ref_count(), 1);

        env.delete_global_ref(global);
    }

    assert_eq!(fake.global_ref_count(), 0);
}

#[test]
fn FakeJvm___pending_exception___uses_throwable_to_string() {
    let fake = FakeJvm::new();

    unsafe { fake.env().find_class(c"does/not/Exist".as_ptr()) };

    assert_eq!(
        fake.pending_exception().as_deref(),
        Some("java.lang.NoClassDefFoundError: does/not/Exist")
    );
}

#[test]
fn FakeJvm___store_wrong_element_type___raises_array_store_exception() {
    let fake = FakeJvm::new();
    let env = fake.env();

    unsafe {
        let string_class = env.find_class(c"java/lang/String".as_ptr());
        let array = env.new_object_array(1, string_class, ptr::null_mut());
        let object_class = env.find_class(c"java/lang/Object".as_ptr());

        env.set_object_array_element(array, 0, object_class);
    }

    let pending = fake.pending_exception().unwrap();
    assert!(pending.starts_with("java.lang.ArrayStoreException"));
}

#[test]
fn FakeJvm___drop_with_pinned_buffers___releases_them() {
    let fake = FakeJvm::new();
    let env = fake.env();

    unsafe {
        let array = env.new_byte_array(8);
        env.get_byte_array_elements(array);
    }

    assert_eq!(fake.pinned_buffer_count(), 1);
    drop(fake);
}
