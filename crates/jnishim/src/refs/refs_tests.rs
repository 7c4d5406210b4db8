#![allow(non_snake_case)]

use super::*;
use crate::env::Env;
use jnishim_ffi::testing::FakeJvm;

#[test]
fn GlobalRef___dropped_on_other_thread___is_deleted() {
    let fake = FakeJvm::new();
    let env = unsafe { Env::new(fake.vm(), fake.env()) };
    let obj = env.new_string("shared").unwrap();
    let global = env.new_global_ref(obj).unwrap();
    assert_eq!(fake.global_ref_count(), 1);

    std::thread::spawn(move || drop(global)).join().unwrap();

    assert_eq!(fake.global_ref_count(), 0);
    assert_eq!(fake.attached_thread_count(), 1);
}

#[test]
fn GlobalRef___into_raw___keeps_reference_alive() {
    let fake = FakeJvm::new();
    let env = unsafe { Env::new(fake.vm(), fake.env()) };
    let obj = env.new_string("leaked").unwrap();
    let global = env.new_global_ref(obj).unwrap();

    let raw = global.into_raw();

    assert!(!raw.is_null());
    assert_eq!(fake.global_ref_count(), 1);
}

#[test]
fn GlobalRef___is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GlobalRef>();
}
