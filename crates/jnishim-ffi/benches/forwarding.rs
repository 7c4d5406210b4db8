//! Forwarding overhead benchmarks
//!
//! Each pair measures the same JNI operation twice against the in-process
//! fake tables: once through the function table directly and once through
//! the exported trampoline. The difference is the cost of the shim.

use criterion::{Criterion, criterion_group, criterion_main};
use jni::sys::{JNI_VERSION_1_6, JNINativeInterface_, jvalue};
use jnishim_ffi::testing::{FIXTURE_CLASS, FakeJvm};
use jnishim_ffi::*;
use std::ffi::CString;
use std::hint::black_box;

fn table(env: EnvHandle) -> &'static JNINativeInterface_ {
    unsafe { &**env.as_raw() }
}

fn bench_static_call(c: &mut Criterion) {
    let fake = FakeJvm::new();
    let env = fake.env();
    let raw = env.as_raw();
    let (class_name, name, sig) = (
        CString::new(FIXTURE_CLASS).unwrap(),
        CString::new("echo").unwrap(),
        CString::new("(I)I").unwrap(),
    );
    let cls = unsafe { jnishim_find_class(env, class_name.as_ptr()) };
    let method = unsafe { jnishim_get_static_method_id(env, cls, name.as_ptr(), sig.as_ptr()) };
    let args = [jvalue { i: 7 }];
    let direct = table(env).CallStaticIntMethodA.unwrap();

    let mut group = c.benchmark_group("call_static_int_method_a");

    group.bench_function("direct", |b| {
        b.iter(|| unsafe { black_box(direct(raw, cls, method, args.as_ptr())) })
    });

    group.bench_function("trampoline", |b| {
        b.iter(|| unsafe { black_box(jnishim_call_static_int_method_a(env, cls, method, args.as_ptr())) })
    });

    group.finish();
}

fn bench_static_field(c: &mut Criterion) {
    let fake = FakeJvm::new();
    let env = fake.env();
    let raw = env.as_raw();
    let (class_name, name, sig) = (
        CString::new(FIXTURE_CLASS).unwrap(),
        CString::new("VALUE").unwrap(),
        CString::new("I").unwrap(),
    );
    let cls = unsafe { jnishim_find_class(env, class_name.as_ptr()) };
    let field = unsafe { jnishim_get_static_field_id(env, cls, name.as_ptr(), sig.as_ptr()) };
    let direct = table(env).GetStaticIntField.unwrap();

    let mut group = c.benchmark_group("get_static_int_field");

    group.bench_function("direct", |b| {
        b.iter(|| unsafe { black_box(direct(raw, cls, field)) })
    });

    group.bench_function("trampoline", |b| {
        b.iter(|| unsafe { black_box(jnishim_get_static_int_field(env, cls, field)) })
    });

    group.finish();
}

fn bench_get_env(c: &mut Criterion) {
    let fake = FakeJvm::new();
    let vm = fake.vm();

    let mut group = c.benchmark_group("get_env");

    group.bench_function("trampoline", |b| {
        b.iter(|| {
            let mut env = EnvHandle::null();
            let status = unsafe { jnishim_get_env(vm, &mut env, JNI_VERSION_1_6) };
            black_box((status, env))
        })
    });

    group.finish();
}

fn bench_null_handle(c: &mut Criterion) {
    let env = EnvHandle::null();

    c.bench_function("null_env_find_class", |b| {
        b.iter(|| unsafe { black_box(jnishim_find_class(black_box(env), c"java/lang/Object".as_ptr())) })
    });
}

criterion_group!(
    benches,
    bench_static_call,
    bench_static_field,
    bench_get_env,
    bench_null_handle,
);
criterion_main!(benches);
