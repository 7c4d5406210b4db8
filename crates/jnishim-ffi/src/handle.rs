//! VM and environment handles, and the dispatch through their function tables

use crate::interface::{JavaVmInterface, JniInterface};
use jni::sys::{
    JNI_ERR, JNI_FALSE, JNIEnv, JavaVM, jarray, jboolean, jbyte, jbyteArray, jchar, jclass,
    jdouble, jfieldID, jfloat, jint, jlong, jmethodID, jobject, jobjectArray, jshort, jsize,
    jstring, jthrowable, jvalue,
};
use std::ffi::{c_char, c_void};
use std::ptr;

/// Forward one call through a `JNIEnv*` function table.
///
/// A null handle, null table or empty slot logs an error and evaluates to
/// `$fallback` instead of dereferencing anything.
macro_rules! env_call {
    ($env:expr, $slot:ident($($arg:expr),* $(,)?) else $fallback:expr) => {{
        let env: *mut JNIEnv = $env;
        if env.is_null() || unsafe { (*env).is_null() } {
            table_unavailable("JNIEnv", stringify!($slot));
            $fallback
        } else {
            match unsafe { (**env).$slot } {
                Some(function) => unsafe { function(env, $($arg),*) },
                None => {
                    slot_missing("JNIEnv", stringify!($slot));
                    $fallback
                }
            }
        }
    }};
}

/// Forward one call through a `JavaVM*` invocation table.
macro_rules! vm_call {
    ($vm:expr, $slot:ident($($arg:expr),* $(,)?) else $fallback:expr) => {{
        let vm: *mut JavaVM = $vm;
        if vm.is_null() || unsafe { (*vm).is_null() } {
            table_unavailable("JavaVM", stringify!($slot));
            $fallback
        } else {
            match unsafe { (**vm).$slot } {
                Some(function) => unsafe { function(vm, $($arg),*) },
                None => {
                    slot_missing("JavaVM", stringify!($slot));
                    $fallback
                }
            }
        }
    }};
}

#[cold]
fn table_unavailable(table: &'static str, slot: &'static str) {
    tracing::error!(table, slot, "null handle or function table");
}

#[cold]
fn slot_missing(table: &'static str, slot: &'static str) {
    tracing::error!(table, slot, "function table slot is empty");
}

/// A `JavaVM*`, valid process-wide once the VM exists.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VmHandle(*mut JavaVM);

// A JavaVM* may be used from any thread; attach/detach/get-env are the
// operations meant to be called on threads other than the creator.
unsafe impl Send for VmHandle {}
unsafe impl Sync for VmHandle {}

impl VmHandle {
    pub const fn null() -> Self {
        Self(ptr::null_mut())
    }

    pub const fn from_raw(vm: *mut JavaVM) -> Self {
        Self(vm)
    }

    pub const fn as_raw(&self) -> *mut JavaVM {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl Default for VmHandle {
    fn default() -> Self {
        Self::null()
    }
}

/// A `JNIEnv*`, valid only on the thread it was obtained for.
///
/// Raw pointer field keeps this `!Send` and `!Sync`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnvHandle(*mut JNIEnv);

impl EnvHandle {
    pub const fn null() -> Self {
        Self(ptr::null_mut())
    }

    pub const fn from_raw(env: *mut JNIEnv) -> Self {
        Self(env)
    }

    pub const fn as_raw(&self) -> *mut JNIEnv {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl Default for EnvHandle {
    fn default() -> Self {
        Self::null()
    }
}

impl JavaVmInterface for VmHandle {
    unsafe fn attach_current_thread(&self, p_env: *mut EnvHandle, thr_args: *mut c_void) -> jint {
        vm_call!(self.0, AttachCurrentThread(p_env.cast::<*mut c_void>(), thr_args) else JNI_ERR)
    }

    unsafe fn detach_current_thread(&self) -> jint {
        vm_call!(self.0, DetachCurrentThread() else JNI_ERR)
    }

    unsafe fn get_env(&self, p_env: *mut EnvHandle, version: jint) -> jint {
        vm_call!(self.0, GetEnv(p_env.cast::<*mut c_void>(), version) else JNI_ERR)
    }
}

impl JniInterface for EnvHandle {
    unsafe fn find_class(&self, name: *const c_char) -> jclass {
        env_call!(self.0, FindClass(name) else ptr::null_mut())
    }

    unsafe fn get_object_class(&self, obj: jobject) -> jclass {
        env_call!(self.0, GetObjectClass(obj) else ptr::null_mut())
    }

    unsafe fn get_method_id(
        &self,
        cls: jclass,
        name: *const c_char,
        sig: *const c_char,
    ) -> jmethodID {
        env_call!(self.0, GetMethodID(cls, name, sig) else ptr::null_mut())
    }

    unsafe fn get_static_method_id(
        &self,
        cls: jclass,
        name: *const c_char,
        sig: *const c_char,
    ) -> jmethodID {
        env_call!(self.0, GetStaticMethodID(cls, name, sig) else ptr::null_mut())
    }

    unsafe fn get_field_id(&self, cls: jclass, name: *const c_char, sig: *const c_char) -> jfieldID {
        env_call!(self.0, GetFieldID(cls, name, sig) else ptr::null_mut())
    }

    unsafe fn get_static_field_id(
        &self,
        cls: jclass,
        name: *const c_char,
        sig: *const c_char,
    ) -> jfieldID {
        env_call!(self.0, GetStaticFieldID(cls, name, sig) else ptr::null_mut())
    }

    unsafe fn exception_occurred(&self) -> jthrowable {
        env_call!(self.0, ExceptionOccurred() else ptr::null_mut())
    }

    unsafe fn exception_clear(&self) {
        env_call!(self.0, ExceptionClear() else ())
    }

    unsafe fn is_same_object(&self, ref1: jobject, ref2: jobject) -> jboolean {
        env_call!(self.0, IsSameObject(ref1, ref2) else JNI_FALSE)
    }

    unsafe fn is_instance_of(&self, obj: jobject, cls: jclass) -> jboolean {
        env_call!(self.0, IsInstanceOf(obj, cls) else JNI_FALSE)
    }

    unsafe fn new_global_ref(&self, obj: jobject) -> jobject {
        env_call!(self.0, NewGlobalRef(obj) else ptr::null_mut())
    }

    unsafe fn delete_global_ref(&self, obj: jobject) {
        env_call!(self.0, DeleteGlobalRef(obj) else ())
    }

    unsafe fn new_local_ref(&self, obj: jobject) -> jobject {
        env_call!(self.0, NewLocalRef(obj) else ptr::null_mut())
    }

    unsafe fn delete_local_ref(&self, obj: jobject) {
        env_call!(self.0, DeleteLocalRef(obj) else ())
    }

    unsafe fn new_object_a(&self, cls: jclass, method: jmethodID, args: *const jvalue) -> jobject {
        env_call!(self.0, NewObjectA(cls, method, args) else ptr::null_mut())
    }

    unsafe fn call_void_method_a(&self, obj: jobject, method: jmethodID, args: *const jvalue) {
        env_call!(self.0, CallVoidMethodA(obj, method, args) else ())
    }

    unsafe fn call_object_method_a(
        &self,
        obj: jobject,
        method: jmethodID,
        args: *const jvalue,
    ) -> jobject {
        env_call!(self.0, CallObjectMethodA(obj, method, args) else ptr::null_mut())
    }

    unsafe fn call_boolean_method_a(
        &self,
        obj: jobject,
        method: jmethodID,
        args: *const jvalue,
    ) -> jboolean {
        env_call!(self.0, CallBooleanMethodA(obj, method, args) else JNI_FALSE)
    }

    unsafe fn call_byte_method_a(&self, obj: jobject, method: jmethodID, args: *const jvalue)
    -> jbyte {
        env_call!(self.0, CallByteMethodA(obj, method, args) else 0)
    }

    unsafe fn call_char_method_a(&self, obj: jobject, method: jmethodID, args: *const jvalue)
    -> jchar {
        env_call!(self.0, CallCharMethodA(obj, method, args) else 0)
    }

    unsafe fn call_short_method_a(
        &self,
        obj: jobject,
        method: jmethodID,
        args: *const jvalue,
    ) -> jshort {
        env_call!(self.0, CallShortMethodA(obj, method, args) else 0)
    }

    unsafe fn call_int_method_a(&self, obj: jobject, method: jmethodID, args: *const jvalue)
    -> jint {
        env_call!(self.0, CallIntMethodA(obj, method, args) else 0)
    }

    unsafe fn call_long_method_a(&self, obj: jobject, method: jmethodID, args: *const jvalue)
    -> jlong {
        env_call!(self.0, CallLongMethodA(obj, method, args) else 0)
    }

    unsafe fn call_float_method_a(
        &self,
        obj: jobject,
        method: jmethodID,
        args: *const jvalue,
    ) -> jfloat {
        env_call!(self.0, CallFloatMethodA(obj, method, args) else 0.0)
    }

    unsafe fn call_double_method_a(
        &self,
        obj: jobject,
        method: jmethodID,
        args: *const jvalue,
    ) -> jdouble {
        env_call!(self.0, CallDoubleMethodA(obj, method, args) else 0.0)
    }

    unsafe fn call_static_void_method_a(&self, cls: jclass, method: jmethodID, args: *const jvalue) {
        env_call!(self.0, CallStaticVoidMethodA(cls, method, args) else ())
    }

    unsafe fn call_static_object_method_a(
        &self,
        cls: jclass,
        method: jmethodID,
        args: *const jvalue,
    ) -> jobject {
        env_call!(self.0, CallStaticObjectMethodA(cls, method, args) else ptr::null_mut())
    }

    unsafe fn call_static_boolean_method_a(
        &self,
        cls: jclass,
        method: jmethodID,
        args: *const jvalue,
    ) -> jboolean {
        env_call!(self.0, CallStaticBooleanMethodA(cls, method, args) else JNI_FALSE)
    }

    unsafe fn call_static_byte_method_a(
        &self,
        cls: jclass,
        method: jmethodID,
        args: *const jvalue,
    ) -> jbyte {
        env_call!(self.0, CallStaticByteMethodA(cls, method, args) else 0)
    }

    unsafe fn call_static_char_method_a(
        &self,
        cls: jclass,
        method: jmethodID,
        args: *const jvalue,
    ) -> jchar {
        env_call!(self.0, CallStaticCharMethodA(cls, method, args) else 0)
    }

    unsafe fn call_static_short_method_a(
        &self,
        cls: jclass,
        method: jmethodID,
        args: *const jvalue,
    ) -> jshort {
        env_call!(self.0, CallStaticShortMethodA(cls, method, args) else 0)
    }

    unsafe fn call_static_int_method_a(
        &self,
        cls: jclass,
        method: jmethodID,
        args: *const jvalue,
    ) -> jint {
        env_call!(self.0, CallStaticIntMethodA(cls, method, args) else 0)
    }

    unsafe fn call_static_long_method_a(
        &self,
        cls: jclass,
        method: jmethodID,
        args: *const jvalue,
    ) -> jlong {
        env_call!(self.0, CallStaticLongMethodA(cls, method, args) else 0)
    }

    unsafe fn call_static_float_method_a(
        &self,
        cls: jclass,
        method: jmethodID,
        args: *const jvalue,
    ) -> jfloat {
        env_call!(self.0, CallStaticFloatMethodA(cls, method, args) else 0.0)
    }

    unsafe fn call_static_double_method_a(
        &self,
        cls: jclass,
        method: jmethodID,
        args: *const jvalue,
    ) -> jdouble {
        env_call!(self.0, CallStaticDoubleMethodA(cls, method, args) else 0.0)
    }

    unsafe fn get_object_field(&self, obj: jobject, field: jfieldID) -> jobject {
        env_call!(self.0, GetObjectField(obj, field) else ptr::null_mut())
    }

    unsafe fn get_boolean_field(&self, obj: jobject, field: jfieldID) -> jboolean {
        env_call!(self.0, GetBooleanField(obj, field) else JNI_FALSE)
    }

    unsafe fn get_byte_field(&self, obj: jobject, field: jfieldID) -> jbyte {
        env_call!(self.0, GetByteField(obj, field) else 0)
    }

    unsafe fn get_char_field(&self, obj: jobject, field: jfieldID) -> jchar {
        env_call!(self.0, GetCharField(obj, field) else 0)
    }

    unsafe fn get_short_field(&self, obj: jobject, field: jfieldID) -> jshort {
        env_call!(self.0, GetShortField(obj, field) else 0)
    }

    unsafe fn get_int_field(&self, obj: jobject, field: jfieldID) -> jint {
        env_call!(self.0, GetIntField(obj, field) else 0)
    }

    unsafe fn get_long_field(&self, obj: jobject, field: jfieldID) -> jlong {
        env_call!(self.0, GetLongField(obj, field) else 0)
    }

    unsafe fn get_float_field(&self, obj: jobject, field: jfieldID) -> jfloat {
        env_call!(self.0, GetFloatField(obj, field) else 0.0)
    }

    unsafe fn get_double_field(&self, obj: jobject, field: jfieldID) -> jdouble {
        env_call!(self.0, GetDoubleField(obj, field) else 0.0)
    }

    unsafe fn get_static_object_field(&self, cls: jclass, field: jfieldID) -> jobject {
        env_call!(self.0, GetStaticObjectField(cls, field) else ptr::null_mut())
    }

    unsafe fn get_static_boolean_field(&self, cls: jclass, field: jfieldID) -> jboolean {
        env_call!(self.0, GetStaticBooleanField(cls, field) else JNI_FALSE)
    }

    unsafe fn get_static_byte_field(&self, cls: jclass, field: jfieldID) -> jbyte {
        env_call!(self.0, GetStaticByteField(cls, field) else 0)
    }

    unsafe fn get_static_char_field(&self, cls: jclass, field: jfieldID) -> jchar {
        env_call!(self.0, GetStaticCharField(cls, field) else 0)
    }

    unsafe fn get_static_short_field(&self, cls: jclass, field: jfieldID) -> jshort {
        env_call!(self.0, GetStaticShortField(cls, field) else 0)
    }

    unsafe fn get_static_int_field(&self, cls: jclass, field: jfieldID) -> jint {
        env_call!(self.0, GetStaticIntField(cls, field) else 0)
    }

    unsafe fn get_static_long_field(&self, cls: jclass, field: jfieldID) -> jlong {
        env_call!(self.0, GetStaticLongField(cls, field) else 0)
    }

    unsafe fn get_static_float_field(&self, cls: jclass, field: jfieldID) -> jfloat {
        env_call!(self.0, GetStaticFloatField(cls, field) else 0.0)
    }

    unsafe fn get_static_double_field(&self, cls: jclass, field: jfieldID) -> jdouble {
        env_call!(self.0, GetStaticDoubleField(cls, field) else 0.0)
    }

    unsafe fn new_byte_array(&self, length: jsize) -> jbyteArray {
        env_call!(self.0, NewByteArray(length) else ptr::null_mut())
    }

    unsafe fn get_byte_array_elements(&self, array: jbyteArray) -> *mut jbyte {
        env_call!(self.0, GetByteArrayElements(array, ptr::null_mut()) else ptr::null_mut())
    }

    unsafe fn release_byte_array_elements(&self, array: jbyteArray, elems: *mut jbyte, mode: jint) {
        env_call!(self.0, ReleaseByteArrayElements(array, elems, mode) else ())
    }

    unsafe fn get_array_length(&self, array: jarray) -> jsize {
        env_call!(self.0, GetArrayLength(array) else 0)
    }

    unsafe fn new_object_array(
        &self,
        length: jsize,
        element_class: jclass,
        initial: jobject,
    ) -> jobjectArray {
        env_call!(self.0, NewObjectArray(length, element_class, initial) else ptr::null_mut())
    }

    unsafe fn get_object_array_element(&self, array: jobjectArray, index: jsize) -> jobject {
        env_call!(self.0, GetObjectArrayElement(array, index) else ptr::null_mut())
    }

    unsafe fn set_object_array_element(&self, array: jobjectArray, index: jsize, value: jobject) {
        env_call!(self.0, SetObjectArrayElement(array, index, value) else ())
    }

    unsafe fn get_string_length(&self, string: jstring) -> jsize {
        env_call!(self.0, GetStringLength(string) else 0)
    }

    unsafe fn get_string_chars(&self, string: jstring) -> *const jchar {
        env_call!(self.0, GetStringChars(string, ptr::null_mut()) else ptr::null())
    }

    unsafe fn release_string_chars(&self, string: jstring, chars: *const jchar) {
        env_call!(self.0, ReleaseStringChars(string, chars) else ())
    }

    unsafe fn new_string(&self, unicode: *const jchar, length: jsize) -> jstring {
        env_call!(self.0, NewString(unicode, length) else ptr::null_mut())
    }
}
