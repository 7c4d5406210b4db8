//! Capability interfaces over the vendor function tables
//!
//! One method per operation the shim exposes. [`EnvHandle`] and [`VmHandle`]
//! are the only implementors; the exported functions are thin calls into
//! them.
//!
//! Every method is `unsafe` for the same reason: handles, references and
//! IDs are passed to the VM exactly as given. The caller is responsible for
//! using an environment handle only on the thread it belongs to, for
//! pairing acquire/release calls, and for argument arrays that match the
//! target method's signature.
//!
//! [`EnvHandle`]: crate::EnvHandle
//! [`VmHandle`]: crate::VmHandle

use crate::handle::EnvHandle;
use jni::sys::{
    jarray, jboolean, jbyte, jbyteArray, jchar, jclass, jdouble, jfieldID, jfloat, jint, jlong,
    jmethodID, jobject, jobjectArray, jshort, jsize, jstring, jthrowable, jvalue,
};
use std::ffi::{c_char, c_void};

/// Operations reached through a `JavaVM*`.
pub trait JavaVmInterface {
    /// `AttachCurrentThread`. On `JNI_OK`, `p_env` holds the thread's
    /// environment handle.
    unsafe fn attach_current_thread(&self, p_env: *mut EnvHandle, thr_args: *mut c_void) -> jint;

    /// `DetachCurrentThread`. Invalidates the thread's environment handle and
    /// all of its local references.
    unsafe fn detach_current_thread(&self) -> jint;

    /// `GetEnv`. `JNI_EDETACHED` means the thread has to attach first.
    unsafe fn get_env(&self, p_env: *mut EnvHandle, version: jint) -> jint;
}

/// Operations reached through a `JNIEnv*`.
pub trait JniInterface {
    // Reflection lookups
    unsafe fn find_class(&self, name: *const c_char) -> jclass;
    unsafe fn get_object_class(&self, obj: jobject) -> jclass;
    unsafe fn get_method_id(&self, cls: jclass, name: *const c_char, sig: *const c_char)
    -> jmethodID;
    unsafe fn get_static_method_id(
        &self,
        cls: jclass,
        name: *const c_char,
        sig: *const c_char,
    ) -> jmethodID;
    unsafe fn get_field_id(&self, cls: jclass, name: *const c_char, sig: *const c_char) -> jfieldID;
    unsafe fn get_static_field_id(
        &self,
        cls: jclass,
        name: *const c_char,
        sig: *const c_char,
    ) -> jfieldID;

    // Pending exceptions
    unsafe fn exception_occurred(&self) -> jthrowable;
    unsafe fn exception_clear(&self);

    // References
    unsafe fn is_same_object(&self, ref1: jobject, ref2: jobject) -> jboolean;
    unsafe fn is_instance_of(&self, obj: jobject, cls: jclass) -> jboolean;
    unsafe fn new_global_ref(&self, obj: jobject) -> jobject;
    unsafe fn delete_global_ref(&self, obj: jobject);
    unsafe fn new_local_ref(&self, obj: jobject) -> jobject;
    unsafe fn delete_local_ref(&self, obj: jobject);

    // Construction and instance calls
    unsafe fn new_object_a(&self, cls: jclass, method: jmethodID, args: *const jvalue) -> jobject;
    unsafe fn call_void_method_a(&self, obj: jobject, method: jmethodID, args: *const jvalue);
    unsafe fn call_object_method_a(
        &self,
        obj: jobject,
        method: jmethodID,
        args: *const jvalue,
    ) -> jobject;
    unsafe fn call_boolean_method_a(
        &self,
        obj: jobject,
        method: jmethodID,
        args: *const jvalue,
    ) -> jboolean;
    unsafe fn call_byte_method_a(&self, obj: jobject, method: jmethodID, args: *const jvalue)
    -> jbyte;
    unsafe fn call_char_method_a(&self, obj: jobject, method: jmethodID, args: *const jvalue)
    -> jchar;
    unsafe fn call_short_method_a(
        &self,
        obj: jobject,
        method: jmethodID,
        args: *const jvalue,
    ) -> jshort;
    unsafe fn call_int_method_a(&self, obj: jobject, method: jmethodID, args: *const jvalue)
    -> jint;
    unsafe fn call_long_method_a(&self, obj: jobject, method: jmethodID, args: *const jvalue)
    -> jlong;
    unsafe fn call_float_method_a(
        &self,
        obj: jobject,
        method: jmethodID,
        args: *const jvalue,
    ) -> jfloat;
    unsafe fn call_double_method_a(
        &self,
        obj: jobject,
        method: jmethodID,
        args: *const jvalue,
    ) -> jdouble;

    // Static calls
    unsafe fn call_static_void_method_a(&self, cls: jclass, method: jmethodID, args: *const jvalue);
    unsafe fn call_static_object_method_a(
        &self,
        cls: jclass,
        method: jmethodID,
        args: *const jvalue,
    ) -> jobject;
    unsafe fn call_static_boolean_method_a(
        &self,
        cls: jclass,
        method: jmethodID,
        args: *const jvalue,
    ) -> jboolean;
    unsafe fn call_static_byte_method_a(
        &self,
        cls: jclass,
        method: jmethodID,
        args: *const jvalue,
    ) -> jbyte;
    unsafe fn call_static_char_method_a(
        &self,
        cls: jclass,
        method: jmethodID,
        args: *const jvalue,
    ) -> jchar;
    unsafe fn call_static_short_method_a(
        &self,
        cls: jclass,
        method: jmethodID,
        args: *const jvalue,
    ) -> jshort;
    unsafe fn call_static_int_method_a(
        &self,
        cls: jclass,
        method: jmethodID,
        args: *const jvalue,
    ) -> jint;
    unsafe fn call_static_long_method_a(
        &self,
        cls: jclass,
        method: jmethodID,
        args: *const jvalue,
    ) -> jlong;
    unsafe fn call_static_float_method_a(
        &self,
        cls: jclass,
        method: jmethodID,
        args: *const jvalue,
    ) -> jfloat;
    unsafe fn call_static_double_method_a(
        &self,
        cls: jclass,
        method: jmethodID,
        args: *const jvalue,
    ) -> jdouble;

    // Instance fields
    unsafe fn get_object_field(&self, obj: jobject, field: jfieldID) -> jobject;
    unsafe fn get_boolean_field(&self, obj: jobject, field: jfieldID) -> jboolean;
    unsafe fn get_byte_field(&self, obj: jobject, field: jfieldID) -> jbyte;
    unsafe fn get_char_field(&self, obj: jobject, field: jfieldID) -> jchar;
    unsafe fn get_short_field(&self, obj: jobject, field: jfieldID) -> jshort;
    unsafe fn get_int_field(&self, obj: jobject, field: jfieldID) -> jint;
    unsafe fn get_long_field(&self, obj: jobject, field: jfieldID) -> jlong;
    unsafe fn get_float_field(&self, obj: jobject, field: jfieldID) -> jfloat;
    unsafe fn get_double_field(&self, obj: jobject, field: jfieldID) -> jdouble;

    // Static fields
    unsafe fn get_static_object_field(&self, cls: jclass, field: jfieldID) -> jobject;
    unsafe fn get_static_boolean_field(&self, cls: jclass, field: jfieldID) -> jboolean;
    unsafe fn get_static_byte_field(&self, cls: jclass, field: jfieldID) -> jbyte;
    unsafe fn get_static_char_field(&self, cls: jclass, field: jfieldID) -> jchar;
    unsafe fn get_static_short_field(&self, cls: jclass, field: jfieldID) -> jshort;
    unsafe fn get_static_int_field(&self, cls: jclass, field: jfieldID) -> jint;
    unsafe fn get_static_long_field(&self, cls: jclass, field: jfieldID) -> jlong;
    unsafe fn get_static_float_field(&self, cls: jclass, field: jfieldID) -> jfloat;
    unsafe fn get_static_double_field(&self, cls: jclass, field: jfieldID) -> jdouble;

    // Arrays
    unsafe fn new_byte_array(&self, length: jsize) -> jbyteArray;
    /// Pins or copies the elements. `isCopy` is always passed as null.
    unsafe fn get_byte_array_elements(&self, array: jbyteArray) -> *mut jbyte;
    unsafe fn release_byte_array_elements(&self, array: jbyteArray, elems: *mut jbyte, mode: jint);
    unsafe fn get_array_length(&self, array: jarray) -> jsize;
    unsafe fn new_object_array(&self, length: jsize, element_class: jclass, initial: jobject)
    -> jobjectArray;
    unsafe fn get_object_array_element(&self, array: jobjectArray, index: jsize) -> jobject;
    unsafe fn set_object_array_element(&self, array: jobjectArray, index: jsize, value: jobject);

    // Strings
    unsafe fn get_string_length(&self, string: jstring) -> jsize;
    /// UTF-16 code units of `string`. `isCopy` is always passed as null.
    unsafe fn get_string_chars(&self, string: jstring) -> *const jchar;
    unsafe fn release_string_chars(&self, string: jstring, chars: *const jchar);
    unsafe fn new_string(&self, unicode: *const jchar, length: jsize) -> jstring;
}
