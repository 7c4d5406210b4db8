//! Checked access to a thread's JNI environment
//!
//! Every operation goes through the shim's [`JniInterface`] and turns the
//! interface's "null result plus pending exception" convention into a
//! [`ShimError::JavaException`] carrying the throwable's `toString()`. The
//! exception is cleared on the way, so the environment is usable again when
//! the error reaches the caller.

use crate::elements::{ByteArrayElements, StringChars};
use crate::refs::GlobalRef;
use crate::vm::JavaVm;
use jni::sys::{
    JNI_TRUE, JNIEnv, JavaVM, jarray, jbyteArray, jclass, jfieldID, jmethodID, jobject,
    jobjectArray, jsize, jstring, jthrowable, jvalue,
};
use jnishim_core::{JValue, JavaType, ReleaseMode, ShimError, ShimResult, to_jvalues};
use jnishim_ffi::{EnvHandle, JniInterface, VmHandle};
use std::ffi::CString;
use std::marker::PhantomData;
use std::ptr;

const TO_STRING: (&str, &str) = ("toString", "()Ljava/lang/String;");
const GET_CLASS_LOADER: (&str, &str) = ("getClassLoader", "()Ljava/lang/ClassLoader;");
const LOAD_CLASS: (&str, &str) = ("loadClass", "(Ljava/lang/String;)Ljava/lang/Class;");

/// The calling thread's environment.
///
/// Not `Send`: an environment handle is only valid on the thread it was
/// obtained for, and only while that thread stays attached.
///
/// Local references returned by these methods belong to the current native
/// frame. Nothing here deletes them implicitly; long-running loops should
/// call [`Env::delete_local_ref`].
#[derive(Debug)]
pub struct Env<'a> {
    vm: VmHandle,
    handle: EnvHandle,
    _marker: PhantomData<(&'a (), *mut ())>,
}

impl<'a> Env<'a> {
    /// # Safety
    /// `handle` must be the calling thread's environment of the VM `vm`, and
    /// must stay valid for `'a`.
    pub unsafe fn new(vm: VmHandle, handle: EnvHandle) -> Self {
        Self {
            vm,
            handle,
            _marker: PhantomData,
        }
    }

    /// Wrap raw handles received from native method entry points.
    ///
    /// # Safety
    /// Same as [`Env::new`].
    pub unsafe fn from_raw(vm: *mut JavaVM, env: *mut JNIEnv) -> Self {
        unsafe { Self::new(VmHandle::from_raw(vm), EnvHandle::from_raw(env)) }
    }

    pub fn handle(&self) -> EnvHandle {
        self.handle
    }

    pub fn vm(&self) -> ShimResult<JavaVm> {
        JavaVm::from_handle(self.vm)
    }

    // ---------------------------------------------------------------------
    // Exceptions
    // ---------------------------------------------------------------------

    /// Poll and clear the pending exception, returning its `toString()`.
    pub fn take_exception(&self) -> Option<String> {
        let throwable = unsafe { self.handle.exception_occurred() };
        if throwable.is_null() {
            return None;
        }
        unsafe { self.handle.exception_clear() };

        let message = self
            .describe(throwable)
            .unwrap_or_else(|| "unknown Java exception".to_string());
        unsafe { self.handle.delete_local_ref(throwable) };
        tracing::debug!(exception = %message, "cleared pending Java exception");
        Some(message)
    }

    /// `Err` with the pending exception, if any, which is cleared.
    pub fn check_exception(&self) -> ShimResult<()> {
        match self.take_exception() {
            Some(message) => Err(ShimError::JavaException(message)),
            None => Ok(()),
        }
    }

    fn describe(&self, throwable: jthrowable) -> Option<String> {
        let handle = self.handle;
        let cls = unsafe { handle.get_object_class(throwable) };
        if cls.is_null() {
            return None;
        }
        let (name, sig) = (c_string(TO_STRING.0).ok()?, c_string(TO_STRING.1).ok()?);
        let method = unsafe { handle.get_method_id(cls, name.as_ptr(), sig.as_ptr()) };
        unsafe { handle.delete_local_ref(cls) };
        if method.is_null() {
            unsafe { handle.exception_clear() };
            return None;
        }

        let text = unsafe { handle.call_object_method_a(throwable, method, ptr::null()) };
        if !unsafe { handle.exception_occurred() }.is_null() {
            unsafe { handle.exception_clear() };
            return None;
        }
        if text.is_null() {
            return None;
        }
        let message = self.string_lossy(text);
        unsafe { handle.delete_local_ref(text) };
        message
    }

    /// `value`, or the pending exception (or [`ShimError::NullHandle`] if
    /// none) when `value` is null.
    fn non_null<T>(&self, value: *mut T, operation: &'static str) -> ShimResult<*mut T> {
        if !value.is_null() {
            return Ok(value);
        }
        self.check_exception()?;
        Err(ShimError::NullHandle(operation))
    }

    // ---------------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------------

    /// Find a class by its slash-separated name, e.g. `java/lang/String`.
    pub fn find_class(&self, name: &str) -> ShimResult<jclass> {
        let name = c_string(name)?;
        let cls = unsafe { self.handle.find_class(name.as_ptr()) };
        self.non_null(cls, "FindClass")
    }

    pub fn get_object_class(&self, obj: jobject) -> ShimResult<jclass> {
        if obj.is_null() {
            return Err(ShimError::InvalidArgument("null object".to_string()));
        }
        let cls = unsafe { self.handle.get_object_class(obj) };
        self.non_null(cls, "GetObjectClass")
    }

    pub fn get_method_id(&self, cls: jclass, name: &str, sig: &str) -> ShimResult<jmethodID> {
        let (name, sig) = (c_string(name)?, c_string(sig)?);
        let id = unsafe { self.handle.get_method_id(cls, name.as_ptr(), sig.as_ptr()) };
        self.non_null(id, "GetMethodID")
    }

    pub fn get_static_method_id(
        &self,
        cls: jclass,
        name: &str,
        sig: &str,
    ) -> ShimResult<jmethodID> {
        let (name, sig) = (c_string(name)?, c_string(sig)?);
        let id = unsafe { self.handle.get_static_method_id(cls, name.as_ptr(), sig.as_ptr()) };
        self.non_null(id, "GetStaticMethodID")
    }

    pub fn get_field_id(&self, cls: jclass, name: &str, sig: &str) -> ShimResult<jfieldID> {
        let (name, sig) = (c_string(name)?, c_string(sig)?);
        let id = unsafe { self.handle.get_field_id(cls, name.as_ptr(), sig.as_ptr()) };
        self.non_null(id, "GetFieldID")
    }

    pub fn get_static_field_id(&self, cls: jclass, name: &str, sig: &str) -> ShimResult<jfieldID> {
        let (name, sig) = (c_string(name)?, c_string(sig)?);
        let id = unsafe { self.handle.get_static_field_id(cls, name.as_ptr(), sig.as_ptr()) };
        self.non_null(id, "GetStaticFieldID")
    }

    // ---------------------------------------------------------------------
    // References
    // ---------------------------------------------------------------------

    pub fn is_same_object(&self, ref1: jobject, ref2: jobject) -> bool {
        unsafe { self.handle.is_same_object(ref1, ref2) == JNI_TRUE }
    }

    /// True if `obj` can be cast to `cls`. A null `obj` is an instance of
    /// every class.
    pub fn is_instance_of(&self, obj: jobject, cls: jclass) -> bool {
        unsafe { self.handle.is_instance_of(obj, cls) == JNI_TRUE }
    }

    /// Promote `obj` to a global reference, deleted when the guard drops.
    pub fn new_global_ref(&self, obj: jobject) -> ShimResult<GlobalRef> {
        let vm = self.vm()?;
        let global = unsafe { self.handle.new_global_ref(obj) };
        let global = self.non_null(global, "NewGlobalRef")?;
        Ok(unsafe { GlobalRef::from_raw(vm, global) })
    }

    pub fn new_local_ref(&self, obj: jobject) -> jobject {
        unsafe { self.handle.new_local_ref(obj) }
    }

    pub fn delete_local_ref(&self, obj: jobject) {
        if !obj.is_null() {
            unsafe { self.handle.delete_local_ref(obj) }
        }
    }

    // ---------------------------------------------------------------------
    // Calls and fields
    // ---------------------------------------------------------------------

    /// Construct an instance of `cls` through the constructor `ctor`.
    pub fn new_object(&self, cls: jclass, ctor: jmethodID, args: &[JValue]) -> ShimResult<jobject> {
        let args = to_jvalues(args);
        let obj = unsafe { self.handle.new_object_a(cls, ctor, args_ptr(&args)) };
        self.non_null(obj, "NewObjectA")
    }

    /// Call an instance method whose return type is `ret`.
    ///
    /// Arguments are not checked against the method's signature.
    pub fn call_method(
        &self,
        obj: jobject,
        method: jmethodID,
        ret: JavaType,
        args: &[JValue],
    ) -> ShimResult<JValue> {
        let args = to_jvalues(args);
        let args = args_ptr(&args);
        let h = self.handle;

        let value = unsafe {
            match ret {
                JavaType::Void => {
                    h.call_void_method_a(obj, method, args);
                    JValue::Void
                }
                JavaType::Boolean => {
                    JValue::Bool(h.call_boolean_method_a(obj, method, args) == JNI_TRUE)
                }
                JavaType::Byte => JValue::Byte(h.call_byte_method_a(obj, method, args)),
                JavaType::Char => JValue::Char(h.call_char_method_a(obj, method, args)),
                JavaType::Short => JValue::Short(h.call_short_method_a(obj, method, args)),
                JavaType::Int => JValue::Int(h.call_int_method_a(obj, method, args)),
                JavaType::Long => JValue::Long(h.call_long_method_a(obj, method, args)),
                JavaType::Float => JValue::Float(h.call_float_method_a(obj, method, args)),
                JavaType::Double => JValue::Double(h.call_double_method_a(obj, method, args)),
                JavaType::Object => JValue::Object(h.call_object_method_a(obj, method, args)),
            }
        };
        self.check_exception()?;
        Ok(value)
    }

    /// Call a static method whose return type is `ret`.
    pub fn call_static_method(
        &self,
        cls: jclass,
        method: jmethodID,
        ret: JavaType,
        args: &[JValue],
    ) -> ShimResult<JValue> {
        let args = to_jvalues(args);
        let args = args_ptr(&args);
        let h = self.handle;

        let value = unsafe {
            match ret {
                JavaType::Void => {
                    h.call_static_void_method_a(cls, method, args);
                    JValue::Void
                }
                JavaType::Boolean => {
                    JValue::Bool(h.call_static_boolean_method_a(cls, method, args) == JNI_TRUE)
                }
                JavaType::Byte => JValue::Byte(h.call_static_byte_method_a(cls, method, args)),
                JavaType::Char => JValue::Char(h.call_static_char_method_a(cls, method, args)),
                JavaType::Short => JValue::Short(h.call_static_short_method_a(cls, method, args)),
                JavaType::Int => JValue::Int(h.call_static_int_method_a(cls, method, args)),
                JavaType::Long => JValue::Long(h.call_static_long_method_a(cls, method, args)),
                JavaType::Float => JValue::Float(h.call_static_float_method_a(cls, method, args)),
                JavaType::Double => {
                    JValue::Double(h.call_static_double_method_a(cls, method, args))
                }
                JavaType::Object => {
                    JValue::Object(h.call_static_object_method_a(cls, method, args))
                }
            }
        };
        self.check_exception()?;
        Ok(value)
    }

    pub fn get_field(&self, obj: jobject, field: jfieldID, ty: JavaType) -> ShimResult<JValue> {
        let h = self.handle;
        let value = unsafe {
            match ty {
                JavaType::Void => return Err(void_field()),
                JavaType::Boolean => JValue::Bool(h.get_boolean_field(obj, field) == JNI_TRUE),
                JavaType::Byte => JValue::Byte(h.get_byte_field(obj, field)),
                JavaType::Char => JValue::Char(h.get_char_field(obj, field)),
                JavaType::Short => JValue::Short(h.get_short_field(obj, field)),
                JavaType::Int => JValue::Int(h.get_int_field(obj, field)),
                JavaType::Long => JValue::Long(h.get_long_field(obj, field)),
                JavaType::Float => JValue::Float(h.get_float_field(obj, field)),
                JavaType::Double => JValue::Double(h.get_double_field(obj, field)),
                JavaType::Object => JValue::Object(h.get_object_field(obj, field)),
            }
        };
        self.check_exception()?;
        Ok(value)
    }

    pub fn get_static_field(&self, cls: jclass, field: jfieldID, ty: JavaType) -> ShimResult<JValue> {
        let h = self.handle;
        let value = unsafe {
            match ty {
                JavaType::Void => return Err(void_field()),
                JavaType::Boolean => {
                    JValue::Bool(h.get_static_boolean_field(cls, field) == JNI_TRUE)
                }
                JavaType::Byte => JValue::Byte(h.get_static_byte_field(cls, field)),
                JavaType::Char => JValue::Char(h.get_static_char_field(cls, field)),
                JavaType::Short => JValue::Short(h.get_static_short_field(cls, field)),
                JavaType::Int => JValue::Int(h.get_static_int_field(cls, field)),
                JavaType::Long => JValue::Long(h.get_static_long_field(cls, field)),
                JavaType::Float => JValue::Float(h.get_static_float_field(cls, field)),
                JavaType::Double => JValue::Double(h.get_static_double_field(cls, field)),
                JavaType::Object => JValue::Object(h.get_static_object_field(cls, field)),
            }
        };
        self.check_exception()?;
        Ok(value)
    }

    // ---------------------------------------------------------------------
    // Strings
    // ---------------------------------------------------------------------

    /// A new Java string holding `text`.
    pub fn new_string(&self, text: &str) -> ShimResult<jstring> {
        let units: Vec<u16> = text.encode_utf16().collect();
        let len = jsize::try_from(units.len())
            .map_err(|_| ShimError::InvalidArgument("string too long".to_string()))?;
        let string = unsafe { self.handle.new_string(units.as_ptr(), len) };
        self.non_null(string, "NewString")
    }

    /// Pin the UTF-16 contents of `string` until the guard drops.
    pub fn string_chars(&self, string: jstring) -> ShimResult<StringChars<'_, 'a>> {
        if string.is_null() {
            return Err(ShimError::InvalidArgument("null string".to_string()));
        }
        let len = unsafe { self.handle.get_string_length(string) };
        let chars = unsafe { self.handle.get_string_chars(string) };
        if chars.is_null() {
            self.check_exception()?;
            return Err(ShimError::NullHandle("GetStringChars"));
        }
        Ok(unsafe { StringChars::new(self, string, chars, len) })
    }

    /// Copy `string` into a Rust `String`.
    ///
    /// Unpaired surrogates are replaced with U+FFFD.
    pub fn get_string(&self, string: jstring) -> ShimResult<String> {
        let chars = self.string_chars(string)?;
        Ok(String::from_utf16_lossy(&chars))
    }

    fn string_lossy(&self, string: jstring) -> Option<String> {
        self.get_string(string).ok()
    }

    // ---------------------------------------------------------------------
    // Arrays
    // ---------------------------------------------------------------------

    pub fn array_length(&self, array: jarray) -> jsize {
        unsafe { self.handle.get_array_length(array) }
    }

    /// A new `byte[]` holding a copy of `bytes`.
    pub fn new_byte_array(&self, bytes: &[u8]) -> ShimResult<jbyteArray> {
        let len = jsize::try_from(bytes.len())
            .map_err(|_| ShimError::InvalidArgument("byte array too long".to_string()))?;
        let array = unsafe { self.handle.new_byte_array(len) };
        let array = self.non_null(array, "NewByteArray")?;
        if !bytes.is_empty() {
            let mut elems = self.byte_array_elements(array, ReleaseMode::CopyBackAndFree)?;
            for (dst, src) in elems.iter_mut().zip(bytes) {
                *dst = *src as i8;
            }
        }
        Ok(array)
    }

    /// Copy the contents of a `byte[]`.
    pub fn byte_array_to_vec(&self, array: jbyteArray) -> ShimResult<Vec<u8>> {
        if self.array_length(array) == 0 {
            return Ok(Vec::new());
        }
        let elems = self.byte_array_elements(array, ReleaseMode::Abort)?;
        Ok(elems.iter().map(|b| *b as u8).collect())
    }

    /// Pin the elements of a `byte[]`; they are released with `mode` when
    /// the guard drops.
    pub fn byte_array_elements(
        &self,
        array: jbyteArray,
        mode: ReleaseMode,
    ) -> ShimResult<ByteArrayElements<'_, 'a>> {
        if array.is_null() {
            return Err(ShimError::InvalidArgument("null array".to_string()));
        }
        let len = self.array_length(array);
        let elems = unsafe { self.handle.get_byte_array_elements(array) };
        if elems.is_null() {
            self.check_exception()?;
            return Err(ShimError::NullHandle("GetByteArrayElements"));
        }
        Ok(unsafe { ByteArrayElements::new(self, array, elems, len, mode) })
    }

    /// A new array of `len` references to `element_class`, every slot set
    /// to `initial` (which may be null).
    pub fn new_object_array(
        &self,
        len: jsize,
        element_class: jclass,
        initial: jobject,
    ) -> ShimResult<jobjectArray> {
        let array = unsafe { self.handle.new_object_array(len, element_class, initial) };
        self.non_null(array, "NewObjectArray")
    }

    /// Element `index` of `array`. A null element is returned as null.
    pub fn get_object_array_element(&self, array: jobjectArray, index: jsize) -> ShimResult<jobject> {
        let element = unsafe { self.handle.get_object_array_element(array, index) };
        self.check_exception()?;
        Ok(element)
    }

    pub fn set_object_array_element(
        &self,
        array: jobjectArray,
        index: jsize,
        value: jobject,
    ) -> ShimResult<()> {
        unsafe { self.handle.set_object_array_element(array, index, value) };
        self.check_exception()
    }

    // ---------------------------------------------------------------------
    // Class loading
    // ---------------------------------------------------------------------

    /// The class loader `obj.getClassLoader()` returns.
    ///
    /// Pass a `Class` object to get the loader that defined that class.
    pub fn class_loader_for(&self, obj: jobject) -> ShimResult<jobject> {
        let cls = self.get_object_class(obj)?;
        let method = self.get_method_id(cls, GET_CLASS_LOADER.0, GET_CLASS_LOADER.1);
        self.delete_local_ref(cls);
        let loader = self.call_method(obj, method?, JavaType::Object, &[])?;
        Ok(loader.as_object())
    }

    /// `loader.loadClass(name)`. `name` is passed through as given, so it is
    /// normally in binary form such as `java.lang.String`.
    pub fn load_class(&self, loader: jobject, name: &str) -> ShimResult<jclass> {
        let cls = self.get_object_class(loader)?;
        let method = self.get_method_id(cls, LOAD_CLASS.0, LOAD_CLASS.1);
        self.delete_local_ref(cls);
        let method = method?;

        let name = self.new_string(name)?;
        let loaded = self.call_method(loader, method, JavaType::Object, &[JValue::Object(name)]);
        self.delete_local_ref(name);
        let loaded = loaded?.as_object();
        self.non_null(loaded, "ClassLoader.loadClass")
    }
}

fn c_string(text: &str) -> ShimResult<CString> {
    CString::new(text).map_err(|e| ShimError::InvalidArgument(format!("{text:?}: {e}")))
}

/// The argument array pointer; null when there are no arguments.
fn args_ptr(args: &[jvalue]) -> *const jvalue {
    if args.is_empty() {
        ptr::null()
    } else {
        args.as_ptr()
    }
}

fn void_field() -> ShimError {
    ShimError::InvalidArgument("fields cannot have type void".to_string())
}
