//! Invocation argument values and Java type tags

use jni::sys::{
    JNI_ABORT, JNI_COMMIT, JNI_FALSE, JNI_TRUE, jbyte, jchar, jdouble, jfloat, jint,
    jlong, jobject, jshort, jvalue,
};
use std::ptr;

/// One positional argument (or result) of a Java method call.
///
/// This is the closed sum type over the kinds a `jvalue` union can hold.
/// Nothing checks a sequence of `JValue`s against a method signature: a
/// mismatch is passed through to the VM exactly as given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JValue {
    Bool(bool),
    Byte(jbyte),
    Char(jchar),
    Short(jshort),
    Int(jint),
    Long(jlong),
    Float(jfloat),
    Double(jdouble),
    Object(jobject),
    /// Result of a `void` method. Converts to an all-zero `jvalue`.
    Void,
}

impl JValue {
    /// The `jvalue` union member this value occupies.
    ///
    /// The remaining bytes of the union are zeroed, so reading a wider
    /// member than the one written never observes uninitialized memory.
    pub fn to_raw(&self) -> jvalue {
        let mut raw = jvalue { j: 0 };
        match *self {
            JValue::Bool(z) => raw.z = if z { JNI_TRUE } else { JNI_FALSE },
            JValue::Byte(b) => raw.b = b,
            JValue::Char(c) => raw.c = c,
            JValue::Short(s) => raw.s = s,
            JValue::Int(i) => raw.i = i,
            JValue::Long(j) => raw.j = j,
            JValue::Float(f) => raw.f = f,
            JValue::Double(d) => raw.d = d,
            JValue::Object(l) => raw.l = l,
            JValue::Void => {}
        }
        raw
    }

    pub fn java_type(&self) -> JavaType {
        match self {
            JValue::Bool(_) => JavaType::Boolean,
            JValue::Byte(_) => JavaType::Byte,
            JValue::Char(_) => JavaType::Char,
            JValue::Short(_) => JavaType::Short,
            JValue::Int(_) => JavaType::Int,
            JValue::Long(_) => JavaType::Long,
            JValue::Float(_) => JavaType::Float,
            JValue::Double(_) => JavaType::Double,
            JValue::Object(_) => JavaType::Object,
            JValue::Void => JavaType::Void,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JValue::Bool(z) => Some(*z),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<jint> {
        match self {
            JValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<jlong> {
        match self {
            JValue::Long(j) => Some(*j),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<jdouble> {
        match self {
            JValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// The object handle, or null for non-object values.
    pub fn as_object(&self) -> jobject {
        match self {
            JValue::Object(l) => *l,
            _ => ptr::null_mut(),
        }
    }
}

impl From<bool> for JValue {
    fn from(value: bool) -> Self {
        JValue::Bool(value)
    }
}

impl From<jbyte> for JValue {
    fn from(value: jbyte) -> Self {
        JValue::Byte(value)
    }
}

impl From<jchar> for JValue {
    fn from(value: jchar) -> Self {
        JValue::Char(value)
    }
}

impl From<jshort> for JValue {
    fn from(value: jshort) -> Self {
        JValue::Short(value)
    }
}

impl From<jint> for JValue {
    fn from(value: jint) -> Self {
        JValue::Int(value)
    }
}

impl From<jlong> for JValue {
    fn from(value: jlong) -> Self {
        JValue::Long(value)
    }
}

impl From<jfloat> for JValue {
    fn from(value: jfloat) -> Self {
        JValue::Float(value)
    }
}

impl From<jdouble> for JValue {
    fn from(value: jdouble) -> Self {
        JValue::Double(value)
    }
}

impl From<jobject> for JValue {
    fn from(value: jobject) -> Self {
        JValue::Object(value)
    }
}

/// Lay out arguments as the contiguous `jvalue` array the `*A` call
/// variants expect.
pub fn to_jvalues(args: &[JValue]) -> Vec<jvalue> {
    args.iter().map(JValue::to_raw).collect()
}

/// Java type of a method result or a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JavaType {
    Void,
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    /// Any reference type: class instances, arrays, strings.
    Object,
}

impl JavaType {
    /// Type named by a single field descriptor such as `I` or
    /// `Ljava/lang/String;`.
    pub fn from_descriptor(descriptor: &str) -> Option<Self> {
        match descriptor.as_bytes().first()? {
            b'V' => Some(JavaType::Void),
            b'Z' => Some(JavaType::Boolean),
            b'B' => Some(JavaType::Byte),
            b'C' => Some(JavaType::Char),
            b'S' => Some(JavaType::Short),
            b'I' => Some(JavaType::Int),
            b'J' => Some(JavaType::Long),
            b'F' => Some(JavaType::Float),
            b'D' => Some(JavaType::Double),
            b'L' | b'[' => Some(JavaType::Object),
            _ => None,
        }
    }

    /// Return type of a method signature such as `(ILjava/lang/String;)Z`.
    pub fn of_method_return(signature: &str) -> Option<Self> {
        let (_, ret) = signature.rsplit_once(')')?;
        Self::from_descriptor(ret)
    }
}

/// How pinned primitive array elements are handed back to the VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseMode {
    /// Copy the buffer back into the array and free it (mode `0`).
    #[default]
    CopyBackAndFree,
    /// Copy the buffer back but keep it pinned (`JNI_COMMIT`).
    Commit,
    /// Free the buffer without copying back (`JNI_ABORT`).
    Abort,
}

impl ReleaseMode {
    pub fn code(&self) -> jint {
        match self {
            ReleaseMode::CopyBackAndFree => 0,
            ReleaseMode::Commit => JNI_COMMIT,
            ReleaseMode::Abort => JNI_ABORT,
        }
    }

    pub fn from_code(code: jint) -> Option<Self> {
        match code {
            0 => Some(ReleaseMode::CopyBackAndFree),
            JNI_COMMIT => Some(ReleaseMode::Commit),
            JNI_ABORT => Some(ReleaseMode::Abort),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "value/value_tests.rs"]
mod value_tests;
