//! Scoped access to pinned array and string contents

use crate::env::Env;
use jni::sys::{JNI_ABORT, jbyte, jbyteArray, jchar, jsize, jstring};
use jnishim_core::ReleaseMode;
use jnishim_ffi::JniInterface;
use std::ops::{Deref, DerefMut};

/// Elements of a `byte[]`, pinned or copied by the VM.
///
/// On drop the buffer is released with the chosen [`ReleaseMode`]. With
/// [`ReleaseMode::Commit`] the contents are copied back and the buffer is
/// then freed without a second copy, so nothing stays pinned.
pub struct ByteArrayElements<'env, 'a> {
    env: &'env Env<'a>,
    array: jbyteArray,
    elems: *mut jbyte,
    len: usize,
    mode: ReleaseMode,
}

impl<'env, 'a> ByteArrayElements<'env, 'a> {
    /// # Safety
    /// `elems` must come from `GetByteArrayElements` on `array` in `env`,
    /// and `len` must be the array's length.
    pub(crate) unsafe fn new(
        env: &'env Env<'a>,
        array: jbyteArray,
        elems: *mut jbyte,
        len: jsize,
        mode: ReleaseMode,
    ) -> Self {
        Self {
            env,
            array,
            elems,
            len: usize::try_from(len).unwrap_or(0),
            mode,
        }
    }

    pub fn mode(&self) -> ReleaseMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ReleaseMode) {
        self.mode = mode;
    }

    /// Copy the current contents back to the array and keep the buffer.
    pub fn commit(&mut self) {
        unsafe {
            self.env.handle().release_byte_array_elements(
                self.array,
                self.elems,
                ReleaseMode::Commit.code(),
            )
        }
    }
}

impl Deref for ByteArrayElements<'_, '_> {
    type Target = [jbyte];

    fn deref(&self) -> &[jbyte] {
        unsafe { std::slice::from_raw_parts(self.elems, self.len) }
    }
}

impl DerefMut for ByteArrayElements<'_, '_> {
    fn deref_mut(&mut self) -> &mut [jbyte] {
        unsafe { std::slice::from_raw_parts_mut(self.elems, self.len) }
    }
}

impl Drop for ByteArrayElements<'_, '_> {
    fn drop(&mut self) {
        let handle = self.env.handle();
        unsafe {
            handle.release_byte_array_elements(self.array, self.elems, self.mode.code());
            if self.mode == ReleaseMode::Commit {
                handle.release_byte_array_elements(self.array, self.elems, JNI_ABORT);
            }
        }
    }
}

/// UTF-16 contents of a Java string, released on drop.
pub struct StringChars<'env, 'a> {
    env: &'env Env<'a>,
    string: jstring,
    chars: *const jchar,
    len: usize,
}

impl<'env, 'a> StringChars<'env, 'a> {
    /// # Safety
    /// `chars` must come from `GetStringChars` on `string` in `env`, and
    /// `len` must be the string's length in UTF-16 units.
    pub(crate) unsafe fn new(
        env: &'env Env<'a>,
        string: jstring,
        chars: *const jchar,
        len: jsize,
    ) -> Self {
        Self {
            env,
            string,
            chars,
            len: usize::try_from(len).unwrap_or(0),
        }
    }
}

impl Deref for StringChars<'_, '_> {
    type Target = [jchar];

    fn deref(&self) -> &[jchar] {
        unsafe { std::slice::from_raw_parts(self.chars, self.len) }
    }
}

impl Drop for StringChars<'_, '_> {
    fn drop(&mut self) {
        unsafe {
            self.env
                .handle()
                .release_string_chars(self.string, self.chars)
        }
    }
}

#[cfg(test)]
#[path = "elements/elements_tests.rs"]
mod elements_tests;
