//! In-process fake of the JNI function tables
//!
//! [`FakeJvm`] builds a `JNINativeInterface_` and a `JNIInvokeInterface_`
//! whose slots are backed by a small object model, so the shim and the host
//! crate can be exercised without a real VM. It models what the forwarding
//! layer needs to be checked against:
//!
//! - a handful of bootstrap classes plus [`FIXTURE_CLASS`]
//! - local and global references as distinct aliases of one object
//! - strings, byte arrays and object arrays
//! - pinned element buffers with copy-back semantics per release mode
//! - pending exceptions, raised the way the VM raises them
//! - per-thread attach state
//!
//! Everything is single-VM and never garbage collected. Local references are
//! never freed implicitly.

use crate::handle::{EnvHandle, VmHandle};
use jni::sys::{
    JNI_ABORT, JNI_COMMIT, JNI_EDETACHED, JNI_EVERSION, JNI_FALSE, JNI_OK, JNI_TRUE,
    JNIEnv, JNIInvokeInterface_, JNINativeInterface_, JavaVM, jboolean, jbyte, jchar, jclass,
    jdouble, jfieldID, jfloat, jint, jlong, jmethodID, jobject, jshort, jsize, jvalue,
};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::ffi::{CStr, c_char, c_void};
use std::ptr::{self, NonNull};
use std::sync::Arc;
use std::thread::ThreadId;

/// Test class available through `FindClass`.
///
/// Static fields: `BOOL_VALUE` (true), `BYTE_VALUE` (-7), `CHAR_VALUE`
/// (U+263A), `SHORT_VALUE` (-300), `VALUE` (42), `LONG_VALUE` (1 << 40),
/// `FLOAT_VALUE` (1.5), `DOUBLE_VALUE` (0.25), `NAME` ("fixture").
///
/// Instance fields with the same values: `flag`, `tiny`, `letter`, `small`,
/// `count` (the constructor argument, default 42), `big`, `ratio`,
/// `precise`, `label` (null).
///
/// Methods: constructors `()V` and `(I)V`; `echo` in every primitive and
/// `Object` flavour, static and instance, returning its first argument;
/// `getCount()I`; `getClassLoader()`; `touch()V` and static `ping()V`;
/// static `fail(Ljava/lang/String;)V` raising a `RuntimeException`.
pub const FIXTURE_CLASS: &str = "jnishim/test/Fixture";

const KNOWN_VERSIONS: &[jint] = &[
    0x0001_0001,
    0x0001_0002,
    0x0001_0004,
    0x0001_0006,
    0x0001_0008,
    0x0009_0000,
    0x000a_0000,
    0x0013_0000,
    0x0015_0000,
];

/// Field value storage, one variant per JNI value kind.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Stored {
    Z(jboolean),
    B(jbyte),
    C(jchar),
    S(jshort),
    I(jint),
    J(jlong),
    F(jfloat),
    D(jdouble),
    L(Option<usize>),
}

#[derive(Debug)]
enum Object {
    Class {
        name: String,
        superclass: Option<usize>,
    },
    Instance {
        class: usize,
        fields: HashMap<usize, Stored>,
    },
    Str(Vec<u16>),
    Bytes(Vec<jbyte>),
    Array {
        element_class: usize,
        elements: Vec<Option<usize>>,
    },
    Throwable {
        class: usize,
        message: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefKind {
    Local,
    Global,
}

#[derive(Debug, Clone, Copy)]
struct Ref {
    object: usize,
    kind: RefKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    Construct,
    Echo,
    Describe,
    ClassName,
    ClassLoader,
    LoadClass,
    GetCount,
    Fail,
    Noop,
}

#[derive(Debug)]
struct MethodDef {
    class: usize,
    name: &'static str,
    sig: &'static str,
    is_static: bool,
    behavior: Behavior,
}

#[derive(Debug)]
struct FieldDef {
    class: usize,
    name: &'static str,
    sig: &'static str,
    is_static: bool,
    initial: Stored,
}

struct PinnedBytes {
    array: usize,
    len: usize,
    buffer: NonNull<[jbyte]>,
}

struct PinnedChars {
    buffer: NonNull<[jchar]>,
}

struct FakeState {
    objects: Vec<Object>,
    refs: HashMap<usize, Ref>,
    next_ref: usize,
    classes: HashMap<String, usize>,
    methods: Vec<MethodDef>,
    fields: Vec<FieldDef>,
    statics: HashMap<usize, Stored>,
    pending: Option<usize>,
    loader: usize,
    attached: HashSet<ThreadId>,
    pinned_bytes: HashMap<usize, PinnedBytes>,
    pinned_chars: HashMap<usize, PinnedChars>,
}

// The pinned buffers are owned by the state and only freed under its lock;
// hosts write through the pointers they were handed.
unsafe impl Send for FakeState {}

/// Layout-compatible with a `JNIEnv`: the table pointer comes first.
#[repr(C)]
struct FakeEnv {
    #[allow(dead_code)]
    functions: *const JNINativeInterface_,
    state: Arc<Mutex<FakeState>>,
}

/// Layout-compatible with a `JavaVM`: the table pointer comes first.
#[repr(C)]
struct FakeVm {
    #[allow(dead_code)]
    functions: *const JNIInvokeInterface_,
    state: Arc<Mutex<FakeState>>,
    env: *mut FakeEnv,
}

/// An in-process VM double. The creating thread starts out attached.
pub struct FakeJvm {
    state: Arc<Mutex<FakeState>>,
    env: *mut FakeEnv,
    vm: *mut FakeVm,
    env_table: *mut JNINativeInterface_,
    vm_table: *mut JNIInvokeInterface_,
}

impl FakeJvm {
    pub fn new() -> Self {
        let state = Arc::new(Mutex::new(FakeState::bootstrap()));
        state.lock().attached.insert(std::thread::current().id());

        let env_table = Box::into_raw(Box::new(native_table()));
        let vm_table = Box::into_raw(Box::new(invoke_table()));
        let env = Box::into_raw(Box::new(FakeEnv {
            functions: env_table,
            state: Arc::clone(&state),
        }));
        let vm = Box::into_raw(Box::new(FakeVm {
            functions: vm_table,
            state: Arc::clone(&state),
            env,
        }));

        Self {
            state,
            env,
            vm,
            env_table,
            vm_table,
        }
    }

    /// The environment handle shared by every attached thread
    pub fn env(&self) -> EnvHandle {
        EnvHandle::from_raw(self.env.cast::<JNIEnv>())
    }

    pub fn vm(&self) -> VmHandle {
        VmHandle::from_raw(self.vm.cast::<JavaVM>())
    }

    /// Edit the environment function table, e.g. to empty a slot.
    pub fn env_table_mut(&mut self) -> &mut JNINativeInterface_ {
        unsafe { &mut *self.env_table }
    }

    pub fn vm_table_mut(&mut self) -> &mut JNIInvokeInterface_ {
        unsafe { &mut *self.vm_table }
    }

    pub fn local_ref_count(&self) -> usize {
        self.count_refs(RefKind::Local)
    }

    pub fn global_ref_count(&self) -> usize {
        self.count_refs(RefKind::Global)
    }

    fn count_refs(&self, kind: RefKind) -> usize {
        self.state
            .lock()
            .refs
            .values()
            .filter(|r| r.kind == kind)
            .count()
    }

    /// Element buffers handed out and not yet released
    pub fn pinned_buffer_count(&self) -> usize {
        let state = self.state.lock();
        state.pinned_bytes.len() + state.pinned_chars.len()
    }

    pub fn is_current_thread_attached(&self) -> bool {
        self.state
            .lock()
            .attached
            .contains(&std::thread::current().id())
    }

    pub fn attached_thread_count(&self) -> usize {
        self.state.lock().attached.len()
    }

    /// `toString()` of the pending exception, without clearing it
    pub fn pending_exception(&self) -> Option<String> {
        let state = self.state.lock();
        state.pending.map(|id| state.describe(id))
    }

    /// Current contents of a byte array, bypassing any pinned copies
    pub fn byte_array_contents(&self, array: jobject) -> Option<Vec<jbyte>> {
        let state = self.state.lock();
        match state.resolve(array).map(|id| &state.objects[id]) {
            Some(Object::Bytes(bytes)) => Some(bytes.clone()),
            _ => None,
        }
    }

    pub fn string_value(&self, string: jobject) -> Option<String> {
        let state = self.state.lock();
        match state.resolve(string).map(|id| &state.objects[id]) {
            Some(Object::Str(units)) => Some(String::from_utf16_lossy(units)),
            _ => None,
        }
    }
}

impl Default for FakeJvm {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FakeJvm {
    fn drop(&mut self) {
        unsafe {
            drop(Box::from_raw(self.vm));
            drop(Box::from_raw(self.env));
            drop(Box::from_raw(self.vm_table));
            drop(Box::from_raw(self.env_table));
        }
    }
}

impl FakeState {
    fn bootstrap() -> Self {
        let mut state = Self {
            objects: Vec::new(),
            refs: HashMap::new(),
            next_ref: 1,
            classes: HashMap::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            statics: HashMap::new(),
            pending: None,
            loader: 0,
            attached: HashSet::new(),
            pinned_bytes: HashMap::new(),
            pinned_chars: HashMap::new(),
        };

        let object = state.define_class("java/lang/Object", None);
        let class = state.define_class("java/lang/Class", Some(object));
        state.define_class("java/lang/String", Some(object));
        let class_loader = state.define_class("java/lang/ClassLoader", Some(object));
        let throwable = state.define_class("java/lang/Throwable", Some(object));
        let runtime = state.define_class("java/lang/RuntimeException", Some(throwable));
        for name in [
            "java/lang/NoClassDefFoundError",
            "java/lang/ClassNotFoundException",
            "java/lang/NoSuchMethodError",
            "java/lang/NoSuchFieldError",
        ] {
            state.define_class(name, Some(throwable));
        }
        for name in [
            "java/lang/ArrayIndexOutOfBoundsException",
            "java/lang/ArrayStoreException",
            "java/lang/NegativeArraySizeException",
            "java/lang/NullPointerException",
        ] {
            state.define_class(name, Some(runtime));
        }
        state.define_class("[B", Some(object));
        state.define_class("[Ljava/lang/Object;", Some(object));
        let fixture = state.define_class(FIXTURE_CLASS, Some(object));

        state.loader = state.alloc(Object::Instance {
            class: class_loader,
            fields: HashMap::new(),
        });

        use Behavior::*;
        let methods: &[(usize, &str, &str, bool, Behavior)] = &[
            (object, "toString", "()Ljava/lang/String;", false, Describe),
            (class, "getName", "()Ljava/lang/String;", false, ClassName),
            (class, "getClassLoader", "()Ljava/lang/ClassLoader;", false, ClassLoader),
            (class_loader, "loadClass", "(Ljava/lang/String;)Ljava/lang/Class;", false, LoadClass),
            (fixture, "<init>", "()V", false, Construct),
            (fixture, "<init>", "(I)V", false, Construct),
            (fixture, "getCount", "()I", false, GetCount),
            (fixture, "getClassLoader", "()Ljava/lang/ClassLoader;", false, ClassLoader),
            (fixture, "touch", "()V", false, Noop),
            (fixture, "ping", "()V", true, Noop),
            (fixture, "fail", "(Ljava/lang/String;)V", true, Fail),
        ];
        for &(class, name, sig, is_static, behavior) in methods {
            state.methods.push(MethodDef {
                class,
                name,
                sig,
                is_static,
                behavior,
            });
        }
        for sig in [
            "(Z)Z",
            "(B)B",
            "(C)C",
            "(S)S",
            "(I)I",
            "(J)J",
            "(F)F",
            "(D)D",
            "(Ljava/lang/Object;)Ljava/lang/Object;",
        ] {
            for is_static in [false, true] {
                state.methods.push(MethodDef {
                    class: fixture,
                    name: "echo",
                    sig,
                    is_static,
                    behavior: Echo,
                });
            }
        }

        let name = state.alloc(Object::Str("fixture".encode_utf16().collect()));
        let fields: &[(&str, &str, &str, Stored)] = &[
            ("BOOL_VALUE", "flag", "Z", Stored::Z(JNI_TRUE)),
            ("BYTE_VALUE", "tiny", "B", Stored::B(-7)),
            ("CHAR_VALUE", "letter", "C", Stored::C(0x263A)),
            ("SHORT_VALUE", "small", "S", Stored::S(-300)),
            ("VALUE", "count", "I", Stored::I(42)),
            ("LONG_VALUE", "big", "J", Stored::J(1 << 40)),
            ("FLOAT_VALUE", "ratio", "F", Stored::F(1.5)),
            ("DOUBLE_VALUE", "precise", "D", Stored::D(0.25)),
        ];
        for &(static_name, instance_name, sig, initial) in fields {
            state.define_field(fixture, static_name, sig, true, initial);
            state.define_field(fixture, instance_name, sig, false, initial);
        }
        state.define_field(fixture, "NAME", "Ljava/lang/String;", true, Stored::L(Some(name)));
        state.define_field(fixture, "label", "Ljava/lang/String;", false, Stored::L(None));

        state
    }

    fn alloc(&mut self, object: Object) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    fn define_class(&mut self, name: &str, superclass: Option<usize>) -> usize {
        let id = self.alloc(Object::Class {
            name: name.to_string(),
            superclass,
        });
        self.classes.insert(name.to_string(), id);
        id
    }

    fn define_field(
        &mut self,
        class: usize,
        name: &'static str,
        sig: &'static str,
        is_static: bool,
        initial: Stored,
    ) {
        self.fields.push(FieldDef {
            class,
            name,
            sig,
            is_static,
            initial,
        });
        if is_static {
            self.statics.insert(self.fields.len() - 1, initial);
        }
    }

    fn class_named(&self, name: &str) -> usize {
        self.classes.get(name).copied().unwrap_or(0)
    }

    fn new_ref(&mut self, object: usize, kind: RefKind) -> jobject {
        let key = self.next_ref;
        self.next_ref += 1;
        self.refs.insert(key, Ref { object, kind });
        ptr::without_provenance_mut(key << 4)
    }

    fn local(&mut self, object: Option<usize>) -> jobject {
        match object {
            Some(id) => self.new_ref(id, RefKind::Local),
            None => ptr::null_mut(),
        }
    }

    fn resolve(&self, reference: jobject) -> Option<usize> {
        if reference.is_null() {
            return None;
        }
        self.refs.get(&(reference.addr() >> 4)).map(|r| r.object)
    }

    fn delete_ref(&mut self, reference: jobject, kind: RefKind) {
        let key = reference.addr() >> 4;
        if self.refs.get(&key).is_some_and(|r| r.kind == kind) {
            self.refs.remove(&key);
        }
    }

    fn class_of(&self, id: usize) -> usize {
        match &self.objects[id] {
            Object::Class { .. } => self.class_named("java/lang/Class"),
            Object::Instance { class, .. } | Object::Throwable { class, .. } => *class,
            Object::Str(_) => self.class_named("java/lang/String"),
            Object::Bytes(_) => self.class_named("[B"),
            Object::Array { .. } => self.class_named("[Ljava/lang/Object;"),
        }
    }

    fn is_subclass(&self, mut class: usize, target: usize) -> bool {
        loop {
            if class == target {
                return true;
            }
            match &self.objects[class] {
                Object::Class {
                    superclass: Some(parent),
                    ..
                } => class = *parent,
                _ => return false,
            }
        }
    }

    fn class_name(&self, class: usize) -> &str {
        match &self.objects[class] {
            Object::Class { name, .. } => name,
            _ => "",
        }
    }

    fn throw(&mut self, class_name: &str, message: impl Into<String>) {
        let class = self.class_named(class_name);
        let id = self.alloc(Object::Throwable {
            class,
            message: Some(message.into()),
        });
        self.pending = Some(id);
    }

    fn describe(&self, id: usize) -> String {
        match &self.objects[id] {
            Object::Str(units) => String::from_utf16_lossy(units),
            Object::Class { name, .. } => format!("class {}", name.replace('/', ".")),
            Object::Throwable { class, message } => {
                let name = self.class_name(*class).replace('/', ".");
                match message {
                    Some(message) => format!("{name}: {message}"),
                    None => name,
                }
            }
            _ => format!(
                "{}@{:x}",
                self.class_name(self.class_of(id)).replace('/', "."),
                id
            ),
        }
    }

    fn new_string(&mut self, text: &str) -> usize {
        self.alloc(Object::Str(text.encode_utf16().collect()))
    }

    fn find_method(&self, class: usize, name: &str, sig: &str, is_static: bool) -> Option<usize> {
        self.methods.iter().position(|m| {
            m.name == name
                && m.sig == sig
                && m.is_static == is_static
                && self.is_subclass(class, m.class)
        })
    }

    fn find_field(&self, class: usize, name: &str, sig: &str, is_static: bool) -> Option<usize> {
        self.fields.iter().position(|f| {
            f.name == name
                && f.sig == sig
                && f.is_static == is_static
                && self.is_subclass(class, f.class)
        })
    }

    fn stored_to_raw(&mut self, stored: Stored) -> jvalue {
        let mut raw = jvalue { j: 0 };
        match stored {
            Stored::Z(z) => raw.z = z,
            Stored::B(b) => raw.b = b,
            Stored::C(c) => raw.c = c,
            Stored::S(s) => raw.s = s,
            Stored::I(i) => raw.i = i,
            Stored::J(j) => raw.j = j,
            Stored::F(f) => raw.f = f,
            Stored::D(d) => raw.d = d,
            Stored::L(object) => raw.l = self.local(object),
        }
        raw
    }

    fn instantiate(&mut self, class: usize) -> usize {
        let fields = self
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.is_static && self.is_subclass(class, f.class))
            .map(|(index, f)| (index, f.initial))
            .collect();
        self.alloc(Object::Instance { class, fields })
    }

    fn invoke(
        &mut self,
        target: jobject,
        method: jmethodID,
        args: *const jvalue,
    ) -> jvalue {
        let zero = jvalue { j: 0 };
        let Some(def) = method
            .addr()
            .checked_sub(1)
            .and_then(|index| self.methods.get(index))
        else {
            return zero;
        };
        let behavior = def.behavior;
        let first_arg = if args.is_null() {
            None
        } else {
            Some(unsafe { *args })
        };
        let target = self.resolve(target);

        match behavior {
            Behavior::Echo => first_arg.unwrap_or(zero),
            Behavior::Noop | Behavior::Construct => zero,
            Behavior::Describe => {
                let Some(id) = target else {
                    self.throw("java/lang/NullPointerException", "toString on null");
                    return zero;
                };
                let text = self.describe(id);
                let string = self.new_string(&text);
                jvalue {
                    l: self.new_ref(string, RefKind::Local),
                }
            }
            Behavior::ClassName => {
                let name = target
                    .map(|id| self.class_name(id).replace('/', "."))
                    .unwrap_or_default();
                let string = self.new_string(&name);
                jvalue {
                    l: self.new_ref(string, RefKind::Local),
                }
            }
            Behavior::ClassLoader => jvalue {
                l: self.new_ref(self.loader, RefKind::Local),
            },
            Behavior::LoadClass => {
                let name = first_arg
                    .and_then(|arg| self.resolve(unsafe { arg.l }))
                    .map(|id| self.describe(id))
                    .unwrap_or_default();
                match self.classes.get(&name.replace('.', "/")).copied() {
                    Some(class) => jvalue {
                        l: self.new_ref(class, RefKind::Local),
                    },
                    None => {
                        self.throw("java/lang/ClassNotFoundException", name);
                        zero
                    }
                }
            }
            Behavior::GetCount => {
                let count = target.and_then(|id| match &self.objects[id] {
                    Object::Instance { fields, .. } => fields.values().find_map(|v| match v {
                        Stored::I(i) => Some(*i),
                        _ => None,
                    }),
                    _ => None,
                });
                jvalue {
                    i: count.unwrap_or(0),
                }
            }
            Behavior::Fail => {
                let message = first_arg
                    .and_then(|arg| self.resolve(unsafe { arg.l }))
                    .map(|id| self.describe(id))
                    .unwrap_or_default();
                self.throw("java/lang/RuntimeException", message);
                zero
            }
        }
    }

    fn read_field(&mut self, target: jobject, field: jfieldID) -> jvalue {
        let Some(index) = field.addr().checked_sub(1) else {
            return jvalue { j: 0 };
        };
        let stored = match self.fields.get(index) {
            Some(def) if def.is_static => self.statics.get(&index).copied(),
            Some(_) => self
                .resolve(target)
                .and_then(|id| match &self.objects[id] {
                    Object::Instance { fields, .. } => fields.get(&index).copied(),
                    _ => None,
                }),
            None => None,
        };
        match stored {
            Some(stored) => self.stored_to_raw(stored),
            None => jvalue { j: 0 },
        }
    }
}

impl Drop for FakeState {
    fn drop(&mut self) {
        for (_, pinned) in self.pinned_bytes.drain() {
            drop(unsafe { Box::from_raw(pinned.buffer.as_ptr()) });
        }
        for (_, pinned) in self.pinned_chars.drain() {
            drop(unsafe { Box::from_raw(pinned.buffer.as_ptr()) });
        }
    }
}

fn leak_buffer<T: Copy + Default>(contents: &[T]) -> NonNull<[T]> {
    // One spare element keeps empty buffers at distinct addresses.
    let mut buffer = contents.to_vec();
    buffer.push(T::default());
    NonNull::from(Box::leak(buffer.into_boxed_slice()))
}

unsafe fn env_state<'a>(env: *mut JNIEnv) -> parking_lot::MutexGuard<'a, FakeState> {
    let fake = unsafe { &*env.cast::<FakeEnv>() };
    fake.state.lock()
}

unsafe fn vm_parts<'a>(vm: *mut JavaVM) -> (&'a Mutex<FakeState>, *mut FakeEnv) {
    let fake = unsafe { &*vm.cast::<FakeVm>() };
    (&fake.state, fake.env)
}

unsafe fn c_str(text: *const c_char) -> String {
    if text.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(text) }
        .to_string_lossy()
        .into_owned()
}

// Invocation interface

unsafe extern "system" fn attach_current_thread(
    vm: *mut JavaVM,
    p_env: *mut *mut c_void,
    _args: *mut c_void,
) -> jint {
    let (state, env) = unsafe { vm_parts(vm) };
    state.lock().attached.insert(std::thread::current().id());
    unsafe { *p_env = env.cast::<c_void>() };
    JNI_OK
}

unsafe extern "system" fn detach_current_thread(vm: *mut JavaVM) -> jint {
    let (state, _) = unsafe { vm_parts(vm) };
    state.lock().attached.remove(&std::thread::current().id());
    JNI_OK
}

unsafe extern "system" fn get_env(vm: *mut JavaVM, p_env: *mut *mut c_void, version: jint) -> jint {
    let (state, env) = unsafe { vm_parts(vm) };
    if !KNOWN_VERSIONS.contains(&version) {
        unsafe { *p_env = ptr::null_mut() };
        return JNI_EVERSION;
    }
    if !state.lock().attached.contains(&std::thread::current().id()) {
        unsafe { *p_env = ptr::null_mut() };
        return JNI_EDETACHED;
    }
    unsafe { *p_env = env.cast::<c_void>() };
    JNI_OK
}

fn invoke_table() -> JNIInvokeInterface_ {
    let mut table: JNIInvokeInterface_ = unsafe { std::mem::zeroed() };
    table.AttachCurrentThread = Some(attach_current_thread);
    table.DetachCurrentThread = Some(detach_current_thread);
    table.GetEnv = Some(get_env);
    table
}

// Lookups

unsafe extern "system" fn find_class(env: *mut JNIEnv, name: *const c_char) -> jclass {
    let name = unsafe { c_str(name) };
    let mut state = unsafe { env_state(env) };
    match state.classes.get(&name).copied() {
        Some(class) => state.new_ref(class, RefKind::Local),
        None => {
            state.throw("java/lang/NoClassDefFoundError", name);
            ptr::null_mut()
        }
    }
}

unsafe extern "system" fn get_object_class(env: *mut JNIEnv, obj: jobject) -> jclass {
    let mut state = unsafe { env_state(env) };
    match state.resolve(obj) {
        Some(id) => {
            let class = state.class_of(id);
            state.new_ref(class, RefKind::Local)
        }
        None => ptr::null_mut(),
    }
}

unsafe fn lookup_member(
    env: *mut JNIEnv,
    cls: jclass,
    name: *const c_char,
    sig: *const c_char,
    is_static: bool,
    method: bool,
) -> usize {
    let (name, sig) = unsafe { (c_str(name), c_str(sig)) };
    let mut state = unsafe { env_state(env) };
    let Some(class) = state.resolve(cls) else {
        state.throw("java/lang/NullPointerException", "null class");
        return 0;
    };
    let found = if method {
        state.find_method(class, &name, &sig, is_static)
    } else {
        state.find_field(class, &name, &sig, is_static)
    };
    match found {
        Some(index) => index + 1,
        None => {
            let error = if method {
                "java/lang/NoSuchMethodError"
            } else {
                "java/lang/NoSuchFieldError"
            };
            state.throw(error, name);
            0
        }
    }
}

unsafe extern "system" fn get_method_id(
    env: *mut JNIEnv,
    cls: jclass,
    name: *const c_char,
    sig: *const c_char,
) -> jmethodID {
    ptr::without_provenance_mut(unsafe { lookup_member(env, cls, name, sig, false, true) })
}

unsafe extern "system" fn get_static_method_id(
    env: *mut JNIEnv,
    cls: jclass,
    name: *const c_char,
    sig: *const c_char,
) -> jmethodID {
    ptr::without_provenance_mut(unsafe { lookup_member(env, cls, name, sig, true, true) })
}

unsafe extern "system" fn get_field_id(
    env: *mut JNIEnv,
    cls: jclass,
    name: *const c_char,
    sig: *const c_char,
) -> jfieldID {
    ptr::without_provenance_mut(unsafe { lookup_member(env, cls, name, sig, false, false) })
}

unsafe extern "system" fn get_static_field_id(
    env: *mut JNIEnv,
    cls: jclass,
    name: *const c_char,
    sig: *const c_char,
) -> jfieldID {
    ptr::without_provenance_mut(unsafe { lookup_member(env, cls, name, sig, true, false) })
}

// Exceptions

unsafe extern "system" fn exception_occurred(env: *mut JNIEnv) -> jobject {
    let mut state = unsafe { env_state(env) };
    let pending = state.pending;
    state.local(pending)
}

unsafe extern "system" fn exception_clear(env: *mut JNIEnv) {
    unsafe { env_state(env) }.pending = None;
}

// References

unsafe extern "system" fn is_same_object(env: *mut JNIEnv, ref1: jobject, ref2: jobject) -> jboolean {
    let state = unsafe { env_state(env) };
    if state.resolve(ref1) == state.resolve(ref2) {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

unsafe extern "system" fn is_instance_of(env: *mut JNIEnv, obj: jobject, cls: jclass) -> jboolean {
    let state = unsafe { env_state(env) };
    let Some(object) = state.resolve(obj) else {
        return JNI_TRUE;
    };
    match state.resolve(cls) {
        Some(class) if state.is_subclass(state.class_of(object), class) => JNI_TRUE,
        _ => JNI_FALSE,
    }
}

unsafe extern "system" fn new_global_ref(env: *mut JNIEnv, obj: jobject) -> jobject {
    let mut state = unsafe { env_state(env) };
    match state.resolve(obj) {
        Some(id) => state.new_ref(id, RefKind::Global),
        None => ptr::null_mut(),
    }
}

unsafe extern "system" fn delete_global_ref(env: *mut JNIEnv, obj: jobject) {
    unsafe { env_state(env) }.delete_ref(obj, RefKind::Global);
}

unsafe extern "system" fn new_local_ref(env: *mut JNIEnv, obj: jobject) -> jobject {
    let mut state = unsafe { env_state(env) };
    let object = state.resolve(obj);
    state.local(object)
}

unsafe extern "system" fn delete_local_ref(env: *mut JNIEnv, obj: jobject) {
    unsafe { env_state(env) }.delete_ref(obj, RefKind::Local);
}

// Calls

unsafe extern "system" fn new_object_a(
    env: *mut JNIEnv,
    cls: jclass,
    method: jmethodID,
    args: *const jvalue,
) -> jobject {
    let mut state = unsafe { env_state(env) };
    let Some(class) = state.resolve(cls) else {
        state.throw("java/lang/NullPointerException", "null class");
        return ptr::null_mut();
    };
    let constructor = method
        .addr()
        .checked_sub(1)
        .and_then(|index| state.methods.get(index))
        .filter(|m| m.behavior == Behavior::Construct)
        .map(|m| m.sig);
    let Some(sig) = constructor else {
        state.throw("java/lang/NoSuchMethodError", "<init>");
        return ptr::null_mut();
    };

    let id = state.instantiate(class);
    if sig == "(I)V" && !args.is_null() {
        let count = unsafe { (*args).i };
        let count_field = state.find_field(class, "count", "I", false);
        if let (Some(field), Object::Instance { fields, .. }) = (count_field, &mut state.objects[id])
        {
            fields.insert(field, Stored::I(count));
        }
    }
    state.new_ref(id, RefKind::Local)
}

unsafe fn invoke(env: *mut JNIEnv, target: jobject, method: jmethodID, args: *const jvalue) -> jvalue {
    unsafe { env_state(env) }.invoke(target, method, args)
}

unsafe extern "system" fn call_void_method_a(
    env: *mut JNIEnv,
    obj: jobject,
    method: jmethodID,
    args: *const jvalue,
) {
    unsafe { invoke(env, obj, method, args) };
}

unsafe extern "system" fn call_static_void_method_a(
    env: *mut JNIEnv,
    cls: jclass,
    method: jmethodID,
    args: *const jvalue,
) {
    unsafe { invoke(env, cls, method, args) };
}

macro_rules! typed_accessors {
    ($($call:ident, $call_static:ident, $get:ident, $get_static:ident => $ty:ty, $member:ident;)*) => {
        $(
            unsafe extern "system" fn $call(
                env: *mut JNIEnv,
                obj: jobject,
                method: jmethodID,
                args: *const jvalue,
            ) -> $ty {
                unsafe { invoke(env, obj, method, args).$member }
            }

            unsafe extern "system" fn $call_static(
                env: *mut JNIEnv,
                cls: jclass,
                method: jmethodID,
                args: *const jvalue,
            ) -> $ty {
                unsafe { invoke(env, cls, method, args).$member }
            }

            unsafe extern "system" fn $get(env: *mut JNIEnv, obj: jobject, field: jfieldID) -> $ty {
                unsafe { env_state(env).read_field(obj, field).$member }
            }

            unsafe extern "system" fn $get_static(
                env: *mut JNIEnv,
                cls: jclass,
                field: jfieldID,
            ) -> $ty {
                unsafe { env_state(env).read_field(cls, field).$member }
            }
        )*
    };
}

typed_accessors! {
    call_object_method_a, call_static_object_method_a, get_object_field, get_static_object_field => jobject, l;
    call_boolean_method_a, call_static_boolean_method_a, get_boolean_field, get_static_boolean_field => jboolean, z;
    call_byte_method_a, call_static_byte_method_a, get_byte_field, get_static_byte_field => jbyte, b;
    call_char_method_a, call_static_char_method_a, get_char_field, get_static_char_field => jchar, c;
    call_short_method_a, call_static_short_method_a, get_short_field, get_static_short_field => jshort, s;
    call_int_method_a, call_static_int_method_a, get_int_field, get_static_int_field => jint, i;
    call_long_method_a, call_static_long_method_a, get_long_field, get_static_long_field => jlong, j;
    call_float_method_a, call_static_float_method_a, get_float_field, get_static_float_field => jfloat, f;
    call_double_method_a, call_static_double_method_a, get_double_field, get_static_double_field => jdouble, d;
}

// Arrays

unsafe extern "system" fn new_byte_array(env: *mut JNIEnv, length: jsize) -> jobject {
    let mut state = unsafe { env_state(env) };
    if length < 0 {
        state.throw("java/lang/NegativeArraySizeException", length.to_string());
        return ptr::null_mut();
    }
    let id = state.alloc(Object::Bytes(vec![0; length as usize]));
    state.new_ref(id, RefKind::Local)
}

unsafe extern "system" fn get_byte_array_elements(
    env: *mut JNIEnv,
    array: jobject,
    is_copy: *mut jboolean,
) -> *mut jbyte {
    let mut state = unsafe { env_state(env) };
    let Some(id) = state.resolve(array) else {
        return ptr::null_mut();
    };
    let Object::Bytes(bytes) = &state.objects[id] else {
        return ptr::null_mut();
    };
    let len = bytes.len();
    let buffer = leak_buffer(bytes);
    let elems = buffer.as_ptr().cast::<jbyte>();
    state.pinned_bytes.insert(
        elems.addr(),
        PinnedBytes {
            array: id,
            len,
            buffer,
        },
    );
    if !is_copy.is_null() {
        unsafe { *is_copy = JNI_TRUE };
    }
    elems
}

unsafe extern "system" fn release_byte_array_elements(
    env: *mut JNIEnv,
    _array: jobject,
    elems: *mut jbyte,
    mode: jint,
) {
    let mut state = unsafe { env_state(env) };
    let Some(pinned) = state.pinned_bytes.get(&elems.addr()) else {
        return;
    };
    let (array, len, buffer) = (pinned.array, pinned.len, pinned.buffer);

    if mode != JNI_ABORT {
        let contents = unsafe { &buffer.as_ref()[..len] }.to_vec();
        if let Object::Bytes(bytes) = &mut state.objects[array] {
            bytes.copy_from_slice(&contents);
        }
    }
    if mode != JNI_COMMIT {
        state.pinned_bytes.remove(&elems.addr());
        drop(unsafe { Box::from_raw(buffer.as_ptr()) });
    }
}

unsafe extern "system" fn get_array_length(env: *mut JNIEnv, array: jobject) -> jsize {
    let state = unsafe { env_state(env) };
    match state.resolve(array).map(|id| &state.objects[id]) {
        Some(Object::Bytes(bytes)) => bytes.len() as jsize,
        Some(Object::Array { elements, .. }) => elements.len() as jsize,
        _ => 0,
    }
}

unsafe extern "system" fn new_object_array(
    env: *mut JNIEnv,
    length: jsize,
    element_class: jclass,
    initial: jobject,
) -> jobject {
    let mut state = unsafe { env_state(env) };
    if length < 0 {
        state.throw("java/lang/NegativeArraySizeException", length.to_string());
        return ptr::null_mut();
    }
    let Some(element_class) = state.resolve(element_class) else {
        state.throw("java/lang/NullPointerException", "null element class");
        return ptr::null_mut();
    };
    let initial = state.resolve(initial);
    let id = state.alloc(Object::Array {
        element_class,
        elements: vec![initial; length as usize],
    });
    state.new_ref(id, RefKind::Local)
}

unsafe extern "system" fn get_object_array_element(
    env: *mut JNIEnv,
    array: jobject,
    index: jsize,
) -> jobject {
    let mut state = unsafe { env_state(env) };
    let element = match state.resolve(array).map(|id| &state.objects[id]) {
        Some(Object::Array { elements, .. }) => usize::try_from(index)
            .ok()
            .and_then(|i| elements.get(i).copied()),
        _ => None,
    };
    match element {
        Some(element) => state.local(element),
        None => {
            state.throw(
                "java/lang/ArrayIndexOutOfBoundsException",
                format!("Index {index} out of bounds"),
            );
            ptr::null_mut()
        }
    }
}

unsafe extern "system" fn set_object_array_element(
    env: *mut JNIEnv,
    array: jobject,
    index: jsize,
    value: jobject,
) {
    let mut state = unsafe { env_state(env) };
    let value = state.resolve(value);
    let Some(id) = state.resolve(array) else {
        state.throw("java/lang/NullPointerException", "null array");
        return;
    };
    let element_class = match &state.objects[id] {
        Object::Array { element_class, .. } => *element_class,
        _ => return,
    };
    if let Some(value) = value {
        let value_class = state.class_of(value);
        if !state.is_subclass(value_class, element_class) {
            let message = state.class_name(value_class).replace('/', ".");
            state.throw("java/lang/ArrayStoreException", message);
            return;
        }
    }
    let stored = match &mut state.objects[id] {
        Object::Array { elements, .. } => usize::try_from(index)
            .ok()
            .and_then(|i| elements.get_mut(i))
            .map(|slot| *slot = value)
            .is_some(),
        _ => false,
    };
    if !stored {
        state.throw(
            "java/lang/ArrayIndexOutOfBoundsException",
            format!("Index {index} out of bounds"),
        );
    }
}

// Strings

unsafe extern "system" fn get_string_length(env: *mut JNIEnv, string: jobject) -> jsize {
    let state = unsafe { env_state(env) };
    match state.resolve(string).map(|id| &state.objects[id]) {
        Some(Object::Str(units)) => units.len() as jsize,
        _ => 0,
    }
}

unsafe extern "system" fn get_string_chars(
    env: *mut JNIEnv,
    string: jobject,
    is_copy: *mut jboolean,
) -> *const jchar {
    let mut state = unsafe { env_state(env) };
    let Some(Object::Str(units)) = state.resolve(string).map(|id| &state.objects[id]) else {
        return ptr::null();
    };
    let buffer = leak_buffer(units);
    let chars = buffer.as_ptr().cast::<jchar>();
    state
        .pinned_chars
        .insert(chars.addr(), PinnedChars { buffer });
    if !is_copy.is_null() {
        unsafe { *is_copy = JNI_TRUE };
    }
    chars
}

unsafe extern "system" fn release_string_chars(
    env: *mut JNIEnv,
    _string: jobject,
    chars: *const jchar,
) {
    let mut state = unsafe { env_state(env) };
    if let Some(pinned) = state.pinned_chars.remove(&chars.addr()) {
        drop(unsafe { Box::from_raw(pinned.buffer.as_ptr()) });
    }
}

unsafe extern "system" fn new_string(env: *mut JNIEnv, unicode: *const jchar, length: jsize) -> jobject {
    let mut state = unsafe { env_state(env) };
    let units = match usize::try_from(length) {
        Ok(0) => Vec::new(),
        Ok(len) if !unicode.is_null() => unsafe { std::slice::from_raw_parts(unicode, len) }.to_vec(),
        _ => {
            state.throw("java/lang/NullPointerException", "invalid string buffer");
            return ptr::null_mut();
        }
    };
    let id = state.alloc(Object::Str(units));
    state.new_ref(id, RefKind::Local)
}

fn native_table() -> JNINativeInterface_ {
    let mut t: JNINativeInterface_ = unsafe { std::mem::zeroed() };

    t.FindClass = Some(find_class);
    t.GetObjectClass = Some(get_object_class);
    t.GetMethodID = Some(get_method_id);
    t.GetStaticMethodID = Some(get_static_method_id);
    t.GetFieldID = Some(get_field_id);
    t.GetStaticFieldID = Some(get_static_field_id);

    t.ExceptionOccurred = Some(exception_occurred);
    t.ExceptionClear = Some(exception_clear);

    t.IsSameObject = Some(is_same_object);
    t.IsInstanceOf = Some(is_instance_of);
    t.NewGlobalRef = Some(new_global_ref);
    t.DeleteGlobalRef = Some(delete_global_ref);
    t.NewLocalRef = Some(new_local_ref);
    t.DeleteLocalRef = Some(delete_local_ref);

    t.NewObjectA = Some(new_object_a);
    t.CallVoidMethodA = Some(call_void_method_a);
    t.CallObjectMethodA = Some(call_object_method_a);
    t.CallBooleanMethodA = Some(call_boolean_method_a);
    t.CallByteMethodA = Some(call_byte_method_a);
    t.CallCharMethodA = Some(call_char_method_a);
    t.CallShortMethodA = Some(call_short_method_a);
    t.CallIntMethodA = Some(call_int_method_a);
    t.CallLongMethodA = Some(call_long_method_a);
    t.CallFloatMethodA = Some(call_float_method_a);
    t.CallDoubleMethodA = Some(call_double_method_a);
    t.CallStaticVoidMethodA = Some(call_static_void_method_a);
    t.CallStaticObjectMethodA = Some(call_static_object_method_a);
    t.CallStaticBooleanMethodA = Some(call_static_boolean_method_a);
    t.CallStaticByteMethodA = Some(call_static_byte_method_a);
    t.CallStaticCharMethodA = Some(call_static_char_method_a);
    t.CallStaticShortMethodA = Some(call_static_short_method_a);
    t.CallStaticIntMethodA = Some(call_static_int_method_a);
    t.CallStaticLongMethodA = Some(call_static_long_method_a);
    t.CallStaticFloatMethodA = Some(call_static_float_method_a);
    t.CallStaticDoubleMethodA = Some(call_static_double_method_a);

    t.GetObjectField = Some(get_object_field);
    t.GetBooleanField = Some(get_boolean_field);
    t.GetByteField = Some(get_byte_field);
    t.GetCharField = Some(get_char_field);
    t.GetShortField = Some(get_short_field);
    t.GetIntField = Some(get_int_field);
    t.GetLongField = Some(get_long_field);
    t.GetFloatField = Some(get_float_field);
    t.GetDoubleField = Some(get_double_field);
    t.GetStaticObjectField = Some(get_static_object_field);
    t.GetStaticBooleanField = Some(get_static_boolean_field);
    t.GetStaticByteField = Some(get_static_byte_field);
    t.GetStaticCharField = Some(get_static_char_field);
    t.GetStaticShortField = Some(get_static_short_field);
    t.GetStaticIntField = Some(get_static_int_field);
    t.GetStaticLongField = Some(get_static_long_field);
    t.GetStaticFloatField = Some(get_static_float_field);
    t.GetStaticDoubleField = Some(get_static_double_field);

    t.NewByteArray = Some(new_byte_array);
    t.GetByteArrayElements = Some(get_byte_array_elements);
    t.ReleaseByteArrayElements = Some(release_byte_array_elements);
    t.GetArrayLength = Some(get_array_length);
    t.NewObjectArray = Some(new_object_array);
    t.GetObjectArrayElement = Some(get_object_array_element);
    t.SetObjectArrayElement = Some(set_object_array_element);

    t.GetStringLength = Some(get_string_length);
    t.GetStringChars = Some(get_string_chars);
    t.ReleaseStringChars = Some(release_string_chars);
    t.NewString = Some(new_string);

    t
}

#[cfg(test)]
#[path = "testing/testing_tests.rs"]
mod testing_tests;
