//! C ABI exported functions
//!
//! One `jnishim_*` symbol per JNI operation. Every function takes the VM or
//! environment handle first, then the target, then identifiers, then
//! payload, and returns exactly what the underlying table entry returned.
//!
//! Apart from VM creation none of these does any work of its own: status
//! codes, null returns and pending exceptions are left for the caller to
//! inspect.

mod arrays;
mod exception;
mod fields;
mod invoke;
mod lifecycle;
mod logging;
mod reflect;
mod refs;
mod strings;

pub use arrays::*;
pub use exception::*;
pub use fields::*;
pub use invoke::*;
pub use lifecycle::*;
pub use logging::*;
pub use reflect::*;
pub use refs::*;
pub use strings::*;
