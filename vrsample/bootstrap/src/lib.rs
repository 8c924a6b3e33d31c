//! Ordered, one-shot loading of the shared libraries a native activity depends on.
//!
//! The platform's native activity loads a single library named in the manifest and has no way to
//! express that this library needs other libraries to be resident first. The dynamic linker also
//! remembers failed loads and refuses to retry them, so the dependencies must be requested
//! eagerly, once, and in dependency order before the activity library is mapped.

mod library;
mod loader;
mod sequence;
#[cfg(any(test, feature = "test-support"))]
mod simulated;
mod trampoline;

pub use library::*;
pub use loader::*;
pub use sequence::*;
#[cfg(any(test, feature = "test-support"))]
pub use simulated::*;
pub use trampoline::*;
