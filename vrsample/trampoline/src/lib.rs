//! Entry library of the native activity.
//!
//! The manifest names this library as the activity's native library. When the platform maps it,
//! its module constructor loads the vendor runtime and then the sample library, in that order.
//! The platform then calls [`ANativeActivity_onCreate`] here, which hands the call unchanged to
//! the sample library's own entry point. No lifecycle callback is observed or altered.

use std::ffi::c_void;
use vrsample_bootstrap::{
    DynamicLinker, LibraryName, LoadPrimitive, Trampoline, VRSAMPLE_LOAD_ORDER,
};
use vrsample_common::error;

pub const ACTIVITY_ENTRY_SYMBOL: &[u8] = b"ANativeActivity_onCreate\0";

pub type ActivityOnCreate = unsafe extern "C" fn(
    activity: *mut c_void,
    saved_state: *mut c_void,
    saved_state_size: libc::size_t,
);

pub static TRAMPOLINE: Trampoline<DynamicLinker> =
    Trampoline::new(VRSAMPLE_LOAD_ORDER, DynamicLinker::new());

// Runs when the dynamic linker maps this library, before the platform calls into it
#[cfg(target_os = "android")]
#[ctor::ctor]
fn load_dependencies() {
    vrsample_common::init_logging("[VRSAMPLE BOOTSTRAP]");

    TRAMPOLINE.ensure_initialized();
}

/// Resolves the activity library's entry point after making sure every library is resident.
/// Terminates the process if the entry point is missing.
pub fn resolve_on_create<L: LoadPrimitive>(
    trampoline: &Trampoline<L>,
    lookup: impl FnOnce(&L, LibraryName) -> Option<ActivityOnCreate>,
) -> ActivityOnCreate {
    trampoline.ensure_initialized();

    let activity_library = trampoline.order().activity_library();

    match trampoline.with_loader(|loader| lookup(loader, activity_library)) {
        Some(on_create) => on_create,
        None => {
            error!("Fatal: {activity_library} does not export ANativeActivity_onCreate");

            std::process::abort();
        }
    }
}

/// # Safety
/// Called by the platform's native activity with a valid `ANativeActivity`.
#[cfg(target_os = "android")]
#[allow(non_snake_case)]
#[no_mangle]
pub unsafe extern "C" fn ANativeActivity_onCreate(
    activity: *mut c_void,
    saved_state: *mut c_void,
    saved_state_size: libc::size_t,
) {
    let on_create = resolve_on_create(&TRAMPOLINE, |linker, library| unsafe {
        linker.get::<ActivityOnCreate>(library, ACTIVITY_ENTRY_SYMBOL)
    });

    unsafe { on_create(activity, saved_state, saved_state_size) }
}
