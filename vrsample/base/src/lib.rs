//! Placeholder native library of the VR sample. It references the vendor runtime at link time,
//! so it can only be mapped once `libvrapi.so` is resident.

mod lifecycle;

pub use lifecycle::*;

#[cfg(target_os = "android")]
use std::{
    ffi::{c_char, CStr},
    ptr::NonNull,
    sync::mpsc,
    thread,
    time::Duration,
};
#[cfg(target_os = "android")]
use vrsample_common::{anyhow::Result, info, show_err, show_warn, ToAny};

#[cfg(target_os = "android")]
#[link(name = "vrapi")]
extern "C" {
    fn vrapi_GetVersionString() -> *const c_char;
}

#[cfg(target_os = "android")]
fn vrapi_version() -> String {
    // SAFETY: vrapi returns a static nul terminated string
    unsafe { CStr::from_ptr(vrapi_GetVersionString()) }
        .to_string_lossy()
        .into_owned()
}

#[cfg(target_os = "android")]
fn vr_thread(mode_changes: mpsc::Receiver<VrModeChange>) -> Result<()> {
    let vm_ptr = NonNull::new(ndk_context::android_context().vm()).to_any()?;
    // SAFETY: the VM pointer is set by the activity glue and lives as long as the process
    let vm = unsafe { jni::JavaVM::from_raw(vm_ptr.as_ptr().cast()) }.to_any()?;
    let _env = vm.attach_current_thread().to_any()?;

    info!("VrApi {}", vrapi_version());

    for change in mode_changes {
        match change {
            VrModeChange::Enter => info!("Entering VR mode"),
            VrModeChange::Leave => info!("Leaving VR mode"),
        }
    }

    Ok(())
}

#[cfg(target_os = "android")]
#[no_mangle]
fn android_main(app: android_activity::AndroidApp) {
    use android_activity::{InputStatus, MainEvent, PollEvent};

    vrsample_common::init_logging("[VRSAMPLE NATIVE-RUST]");

    let (mode_sender, mode_receiver) = mpsc::channel();
    let vr_thread = thread::spawn(|| show_err(vr_thread(mode_receiver)));

    let mut lifecycle = Lifecycle::default();
    while !lifecycle.destroyed() {
        app.poll_events(Some(Duration::from_millis(100)), |event| {
            let event = match event {
                PollEvent::Main(MainEvent::Resume { .. }) => LifecycleEvent::Resume,
                PollEvent::Main(MainEvent::Pause) => LifecycleEvent::Pause,
                PollEvent::Main(MainEvent::InitWindow { .. }) => LifecycleEvent::InitWindow,
                PollEvent::Main(MainEvent::TerminateWindow { .. }) => {
                    LifecycleEvent::TerminateWindow
                }
                PollEvent::Main(MainEvent::Destroy) => LifecycleEvent::Destroy,
                PollEvent::Main(MainEvent::InputAvailable) => {
                    app.input_events(|_| InputStatus::Unhandled);
                    return;
                }
                _ => return,
            };

            if let Some(change) = lifecycle.handle(event) {
                // fails only if the VR thread already exited with an error
                show_warn(mode_sender.send(change));
            }
        });
    }

    drop(mode_sender);
    vr_thread.join().ok();
}
