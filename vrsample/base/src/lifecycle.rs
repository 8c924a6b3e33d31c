#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    Resume,
    Pause,
    InitWindow,
    TerminateWindow,
    Destroy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VrModeChange {
    Enter,
    Leave,
}

/// Tracks the activity state that decides whether the app may be in VR mode: it must be resumed
/// and own a native window.
#[derive(Default)]
pub struct Lifecycle {
    resumed: bool,
    has_window: bool,
    in_vr_mode: bool,
    destroyed: bool,
}

impl Lifecycle {
    pub fn handle(&mut self, event: LifecycleEvent) -> Option<VrModeChange> {
        match event {
            LifecycleEvent::Resume => self.resumed = true,
            LifecycleEvent::Pause => self.resumed = false,
            LifecycleEvent::InitWindow => self.has_window = true,
            LifecycleEvent::TerminateWindow => self.has_window = false,
            LifecycleEvent::Destroy => {
                self.resumed = false;
                self.has_window = false;
                self.destroyed = true;
            }
        }

        let should_be_in_vr = self.resumed && self.has_window;
        if should_be_in_vr == self.in_vr_mode {
            return None;
        }

        self.in_vr_mode = should_be_in_vr;

        Some(if should_be_in_vr {
            VrModeChange::Enter
        } else {
            VrModeChange::Leave
        })
    }

    pub fn in_vr_mode(&self) -> bool {
        self.in_vr_mode
    }

    pub fn destroyed(&self) -> bool {
        self.destroyed
    }
}
