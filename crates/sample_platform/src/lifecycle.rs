//! Lifecycle events delivered by the host activity

/// Activity and window lifecycle, as routed from the native app glue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A native window is ready for use (physical pixels)
    WindowCreated { width: u32, height: u32 },
    /// The native window is about to go away
    WindowDestroyed,
    /// The native window changed size (physical pixels)
    WindowResized { width: u32, height: u32 },
    /// The window received input focus
    FocusGained,
    /// The window lost input focus
    FocusLost,
    /// App entered the foreground
    Resumed,
    /// App entered the background
    Paused,
    /// System reported memory pressure
    LowMemory,
    /// Activity is being destroyed
    Destroyed,
}

impl LifecycleEvent {
    /// Focus transition carried by this event, if any
    pub fn focus_change(&self) -> Option<bool> {
        match self {
            LifecycleEvent::FocusGained => Some(true),
            LifecycleEvent::FocusLost => Some(false),
            _ => None,
        }
    }
}

/// Status the native app reports back after each entry call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppStatus {
    #[default]
    Running,
    /// Unrecoverable failure; the loop stops and `close` receives this status
    Failing,
    /// Orderly shutdown requested
    Exiting,
}
