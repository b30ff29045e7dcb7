//! Hand-off between the host activity and the native app
//!
//! The activity owns nothing of its own: it forwards lifecycle events to the
//! app, re-applies immersive mode on focus gain, and drives the app's
//! `init` / `update` / `close` entry points.

use crate::immersive::{ImmersiveMode, ImmersiveOutcome};
use crate::insets::SystemWindow;
use crate::lifecycle::{AppStatus, LifecycleEvent};

/// Entry points the native library exposes to its host
pub trait NativeApp {
    /// Called once before the first update
    fn init(&mut self) -> AppStatus;

    /// Called once per event-loop iteration while running
    fn update(&mut self) -> AppStatus;

    /// Called exactly once with the final status
    fn close(&mut self, status: AppStatus);

    /// Observe a lifecycle event after the host has handled it
    fn on_event(&mut self, _event: &LifecycleEvent) {}
}

/// Adapter between the host activity and a [`NativeApp`]
pub struct ActivityShim<A: NativeApp> {
    app: A,
    immersive: ImmersiveMode,
    status: AppStatus,
    started: bool,
    closed: bool,
    focused: bool,
    window_size: Option<(u32, u32)>,
}

impl<A: NativeApp> ActivityShim<A> {
    pub fn new(app: A, immersive: ImmersiveMode) -> Self {
        Self {
            app,
            immersive,
            status: AppStatus::Running,
            started: false,
            closed: false,
            focused: false,
            window_size: None,
        }
    }

    /// Run the app's `init` entry point (once)
    pub fn start(&mut self) -> AppStatus {
        if !self.started {
            self.started = true;
            self.status = self.app.init();
            tracing::info!("Native app initialized: {:?}", self.status);
        }
        self.status
    }

    /// Route one lifecycle event.
    ///
    /// `window` is only consulted on focus gain. Hosts that apply immersive
    /// mode on their UI thread (see [`ActivityShim::immersive`]) pass `None`.
    pub fn handle_event(
        &mut self,
        event: LifecycleEvent,
        window: Option<&mut dyn SystemWindow>,
    ) -> Option<ImmersiveOutcome> {
        let mut outcome = None;

        match event {
            LifecycleEvent::FocusGained => {
                tracing::info!("Window gained focus");
                self.focused = true;
                match window {
                    Some(window) => outcome = self.immersive.on_focus_changed(true, window),
                    None => tracing::debug!("Immersive mode left to the host UI thread"),
                }
            }
            LifecycleEvent::FocusLost => {
                tracing::info!("Window lost focus");
                self.focused = false;
            }
            LifecycleEvent::WindowCreated { width, height } => {
                tracing::info!("Native window created: {}x{}", width, height);
                self.window_size = Some((width, height));
            }
            LifecycleEvent::WindowResized { width, height } => {
                tracing::info!("Native window resized: {}x{}", width, height);
                self.window_size = Some((width, height));
            }
            LifecycleEvent::WindowDestroyed => {
                tracing::info!("Native window destroyed");
                self.window_size = None;
            }
            LifecycleEvent::Resumed => tracing::info!("App resumed"),
            LifecycleEvent::Paused => tracing::info!("App paused"),
            LifecycleEvent::LowMemory => tracing::warn!("Low memory warning"),
            LifecycleEvent::Destroyed => {
                tracing::info!("Activity destroyed");
                if self.status == AppStatus::Running {
                    self.status = AppStatus::Exiting;
                }
            }
        }

        self.app.on_event(&event);
        outcome
    }

    /// Run one `update` if the app is still running
    pub fn tick(&mut self) -> AppStatus {
        if self.started && !self.closed && self.status == AppStatus::Running {
            self.status = self.app.update();
            if self.status != AppStatus::Running {
                tracing::info!("Native app stopped: {:?}", self.status);
            }
        }
        self.status
    }

    /// Run the app's `close` entry point (once, and only after `start`)
    pub fn finish(&mut self) {
        if self.started && !self.closed {
            self.closed = true;
            tracing::info!("Closing native app: {:?}", self.status);
            self.app.close(self.status);
        }
    }

    pub fn is_running(&self) -> bool {
        !self.closed && self.status == AppStatus::Running
    }

    pub fn status(&self) -> AppStatus {
        self.status
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Current native window size in physical pixels
    pub fn window_size(&self) -> Option<(u32, u32)> {
        self.window_size
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    /// Enforcer used on focus gain, for hosts that apply it on another thread
    pub fn immersive(&self) -> &ImmersiveMode {
        &self.immersive
    }
}
