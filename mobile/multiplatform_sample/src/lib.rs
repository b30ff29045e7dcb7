//! MultiPlatformSample
//!
//! The native library the platform's `NativeActivity` loads. Everything the
//! sample actually does lives behind [`SampleApp`]; the host side (library
//! loading, immersive mode, lifecycle routing) comes from
//! `sample_platform_android`.

// The platform looks the library up as `libMultiPlatformSample.so`.
#![allow(non_snake_case)]

use sample_platform::{AppStatus, LifecycleEvent, NativeApp};

/// The sample's side of the native-app contract
#[derive(Debug, Default)]
pub struct SampleApp {
    frames: u64,
    visible: bool,
}

impl SampleApp {
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl NativeApp for SampleApp {
    fn init(&mut self) -> AppStatus {
        tracing::info!("MultiPlatformSample initialized");
        AppStatus::Running
    }

    fn update(&mut self) -> AppStatus {
        if self.visible {
            self.frames += 1;
        }
        AppStatus::Running
    }

    fn close(&mut self, status: AppStatus) {
        tracing::info!(
            "MultiPlatformSample closed ({:?}) after {} frames",
            status,
            self.frames
        );
    }

    fn on_event(&mut self, event: &LifecycleEvent) {
        match event {
            LifecycleEvent::WindowCreated { .. } | LifecycleEvent::Resumed => self.visible = true,
            LifecycleEvent::WindowDestroyed | LifecycleEvent::Paused => self.visible = false,
            _ => {}
        }
    }
}

// =============================================================================
// Android Entry Point
// =============================================================================

/// Runs while the platform loads the library inside `NativeActivity.onCreate`,
/// i.e. on the UI thread.
#[cfg(target_os = "android")]
#[used]
#[link_section = ".init_array"]
static CAPTURE_UI_THREAD: extern "C" fn() = {
    extern "C" fn capture() {
        sample_platform_android::capture_ui_thread();
    }
    capture
};

/// Covers hosts that load the library through `System.loadLibrary` instead.
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn JNI_OnLoad(
    _vm: *mut jni::sys::JavaVM,
    _reserved: *mut std::ffi::c_void,
) -> jni::sys::jint {
    sample_platform_android::capture_ui_thread();
    jni::sys::JNI_VERSION_1_6
}

#[cfg(target_os = "android")]
#[no_mangle]
fn android_main(app: android_activity::AndroidApp) {
    if let Err(e) = sample_platform_android::run(app, SampleApp::default()) {
        log::error!("MultiPlatformSample failed to start: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_frames_only_while_visible() {
        let mut app = SampleApp::default();
        assert_eq!(app.init(), AppStatus::Running);

        app.update();
        assert_eq!(app.frames(), 0);

        app.on_event(&LifecycleEvent::WindowCreated {
            width: 1080,
            height: 2400,
        });
        app.update();
        app.update();
        assert_eq!(app.frames(), 2);

        app.on_event(&LifecycleEvent::Paused);
        app.update();
        assert_eq!(app.frames(), 2);
        assert!(!app.is_visible());
    }
}
