//! MultiPlatformSample Android Platform
//!
//! Native activity runner and JNI bridge for the immersive-mode shim.
//!
//! The platform's `NativeActivity` loads `libMultiPlatformSample.so` (named by
//! the `android.app.lib_name` manifest meta-data) and calls into
//! `android-activity`, which in turn calls the library's `android_main`.
//! From there:
//!
//! ```ignore
//! #[no_mangle]
//! fn android_main(app: android_activity::AndroidApp) {
//!     if let Err(e) = sample_platform_android::run(app, MySample::default()) {
//!         log::error!("{e}");
//!     }
//! }
//! ```
//!
//! Window calls are posted back to the UI thread. The library captures that
//! thread's looper while it is being loaded, by calling `capture_ui_thread`
//! from a load-time constructor and from `JNI_OnLoad`.

pub mod logging;

#[cfg(target_os = "android")]
pub mod activity;
#[cfg(target_os = "android")]
pub mod jni_bridge;
#[cfg(target_os = "android")]
pub mod ui_thread;

#[cfg(target_os = "android")]
pub use activity::{run, run_with_config};
#[cfg(target_os = "android")]
pub use jni_bridge::{JniInsetsController, JniSystemWindow, INSETS_CONTROLLER_MIN_SDK};
#[cfg(target_os = "android")]
pub use ui_thread::capture_ui_thread;
pub use logging::init_logging;

/// Placeholder runner for non-Android builds (for cross-compilation checks)
#[cfg(not(target_os = "android"))]
pub fn run<A: sample_platform::NativeApp>(_native: A) -> sample_platform::Result<()> {
    Err(sample_platform::PlatformError::Unsupported(
        "Native activity only available on Android".to_string(),
    ))
}
