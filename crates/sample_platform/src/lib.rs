//! MultiPlatformSample host shim
//!
//! Platform-neutral half of the native-activity shim: the library the
//! activity launches and how it is loaded, the immersive-mode policy applied
//! on every focus gain, and the lifecycle hand-off to the native app.
//!
//! Platform extensions (see `sample_platform_android`) implement
//! [`SystemWindow`] and [`LibraryLoader`] and drive an [`ActivityShim`] from
//! their event loop.

pub mod app;
pub mod config;
pub mod dispatch;
pub mod display;
pub mod error;
pub mod immersive;
pub mod insets;
pub mod library;
pub mod lifecycle;

pub use app::{ActivityShim, NativeApp};
pub use config::ShimConfig;
pub use dispatch::{UiJob, UiJobQueue};
pub use display::density_scale_factor;
pub use error::{PlatformError, Result};
pub use immersive::{ImmersiveMode, ImmersiveOutcome, ImmersivePolicy, SkipReason};
pub use insets::{InsetTypes, InsetsController, SystemBarsBehavior, SystemWindow};
pub use library::{
    process_registry, DylibLoader, LibraryLoader, LibraryName, LibraryRegistry, LoadOutcome,
    LoadedLibrary, LIB_NAME_META_DATA, MULTIPLATFORM_SAMPLE, NATIVE_ACTIVITY_ENTRY,
};
pub use lifecycle::{AppStatus, LifecycleEvent};
