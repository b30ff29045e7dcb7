//! Native activity runner
//!
//! Drives an [`ActivityShim`] from the `android-activity` event loop: loads
//! the sample library once per process, forwards lifecycle events, and
//! re-applies immersive mode through JNI on the UI thread whenever the
//! window gains focus.

use std::time::Duration;

use android_activity::{AndroidApp, MainEvent, PollEvent};
use ndk::native_window::NativeWindow;

use sample_platform::{
    density_scale_factor, process_registry, ActivityShim, DylibLoader, ImmersiveMode,
    LifecycleEvent, LoadOutcome, NativeApp, PlatformError, Result, ShimConfig,
};

use crate::jni_bridge::{with_activity, JniSystemWindow};
use crate::logging::init_logging;
use crate::ui_thread::{ui_thread, UiThread};

/// Longest wait for platform events between app updates (~60fps)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Local references the focus callback may create before its frame is popped
const FOCUS_FRAME_CAPACITY: i32 = 16;

/// Run `native` inside the current activity until it exits or the activity is destroyed.
///
/// Fails only when the sample library cannot be resolved, in which case the
/// activity never starts.
pub fn run<A: NativeApp>(app: AndroidApp, native: A) -> Result<()> {
    run_with_config(app, native, &ShimConfig::default())
}

pub fn run_with_config<A: NativeApp>(app: AndroidApp, native: A, config: &ShimConfig) -> Result<()> {
    init_logging(config);

    let library = config.library_name()?;
    match process_registry().load_once(&DylibLoader::default(), &library) {
        Ok(LoadOutcome::Loaded) => tracing::info!("Starting {} ({})", library, library.file_name()),
        Ok(LoadOutcome::AlreadyLoaded) => {
            tracing::info!("Activity recreated; {} already loaded", library)
        }
        Err(e) => {
            tracing::error!("Cannot start activity: {}", e);
            return Err(e);
        }
    }

    let mut shim = ActivityShim::new(native, ImmersiveMode::new(config.immersive_policy()));
    shim.start();

    let mut pending: Vec<LifecycleEvent> = Vec::new();
    let mut destroyed = false;

    tracing::info!("Entering Android event loop");

    while !destroyed && shim.is_running() {
        app.poll_events(Some(FRAME_INTERVAL), |event| {
            if let PollEvent::Main(main_event) = event {
                if let Some(lifecycle) = translate(&app, &main_event) {
                    pending.push(lifecycle);
                }
            }
        });

        for event in pending.drain(..) {
            match event {
                LifecycleEvent::FocusGained => dispatch_focus_gained(&app, &mut shim),
                LifecycleEvent::WindowCreated { .. } => {
                    tracing::info!(
                        "Display scale factor: {}",
                        density_scale_factor(app.config().density())
                    );
                    shim.handle_event(event, None);
                }
                LifecycleEvent::Destroyed => {
                    destroyed = true;
                    shim.handle_event(event, None);
                }
                _ => {
                    shim.handle_event(event, None);
                }
            }
        }

        shim.tick();
    }

    shim.finish();
    tracing::info!("Leaving Android event loop");
    Ok(())
}

fn window_size(window: &NativeWindow) -> (u32, u32) {
    (window.width().max(0) as u32, window.height().max(0) as u32)
}

/// Map a glue command to a lifecycle event; commands the shim has no use for map to `None`
fn translate(app: &AndroidApp, event: &MainEvent<'_>) -> Option<LifecycleEvent> {
    match event {
        MainEvent::InitWindow { .. } => {
            let (width, height) = app.native_window().as_ref().map(window_size)?;
            Some(LifecycleEvent::WindowCreated { width, height })
        }
        MainEvent::TerminateWindow { .. } => Some(LifecycleEvent::WindowDestroyed),
        MainEvent::WindowResized { .. } => {
            let (width, height) = app.native_window().as_ref().map(window_size)?;
            Some(LifecycleEvent::WindowResized { width, height })
        }
        MainEvent::GainedFocus => Some(LifecycleEvent::FocusGained),
        MainEvent::LostFocus => Some(LifecycleEvent::FocusLost),
        MainEvent::Resume { .. } => Some(LifecycleEvent::Resumed),
        MainEvent::Pause => Some(LifecycleEvent::Paused),
        MainEvent::LowMemory => Some(LifecycleEvent::LowMemory),
        MainEvent::Destroy => Some(LifecycleEvent::Destroyed),
        _ => None,
    }
}

/// Hand a focus gain to the shim and get immersive mode applied on the UI thread.
///
/// Falls back to applying it from this thread when no UI looper was captured.
fn dispatch_focus_gained<A: NativeApp>(app: &AndroidApp, shim: &mut ActivityShim<A>) {
    if let Some(ui_thread) = ui_thread() {
        match post_immersive(app, ui_thread, shim.immersive().clone()) {
            Ok(()) => {
                shim.handle_event(LifecycleEvent::FocusGained, None);
                return;
            }
            Err(e) => tracing::warn!("Cannot post to UI thread: {}", e),
        }
    } else {
        tracing::warn!("UI thread not captured; applying immersive mode from android_main");
    }
    apply_in_place(app, shim);
}

fn post_immersive(app: &AndroidApp, ui_thread: &UiThread, immersive: ImmersiveMode) -> Result<()> {
    let (vm, activity) = with_activity(app, |env, activity| {
        Ok((env.get_java_vm()?, env.new_global_ref(activity)?))
    })
    .map_err(|e| PlatformError::Jni(e.to_string()))?;

    ui_thread.post(Box::new(move || {
        let result = vm.attach_current_thread().and_then(|mut env| {
            env.with_local_frame(FOCUS_FRAME_CAPACITY, |env| -> jni::errors::Result<()> {
                let mut window = JniSystemWindow::new(env, activity.as_obj());
                let outcome = immersive.apply(&mut window);
                tracing::debug!(
                    "Immersive mode on UI thread: {:?} ({:?})",
                    outcome,
                    immersive.policy()
                );
                Ok(())
            })
        });
        if let Err(e) = result {
            tracing::warn!("JNI attach on UI thread failed: {}", e);
        }
    }))
}

fn apply_in_place<A: NativeApp>(app: &AndroidApp, shim: &mut ActivityShim<A>) {
    let mut dispatched = false;

    let result = with_activity(app, |env, activity| {
        env.with_local_frame(FOCUS_FRAME_CAPACITY, |env| -> jni::errors::Result<()> {
            let mut window = JniSystemWindow::new(env, activity);
            shim.handle_event(LifecycleEvent::FocusGained, Some(&mut window));
            dispatched = true;
            Ok(())
        })
    });

    if let Err(e) = result {
        tracing::warn!("JNI attach failed, immersive mode not applied: {}", e);
    }
    if !dispatched {
        shim.handle_event(LifecycleEvent::FocusGained, None);
    }
}
