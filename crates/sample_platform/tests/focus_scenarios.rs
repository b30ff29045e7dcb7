//! End-to-end focus scenarios against a simulated host window
//!
//! The simulated window keeps the visible state the platform would: which bar
//! categories are hidden, the reveal behavior, and the decor layout. System
//! dialogs restore the bars on their own, as the platform does.

use sample_platform::{
    ActivityShim, AppStatus, DylibLoader, ImmersiveMode, ImmersiveOutcome, InsetTypes,
    InsetsController, LibraryLoader, LibraryName, LibraryRegistry, LifecycleEvent,
    LoadOutcome, LoadedLibrary, NativeApp, PlatformError, Result, SkipReason, SystemBarsBehavior,
    SystemWindow,
};
use std::cell::Cell;

#[derive(Debug)]
struct SimulatedWindow {
    api_level: u32,
    hidden: InsetTypes,
    behavior: SystemBarsBehavior,
    decor_fits: bool,
    host_calls: usize,
}

impl SimulatedWindow {
    fn new(api_level: u32) -> Self {
        Self {
            api_level,
            hidden: InsetTypes::NONE,
            behavior: SystemBarsBehavior::Default,
            decor_fits: true,
            host_calls: 0,
        }
    }

    /// A system dialog takes focus and the platform shows the bars again
    fn show_system_dialog(&mut self) {
        self.hidden = InsetTypes::NONE;
    }

    fn bars_hidden(&self) -> bool {
        self.hidden.contains(InsetTypes::system_bars())
    }
}

struct SimulatedController<'a> {
    window: &'a mut SimulatedWindow,
}

impl InsetsController for SimulatedController<'_> {
    fn hide(&mut self, types: InsetTypes) -> Result<()> {
        self.window.host_calls += 1;
        self.window.hidden |= types;
        Ok(())
    }

    fn set_system_bars_behavior(&mut self, behavior: SystemBarsBehavior) -> Result<()> {
        self.window.host_calls += 1;
        self.window.behavior = behavior;
        Ok(())
    }
}

impl SystemWindow for SimulatedWindow {
    fn insets_controller(&mut self) -> Result<Option<Box<dyn InsetsController + '_>>> {
        if self.api_level < 30 {
            return Err(PlatformError::InsetsUnavailable(format!(
                "API level {} < 30",
                self.api_level
            )));
        }
        Ok(Some(Box::new(SimulatedController { window: self })))
    }

    fn set_decor_fits_system_windows(&mut self, fits: bool) -> Result<()> {
        self.host_calls += 1;
        self.decor_fits = fits;
        Ok(())
    }
}

#[derive(Default)]
struct IdleApp {
    focus_events: usize,
}

impl NativeApp for IdleApp {
    fn init(&mut self) -> AppStatus {
        AppStatus::Running
    }

    fn update(&mut self) -> AppStatus {
        AppStatus::Running
    }

    fn close(&mut self, _status: AppStatus) {}

    fn on_event(&mut self, event: &LifecycleEvent) {
        if event.focus_change().is_some() {
            self.focus_events += 1;
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn started_shim() -> ActivityShim<IdleApp> {
    init_tracing();
    let mut shim = ActivityShim::new(IdleApp::default(), ImmersiveMode::default());
    shim.start();
    shim
}

#[test]
fn start_then_focus_hides_bars() {
    let mut window = SimulatedWindow::new(34);
    let mut shim = started_shim();

    let outcome = shim.handle_event(LifecycleEvent::FocusGained, Some(&mut window));

    assert_eq!(outcome, Some(ImmersiveOutcome::Applied));
    assert!(window.bars_hidden());
    assert_eq!(window.behavior, SystemBarsBehavior::ShowTransientBarsBySwipe);
    assert!(!window.decor_fits);
}

#[test]
fn dialog_round_trip_reapplies_policy() {
    let mut window = SimulatedWindow::new(34);
    let mut shim = started_shim();
    shim.handle_event(LifecycleEvent::FocusGained, Some(&mut window));

    window.show_system_dialog();
    let calls_before_loss = window.host_calls;
    assert_eq!(
        shim.handle_event(LifecycleEvent::FocusLost, Some(&mut window)),
        None
    );
    assert_eq!(window.host_calls, calls_before_loss);
    assert!(!window.bars_hidden());

    shim.handle_event(LifecycleEvent::FocusGained, Some(&mut window));
    assert!(window.bars_hidden());
    assert_eq!(shim.app().focus_events, 3);
}

#[test]
fn every_focus_gain_reissues_the_full_policy() {
    let mut window = SimulatedWindow::new(34);
    let mut shim = started_shim();

    for round in 1..=3 {
        shim.handle_event(LifecycleEvent::FocusGained, Some(&mut window));
        // hide(status), hide(navigation), behavior, decor
        assert_eq!(window.host_calls, round * 4);
    }
}

#[test]
fn old_platform_level_is_skipped_without_crashing() {
    let mut window = SimulatedWindow::new(29);
    let mut shim = started_shim();

    let outcome = shim.handle_event(LifecycleEvent::FocusGained, Some(&mut window));

    assert_eq!(
        outcome,
        Some(ImmersiveOutcome::Skipped(SkipReason::ControllerUnavailable))
    );
    assert_eq!(window.host_calls, 0);
    assert!(shim.is_running());
    assert!(shim.is_focused());
}

struct CountingLoader(Cell<usize>);

impl LibraryLoader for CountingLoader {
    fn load(&self, name: &LibraryName) -> Result<LoadedLibrary> {
        self.0.set(self.0.get() + 1);
        Ok(LoadedLibrary::resident(name.clone()))
    }
}

#[test]
fn recreated_activities_share_one_load() {
    let registry = LibraryRegistry::new();
    let loader = CountingLoader(Cell::new(0));
    let name = LibraryName::multiplatform_sample();

    let mut outcomes = Vec::new();
    for _ in 0..3 {
        // Each activity instance runs the loader step before starting.
        outcomes.push(registry.load_once(&loader, &name).unwrap());
        let mut shim = started_shim();
        shim.handle_event(LifecycleEvent::Destroyed, None);
        shim.finish();
    }

    assert_eq!(
        outcomes,
        vec![
            LoadOutcome::Loaded,
            LoadOutcome::AlreadyLoaded,
            LoadOutcome::AlreadyLoaded
        ]
    );
    assert_eq!(loader.0.get(), 1);
}

#[test]
fn unresolvable_library_is_fatal() {
    let registry = LibraryRegistry::new();
    let name = LibraryName::new("MissingSampleLibrary").unwrap();

    let err = registry
        .load_once(&DylibLoader::default(), &name)
        .unwrap_err();

    assert!(err.is_fatal());
    assert!(!registry.is_loaded(&name));
}
