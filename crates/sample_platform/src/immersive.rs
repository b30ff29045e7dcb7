//! Immersive-mode enforcement
//!
//! Re-applied on every focus gain: the platform brings the bars back on its
//! own whenever focus is interrupted (dialogs, notification shade), and the
//! next focus gain hides them again.

use crate::error::PlatformError;
use crate::insets::{InsetTypes, SystemBarsBehavior, SystemWindow};

/// What the enforcer asks of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImmersivePolicy {
    /// Categories hidden on each focus gain
    pub hide: InsetTypes,
    /// How hidden bars may be revealed
    pub behavior: SystemBarsBehavior,
    /// `false` draws the content behind the system insets
    pub decor_fits_system_windows: bool,
}

impl Default for ImmersivePolicy {
    fn default() -> Self {
        Self {
            hide: InsetTypes::system_bars(),
            behavior: SystemBarsBehavior::ShowTransientBarsBySwipe,
            decor_fits_system_windows: false,
        }
    }
}

/// Why an application of the policy did nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Platform level predates the insets controller, or the decor view has none
    ControllerUnavailable,
    /// A platform call failed part-way
    CallFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImmersiveOutcome {
    Applied,
    Skipped(SkipReason),
}

impl ImmersiveOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ImmersiveOutcome::Applied)
    }
}

/// Applies an [`ImmersivePolicy`] to the host window
#[derive(Debug, Clone, Default)]
pub struct ImmersiveMode {
    policy: ImmersivePolicy,
}

impl ImmersiveMode {
    pub fn new(policy: ImmersivePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ImmersivePolicy {
        &self.policy
    }

    /// Route a window focus change.
    ///
    /// Only a gain does anything; a loss returns `None` without touching the window.
    pub fn on_focus_changed(
        &self,
        has_focus: bool,
        window: &mut dyn SystemWindow,
    ) -> Option<ImmersiveOutcome> {
        has_focus.then(|| self.apply(window))
    }

    /// Hide the configured bars, set the reveal behavior, and lay out edge to edge.
    ///
    /// Never fails: any platform error turns into [`ImmersiveOutcome::Skipped`].
    pub fn apply(&self, window: &mut dyn SystemWindow) -> ImmersiveOutcome {
        let outcome = match self.try_apply(window) {
            Ok(outcome) => outcome,
            Err(PlatformError::InsetsUnavailable(reason)) => {
                tracing::debug!("Immersive mode skipped: {}", reason);
                ImmersiveOutcome::Skipped(SkipReason::ControllerUnavailable)
            }
            Err(e) => {
                tracing::warn!("Immersive mode skipped: {}", e);
                ImmersiveOutcome::Skipped(SkipReason::CallFailed(e.to_string()))
            }
        };

        if outcome.is_applied() {
            tracing::debug!(
                "Immersive mode applied (hide={:#x}, behavior={:?})",
                self.policy.hide.bits(),
                self.policy.behavior
            );
        }
        outcome
    }

    fn try_apply(&self, window: &mut dyn SystemWindow) -> crate::Result<ImmersiveOutcome> {
        {
            let Some(mut controller) = window.insets_controller()? else {
                tracing::debug!("No insets controller on this platform level");
                return Ok(ImmersiveOutcome::Skipped(SkipReason::ControllerUnavailable));
            };

            for category in self.policy.hide.iter() {
                controller.hide(category)?;
            }
            controller.set_system_bars_behavior(self.policy.behavior)?;
        }

        window.set_decor_fits_system_windows(self.policy.decor_fits_system_windows)?;
        Ok(ImmersiveOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insets::InsetsController;
    use crate::Result;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Hide(InsetTypes),
        Behavior(SystemBarsBehavior),
        DecorFits(bool),
    }

    #[derive(Default)]
    struct FakeWindow {
        calls: Vec<Call>,
        no_controller: bool,
        fail_behavior: bool,
    }

    struct FakeController<'a> {
        window: &'a mut FakeWindow,
    }

    impl InsetsController for FakeController<'_> {
        fn hide(&mut self, types: InsetTypes) -> Result<()> {
            self.window.calls.push(Call::Hide(types));
            Ok(())
        }

        fn set_system_bars_behavior(&mut self, behavior: SystemBarsBehavior) -> Result<()> {
            if self.window.fail_behavior {
                return Err(PlatformError::Jni("IllegalStateException".to_string()));
            }
            self.window.calls.push(Call::Behavior(behavior));
            Ok(())
        }
    }

    impl SystemWindow for FakeWindow {
        fn insets_controller(&mut self) -> Result<Option<Box<dyn InsetsController + '_>>> {
            if self.no_controller {
                return Ok(None);
            }
            Ok(Some(Box::new(FakeController { window: self })))
        }

        fn set_decor_fits_system_windows(&mut self, fits: bool) -> Result<()> {
            self.calls.push(Call::DecorFits(fits));
            Ok(())
        }
    }

    #[test]
    fn apply_issues_calls_in_order() {
        let mut window = FakeWindow::default();
        let outcome = ImmersiveMode::default().apply(&mut window);

        assert_eq!(outcome, ImmersiveOutcome::Applied);
        assert_eq!(
            window.calls,
            vec![
                Call::Hide(InsetTypes::STATUS_BARS),
                Call::Hide(InsetTypes::NAVIGATION_BARS),
                Call::Behavior(SystemBarsBehavior::ShowTransientBarsBySwipe),
                Call::DecorFits(false),
            ]
        );
    }

    #[test]
    fn focus_loss_touches_nothing() {
        let mut window = FakeWindow::default();
        assert_eq!(
            ImmersiveMode::default().on_focus_changed(false, &mut window),
            None
        );
        assert!(window.calls.is_empty());
    }

    #[test]
    fn missing_controller_is_a_silent_skip() {
        let mut window = FakeWindow {
            no_controller: true,
            ..FakeWindow::default()
        };
        let outcome = ImmersiveMode::default().apply(&mut window);

        assert_eq!(
            outcome,
            ImmersiveOutcome::Skipped(SkipReason::ControllerUnavailable)
        );
        assert!(window.calls.is_empty());
    }

    #[test]
    fn failing_call_aborts_early_without_error() {
        let mut window = FakeWindow {
            fail_behavior: true,
            ..FakeWindow::default()
        };
        let outcome = ImmersiveMode::default().apply(&mut window);

        assert!(matches!(
            outcome,
            ImmersiveOutcome::Skipped(SkipReason::CallFailed(_))
        ));
        assert!(!window.calls.contains(&Call::DecorFits(false)));
    }
}
