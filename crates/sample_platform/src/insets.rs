//! Window inset categories and the controller contract
//!
//! Values mirror `android.view.WindowInsets.Type` and
//! `android.view.WindowInsetsController` so they can be passed straight
//! through JNI.

use std::ops::{BitOr, BitOrAssign};

use crate::error::Result;

/// A set of system-drawn decoration categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InsetTypes(i32);

impl InsetTypes {
    pub const NONE: InsetTypes = InsetTypes(0);
    /// `WindowInsets.Type.statusBars()`
    pub const STATUS_BARS: InsetTypes = InsetTypes(1 << 0);
    /// `WindowInsets.Type.navigationBars()`
    pub const NAVIGATION_BARS: InsetTypes = InsetTypes(1 << 1);

    /// Status and navigation bars together
    pub const fn system_bars() -> Self {
        InsetTypes(Self::STATUS_BARS.0 | Self::NAVIGATION_BARS.0)
    }

    pub const fn bits(self) -> i32 {
        self.0
    }

    pub const fn contains(self, other: InsetTypes) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Split into single categories, lowest bit first
    pub fn iter(self) -> impl Iterator<Item = InsetTypes> {
        (0..i32::BITS)
            .map(|bit| 1i32 << bit)
            .filter(move |mask| self.0 & mask != 0)
            .map(InsetTypes)
    }
}

impl BitOr for InsetTypes {
    type Output = InsetTypes;

    fn bitor(self, rhs: Self) -> Self {
        InsetTypes(self.0 | rhs.0)
    }
}

impl BitOrAssign for InsetTypes {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// How hidden system bars come back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SystemBarsBehavior {
    /// Bars reappear on any touch; the platform default
    #[default]
    Default,
    /// Bars appear transiently after an inward swipe from the edge, then hide again
    ShowTransientBarsBySwipe,
}

impl SystemBarsBehavior {
    /// Platform constant (`BEHAVIOR_DEFAULT` / `BEHAVIOR_SHOW_TRANSIENT_BARS_BY_SWIPE`)
    pub const fn raw(self) -> i32 {
        match self {
            SystemBarsBehavior::Default => 1,
            SystemBarsBehavior::ShowTransientBarsBySwipe => 2,
        }
    }
}

/// Handle for showing and hiding categories of system decorations
///
/// Borrowed from the window for the duration of one callback.
pub trait InsetsController {
    fn hide(&mut self, types: InsetTypes) -> Result<()>;

    fn set_system_bars_behavior(&mut self, behavior: SystemBarsBehavior) -> Result<()>;
}

/// The host window as seen from the shim
pub trait SystemWindow {
    /// Insets controller of the current decor view, if this platform level has one
    fn insets_controller(&mut self) -> Result<Option<Box<dyn InsetsController + '_>>>;

    /// Whether the decor view is laid out inside the system insets
    fn set_decor_fits_system_windows(&mut self, fits: bool) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_bars_cover_status_and_navigation() {
        let bars = InsetTypes::system_bars();
        assert!(bars.contains(InsetTypes::STATUS_BARS));
        assert!(bars.contains(InsetTypes::NAVIGATION_BARS));
        assert_eq!(bars.bits(), 0b11);
        assert_eq!(
            bars.iter().collect::<Vec<_>>(),
            vec![InsetTypes::STATUS_BARS, InsetTypes::NAVIGATION_BARS]
        );
    }

    #[test]
    fn behavior_matches_platform_constants() {
        assert_eq!(SystemBarsBehavior::Default.raw(), 1);
        assert_eq!(SystemBarsBehavior::ShowTransientBarsBySwipe.raw(), 2);
    }

    #[test]
    fn empty_set_yields_nothing() {
        let mut types = InsetTypes::NONE;
        assert!(types.is_empty());
        assert_eq!(types.iter().count(), 0);
        types |= InsetTypes::STATUS_BARS;
        assert!(!types.is_empty());
    }
}
