//! Render collaborators and the view model handed to them.
//!
//! The knob decides what to show; [`Display`] and [`LedRing`] implementations
//! decide how. Layout, fonts and pixel drivers live on the other side of these
//! traits.

use crate::types::Mode;
use palette::Srgb;

/// Trait for abstracting the LED ring hardware.
///
/// Called only from the main loop, never from interrupt context.
pub trait LedRing {
    /// Lights units `0..colors.len()` with the given colors and turns the rest off.
    ///
    /// Components are in the 0.0-1.0 range; convert to the strip's native
    /// format. Handle hardware errors internally - this method cannot fail.
    fn set_units(&mut self, colors: &[Srgb]);

    /// Turns every unit off.
    fn clear(&mut self);
}

/// Trait for abstracting the display.
pub trait Display {
    /// Draws `view`, replacing whatever was shown. Called only when the view changes.
    fn show(&mut self, view: &View);
}

/// What the display should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum View {
    /// `Idle`: time of day, read by the renderer from its own RTC.
    Clock,
    /// A configuration mode previewing `value`.
    Setting { mode: Mode, value: u16 },
    /// A timed mode.
    Countdown {
        mode: Mode,
        remaining: u16,
        session: u16,
        cycles: u16,
        paused: bool,
    },
    /// A run just finished.
    Complete,
}

impl View {
    /// Mode label, if the view has one.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            View::Setting { mode, .. } | View::Countdown { mode, .. } => Some(mode.label()),
            View::Clock | View::Complete => None,
        }
    }

    /// Splits a minute value into `(hours, minutes)` for an `H:MM` layout.
    ///
    /// `None` for views without a duration, and for the session-count screen.
    pub fn hours_minutes(&self) -> Option<(u16, u16)> {
        let minutes = match *self {
            View::Setting {
                mode: Mode::ConfigCycle,
                ..
            } => return None,
            View::Setting { value, .. } => value,
            View::Countdown { remaining, .. } => remaining,
            View::Clock | View::Complete => return None,
        };
        Some((minutes / 60, minutes % 60))
    }
}
