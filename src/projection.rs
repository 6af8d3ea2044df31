//! Maps a duration (configured or remaining) onto the LED ring.
//!
//! One unit per `step`. Units covering the guaranteed minimum are
//! [`UnitClass::Baseline`]; units above it are [`UnitClass::Extra`]. Setting
//! previews and running countdowns go through the same function.

use crate::types::SettingBounds;
use heapless::Vec;

/// Visual class of one lit ring unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnitClass {
    /// Within the setting's minimum.
    Baseline,
    /// Time added on top of the minimum.
    Extra,
}

/// Result of [`project`]: the class of every lit unit, in ring order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<const N: usize> {
    classes: Vec<UnitClass, N>,
}

impl<const N: usize> Projection<N> {
    /// Number of lit units.
    pub fn active_count(&self) -> usize {
        self.classes.len()
    }

    /// Class of each lit unit, index 0 first.
    pub fn classes(&self) -> &[UnitClass] {
        &self.classes
    }

    /// Class of unit `index`, or `None` if it is dark.
    pub fn class(&self, index: usize) -> Option<UnitClass> {
        self.classes.get(index).copied()
    }
}

/// Projects `value` onto a ring of `N` units.
///
/// `active = floor(value / step)` clamped to `N`; units with index below
/// `floor(min / step)` are baseline. Pure: equal inputs give equal outputs.
pub fn project<const N: usize>(value: u16, bounds: &SettingBounds) -> Projection<N> {
    let mut classes = Vec::new();
    if bounds.step == 0 {
        return Projection { classes };
    }

    let active = usize::from(value.min(bounds.max) / bounds.step).min(N);
    let baseline = usize::from(bounds.min / bounds.step);

    for index in 0..active {
        let class = if index < baseline {
            UnitClass::Baseline
        } else {
            UnitClass::Extra
        };
        // active <= N, so this cannot overflow
        let _ = classes.push(class);
    }

    Projection { classes }
}
