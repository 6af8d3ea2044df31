//! Ring colors.
//!
//! All colors are `palette::Srgb<f32>` (0.0-1.0). [`rgb8`] builds them from the
//! 8-bit values LED strips are usually specified in.

use crate::projection::UnitClass;
use crate::types::SettingKind;
use palette::Srgb;

/// Builds an `Srgb` from 8-bit components.
#[inline]
pub const fn rgb8(red: u8, green: u8, blue: u8) -> Srgb {
    Srgb::new(
        red as f32 / 255.0,
        green as f32 / 255.0,
        blue as f32 / 255.0,
    )
}

/// Baseline/extra color pair for one setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeColors {
    pub baseline: Srgb,
    pub extra: Srgb,
}

impl ModeColors {
    pub const fn new(baseline: Srgb, extra: Srgb) -> Self {
        Self { baseline, extra }
    }

    /// Color for a unit of the given class.
    #[inline]
    pub fn color(&self, class: UnitClass) -> Srgb {
        match class {
            UnitClass::Baseline => self.baseline,
            UnitClass::Extra => self.extra,
        }
    }
}

/// Full ring palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub study: ModeColors,
    pub brk: ModeColors,
    pub cycles: ModeColors,
    pub timer: ModeColors,
    /// Color of the full ring shown when a run finishes.
    pub completion: Srgb,
}

impl Palette {
    pub const fn for_setting(&self, setting: SettingKind) -> ModeColors {
        match setting {
            SettingKind::Study => self.study,
            SettingKind::Break => self.brk,
            SettingKind::Cycles => self.cycles,
            SettingKind::Timer => self.timer,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            study: ModeColors::new(rgb8(250, 100, 0), rgb8(252, 143, 71)),
            brk: ModeColors::new(rgb8(5, 211, 252), rgb8(100, 250, 255)),
            cycles: ModeColors::new(rgb8(200, 0, 255), rgb8(220, 100, 255)),
            timer: ModeColors::new(rgb8(255, 0, 0), rgb8(255, 38, 38)),
            completion: rgb8(200, 0, 255),
        }
    }
}
