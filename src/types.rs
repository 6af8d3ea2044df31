//! Core types shared by the input decoder, mode machine and countdown engine.

/// Operating mode of the knob. Exactly one is current at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Wall clock shown, ring dark.
    Idle,
    /// Editing the study duration.
    ConfigStudy,
    /// Editing the break duration.
    ConfigBreak,
    /// Editing the number of study/break sessions.
    ConfigCycle,
    /// Editing the plain timer duration.
    ConfigTimer,
    /// Study countdown running.
    Study,
    /// Break countdown running.
    Break,
    /// Plain timer countdown running.
    Timer,
}

impl Mode {
    /// Returns true for the four configuration modes.
    pub const fn is_config(self) -> bool {
        matches!(
            self,
            Mode::ConfigStudy | Mode::ConfigBreak | Mode::ConfigCycle | Mode::ConfigTimer
        )
    }

    /// Returns true for the modes driven by the countdown engine.
    pub const fn is_timed(self) -> bool {
        matches!(self, Mode::Study | Mode::Break | Mode::Timer)
    }

    /// The setting edited by a configuration mode.
    pub const fn edited_setting(self) -> Option<SettingKind> {
        match self {
            Mode::ConfigStudy => Some(SettingKind::Study),
            Mode::ConfigBreak => Some(SettingKind::Break),
            Mode::ConfigCycle => Some(SettingKind::Cycles),
            Mode::ConfigTimer => Some(SettingKind::Timer),
            _ => None,
        }
    }

    /// The setting whose bounds and colors a mode is rendered with.
    pub const fn displayed_setting(self) -> Option<SettingKind> {
        match self {
            Mode::Study => Some(SettingKind::Study),
            Mode::Break => Some(SettingKind::Break),
            Mode::Timer => Some(SettingKind::Timer),
            other => other.edited_setting(),
        }
    }

    /// Short label for the display.
    pub const fn label(self) -> &'static str {
        match self {
            Mode::Idle => "IDLE",
            Mode::ConfigStudy => "STUDY",
            Mode::ConfigBreak => "BREAK",
            Mode::ConfigCycle => "SESSIONS",
            Mode::ConfigTimer => "TIMER",
            Mode::Study => "STUDY",
            Mode::Break => "BREAK",
            Mode::Timer => "TIMER",
        }
    }
}

/// Rotation direction of one encoder detent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

/// Identifies one of the four user settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingKind {
    Study,
    Break,
    Cycles,
    Timer,
}

/// Inclusive bounds and step for one setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingBounds {
    pub min: u16,
    pub max: u16,
    pub step: u16,
}

impl SettingBounds {
    /// Creates bounds. Use [`SettingBounds::validate`] before trusting them.
    pub const fn new(min: u16, max: u16, step: u16) -> Self {
        Self { min, max, step }
    }

    /// Moves `value` one step in `direction`.
    ///
    /// A step that would leave `[min, max]` leaves the value unchanged; the
    /// value never wraps.
    pub fn adjust(&self, value: u16, direction: Direction) -> u16 {
        match direction {
            Direction::Clockwise => match value.checked_add(self.step) {
                Some(next) if next <= self.max => next,
                _ => value,
            },
            Direction::CounterClockwise => match value.checked_sub(self.step) {
                Some(next) if next >= self.min => next,
                _ => value,
            },
        }
    }

    /// Checks that the bounds describe a usable, step-aligned range.
    pub fn validate(&self, setting: SettingKind) -> Result<(), ConfigError> {
        if self.step == 0 {
            return Err(ConfigError::ZeroStep(setting));
        }
        if self.min > self.max {
            return Err(ConfigError::InvertedBounds(setting));
        }
        if (self.max - self.min) % self.step != 0 {
            return Err(ConfigError::UnalignedBounds(setting));
        }
        Ok(())
    }
}

/// Bounds for all four settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingLimits {
    pub study: SettingBounds,
    pub brk: SettingBounds,
    pub cycles: SettingBounds,
    pub timer: SettingBounds,
}

impl SettingLimits {
    /// Returns the bounds of one setting.
    pub const fn get(&self, setting: SettingKind) -> SettingBounds {
        match setting {
            SettingKind::Study => self.study,
            SettingKind::Break => self.brk,
            SettingKind::Cycles => self.cycles,
            SettingKind::Timer => self.timer,
        }
    }
}

impl Default for SettingLimits {
    fn default() -> Self {
        Self {
            study: SettingBounds::new(25, 120, 5),
            brk: SettingBounds::new(5, 15, 1),
            cycles: SettingBounds::new(1, 4, 1),
            timer: SettingBounds::new(10, 120, 5),
        }
    }
}

/// The four user-adjustable values. Durations are in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub study_minutes: u16,
    pub break_minutes: u16,
    pub cycle_count: u16,
    pub timer_minutes: u16,
}

impl Settings {
    /// Every setting at its minimum, which is the power-on state.
    pub const fn minimums(limits: &SettingLimits) -> Self {
        Self {
            study_minutes: limits.study.min,
            break_minutes: limits.brk.min,
            cycle_count: limits.cycles.min,
            timer_minutes: limits.timer.min,
        }
    }

    pub const fn get(&self, setting: SettingKind) -> u16 {
        match setting {
            SettingKind::Study => self.study_minutes,
            SettingKind::Break => self.break_minutes,
            SettingKind::Cycles => self.cycle_count,
            SettingKind::Timer => self.timer_minutes,
        }
    }

    pub fn set(&mut self, setting: SettingKind, value: u16) {
        match setting {
            SettingKind::Study => self.study_minutes = value,
            SettingKind::Break => self.break_minutes = value,
            SettingKind::Cycles => self.cycle_count = value,
            SettingKind::Timer => self.timer_minutes = value,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A setting has a zero step.
    ZeroStep(SettingKind),

    /// A setting has `min > max`.
    InvertedBounds(SettingKind),

    /// `max` cannot be reached from `min` in whole steps.
    UnalignedBounds(SettingKind),

    /// A setting's `max / step` exceeds the number of ring units.
    ExceedsRing(SettingKind),

    /// A countdown policy has a zero tick interval or zero step.
    InvalidCountdownPolicy(Mode),

    /// Long-press threshold is zero.
    ZeroLongPress,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroStep(setting) => {
                write!(f, "{:?} setting has a zero step", setting)
            }
            ConfigError::InvertedBounds(setting) => {
                write!(f, "{:?} setting minimum exceeds its maximum", setting)
            }
            ConfigError::UnalignedBounds(setting) => {
                write!(
                    f,
                    "{:?} setting maximum is not reachable from its minimum in whole steps",
                    setting
                )
            }
            ConfigError::ExceedsRing(setting) => {
                write!(f, "{:?} setting needs more units than the ring has", setting)
            }
            ConfigError::InvalidCountdownPolicy(mode) => {
                write!(
                    f,
                    "{:?} countdown needs a non-zero tick interval and step",
                    mode
                )
            }
            ConfigError::ZeroLongPress => {
                write!(f, "long-press threshold must be non-zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
