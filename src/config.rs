//! Knob configuration and its validating builder.

use crate::colors::Palette;
use crate::countdown::CountdownPolicy;
use crate::RING_UNITS;
use crate::types::{ConfigError, Mode, SettingBounds, SettingKind, SettingLimits};

/// What a long press in `Idle` starts.
///
/// Two firmware builds of the knob disagree here, so it is a policy rather
/// than a fixed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IdleLongPress {
    /// Pomodoro run via the session-count screen (`ConfigCycle`).
    #[default]
    ConfigureCycles,
    /// Pomodoro run straight into `Study` with the current settings.
    StartStudy,
}

/// Validated knob configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobConfig {
    long_press_ms: u64,
    limits: SettingLimits,
    study: CountdownPolicy,
    brk: CountdownPolicy,
    timer: CountdownPolicy,
    idle_long_press: IdleLongPress,
    completion_flash_ms: u64,
    palette: Palette,
    ring_units: usize,
}

impl KnobConfig {
    /// Starts a builder seeded with the defaults.
    pub fn builder() -> KnobConfigBuilder {
        KnobConfigBuilder::new()
    }

    /// The alternate build: up to five sessions, long press in `Idle` goes
    /// straight to `Study`.
    pub fn alternate() -> Self {
        let mut config = Self::default();
        config.limits.cycles = SettingBounds::new(1, 5, 1);
        config.idle_long_press = IdleLongPress::StartStudy;
        config
    }

    pub fn long_press_ms(&self) -> u64 {
        self.long_press_ms
    }

    pub fn limits(&self) -> &SettingLimits {
        &self.limits
    }

    pub fn bounds(&self, setting: SettingKind) -> SettingBounds {
        self.limits.get(setting)
    }

    /// Tick policy of a timed mode, `None` for the others.
    pub fn policy(&self, mode: Mode) -> Option<&CountdownPolicy> {
        match mode {
            Mode::Study => Some(&self.study),
            Mode::Break => Some(&self.brk),
            Mode::Timer => Some(&self.timer),
            _ => None,
        }
    }

    pub fn idle_long_press(&self) -> IdleLongPress {
        self.idle_long_press
    }

    pub fn completion_flash_ms(&self) -> u64 {
        self.completion_flash_ms
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Ring size the bounds were validated against.
    pub fn ring_units(&self) -> usize {
        self.ring_units
    }
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            long_press_ms: 2500,
            limits: SettingLimits::default(),
            study: CountdownPolicy::new(5000, 5),
            brk: CountdownPolicy::new(1000, 1),
            timer: CountdownPolicy::new(5000, 5),
            idle_long_press: IdleLongPress::default(),
            completion_flash_ms: 3000,
            palette: Palette::default(),
            ring_units: RING_UNITS,
        }
    }
}

/// Builder for [`KnobConfig`].
#[derive(Debug, Clone, Copy)]
pub struct KnobConfigBuilder {
    config: KnobConfig,
}

impl KnobConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: KnobConfig::default(),
        }
    }

    /// Hold time after which a press counts as long.
    pub fn long_press_ms(mut self, millis: u64) -> Self {
        self.config.long_press_ms = millis;
        self
    }

    /// Bounds of one setting.
    pub fn bounds(mut self, setting: SettingKind, bounds: SettingBounds) -> Self {
        match setting {
            SettingKind::Study => self.config.limits.study = bounds,
            SettingKind::Break => self.config.limits.brk = bounds,
            SettingKind::Cycles => self.config.limits.cycles = bounds,
            SettingKind::Timer => self.config.limits.timer = bounds,
        }
        self
    }

    /// Tick policy of a timed mode. Other modes are ignored.
    pub fn policy(mut self, mode: Mode, policy: CountdownPolicy) -> Self {
        match mode {
            Mode::Study => self.config.study = policy,
            Mode::Break => self.config.brk = policy,
            Mode::Timer => self.config.timer = policy,
            _ => {}
        }
        self
    }

    pub fn idle_long_press(mut self, behavior: IdleLongPress) -> Self {
        self.config.idle_long_press = behavior;
        self
    }

    /// How long the completion ring stays lit. Zero skips it.
    pub fn completion_flash_ms(mut self, millis: u64) -> Self {
        self.config.completion_flash_ms = millis;
        self
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.config.palette = palette;
        self
    }

    /// Number of units on the ring. Every setting's `max / step` must fit.
    pub fn ring_units(mut self, units: usize) -> Self {
        self.config.ring_units = units;
        self
    }

    /// Validates and builds.
    ///
    /// # Errors
    /// * `ZeroLongPress` - long-press threshold is zero
    /// * `ZeroStep`, `InvertedBounds`, `UnalignedBounds` - unusable setting bounds
    /// * `ExceedsRing` - a setting's maximum needs more units than the ring has
    /// * `InvalidCountdownPolicy` - a timed mode has a zero interval or step
    pub fn build(self) -> Result<KnobConfig, ConfigError> {
        let config = self.config;

        if config.long_press_ms == 0 {
            return Err(ConfigError::ZeroLongPress);
        }

        for setting in [
            SettingKind::Study,
            SettingKind::Break,
            SettingKind::Cycles,
            SettingKind::Timer,
        ] {
            let bounds = config.limits.get(setting);
            bounds.validate(setting)?;
            if usize::from(bounds.max / bounds.step) > config.ring_units {
                return Err(ConfigError::ExceedsRing(setting));
            }
        }

        for (mode, policy) in [
            (Mode::Study, config.study),
            (Mode::Break, config.brk),
            (Mode::Timer, config.timer),
        ] {
            if policy.tick_interval_ms == 0 || policy.step == 0 {
                return Err(ConfigError::InvalidCountdownPolicy(mode));
            }
        }

        Ok(config)
    }
}

impl Default for KnobConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build() {
        let config = KnobConfig::builder().build().unwrap();
        assert_eq!(config, KnobConfig::default());
        assert_eq!(config.long_press_ms(), 2500);
        assert_eq!(config.bounds(SettingKind::Cycles).max, 4);
        assert_eq!(config.policy(Mode::Break), Some(&CountdownPolicy::new(1000, 1)));
        assert_eq!(config.policy(Mode::ConfigBreak), None);
    }

    #[test]
    fn alternate_preset() {
        let config = KnobConfig::alternate();
        assert_eq!(config.bounds(SettingKind::Cycles), SettingBounds::new(1, 5, 1));
        assert_eq!(config.idle_long_press(), IdleLongPress::StartStudy);
    }

    #[test]
    fn rejects_zero_long_press() {
        let result = KnobConfig::builder().long_press_ms(0).build();
        assert_eq!(result, Err(ConfigError::ZeroLongPress));
    }

    #[test]
    fn rejects_zero_tick_interval() {
        let result = KnobConfig::builder()
            .policy(Mode::Timer, CountdownPolicy::new(0, 5))
            .build();
        assert_eq!(result, Err(ConfigError::InvalidCountdownPolicy(Mode::Timer)));
    }

    #[test]
    fn rejects_bad_bounds() {
        let result = KnobConfig::builder()
            .bounds(SettingKind::Timer, SettingBounds::new(10, 121, 5))
            .build();
        assert_eq!(result, Err(ConfigError::UnalignedBounds(SettingKind::Timer)));
    }

    #[test]
    fn rejects_bounds_wider_than_ring() {
        let result = KnobConfig::builder().ring_units(12).build();
        assert_eq!(result, Err(ConfigError::ExceedsRing(SettingKind::Study)));

        let config = KnobConfig::builder()
            .ring_units(12)
            .bounds(SettingKind::Study, SettingBounds::new(30, 120, 10))
            .bounds(SettingKind::Break, SettingBounds::new(5, 12, 1))
            .bounds(SettingKind::Timer, SettingBounds::new(10, 120, 10))
            .build()
            .unwrap();
        assert_eq!(config.ring_units(), 12);
    }
}
