//! Mode state machine.
//!
//! Owns the current [`Mode`], the settings, the Pomodoro flag and the session
//! index. It knows nothing about time: the countdown engine reports completion
//! through [`ModeMachine::countdown_complete`].

use crate::config::IdleLongPress;
use crate::input::InputEvent;
use crate::types::{Direction, Mode, SettingKind, SettingLimits, Settings};

/// A change of mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
    /// The whole run finished (last break or timer done); show the completion pattern.
    pub finished: bool,
}

/// What an input event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Not meaningful in the current mode, or a rotation pinned at a bound.
    Ignored,
    /// A setting moved one step.
    Adjusted { setting: SettingKind, value: u16 },
    /// Pause requested for the running countdown.
    TogglePause,
    Transitioned(Transition),
    /// A held rotation with nowhere to go. It still consumes the press.
    NavigationBlocked,
}

/// The mode state machine.
#[derive(Debug, Clone, Copy)]
pub struct ModeMachine {
    mode: Mode,
    limits: SettingLimits,
    settings: Settings,
    idle_long_press: IdleLongPress,
    pomodoro: bool,
    session: u16,
    // value of the edited setting when its config mode was entered
    entry_value: Option<u16>,
}

impl ModeMachine {
    /// Starts in `Idle` with every setting at its minimum.
    pub fn new(limits: SettingLimits, idle_long_press: IdleLongPress) -> Self {
        Self {
            mode: Mode::Idle,
            limits,
            settings: Settings::minimums(&limits),
            idle_long_press,
            pomodoro: false,
            session: 1,
            entry_value: None,
        }
    }

    /// Applies one decoded input event.
    pub fn handle(&mut self, event: InputEvent) -> Outcome {
        match event {
            InputEvent::Rotate {
                direction,
                held: false,
            } => self.adjust(direction),
            InputEvent::Rotate {
                direction,
                held: true,
            } => self.navigate(direction),
            InputEvent::ShortPress => self.short_press(),
            InputEvent::LongPress => self.long_press(),
        }
    }

    /// Reports that the active countdown reached zero.
    ///
    /// Returns `None` outside the timed modes.
    pub fn countdown_complete(&mut self) -> Option<Transition> {
        match self.mode {
            Mode::Study => Some(self.enter(Mode::Break, false)),
            Mode::Break => {
                // a cycle count of zero counts as the final session
                if self.session >= self.settings.cycle_count {
                    Some(self.enter(Mode::Idle, true))
                } else {
                    self.session += 1;
                    Some(self.enter(Mode::Study, false))
                }
            }
            Mode::Timer => Some(self.enter(Mode::Idle, true)),
            _ => None,
        }
    }

    /// Starting amount for the countdown of the current mode.
    ///
    /// A Pomodoro run always studies for the minimum and breaks for the
    /// minimum, except after the final session, which gets the maximum break.
    pub fn countdown_duration(&self) -> Option<u16> {
        match self.mode {
            Mode::Study if self.pomodoro => Some(self.limits.study.min),
            Mode::Study => Some(self.settings.study_minutes),
            Mode::Break if self.pomodoro => {
                if self.is_final_session() {
                    Some(self.limits.brk.max)
                } else {
                    Some(self.limits.brk.min)
                }
            }
            Mode::Break => Some(self.settings.break_minutes),
            Mode::Timer => Some(self.settings.timer_minutes),
            _ => None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn limits(&self) -> &SettingLimits {
        &self.limits
    }

    /// True during a chained run started with a long press in `Idle`.
    pub fn is_pomodoro(&self) -> bool {
        self.pomodoro
    }

    /// Current session, starting at 1.
    pub fn session(&self) -> u16 {
        self.session
    }

    pub fn is_final_session(&self) -> bool {
        self.session >= self.settings.cycle_count
    }

    fn adjust(&mut self, direction: Direction) -> Outcome {
        let Some(setting) = self.mode.edited_setting() else {
            return Outcome::Ignored;
        };

        let current = self.settings.get(setting);
        let value = self.limits.get(setting).adjust(current, direction);
        if value == current {
            return Outcome::Ignored;
        }

        self.settings.set(setting, value);
        Outcome::Adjusted { setting, value }
    }

    fn navigate(&mut self, direction: Direction) -> Outcome {
        use Direction::{Clockwise, CounterClockwise};

        let target = match (self.mode, direction) {
            (Mode::Idle, Clockwise) => Mode::ConfigStudy,
            (Mode::Idle, CounterClockwise) => Mode::ConfigTimer,
            (Mode::ConfigStudy, Clockwise) => Mode::ConfigBreak,
            (Mode::ConfigStudy, CounterClockwise) => Mode::Idle,
            (Mode::ConfigBreak, Clockwise) => Mode::ConfigCycle,
            (Mode::ConfigBreak, CounterClockwise) => Mode::ConfigStudy,
            (Mode::ConfigCycle, CounterClockwise) => Mode::ConfigBreak,
            (Mode::ConfigTimer, Clockwise) => Mode::Idle,
            _ => return Outcome::NavigationBlocked,
        };

        Outcome::Transitioned(self.enter(target, false))
    }

    fn short_press(&mut self) -> Outcome {
        let target = match self.mode {
            Mode::Idle => Mode::ConfigStudy,
            Mode::ConfigStudy => Mode::ConfigBreak,
            Mode::ConfigBreak => Mode::ConfigCycle,
            Mode::ConfigCycle => Mode::Study,
            Mode::ConfigTimer => Mode::Timer,
            Mode::Study | Mode::Break | Mode::Timer => return Outcome::TogglePause,
        };

        Outcome::Transitioned(self.enter(target, false))
    }

    fn long_press(&mut self) -> Outcome {
        let transition = match self.mode {
            Mode::Idle => {
                let target = match self.idle_long_press {
                    IdleLongPress::ConfigureCycles => Mode::ConfigCycle,
                    IdleLongPress::StartStudy => Mode::Study,
                };
                let transition = self.enter(target, false);
                self.pomodoro = true;
                info!("pomodoro run armed");
                transition
            }
            Mode::ConfigStudy | Mode::ConfigBreak | Mode::ConfigCycle | Mode::ConfigTimer => {
                self.discard();
                self.enter(Mode::Idle, false)
            }
            Mode::Study | Mode::Break | Mode::Timer => {
                info!("countdown aborted");
                self.enter(Mode::Idle, false)
            }
        };

        Outcome::Transitioned(transition)
    }

    fn discard(&mut self) {
        if let (Some(setting), Some(value)) = (self.mode.edited_setting(), self.entry_value) {
            self.settings.set(setting, value);
        }
    }

    fn enter(&mut self, to: Mode, finished: bool) -> Transition {
        let from = self.mode;

        match to {
            Mode::Idle => {
                self.pomodoro = false;
                self.session = 1;
            }
            Mode::Study if from != Mode::Break => self.session = 1,
            _ => {}
        }

        self.entry_value = to.edited_setting().map(|setting| self.settings.get(setting));
        self.mode = to;

        info!("mode {} -> {}", from, to);
        Transition { from, to, finished }
    }
}
