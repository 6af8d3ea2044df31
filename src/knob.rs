//! The knob: polling loop body tying decoder, state machine, countdown and
//! render collaborators together.

use crate::config::KnobConfig;
use crate::countdown::{Countdown, Tick};
use crate::input::{ButtonDecoder, InputEvent, Level};
use crate::machine::{ModeMachine, Outcome, Transition};
use crate::projection::project;
use crate::time::{TimeInstant, TimeSource, millis_between};
use crate::types::{Mode, Settings};
use crate::view::{Display, LedRing, View};
use heapless::Vec;
use palette::Srgb;

/// Summary of one [`SmartKnob::poll`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollOutcome {
    /// Last mode change made during this poll, if any.
    pub transition: Option<Transition>,
    /// What the countdown did.
    pub tick: Tick,
}

/// A smart knob driving a ring of `N` LEDs and a display.
///
/// Owns all runtime state. The encoder interrupt only pushes [`InputEvent`]s
/// into a queue; [`SmartKnob::poll`] drains that queue on the main loop, so
/// settings and countdown state are never touched from two contexts.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `L` - LED ring implementation type
/// * `D` - Display implementation type
/// * `N` - Number of units on the ring
pub struct SmartKnob<'t, I, T, L, D, const N: usize>
where
    I: TimeInstant,
    T: TimeSource<I>,
    L: LedRing,
    D: Display,
{
    ring: L,
    display: D,
    clock: &'t T,
    config: KnobConfig,
    machine: ModeMachine,
    button: ButtonDecoder<I>,
    countdown: Countdown<I>,
    flash_started: Option<I>,
    last_view: Option<View>,
    last_frame: Option<Vec<Srgb, N>>,
}

impl<'t, I, T, L, D, const N: usize> SmartKnob<'t, I, T, L, D, N>
where
    I: TimeInstant,
    T: TimeSource<I>,
    L: LedRing,
    D: Display,
{
    /// Creates a knob in `Idle` with the ring off and settings at their minimums.
    pub fn new(mut ring: L, display: D, clock: &'t T, config: KnobConfig) -> Self {
        ring.clear();

        Self {
            ring,
            display,
            clock,
            machine: ModeMachine::new(*config.limits(), config.idle_long_press()),
            button: ButtonDecoder::new(config.long_press_ms()),
            countdown: Countdown::new(),
            config,
            flash_started: None,
            last_view: None,
            last_frame: Some(Vec::new()),
        }
    }

    /// One pass of the main loop.
    ///
    /// Applies queued rotation events in order, samples the button, advances
    /// the countdown and re-renders whatever changed.
    pub fn poll<E>(&mut self, events: E, button: Level) -> PollOutcome
    where
        E: IntoIterator<Item = InputEvent>,
    {
        let mut transition = None;

        for event in events {
            if let Some(t) = self.apply(event) {
                transition = Some(t);
            }
        }

        if let Some(event) = self.button.poll(button, self.clock.now()) {
            if let Some(t) = self.apply(event) {
                transition = Some(t);
            }
        }

        let tick = self.run_countdown();
        if tick == Tick::Completed {
            if let Some(t) = self.machine.countdown_complete() {
                self.on_transition(&t);
                self.ensure_started();
                transition = Some(t);
            }
        }

        self.expire_flash();
        self.render();

        PollOutcome { transition, tick }
    }

    /// Applies a single event, bypassing the button decoder.
    ///
    /// Useful when events come from somewhere other than the physical button.
    pub fn apply(&mut self, event: InputEvent) -> Option<Transition> {
        if let InputEvent::Rotate { held: true, .. } = event {
            self.button.suppress_gesture();
        }

        match self.machine.handle(event) {
            Outcome::Transitioned(t) => {
                self.on_transition(&t);
                Some(t)
            }
            Outcome::TogglePause => {
                if self.countdown.toggle_pause() {
                    info!("countdown paused");
                } else {
                    info!("countdown resumed");
                }
                None
            }
            Outcome::Adjusted { .. } | Outcome::Ignored | Outcome::NavigationBlocked => None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.machine.mode()
    }

    pub fn settings(&self) -> &Settings {
        self.machine.settings()
    }

    pub fn session(&self) -> u16 {
        self.machine.session()
    }

    pub fn is_pomodoro(&self) -> bool {
        self.machine.is_pomodoro()
    }

    pub fn is_paused(&self) -> bool {
        self.countdown.is_paused()
    }

    /// Remaining amount of the running countdown.
    pub fn remaining(&self) -> Option<u16> {
        self.countdown.remaining()
    }

    pub fn config(&self) -> &KnobConfig {
        &self.config
    }

    /// True while the completion pattern is on the ring.
    pub fn is_flashing(&self) -> bool {
        self.flash_started.is_some()
    }

    pub fn ring(&self) -> &L {
        &self.ring
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    fn on_transition(&mut self, transition: &Transition) {
        // entering or leaving a mode always discards the run state
        self.countdown.reset();

        self.flash_started = if transition.finished && self.config.completion_flash_ms() > 0 {
            Some(self.clock.now())
        } else {
            None
        };
    }

    fn run_countdown(&mut self) -> Tick {
        let mode = self.machine.mode();
        let Some(policy) = self.config.policy(mode).copied() else {
            return Tick::Inactive;
        };

        self.ensure_started();
        self.countdown.advance(self.clock, &policy)
    }

    // chained modes start their countdown in the same poll that entered them
    fn ensure_started(&mut self) {
        if self.countdown.is_started() {
            return;
        }
        if let Some(duration) = self.machine.countdown_duration() {
            self.countdown.start(duration, self.clock.now());
        }
    }

    fn expire_flash(&mut self) {
        if let Some(started) = self.flash_started {
            if millis_between(self.clock.now(), started) >= self.config.completion_flash_ms() {
                self.flash_started = None;
            }
        }
    }

    fn current_view(&self) -> View {
        let mode = self.machine.mode();
        let settings = self.machine.settings();

        match mode {
            Mode::Idle if self.flash_started.is_some() => View::Complete,
            Mode::Idle => View::Clock,
            Mode::ConfigStudy | Mode::ConfigBreak | Mode::ConfigCycle | Mode::ConfigTimer => {
                let value = mode
                    .edited_setting()
                    .map(|setting| settings.get(setting))
                    .unwrap_or_default();
                View::Setting { mode, value }
            }
            Mode::Study | Mode::Break | Mode::Timer => View::Countdown {
                mode,
                remaining: self.countdown.remaining().unwrap_or_default(),
                session: self.machine.session(),
                cycles: settings.cycle_count,
                paused: self.countdown.is_paused(),
            },
        }
    }

    fn current_frame(&self, view: &View) -> Vec<Srgb, N> {
        let mut frame = Vec::new();
        let palette = self.config.palette();

        let (mode, value) = match *view {
            View::Clock => return frame,
            View::Complete => {
                while frame.push(palette.completion).is_ok() {}
                return frame;
            }
            View::Setting { mode, value } => (mode, value),
            View::Countdown {
                mode, remaining, ..
            } => (mode, remaining),
        };

        let Some(setting) = mode.displayed_setting() else {
            return frame;
        };
        let colors = palette.for_setting(setting);
        let projection = project::<N>(value, &self.config.bounds(setting));

        for &class in projection.classes() {
            // a running break is drawn entirely in its baseline color
            let color = if mode == Mode::Break {
                colors.baseline
            } else {
                colors.color(class)
            };
            let _ = frame.push(color);
        }

        frame
    }

    fn render(&mut self) {
        let view = self.current_view();
        let frame = self.current_frame(&view);

        if self.last_frame.as_ref() != Some(&frame) {
            if frame.is_empty() {
                self.ring.clear();
            } else {
                self.ring.set_units(&frame);
            }
            self.last_frame = Some(frame);
        }

        if self.last_view != Some(view) {
            self.display.show(&view);
            self.last_view = Some(view);
        }
    }
}
