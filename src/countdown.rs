//! Countdown engine for the timed modes.
//!
//! Holds the decreasing `remaining` value as an explicit [`RunState`]. Each
//! [`Countdown::advance`] takes at most one step: a poll that arrives late
//! does not make up for lost ticks, and time spent paused is not owed back.

use crate::time::{TimeInstant, TimeSource, millis_between};

/// Tick policy for one timed mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CountdownPolicy {
    /// Minimum time between two decrements.
    pub tick_interval_ms: u64,
    /// Amount subtracted from `remaining` per tick, in setting units.
    pub step: u16,
}

impl CountdownPolicy {
    pub const fn new(tick_interval_ms: u64, step: u16) -> Self {
        Self {
            tick_interval_ms,
            step,
        }
    }
}

/// Lifecycle of one countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState<I> {
    /// Mode entered, countdown not yet initialized from the setting.
    NotStarted,
    /// Counting down.
    Running { remaining: u16, last_tick: I },
    /// Frozen. `last_tick` is kept as it was, so the first tick after resuming
    /// fires as soon as a full interval has passed since that stale reference.
    Paused { remaining: u16, last_tick: I },
    /// Reached zero; completion has been reported.
    Completed,
}

/// Result of one [`Countdown::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// Not running (not started, paused or already completed).
    Inactive,
    /// Running, but a full interval has not yet elapsed.
    Waiting { remaining: u16 },
    /// One step was taken.
    Stepped { remaining: u16 },
    /// Reached zero on this call. Reported exactly once.
    Completed,
}

/// The countdown for whichever timed mode is active.
#[derive(Debug, Clone, Copy)]
pub struct Countdown<I: TimeInstant> {
    state: RunState<I>,
}

impl<I: TimeInstant> Countdown<I> {
    pub const fn new() -> Self {
        Self {
            state: RunState::NotStarted,
        }
    }

    /// Initializes from `duration`, using `now` as the first tick reference.
    pub fn start(&mut self, duration: u16, now: I) {
        debug!("countdown start: {}", duration);
        self.state = RunState::Running {
            remaining: duration,
            last_tick: now,
        };
    }

    /// Advances by at most one step.
    ///
    /// Reads the clock only while running; a paused countdown never touches it.
    pub fn advance<T: TimeSource<I>>(&mut self, clock: &T, policy: &CountdownPolicy) -> Tick {
        let RunState::Running {
            remaining,
            last_tick,
        } = self.state
        else {
            return Tick::Inactive;
        };

        if remaining == 0 {
            return self.complete();
        }

        let now = clock.now();
        if millis_between(now, last_tick) < policy.tick_interval_ms {
            return Tick::Waiting { remaining };
        }

        let remaining = remaining.saturating_sub(policy.step);
        if remaining == 0 {
            return self.complete();
        }

        self.state = RunState::Running {
            remaining,
            last_tick: now,
        };
        Tick::Stepped { remaining }
    }

    /// Freezes a running countdown. Returns false if it was not running.
    pub fn pause(&mut self) -> bool {
        match self.state {
            RunState::Running {
                remaining,
                last_tick,
            } => {
                self.state = RunState::Paused {
                    remaining,
                    last_tick,
                };
                true
            }
            _ => false,
        }
    }

    /// Resumes a paused countdown. Returns false if it was not paused.
    pub fn resume(&mut self) -> bool {
        match self.state {
            RunState::Paused {
                remaining,
                last_tick,
            } => {
                self.state = RunState::Running {
                    remaining,
                    last_tick,
                };
                true
            }
            _ => false,
        }
    }

    /// Pauses if running, resumes if paused. Returns the new paused flag.
    pub fn toggle_pause(&mut self) -> bool {
        if self.pause() {
            return true;
        }
        self.resume();
        false
    }

    /// Back to `NotStarted`; also clears any pause.
    pub fn reset(&mut self) {
        self.state = RunState::NotStarted;
    }

    pub fn state(&self) -> RunState<I> {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.state, RunState::Paused { .. })
    }

    pub fn is_started(&self) -> bool {
        !matches!(self.state, RunState::NotStarted)
    }

    /// Remaining amount while running or paused.
    pub fn remaining(&self) -> Option<u16> {
        match self.state {
            RunState::Running { remaining, .. } | RunState::Paused { remaining, .. } => {
                Some(remaining)
            }
            _ => None,
        }
    }

    fn complete(&mut self) -> Tick {
        debug!("countdown complete");
        self.state = RunState::Completed;
        Tick::Completed
    }
}

impl<I: TimeInstant> Default for Countdown<I> {
    fn default() -> Self {
        Self::new()
    }
}
