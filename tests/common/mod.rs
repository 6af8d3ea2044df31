//! Shared test infrastructure for smart-knob integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use palette::Srgb;
use smart_knob::{
    COLOR_OFF, Direction, Display, InputEvent, KnobConfig, LedRing, Level, RING_UNITS,
    SmartKnob, TimeDuration, TimeInstant, TimeSource, View,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Collaborators
// ============================================================================

/// Mock ring that records every frame it was asked to show
pub struct MockRing {
    units: [Srgb; RING_UNITS],
    lit: usize,
    writes: usize,
}

impl MockRing {
    pub fn new() -> Self {
        Self {
            units: [COLOR_OFF; RING_UNITS],
            lit: 0,
            writes: 0,
        }
    }

    pub fn lit(&self) -> usize {
        self.lit
    }

    pub fn unit(&self, index: usize) -> Srgb {
        self.units[index]
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl LedRing for MockRing {
    fn set_units(&mut self, colors: &[Srgb]) {
        self.units = [COLOR_OFF; RING_UNITS];
        self.units[..colors.len()].copy_from_slice(colors);
        self.lit = colors.len();
        self.writes += 1;
    }

    fn clear(&mut self) {
        self.units = [COLOR_OFF; RING_UNITS];
        self.lit = 0;
        self.writes += 1;
    }
}

/// Mock display that keeps the history of views
pub struct MockDisplay {
    views: Vec<View>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self { views: Vec::new() }
    }

    pub fn last(&self) -> Option<View> {
        self.views.last().copied()
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }
}

impl Display for MockDisplay {
    fn show(&mut self, view: &View) {
        self.views.push(*view);
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TestKnob<'t> = SmartKnob<'t, TestInstant, MockTimeSource, MockRing, MockDisplay, RING_UNITS>;

pub fn knob(clock: &MockTimeSource) -> TestKnob<'_> {
    knob_with(clock, KnobConfig::default())
}

pub fn knob_with(clock: &MockTimeSource, config: KnobConfig) -> TestKnob<'_> {
    SmartKnob::new(MockRing::new(), MockDisplay::new(), clock, config)
}

pub const NO_EVENTS: [InputEvent; 0] = [];

pub const CW: InputEvent = InputEvent::Rotate {
    direction: Direction::Clockwise,
    held: false,
};

pub const CCW: InputEvent = InputEvent::Rotate {
    direction: Direction::CounterClockwise,
    held: false,
};

pub const HELD_CW: InputEvent = InputEvent::Rotate {
    direction: Direction::Clockwise,
    held: true,
};

pub const HELD_CCW: InputEvent = InputEvent::Rotate {
    direction: Direction::CounterClockwise,
    held: true,
};

/// Poll with no queued events and the button released
pub fn idle_poll(knob: &mut TestKnob<'_>) -> smart_knob::PollOutcome {
    knob.poll(NO_EVENTS, Level::High)
}

/// Physically press and release the button, `held_ms` apart
pub fn press(knob: &mut TestKnob<'_>, clock: &MockTimeSource, held_ms: u64) {
    knob.poll(NO_EVENTS, Level::Low);
    clock.advance(held_ms);
    knob.poll(NO_EVENTS, Level::Low);
    knob.poll(NO_EVENTS, Level::High);
}

/// Feed queued events with the button released
pub fn rotate(knob: &mut TestKnob<'_>, events: &[InputEvent]) {
    knob.poll(events.iter().copied(), Level::High);
}

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}
