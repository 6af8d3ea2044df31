#![cfg_attr(not(feature = "std"), no_std)]

//! Control logic for a rotary-knob countdown appliance: a rotary encoder with
//! a push-button, an RTC, an LED ring and a small display.
//!
//! # Core Concepts
//!
//! - **`RotaryDecoder`** / **`ButtonDecoder`**: Turn raw line levels into `Rotate`, `ShortPress` and `LongPress`
//! - **`EncoderIsr`**: Interrupt-side decoder that pushes rotation events into an `InputQueue` or its `InputProducer` half
//! - **`ModeMachine`**: Idle, four configuration modes and three timed modes, plus the settings they edit
//! - **`Countdown`**: Ticks `remaining` down against the clock, one step per poll at most
//! - **`project`**: Maps a duration onto lit ring units, split into baseline and extra
//! - **`SmartKnob`**: Owns all of the above and renders through `LedRing` and `Display`
//! - **`TimeSource`**: Trait to implement for your clock (RTC, SysTick, embassy-time)
//! - **`KnobConfig`**: Thresholds, bounds, tick policies and palette, validated by its builder
//!
//! Ring colors are `Srgb<f32>` (0.0-1.0 range). Convert them to your strip's
//! native format in your `LedRing` implementation.
//!
//! # Main loop
//!
//! Split an [`InputQueue`] once at startup. The encoder interrupt owns an
//! [`EncoderIsr`] over the producer and calls [`EncoderIsr::on_edge`]; the main
//! loop drains the consumer into [`SmartKnob::poll`] together with the current
//! button level.
//! No other state is shared with the interrupt.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

#[macro_use]
mod fmt;

pub mod colors;
pub mod config;
pub mod countdown;
pub mod hal;
pub mod input;
pub mod knob;
pub mod machine;
pub mod projection;
pub mod time;
pub mod types;
pub mod view;

pub use colors::{ModeColors, Palette};
pub use config::{IdleLongPress, KnobConfig, KnobConfigBuilder};
pub use countdown::{Countdown, CountdownPolicy, RunState, Tick};
pub use hal::HalInputs;
pub use input::{
    ButtonDecoder, EncoderIsr, EventSink, InputConsumer, InputError, InputEvent, InputProducer,
    InputQueue, Level, RawInput, RotaryDecoder,
};
pub use knob::{PollOutcome, SmartKnob};
pub use machine::{ModeMachine, Outcome, Transition};
pub use projection::{Projection, UnitClass, project};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{ConfigError, Direction, Mode, SettingBounds, SettingKind, SettingLimits, Settings};
pub use view::{Display, LedRing, View};

/// Units on the reference hardware's ring.
pub const RING_UNITS: usize = 24;

pub const COLOR_OFF: Srgb = Srgb::new(0.0, 0.0, 0.0);
