//! Debounced input decoding for the rotary encoder and its push-button.
//!
//! Rotation is decoded in interrupt context by [`RotaryDecoder`] and handed to
//! the main loop through an [`EventSink`] (normally an [`InputQueue`]). The
//! button is polled from the main loop by [`ButtonDecoder`], so its timestamps
//! come from the same clock the countdown engine reads.

use crate::time::{TimeInstant, millis_between};
use crate::types::Direction;

/// Raw level of an input line. The button idles high (pull-up) and reads low while pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    High,
    Low,
}

impl Level {
    #[inline]
    pub const fn is_low(self) -> bool {
        matches!(self, Level::Low)
    }
}

impl From<bool> for Level {
    /// `true` maps to `High`.
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

/// A decoded, disambiguated input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// One encoder detent. `held` is true when the button was down at the
    /// edge, which turns the rotation into a mode-navigation gesture.
    Rotate { direction: Direction, held: bool },
    /// Button released before the long-press threshold.
    ShortPress,
    /// Button held past the long-press threshold. Reported once per press.
    LongPress,
}

/// Raw input collaborator: the three lines sampled on demand.
pub trait RawInput {
    fn encoder_a(&mut self) -> Level;
    fn encoder_b(&mut self) -> Level;
    fn button(&mut self) -> Level;
}

/// Destination for events decoded in interrupt context.
///
/// Implemented for [`InputQueue`] and for its split [`InputProducer`] half.
/// On hardware, split the queue, give the producer to the interrupt and drain
/// the consumer from the main loop.
pub trait EventSink {
    /// Pushes an event, handing it back if there is no room.
    fn push(&mut self, event: InputEvent) -> Result<(), InputEvent>;
}

/// Fixed-capacity queue carrying events from the encoder interrupt to the main loop.
///
/// Holds at most `Q - 1` events.
pub type InputQueue<const Q: usize> = heapless::spsc::Queue<InputEvent, Q>;

/// Interrupt-side half of a split [`InputQueue`].
pub type InputProducer<'q> = heapless::spsc::Producer<'q, InputEvent>;

/// Main-loop half of a split [`InputQueue`].
pub type InputConsumer<'q> = heapless::spsc::Consumer<'q, InputEvent>;

impl<const Q: usize> EventSink for InputQueue<Q> {
    fn push(&mut self, event: InputEvent) -> Result<(), InputEvent> {
        self.enqueue(event)
    }
}

impl EventSink for InputProducer<'_> {
    fn push(&mut self, event: InputEvent) -> Result<(), InputEvent> {
        self.enqueue(event)
    }
}

/// Errors raised by the interrupt-side helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// The event sink was full; the newest event was dropped.
    QueueFull(InputEvent),
}

impl core::fmt::Display for InputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InputError::QueueFull(event) => {
                write!(f, "input queue full, dropped {:?}", event)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InputError {}

/// Edge decoder for the quadrature lines.
///
/// Keeps only the previous level of line A, so it needs no clock and is safe to
/// call from the pin-change interrupt of line A. A falling edge on A decides
/// the direction from the level of B at that instant. A sample where A has not
/// changed (including a bounce that settled back) yields nothing.
#[derive(Debug, Clone, Copy)]
pub struct RotaryDecoder {
    last_a: Level,
}

impl RotaryDecoder {
    /// Creates a decoder primed with the current level of line A.
    pub const fn new(initial_a: Level) -> Self {
        Self { last_a: initial_a }
    }

    /// Decodes one sample of the three lines.
    pub fn sample(&mut self, a: Level, b: Level, button: Level) -> Option<InputEvent> {
        if a == self.last_a {
            return None;
        }
        self.last_a = a;

        if a != Level::Low {
            return None;
        }

        let direction = match b {
            Level::High => Direction::Clockwise,
            Level::Low => Direction::CounterClockwise,
        };

        Some(InputEvent::Rotate {
            direction,
            held: button.is_low(),
        })
    }
}

/// Interrupt-side bundle: decoder plus the sink it feeds.
///
/// Does only the read-decide-push needed for one edge. It never touches modes,
/// settings, the ring or the display.
pub struct EncoderIsr<S: EventSink> {
    decoder: RotaryDecoder,
    sink: S,
}

impl<S: EventSink> EncoderIsr<S> {
    pub const fn new(decoder: RotaryDecoder, sink: S) -> Self {
        Self { decoder, sink }
    }

    /// Call from the line-A pin-change interrupt.
    pub fn on_edge<R: RawInput>(&mut self, input: &mut R) -> Result<(), InputError> {
        let a = input.encoder_a();
        let b = input.encoder_b();
        let button = input.button();

        match self.decoder.sample(a, b, button) {
            Some(event) => self.sink.push(event).map_err(|event| {
                warn!("input queue full, dropping event");
                InputError::QueueFull(event)
            }),
            None => Ok(()),
        }
    }

    /// Gives the sink back, e.g. to drain it in tests.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

/// Short/long press disambiguation for the push-button.
///
/// Must be polled from the main loop with the main loop's clock.
#[derive(Debug, Clone, Copy)]
pub struct ButtonDecoder<I: TimeInstant> {
    long_press_ms: u64,
    last_level: Level,
    pressed_at: Option<I>,
    long_press_reported: bool,
    suppressed: bool,
    suppress_next: bool,
}

impl<I: TimeInstant> ButtonDecoder<I> {
    /// Creates a decoder that assumes the button starts released.
    pub const fn new(long_press_ms: u64) -> Self {
        Self {
            long_press_ms,
            last_level: Level::High,
            pressed_at: None,
            long_press_reported: false,
            suppressed: false,
            suppress_next: false,
        }
    }

    /// Samples the button line. Emits at most one event.
    pub fn poll(&mut self, level: Level, now: I) -> Option<InputEvent> {
        let previous = self.last_level;
        self.last_level = level;
        // a pending suppression only covers a press first seen by this poll
        let suppress_next = core::mem::take(&mut self.suppress_next);

        match (previous, level) {
            (Level::High, Level::Low) => {
                self.pressed_at = Some(now);
                self.long_press_reported = false;
                self.suppressed = suppress_next;
                None
            }
            (Level::Low, Level::Low) => {
                if self.long_press_reported || self.suppressed {
                    return None;
                }
                let held = self.held_millis(now)?;
                if held >= self.long_press_ms {
                    self.long_press_reported = true;
                    Some(InputEvent::LongPress)
                } else {
                    None
                }
            }
            (Level::Low, Level::High) => {
                let held = self.held_millis(now);
                self.pressed_at = None;
                if self.long_press_reported || self.suppressed {
                    return None;
                }
                match held {
                    Some(held) if held < self.long_press_ms => Some(InputEvent::ShortPress),
                    _ => None,
                }
            }
            (Level::High, Level::High) => None,
        }
    }

    /// Swallows the rest of the current press.
    ///
    /// Called when the press was used for hold-and-rotate navigation, so the
    /// release emits no `ShortPress` and holding on emits no `LongPress`.
    ///
    /// The interrupt can see the button down before the main loop does. If no
    /// press is being tracked yet, the next poll's press edge is suppressed
    /// instead; any other next poll drops the request.
    pub fn suppress_gesture(&mut self) {
        if self.pressed_at.is_some() {
            self.suppressed = true;
        } else {
            self.suppress_next = true;
        }
    }

    /// True while the button is down.
    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    fn held_millis(&self, now: I) -> Option<u64> {
        self.pressed_at.map(|start| millis_between(now, start))
    }
}
