//! [`RawInput`] over `embedded-hal` input pins.

use crate::input::{Level, RawInput};
use embedded_hal::digital::InputPin;

/// Encoder lines and button wired to three GPIO inputs.
///
/// A pin read error is reported as `High`, the idle level, so a failing pin
/// produces no events rather than phantom ones.
pub struct HalInputs<A, B, S> {
    a: A,
    b: B,
    button: S,
}

impl<A: InputPin, B: InputPin, S: InputPin> HalInputs<A, B, S> {
    pub fn new(a: A, b: B, button: S) -> Self {
        Self { a, b, button }
    }

    /// Returns the pins.
    pub fn release(self) -> (A, B, S) {
        (self.a, self.b, self.button)
    }
}

fn read<P: InputPin>(pin: &mut P) -> Level {
    Level::from(pin.is_high().unwrap_or(true))
}

impl<A: InputPin, B: InputPin, S: InputPin> RawInput for HalInputs<A, B, S> {
    fn encoder_a(&mut self) -> Level {
        read(&mut self.a)
    }

    fn encoder_b(&mut self) -> Level {
        read(&mut self.b)
    }

    fn button(&mut self) -> Level {
        read(&mut self.button)
    }
}
