//! Integration tests for input decoding and the interrupt-to-main-loop queue

mod common;
use common::*;

use smart_knob::{
    ButtonDecoder, Direction, EncoderIsr, EventSink, InputError, InputEvent, InputQueue, Level,
    Mode, RawInput, RotaryDecoder,
};

/// Mock input lines with settable levels
struct MockLines {
    a: Level,
    b: Level,
    button: Level,
}

impl MockLines {
    fn new() -> Self {
        Self {
            a: Level::High,
            b: Level::High,
            button: Level::High,
        }
    }
}

impl RawInput for MockLines {
    fn encoder_a(&mut self) -> Level {
        self.a
    }

    fn encoder_b(&mut self) -> Level {
        self.b
    }

    fn button(&mut self) -> Level {
        self.button
    }
}

/// One full detent: A falls with B at `b`, then A rises again
fn detent<S: EventSink>(
    isr: &mut EncoderIsr<S>,
    lines: &mut MockLines,
    b: Level,
) -> Result<(), InputError> {
    lines.b = b;
    lines.a = Level::Low;
    let result = isr.on_edge(lines);
    lines.a = Level::High;
    isr.on_edge(lines)?;
    result
}

#[test]
fn isr_queues_one_event_per_detent() {
    let mut lines = MockLines::new();
    let mut isr = EncoderIsr::new(RotaryDecoder::new(Level::High), InputQueue::<8>::new());

    detent(&mut isr, &mut lines, Level::High).unwrap();
    detent(&mut isr, &mut lines, Level::Low).unwrap();

    let queue = isr.sink_mut();
    assert_eq!(
        queue.dequeue(),
        Some(InputEvent::Rotate {
            direction: Direction::Clockwise,
            held: false
        })
    );
    assert_eq!(
        queue.dequeue(),
        Some(InputEvent::Rotate {
            direction: Direction::CounterClockwise,
            held: false
        })
    );
    assert_eq!(queue.dequeue(), None);
}

#[test]
fn isr_marks_rotation_while_button_held() {
    let mut lines = MockLines::new();
    let mut isr = EncoderIsr::new(RotaryDecoder::new(Level::High), InputQueue::<8>::new());

    lines.button = Level::Low;
    detent(&mut isr, &mut lines, Level::High).unwrap();

    assert_eq!(
        isr.sink_mut().dequeue(),
        Some(InputEvent::Rotate {
            direction: Direction::Clockwise,
            held: true
        })
    );
}

#[test]
fn isr_reports_full_queue() {
    let mut lines = MockLines::new();
    let mut isr = EncoderIsr::new(RotaryDecoder::new(Level::High), InputQueue::<4>::new());

    let mut dropped = 0;
    for _ in 0..16 {
        if let Err(InputError::QueueFull(_)) = detent(&mut isr, &mut lines, Level::High) {
            dropped += 1;
        }
    }

    assert!(dropped > 0);
    assert!(isr.sink_mut().len() <= 4);
}

#[test]
fn queued_rotation_reaches_the_knob() {
    let clock = MockTimeSource::new();
    let mut knob = knob(&clock);
    let mut lines = MockLines::new();
    let mut queue = InputQueue::<8>::new();
    let (producer, mut consumer) = queue.split();
    let mut isr = EncoderIsr::new(RotaryDecoder::new(Level::High), producer);

    // enter ConfigStudy by a short press, then turn three detents
    press(&mut knob, &clock, 100);
    for _ in 0..3 {
        detent(&mut isr, &mut lines, Level::High).unwrap();
    }

    knob.poll(core::iter::from_fn(|| consumer.dequeue()), Level::High);
    assert_eq!(consumer.len(), 0);

    assert_eq!(knob.mode(), Mode::ConfigStudy);
    assert_eq!(knob.settings().study_minutes, 40);
}

#[test]
fn split_producer_reports_full_queue() {
    let mut lines = MockLines::new();
    let mut queue = InputQueue::<4>::new();
    let (producer, mut consumer) = queue.split();
    let mut isr = EncoderIsr::new(RotaryDecoder::new(Level::High), producer);

    let mut dropped = 0;
    for _ in 0..8 {
        if detent(&mut isr, &mut lines, Level::Low).is_err() {
            dropped += 1;
        }
    }
    assert!(dropped > 0);

    // draining makes room again
    while consumer.dequeue().is_some() {}
    assert!(detent(&mut isr, &mut lines, Level::Low).is_ok());
}

#[test]
fn bounce_back_to_high_between_samples_is_silent() {
    let mut decoder = RotaryDecoder::new(Level::High);
    assert_eq!(decoder.sample(Level::High, Level::Low, Level::High), None);
    assert_eq!(decoder.sample(Level::High, Level::High, Level::High), None);
}

#[test]
fn button_press_of_100ms_is_short() {
    let mut button = ButtonDecoder::<TestInstant>::new(2500);
    assert_eq!(button.poll(Level::Low, TestInstant(0)), None);
    assert_eq!(button.poll(Level::Low, TestInstant(50)), None);
    assert_eq!(
        button.poll(Level::High, TestInstant(100)),
        Some(InputEvent::ShortPress)
    );
}

#[test]
fn button_held_3000ms_is_one_long_press() {
    let mut button = ButtonDecoder::<TestInstant>::new(2500);
    let mut events = Vec::new();

    for t in (0..=3000).step_by(10) {
        events.extend(button.poll(Level::Low, TestInstant(t)));
    }
    events.extend(button.poll(Level::High, TestInstant(3010)));

    assert_eq!(events, vec![InputEvent::LongPress]);
}

#[test]
fn stable_released_button_is_silent() {
    let mut button = ButtonDecoder::<TestInstant>::new(2500);
    for t in 0..100 {
        assert_eq!(button.poll(Level::High, TestInstant(t * 1000)), None);
    }
    assert!(!button.is_pressed());
}
