//! Button debouncing and edge detection.
//!
//! A [`Debouncer`] only accepts a new level once the raw input has held it
//! for the debounce interval; every accepted change yields one [`Edge`].
//! [`ButtonBank`] runs four of them and hands back the edges of one poll as
//! an iterator.

use crate::driver::RawButtons;
use crate::time::{TimeDuration, TimeInstant};
use crate::types::{Button, ButtonEvent, Edge};

/// Debounces a single input.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer<I: TimeInstant> {
    stable: bool,
    candidate: bool,
    candidate_since: Option<I>,
    interval_ms: u64,
}

impl<I: TimeInstant> Debouncer<I> {
    /// Creates a debouncer in the released state.
    pub fn new(interval_ms: u32) -> Self {
        Self {
            stable: false,
            candidate: false,
            candidate_since: None,
            interval_ms: interval_ms as u64,
        }
    }

    /// Feeds one raw sample taken at `now`.
    ///
    /// Returns the edge if the debounced state changed on this sample.
    pub fn update(&mut self, pressed: bool, now: I) -> Option<Edge> {
        if pressed != self.candidate || self.candidate_since.is_none() {
            self.candidate = pressed;
            self.candidate_since = Some(now);
        }

        if self.candidate == self.stable {
            return None;
        }

        let since = self.candidate_since?;
        if now.duration_since(since).as_millis() < self.interval_ms {
            return None;
        }

        self.stable = self.candidate;
        Some(if self.stable {
            Edge::Pressed
        } else {
            Edge::Released
        })
    }

    /// Current debounced state.
    pub fn is_pressed(&self) -> bool {
        self.stable
    }
}

/// Debouncers for all four buttons.
#[derive(Debug, Clone)]
pub struct ButtonBank<I: TimeInstant> {
    debouncers: [Debouncer<I>; 4],
}

impl<I: TimeInstant> ButtonBank<I> {
    /// Creates a bank with every button released.
    pub fn new(interval_ms: u32) -> Self {
        Self {
            debouncers: [Debouncer::new(interval_ms); 4],
        }
    }

    /// Samples all four buttons once.
    ///
    /// Every debouncer is updated before this returns, whether or not the
    /// caller consumes the iterator.
    pub fn poll(&mut self, levels: RawButtons, now: I) -> ButtonEvents {
        let mut events = heapless::Vec::new();
        for button in Button::ALL {
            let debouncer = &mut self.debouncers[button.index()];
            if let Some(edge) = debouncer.update(levels.is_pressed(button), now) {
                // At most one edge per button, so four slots always suffice.
                let _ = events.push(ButtonEvent::new(button, edge));
            }
        }
        ButtonEvents { events, next: 0 }
    }

    /// Debounced state of `button`.
    pub fn is_pressed(&self, button: Button) -> bool {
        self.debouncers[button.index()].is_pressed()
    }
}

/// The edges detected by one [`ButtonBank::poll`], in polling order.
pub struct ButtonEvents {
    events: heapless::Vec<ButtonEvent, 4>,
    next: usize,
}

impl Iterator for ButtonEvents {
    type Item = ButtonEvent;

    fn next(&mut self) -> Option<ButtonEvent> {
        let event = self.events.get(self.next).copied()?;
        self.next += 1;
        Some(event)
    }
}
