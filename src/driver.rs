//! Hardware abstraction for the board's outputs and buttons.
//!
//! Implement these traits for your HAL (I²C backpacks, NeoPixel strip, PWM
//! pin, GPIO inputs) to let the sequencer drive the board. None of the
//! methods can fail: handle bus errors inside the implementation, the
//! sequencer has no recovery path for them.

use crate::display::DisplayBuffer;
use crate::types::Button;
use palette::Srgb;

/// The twelve-digit 14-segment display.
pub trait SegmentDisplay {
    /// Replaces the whole display with `buffer`.
    fn show(&mut self, buffer: &DisplayBuffer);
}

/// The five defcon LEDs on top of the board plus the status pixel on the
/// microcontroller carrier.
pub trait DefconLeds {
    /// Sets defcon LED `index` (0 = rightmost). Out-of-range indices are ignored.
    fn set(&mut self, index: usize, color: Srgb);

    /// Sets every defcon LED.
    fn fill(&mut self, color: Srgb);

    /// Sets the carrier board's status pixel. Boards without one can ignore this.
    fn set_status(&mut self, color: Srgb) {
        let _ = color;
    }
}

/// The PWM buzzer.
pub trait Buzzer {
    /// Starts a square-wave tone. It keeps sounding until the next call.
    fn tone(&mut self, frequency_hz: u32);

    /// Silences the buzzer.
    fn mute(&mut self);
}

/// Raw (undebounced) button state.
pub trait ButtonInputs {
    /// Returns true while `button` is held down.
    ///
    /// The board's buttons are active-low with pull-ups; implementations
    /// report the logical state.
    fn is_pressed(&mut self, button: Button) -> bool;
}

/// Raw levels of all four buttons, in [`Button::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawButtons(pub [bool; 4]);

impl RawButtons {
    /// No button held.
    pub const RELEASED: RawButtons = RawButtons([false; 4]);

    /// Only `button` held.
    pub fn only(button: Button) -> Self {
        let mut levels = [false; 4];
        levels[button.index()] = true;
        RawButtons(levels)
    }

    /// Samples every button once.
    pub fn sample<P: ButtonInputs>(pins: &mut P) -> Self {
        RawButtons(Button::ALL.map(|button| pins.is_pressed(button)))
    }

    /// Returns true if `button` is held.
    pub fn is_pressed(&self, button: Button) -> bool {
        self.0[button.index()]
    }
}

/// The board outputs the sequencer owns while it runs.
pub struct Peripherals<D, L, B> {
    pub display: D,
    pub leds: L,
    pub buzzer: B,
}

impl<D: SegmentDisplay, L: DefconLeds, B: Buzzer> Peripherals<D, L, B> {
    /// Bundles the three drivers.
    pub fn new(display: D, leds: L, buzzer: B) -> Self {
        Self {
            display,
            leds,
            buzzer,
        }
    }

    /// Blanks the display, turns every LED off and mutes the buzzer.
    pub fn reset(&mut self) {
        self.display.show(&DisplayBuffer::new());
        self.quiet();
    }

    /// Turns every LED off and mutes the buzzer, leaving the display as is.
    pub fn quiet(&mut self) {
        self.leds.fill(crate::colors::OFF);
        self.leds.set_status(crate::colors::OFF);
        self.buzzer.mute();
    }
}
