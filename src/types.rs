//! Core types shared by the sequencer, buttons and routines.

/// The display routine currently owning the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Time of day with a colour-cycling indicator.
    Clock,
    /// Text and audio demonstration.
    Demo,
    /// The movie codebreak. Abortable with BUT2.
    WoprCodebreak,
    /// The "LOLZ FOR YOU" codebreak. Runs to completion.
    UmCodebreak,
    /// One pass of the marquee message.
    ScrollMessage,
}

impl Mode {
    /// The mode a press of `button` starts from the clock.
    pub fn triggered_by(button: Button) -> Self {
        match button {
            Button::But1 => Mode::Demo,
            Button::But2 => Mode::WoprCodebreak,
            Button::But3 => Mode::UmCodebreak,
            Button::But4 => Mode::ScrollMessage,
        }
    }

    /// Returns true if a BUT2 press cancels this mode.
    pub fn is_abortable(&self) -> bool {
        matches!(self, Mode::WoprCodebreak)
    }
}

/// One of the four board buttons. BUT1/BUT2 are on the front, BUT3/BUT4 on the back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    But1,
    But2,
    But3,
    But4,
}

impl Button {
    /// All buttons in polling order.
    pub const ALL: [Button; 4] = [Button::But1, Button::But2, Button::But3, Button::But4];

    /// Position of this button in [`Button::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Button::But1 => 0,
            Button::But2 => 1,
            Button::But3 => 2,
            Button::But4 => 3,
        }
    }
}

/// Direction of a debounced transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Unpressed to pressed.
    Pressed,
    /// Pressed to unpressed.
    Released,
}

/// A debounced edge on one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub button: Button,
    pub edge: Edge,
}

impl ButtonEvent {
    /// Creates a new event.
    pub fn new(button: Button, edge: Edge) -> Self {
        Self { button, edge }
    }

    /// Returns true if this is a press of `button`.
    pub fn is_press_of(&self, button: Button) -> bool {
        self.button == button && self.edge == Edge::Pressed
    }
}

/// Timing information returned by service operations.
///
/// Indicates when the caller should service again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming<D> {
    /// Nothing changes before this delay has passed.
    Delay(D),

    /// The routine has finished.
    Complete,
}

impl<D: crate::time::TimeDuration> ServiceTiming<D> {
    /// Caps a delay at `max_ms`, so buttons keep getting polled.
    pub fn capped(self, max_ms: u64) -> Self {
        match self {
            ServiceTiming::Delay(d) if d.as_millis() > max_ms => {
                ServiceTiming::Delay(D::from_millis(max_ms))
            }
            other => other,
        }
    }
}
