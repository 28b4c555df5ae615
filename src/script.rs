//! Timed cue scripts for the canned routines.
//!
//! A [`Script`] is an ordered list of [`Cue`]s, each followed by a hold
//! time. [`ScriptPlayer`] plays one back cooperatively: every
//! [`service`](ScriptPlayer::service) call applies the cues whose start
//! time has passed, exactly once and in order, and reports how long the
//! caller may wait before the next one is due.

use crate::config::DEFCON_LED_COUNT;
use crate::display::{ALL_SEGMENTS, DisplayBuffer};
use crate::driver::{Buzzer, DefconLeds, Peripherals, SegmentDisplay};
use crate::error::ScriptError;
use crate::time::{TimeDuration, TimeInstant};
use crate::types::ServiceTiming;
use heapless::Vec;
use palette::Srgb;

/// A single action on the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    /// Print text, right-aligned.
    Text(&'static str),
    /// Print text padded to the display width, left-aligned.
    PaddedText(&'static str),
    /// Blank the display.
    Blank,
    /// Light every segment of every digit.
    AllSegments,
    /// Scroll one character in from the right.
    Scroll(char),
    /// Show the frame the player was started with.
    Recall,
    /// Start a tone (Hz). It keeps sounding until `Mute` or another `Tone`.
    Tone(u32),
    /// Silence the buzzer.
    Mute,
    /// Set every defcon LED.
    DefconFill(Srgb),
    /// Set one defcon LED.
    DefconSet(usize, Srgb),
    /// Set the status pixel.
    StatusPixel(Srgb),
}

/// A cue and how long to wait after it before the next one.
#[derive(Debug, Clone, Copy)]
pub struct ScriptStep<D: TimeDuration> {
    pub cue: Cue,
    pub hold: D,
}

/// A validated, fixed-capacity cue script.
///
/// # Type Parameters
/// * `D` - The duration type
/// * `N` - Maximum number of cues
#[derive(Debug, Clone)]
pub struct Script<D: TimeDuration, const N: usize> {
    steps: Vec<ScriptStep<D>, N>,
}

impl<D: TimeDuration, const N: usize> Script<D, N> {
    /// Creates a new script builder.
    pub fn builder() -> ScriptBuilder<D, N> {
        ScriptBuilder::new()
    }

    /// Number of cues.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Returns the step at `index`.
    pub fn get_step(&self, index: usize) -> Option<&ScriptStep<D>> {
        self.steps.get(index)
    }

    /// Sum of all holds.
    pub fn total_duration(&self) -> D {
        D::from_millis(self.steps.iter().map(|s| s.hold.as_millis()).sum())
    }
}

/// Builder for [`Script`].
#[derive(Debug)]
pub struct ScriptBuilder<D: TimeDuration, const N: usize> {
    steps: Vec<ScriptStep<D>, N>,
}

impl<D: TimeDuration, const N: usize> ScriptBuilder<D, N> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Appends a cue followed by `hold`.
    ///
    /// # Errors
    /// * `CapacityExceeded` - The script already holds `N` cues
    /// * `DefconIndexOutOfRange` - A `DefconSet` cue addresses a missing LED
    pub fn cue(mut self, cue: Cue, hold: D) -> Result<Self, ScriptError> {
        if let Cue::DefconSet(index, _) = cue {
            if index >= DEFCON_LED_COUNT {
                return Err(ScriptError::DefconIndexOutOfRange(index));
            }
        }
        self.steps
            .push(ScriptStep { cue, hold })
            .map_err(|_| ScriptError::CapacityExceeded)?;
        Ok(self)
    }

    /// Appends a cue with no hold; it fires together with the next one.
    pub fn then(self, cue: Cue) -> Result<Self, ScriptError> {
        self.cue(cue, D::ZERO)
    }

    /// Builds the script.
    ///
    /// # Errors
    /// * `Empty` - No cues were added
    pub fn build(self) -> Result<Script<D, N>, ScriptError> {
        if self.steps.is_empty() {
            return Err(ScriptError::Empty);
        }
        Ok(Script { steps: self.steps })
    }
}

impl<D: TimeDuration, const N: usize> Default for ScriptBuilder<D, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Plays a [`Script`] against the board.
pub struct ScriptPlayer<I: TimeInstant, const N: usize> {
    script: Script<I::Duration, N>,
    started: I,
    next_cue: usize,
    next_start_ms: u64,
    recall: DisplayBuffer,
    frame: DisplayBuffer,
}

impl<I: TimeInstant, const N: usize> ScriptPlayer<I, N> {
    /// Starts playback at `now`.
    ///
    /// `frame` is what `Recall` shows and what `Scroll` scrolls onto. Nothing
    /// is written to the board until the first [`service`](Self::service).
    pub fn start(script: Script<I::Duration, N>, frame: DisplayBuffer, now: I) -> Self {
        Self {
            script,
            started: now,
            next_cue: 0,
            next_start_ms: 0,
            recall: frame,
            frame,
        }
    }

    /// Applies every cue that is due and returns when to service again.
    pub fn service<D, L, B>(
        &mut self,
        now: I,
        peripherals: &mut Peripherals<D, L, B>,
    ) -> ServiceTiming<I::Duration>
    where
        D: SegmentDisplay,
        L: DefconLeds,
        B: Buzzer,
    {
        let elapsed_ms = now.duration_since(self.started).as_millis();

        while self.next_start_ms <= elapsed_ms {
            let Some(step) = self.script.get_step(self.next_cue).copied() else {
                break;
            };
            self.apply(step.cue, peripherals);
            self.next_cue += 1;
            self.next_start_ms += step.hold.as_millis();
        }

        if self.is_finished_at(elapsed_ms) {
            ServiceTiming::Complete
        } else {
            ServiceTiming::Delay(I::Duration::from_millis(self.next_start_ms - elapsed_ms))
        }
    }

    fn is_finished_at(&self, elapsed_ms: u64) -> bool {
        self.next_cue >= self.script.step_count() && elapsed_ms >= self.next_start_ms
    }

    fn apply<D, L, B>(&mut self, cue: Cue, peripherals: &mut Peripherals<D, L, B>)
    where
        D: SegmentDisplay,
        L: DefconLeds,
        B: Buzzer,
    {
        match cue {
            Cue::Text(text) => {
                self.frame.print(text);
                peripherals.display.show(&self.frame);
            }
            Cue::PaddedText(text) => {
                self.frame.print_padded(text);
                peripherals.display.show(&self.frame);
            }
            Cue::Blank => {
                self.frame.clear();
                peripherals.display.show(&self.frame);
            }
            Cue::AllSegments => {
                self.frame.fill_raw(ALL_SEGMENTS);
                peripherals.display.show(&self.frame);
            }
            Cue::Scroll(c) => {
                self.frame.push(c);
                peripherals.display.show(&self.frame);
            }
            Cue::Recall => {
                self.frame = self.recall;
                peripherals.display.show(&self.frame);
            }
            Cue::Tone(frequency_hz) => peripherals.buzzer.tone(frequency_hz),
            Cue::Mute => peripherals.buzzer.mute(),
            Cue::DefconFill(color) => peripherals.leds.fill(color),
            Cue::DefconSet(index, color) => peripherals.leds.set(index, color),
            Cue::StatusPixel(color) => peripherals.leds.set_status(color),
        }
    }

    /// Number of cues applied so far.
    pub fn cues_applied(&self) -> usize {
        self.next_cue
    }

    /// What the player last put on the display.
    pub fn frame(&self) -> &DisplayBuffer {
        &self.frame
    }
}
