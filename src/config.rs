//! Board constants and runtime configuration.
//!
//! The timing and tone constants give the animations their feel.
//! [`SequencerConfig`] carries the handful of values a host may want to
//! change, and is validated once when the sequencer is built.

use crate::codebreak::CodebreakTarget;
use crate::error::ConfigError;

// Display / LEDs

/// Number of 14-segment digits on the board (three 4-digit backpacks).
pub const DIGIT_COUNT: usize = 12;

/// Number of defcon LEDs on top of the board. Index 0 is the rightmost.
pub const DEFCON_LED_COUNT: usize = 5;

/// Maximum number of cues in one script.
pub const SCRIPT_CAPACITY: usize = 64;

// Buttons

/// Default debounce interval. Raw state must hold this long to count.
pub const BUTTON_DEBOUNCE_MS: u32 = 10;

/// Press chirp (Hz).
pub const PRESS_CHIRP_HZ: u32 = 880;

/// Release chirp (Hz).
pub const RELEASE_CHIRP_HZ: u32 = 120;

/// Length of both chirps.
pub const CHIRP_MS: u64 = 20;

/// Longest delay `poll` asks for, so button edges are never missed.
pub const MAX_POLL_DELAY_MS: u64 = 5;

// Clock

/// Clock frame period; the colour wheel advances once per frame.
pub const CLOCK_FRAME_MS: u64 = 15;

/// Colour wheel offset between neighbouring defcon LEDs.
pub const DEFCON_WHEEL_SPACING: u8 = 3;

// Codebreak

/// Default lower bound of the per-character solve interval.
pub const SOLVE_INTERVAL_MIN_MS: u32 = 4000;

/// Default upper bound of the per-character solve interval.
pub const SOLVE_INTERVAL_MAX_MS: u32 = 8000;

/// Longest scaled solve interval a config may ask for.
pub const MAX_SOLVE_INTERVAL_MS: u32 = 60_000;

/// One "computer noise" frame while cracking.
pub const CRACK_FRAME_MS: u64 = 50;

/// Range of the random cracking tones (Hz, inclusive).
pub const CRACK_TONE_MIN_HZ: u32 = 90;
pub const CRACK_TONE_MAX_HZ: u32 = 250;

/// Beep played when a character is solved, when the code flashes, and on abort.
pub const SOLVED_BEEP_HZ: u32 = 1500;
pub const SOLVED_BEEP_MS: u64 = 500;

/// How long `ABORT` stays up before the clock takes the display back.
pub const ABORT_BANNER_MS: u64 = 500;

// Marquee

/// Default marquee message.
pub const MARQUEE_MESSAGE: &str = "DON'T FORGET TO DRINK YOUR OVALTINE            ";

/// Default delay between marquee steps.
pub const MARQUEE_STEP_MS: u64 = 250;

/// Longest marquee message that fits a script next to its entry chirp.
pub const MARQUEE_MAX_CHARS: usize = SCRIPT_CAPACITY - 2;

/// Runtime configuration for [`WoprSequencer`](crate::WoprSequencer).
///
/// Network credentials are not part of this: the host joins the network,
/// fetches the time and hands it over with
/// [`synchronize`](crate::WoprSequencer::synchronize).
#[derive(Debug, Clone)]
pub struct SequencerConfig {
    /// Local offset from UTC applied to synchronized time.
    pub tz_offset_hours: i8,

    /// Button debounce interval.
    pub debounce_ms: u32,

    /// Bounds of the random per-character solve interval.
    pub solve_interval_min_ms: u32,
    pub solve_interval_max_ms: u32,

    /// Scales the random solve interval. Values below 1.0 speed codebreaks up.
    /// The scaled upper bound may not exceed [`MAX_SOLVE_INTERVAL_MS`].
    pub solve_interval_multiplier: f32,

    /// Text scrolled by BUT4.
    pub marquee_message: &'static str,

    /// Delay between marquee steps.
    pub marquee_step_ms: u64,

    /// Code cracked by BUT2.
    pub wopr_target: CodebreakTarget,

    /// Code cracked by BUT3.
    pub um_target: CodebreakTarget,
}

impl SequencerConfig {
    /// Checks every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-12..=14).contains(&self.tz_offset_hours) {
            return Err(ConfigError::TimezoneOutOfRange(self.tz_offset_hours));
        }

        if self.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }

        if self.solve_interval_min_ms == 0 || self.solve_interval_min_ms > self.solve_interval_max_ms
        {
            return Err(ConfigError::InvalidSolveInterval {
                min_ms: self.solve_interval_min_ms,
                max_ms: self.solve_interval_max_ms,
            });
        }

        // NaN fails this comparison too.
        let multiplier = self.solve_interval_multiplier;
        if !(multiplier > 0.0) || !multiplier.is_finite() {
            return Err(ConfigError::InvalidSolveMultiplier);
        }

        let longest = self.solve_interval_max_ms as f32 * multiplier;
        if longest > MAX_SOLVE_INTERVAL_MS as f32 {
            return Err(ConfigError::SolveIntervalTooLong {
                max_ms: MAX_SOLVE_INTERVAL_MS,
            });
        }

        if self.marquee_step_ms == 0 {
            return Err(ConfigError::ZeroMarqueeStep);
        }

        let len = self.marquee_message.chars().count();
        if len > MARQUEE_MAX_CHARS {
            return Err(ConfigError::MessageTooLong {
                len,
                max: MARQUEE_MAX_CHARS,
            });
        }

        Ok(())
    }

    /// Sets the timezone offset.
    pub fn with_tz_offset(mut self, hours: i8) -> Self {
        self.tz_offset_hours = hours;
        self
    }

    /// Sets the solve interval bounds.
    pub fn with_solve_interval(mut self, min_ms: u32, max_ms: u32) -> Self {
        self.solve_interval_min_ms = min_ms;
        self.solve_interval_max_ms = max_ms;
        self
    }

    /// Sets the marquee text.
    pub fn with_marquee(mut self, message: &'static str) -> Self {
        self.marquee_message = message;
        self
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            tz_offset_hours: 0,
            debounce_ms: BUTTON_DEBOUNCE_MS,
            solve_interval_min_ms: SOLVE_INTERVAL_MIN_MS,
            solve_interval_max_ms: SOLVE_INTERVAL_MAX_MS,
            solve_interval_multiplier: 1.0,
            marquee_message: MARQUEE_MESSAGE,
            marquee_step_ms: MARQUEE_STEP_MS,
            wopr_target: CodebreakTarget::wopr_movie(),
            um_target: CodebreakTarget::lolz_for_you(),
        }
    }
}
