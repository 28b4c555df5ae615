//! The codebreaking animation.
//!
//! Unsolved positions flicker through random hex characters while the
//! buzzer burbles. Every few seconds the next position in the solve order
//! locks onto its real character, a defcon LED closer to DEFCON 1 lights
//! up and the board beeps. Once every position is solved, a finale script
//! flashes the code and announces the launch.
//!
//! Everything runs cooperatively: [`Codebreaker::service`] does one frame
//! of work and returns, so the caller can check for an abort between frames.

use crate::colors::{DEFCON_COLORS, OFF};
use crate::config::{
    CHIRP_MS, CRACK_FRAME_MS, CRACK_TONE_MAX_HZ, CRACK_TONE_MIN_HZ, DIGIT_COUNT, PRESS_CHIRP_HZ,
    SOLVED_BEEP_HZ, SOLVED_BEEP_MS,
};
use crate::display::{DisplayBuffer, Glyph};
use crate::driver::{Buzzer, DefconLeds, Peripherals, SegmentDisplay};
use crate::error::CodebreakError;
use crate::script::{Script, ScriptPlayer};
use crate::time::{Countdown, TimeDuration, TimeInstant};
use crate::types::ServiceTiming;
use rand::{Rng, RngCore};

/// Characters flashed on unsolved positions.
pub const CRACK_CHARSET: [char; 16] = [
    'A', 'B', 'C', 'D', 'E', 'F', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// The code to crack and the order positions get solved in.
///
/// Positions missing from the order never flicker; they keep whatever the
/// code has there from the start (usually a space).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodebreakTarget {
    code: [char; DIGIT_COUNT],
    order: [usize; DIGIT_COUNT],
    order_len: usize,
}

impl CodebreakTarget {
    /// Validates and builds a target.
    ///
    /// Codes shorter than the display are padded with spaces on the right.
    pub fn new(code: &str, order: &[usize]) -> Result<Self, CodebreakError> {
        let len = code.chars().count();
        if len > DIGIT_COUNT {
            return Err(CodebreakError::CodeTooLong {
                len,
                max: DIGIT_COUNT,
            });
        }
        if order.is_empty() {
            return Err(CodebreakError::EmptyOrder);
        }

        let mut seen = [false; DIGIT_COUNT];
        for &pos in order {
            if pos >= DIGIT_COUNT {
                return Err(CodebreakError::PositionOutOfRange(pos));
            }
            if seen[pos] {
                return Err(CodebreakError::DuplicatePosition(pos));
            }
            seen[pos] = true;
        }

        let mut padded = [' '; DIGIT_COUNT];
        for (slot, c) in padded.iter_mut().zip(code.chars()) {
            *slot = c;
        }
        Ok(Self::from_parts(padded, order))
    }

    /// `CPE 1704 TKS`, solved in the order seen in the film.
    pub fn wopr_movie() -> Self {
        Self::from_parts(
            ['C', 'P', 'E', ' ', '1', '7', '0', '4', ' ', 'T', 'K', 'S'],
            &[7, 1, 4, 6, 11, 2, 5, 0, 10, 9],
        )
    }

    /// `LOLZ FOR YOU`, solved left to right.
    pub fn lolz_for_you() -> Self {
        Self::from_parts(
            ['L', 'O', 'L', 'Z', ' ', 'F', 'O', 'R', ' ', 'Y', 'O', 'U'],
            &[0, 1, 2, 3, 5, 6, 7, 9, 10, 11],
        )
    }

    // Callers guarantee a valid, non-empty order of at most DIGIT_COUNT positions.
    fn from_parts(code: [char; DIGIT_COUNT], order: &[usize]) -> Self {
        let mut slots = [0; DIGIT_COUNT];
        let order_len = order.len().min(DIGIT_COUNT);
        slots[..order_len].copy_from_slice(&order[..order_len]);
        Self {
            code,
            order: slots,
            order_len,
        }
    }

    /// The full code, one char per digit.
    pub fn code(&self) -> &[char; DIGIT_COUNT] {
        &self.code
    }

    /// Positions in the order they get solved.
    pub fn order(&self) -> &[usize] {
        &self.order[..self.order_len]
    }
}

/// Random wait between two solved characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveInterval {
    pub min_ms: u32,
    pub max_ms: u32,
    pub multiplier: f32,
}

impl SolveInterval {
    /// Draws the next wait.
    pub fn sample<R: RngCore>(&self, rng: &mut R) -> u64 {
        let base = rng.gen_range(self.min_ms..=self.max_ms);
        (base as f32 * self.multiplier) as u64
    }
}

enum Phase<I: TimeInstant, const N: usize> {
    /// Entry chirp.
    Intro(Countdown<I>),
    /// Flickering until the countdown runs out.
    Cracking(Countdown<I>),
    /// Beep after a character locked in.
    Solved(Countdown<I>),
    Finale(ScriptPlayer<I, N>),
    Done,
}

/// Runs one codebreak from start to finale.
pub struct Codebreaker<I: TimeInstant, const N: usize> {
    target: CodebreakTarget,
    interval: SolveInterval,
    finale: Option<Script<I::Duration, N>>,
    current: [char; DIGIT_COUNT],
    solved: usize,
    last_frame: Option<I>,
    phase: Phase<I, N>,
}

impl<I: TimeInstant, const N: usize> Codebreaker<I, N> {
    /// Clears the board, chirps, and starts cracking `target`.
    ///
    /// `finale` plays after the last character; its `Recall` cue shows the
    /// cracked code.
    pub fn start<D, L, B>(
        target: CodebreakTarget,
        finale: Script<I::Duration, N>,
        interval: SolveInterval,
        now: I,
        peripherals: &mut Peripherals<D, L, B>,
    ) -> Self
    where
        D: SegmentDisplay,
        L: DefconLeds,
        B: Buzzer,
    {
        peripherals.reset();
        peripherals.buzzer.tone(PRESS_CHIRP_HZ);

        let mut current = [' '; DIGIT_COUNT];
        // Positions outside the solve order show their real character throughout.
        for (pos, slot) in current.iter_mut().enumerate() {
            if !target.order().contains(&pos) {
                *slot = target.code[pos];
            }
        }

        Self {
            target,
            interval,
            finale: Some(finale),
            current,
            solved: 0,
            last_frame: None,
            phase: Phase::Intro(Countdown::start(now, CHIRP_MS)),
        }
    }

    /// Does one frame of work and returns when to service again.
    pub fn service<D, L, B, R>(
        &mut self,
        now: I,
        peripherals: &mut Peripherals<D, L, B>,
        rng: &mut R,
    ) -> ServiceTiming<I::Duration>
    where
        D: SegmentDisplay,
        L: DefconLeds,
        B: Buzzer,
        R: RngCore,
    {
        loop {
            match &mut self.phase {
                Phase::Intro(chirp) => {
                    if !chirp.is_expired(now) {
                        return ServiceTiming::Delay(chirp.remaining(now));
                    }
                    peripherals.buzzer.mute();
                    self.last_frame = None;
                    self.phase = Phase::Cracking(Countdown::start(now, self.interval.sample(rng)));
                }
                Phase::Cracking(countdown) => {
                    if countdown.is_expired(now) {
                        self.solve_next(peripherals);
                        self.phase = Phase::Solved(Countdown::start(now, SOLVED_BEEP_MS));
                        return ServiceTiming::Delay(I::Duration::from_millis(SOLVED_BEEP_MS));
                    }
                    let solve_ms = countdown.remaining(now).as_millis();

                    let since_frame = match self.last_frame {
                        Some(last) => now.duration_since(last).as_millis(),
                        None => CRACK_FRAME_MS,
                    };
                    let frame_ms = if since_frame >= CRACK_FRAME_MS {
                        self.scramble(peripherals, rng);
                        self.last_frame = Some(now);
                        CRACK_FRAME_MS
                    } else {
                        CRACK_FRAME_MS - since_frame
                    };
                    return ServiceTiming::Delay(I::Duration::from_millis(frame_ms.min(solve_ms)));
                }
                Phase::Solved(beep) => {
                    if !beep.is_expired(now) {
                        return ServiceTiming::Delay(beep.remaining(now));
                    }
                    peripherals.buzzer.mute();
                    self.phase = if self.is_cracked() {
                        match self.finale.take() {
                            Some(script) => {
                                Phase::Finale(ScriptPlayer::start(script, self.frame(), now))
                            }
                            None => Phase::Done,
                        }
                    } else {
                        self.last_frame = None;
                        Phase::Cracking(Countdown::start(now, self.interval.sample(rng)))
                    };
                }
                Phase::Finale(player) => match player.service(now, peripherals) {
                    ServiceTiming::Complete => self.phase = Phase::Done,
                    timing => return timing,
                },
                Phase::Done => return ServiceTiming::Complete,
            }
        }
    }

    fn scramble<D, L, B, R>(&mut self, peripherals: &mut Peripherals<D, L, B>, rng: &mut R)
    where
        D: SegmentDisplay,
        L: DefconLeds,
        B: Buzzer,
        R: RngCore,
    {
        peripherals
            .buzzer
            .tone(rng.gen_range(CRACK_TONE_MIN_HZ..=CRACK_TONE_MAX_HZ));
        for &pos in &self.target.order()[self.solved..] {
            self.current[pos] = CRACK_CHARSET[rng.gen_range(0..CRACK_CHARSET.len())];
        }
        peripherals.display.show(&self.frame());
    }

    fn solve_next<D, L, B>(&mut self, peripherals: &mut Peripherals<D, L, B>)
    where
        D: SegmentDisplay,
        L: DefconLeds,
        B: Buzzer,
    {
        let Some(&pos) = self.target.order().get(self.solved) else {
            return;
        };
        self.current[pos] = self.target.code[pos];
        self.solved += 1;
        peripherals.display.show(&self.frame());

        let level = defcon_level(self.solved, self.target.order_len);
        peripherals.leds.fill(OFF);
        peripherals.leds.set(level, DEFCON_COLORS[level]);
        peripherals.buzzer.tone(SOLVED_BEEP_HZ);
        info!("Codebreak: {} of {} solved", self.solved, self.target.order_len);
    }

    /// The code as currently displayed.
    pub fn frame(&self) -> DisplayBuffer {
        let mut buffer = DisplayBuffer::new();
        for (pos, c) in self.current.iter().enumerate() {
            let glyph = if *c == ' ' { Glyph::Blank } else { Glyph::Char(*c) };
            buffer.set_glyph(pos, glyph);
        }
        buffer
    }

    /// Number of characters locked in.
    pub fn solved(&self) -> usize {
        self.solved
    }

    /// Returns true once every position in the order is solved.
    pub fn is_cracked(&self) -> bool {
        self.solved >= self.target.order_len
    }

    /// Returns true once the finale has played out.
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    /// The target being cracked.
    pub fn target(&self) -> &CodebreakTarget {
        &self.target
    }
}

/// Defcon LED lit after `solved` of `total` characters.
///
/// Walks from DEFCON 5 down so DEFCON 2 is lit just before the last
/// character, and DEFCON 1 when the code is complete.
pub fn defcon_level(solved: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    let remaining = total.saturating_sub(solved);
    (remaining * 4 / total + 1).min(DEFCON_COLORS.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_pads_short_codes() {
        let target = CodebreakTarget::new("HI", &[1, 0]).unwrap();
        assert_eq!(target.code()[0], 'H');
        assert_eq!(target.code()[1], 'I');
        assert!(target.code()[2..].iter().all(|c| *c == ' '));
        assert_eq!(target.order(), &[1, 0]);
    }

    #[test]
    fn target_rejects_bad_orders() {
        assert_eq!(
            CodebreakTarget::new("ABC", &[]),
            Err(CodebreakError::EmptyOrder)
        );
        assert_eq!(
            CodebreakTarget::new("ABC", &[0, 12]),
            Err(CodebreakError::PositionOutOfRange(12))
        );
        assert_eq!(
            CodebreakTarget::new("ABC", &[2, 2]),
            Err(CodebreakError::DuplicatePosition(2))
        );
        assert!(matches!(
            CodebreakTarget::new("THIRTEEN CHARS", &[0]),
            Err(CodebreakError::CodeTooLong { .. })
        ));
    }

    #[test]
    fn builtin_targets_are_valid() {
        let wopr = CodebreakTarget::wopr_movie();
        assert_eq!(
            CodebreakTarget::new("CPE 1704 TKS", wopr.order()),
            Ok(wopr.clone())
        );
        let lolz = CodebreakTarget::lolz_for_you();
        assert_eq!(
            CodebreakTarget::new("LOLZ FOR YOU", lolz.order()),
            Ok(lolz.clone())
        );
    }

    #[test]
    fn defcon_level_counts_down() {
        // Ten characters: first solve lights DEFCON 4, last lights DEFCON 1.
        assert_eq!(defcon_level(1, 10), 4);
        assert_eq!(defcon_level(5, 10), 3);
        assert_eq!(defcon_level(9, 10), 1);
        assert_eq!(defcon_level(10, 10), 1);
        assert_eq!(defcon_level(0, 10), 4);
    }
}
