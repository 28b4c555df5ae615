//! Shared test infrastructure for wopr-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use palette::Srgb;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wopr_sequencer::colors::OFF;
use wopr_sequencer::config::DEFCON_LED_COUNT;
use wopr_sequencer::{
    Button, ButtonInputs, Buzzer, DefconLeds, DisplayBuffer, Peripherals, RawButtons,
    SegmentDisplay, SequencerConfig, ServiceTiming, TimeDuration, TimeInstant, TimeSource,
    WoprSequencer,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Drivers
// ============================================================================

/// Mock display that records every frame it is shown
pub struct MockDisplay {
    frames: Vec<DisplayBuffer>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn current(&self) -> DisplayBuffer {
        self.frames.last().copied().unwrap_or_default()
    }

    pub fn text(&self) -> String {
        self.current().chars().collect()
    }

    pub fn frames(&self) -> &[DisplayBuffer] {
        &self.frames
    }

    /// Returns true if any recorded frame showed exactly `text`.
    pub fn ever_showed(&self, text: &str) -> bool {
        self.frames.iter().any(|frame| frame.shows(text))
    }
}

impl SegmentDisplay for MockDisplay {
    fn show(&mut self, buffer: &DisplayBuffer) {
        self.frames.push(*buffer);
    }
}

/// Mock defcon LEDs holding the current colour of each LED
pub struct MockLeds {
    defcon: [Srgb; DEFCON_LED_COUNT],
    status: Srgb,
    writes: usize,
}

impl MockLeds {
    pub fn new() -> Self {
        Self {
            defcon: [OFF; DEFCON_LED_COUNT],
            status: OFF,
            writes: 0,
        }
    }

    pub fn defcon(&self, index: usize) -> Srgb {
        self.defcon[index]
    }

    pub fn status(&self) -> Srgb {
        self.status
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Indices of every LED that is not off.
    pub fn lit(&self) -> Vec<usize> {
        (0..DEFCON_LED_COUNT)
            .filter(|&i| !colors_equal(self.defcon[i], OFF))
            .collect()
    }
}

impl DefconLeds for MockLeds {
    fn set(&mut self, index: usize, color: Srgb) {
        if let Some(led) = self.defcon.get_mut(index) {
            *led = color;
            self.writes += 1;
        }
    }

    fn fill(&mut self, color: Srgb) {
        self.defcon = [color; DEFCON_LED_COUNT];
        self.writes += 1;
    }

    fn set_status(&mut self, color: Srgb) {
        self.status = color;
    }
}

/// Mock buzzer that records every tone and mute
pub struct MockBuzzer {
    playing: Option<u32>,
    history: Vec<Option<u32>>,
}

impl MockBuzzer {
    pub fn new() -> Self {
        Self {
            playing: None,
            history: Vec::new(),
        }
    }

    pub fn playing(&self) -> Option<u32> {
        self.playing
    }

    pub fn history(&self) -> &[Option<u32>] {
        &self.history
    }

    pub fn played(&self, frequency_hz: u32) -> bool {
        self.history.contains(&Some(frequency_hz))
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl Buzzer for MockBuzzer {
    fn tone(&mut self, frequency_hz: u32) {
        self.playing = Some(frequency_hz);
        self.history.push(Some(frequency_hz));
    }

    fn mute(&mut self) {
        self.playing = None;
        self.history.push(None);
    }
}

/// Mock button pins driven from the test
pub struct MockPins {
    pub levels: RawButtons,
}

impl MockPins {
    pub fn new() -> Self {
        Self {
            levels: RawButtons::RELEASED,
        }
    }
}

impl ButtonInputs for MockPins {
    fn is_pressed(&mut self, button: Button) -> bool {
        self.levels.is_pressed(button)
    }
}

pub type MockPeripherals = Peripherals<MockDisplay, MockLeds, MockBuzzer>;

pub fn mock_peripherals() -> MockPeripherals {
    Peripherals::new(MockDisplay::new(), MockLeds::new(), MockBuzzer::new())
}

// ============================================================================
// Sequencer Helpers
// ============================================================================

pub type TestSequencer<'t> =
    WoprSequencer<'t, TestInstant, MockTimeSource, MockDisplay, MockLeds, MockBuzzer, SmallRng>;

/// Config with one-second solve intervals so codebreaks finish quickly.
pub fn fast_config() -> SequencerConfig {
    SequencerConfig::default().with_solve_interval(1000, 1000)
}

pub fn sequencer(timer: &MockTimeSource, config: SequencerConfig) -> TestSequencer<'_> {
    WoprSequencer::new(mock_peripherals(), timer, SmallRng::seed_from_u64(7), config).unwrap()
}

/// Polls every `step_ms` until `total_ms` has passed, with `levels` held.
pub fn run_for(
    sequencer: &mut TestSequencer<'_>,
    timer: &MockTimeSource,
    levels: RawButtons,
    total_ms: u64,
    step_ms: u64,
) {
    let mut elapsed = 0;
    while elapsed < total_ms {
        timer.advance(TestDuration(step_ms));
        elapsed += step_ms;
        sequencer.poll_levels(levels);
    }
}

/// Holds `button` until the press debounces, then releases it until the
/// release debounces.
pub fn tap(sequencer: &mut TestSequencer<'_>, timer: &MockTimeSource, button: Button) {
    sequencer.poll_levels(RawButtons::only(button));
    run_for(sequencer, timer, RawButtons::only(button), 10, 5);
    run_for(sequencer, timer, RawButtons::RELEASED, 15, 5);
}

/// Delay carried by `timing`, if any.
pub fn delay_ms(timing: ServiceTiming<TestDuration>) -> Option<u64> {
    match timing {
        ServiceTiming::Delay(d) => Some(d.0),
        _ => None,
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}
