#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`WoprSequencer`**: Owns the board outputs and switches between modes on button presses
//! - **`Mode`**: The active routine (`Clock`, `Demo`, `WoprCodebreak`, `UmCodebreak`, `ScrollMessage`)
//! - **`ButtonBank`**: Debounces the four buttons and yields the edges of each poll
//! - **`DisplayBuffer`**: What the twelve 14-segment digits show
//! - **`Script`** / **`ScriptPlayer`**: Timed cue lists for the canned routines
//! - **`Codebreaker`**: The cooperative codebreaking animation
//! - **`BootStatus`**: Start-up screens for the host's network bring-up
//! - **`SegmentDisplay`**, **`DefconLeds`**, **`Buzzer`**, **`ButtonInputs`**: Traits to implement for your hardware
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Colours are `Srgb<f32>` (0.0-1.0 range). Convert them to your LED
//! driver's native format in your `DefconLeds` implementation.

#[macro_use]
mod log;

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod button;
pub mod clock;
pub mod codebreak;
pub mod colors;
pub mod config;
pub mod display;
pub mod driver;
pub mod error;
pub mod routines;
pub mod script;
pub mod sequencer;
pub mod status;
pub mod time;
pub mod types;

pub use button::{ButtonBank, ButtonEvents, Debouncer};
pub use clock::{ClockFace, ClockTime, WallClock};
pub use codebreak::{CodebreakTarget, Codebreaker, SolveInterval};
pub use config::SequencerConfig;
pub use display::{DisplayBuffer, Glyph};
pub use driver::{Buzzer, ButtonInputs, DefconLeds, Peripherals, RawButtons, SegmentDisplay};
pub use error::{CodebreakError, ConfigError, Error, ScriptError};
pub use script::{Cue, Script, ScriptBuilder, ScriptPlayer};
pub use sequencer::WoprSequencer;
pub use status::BootStatus;
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{Button, ButtonEvent, Edge, Mode, ServiceTiming};
