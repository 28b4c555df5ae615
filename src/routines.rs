//! The canned scripts behind BUT1, BUT4 and the codebreak finale.

use crate::colors::{OFF, WHITE};
use crate::config::{CHIRP_MS, PRESS_CHIRP_HZ, SCRIPT_CAPACITY, SOLVED_BEEP_HZ};
use crate::error::ScriptError;
use crate::script::{Cue, Script, ScriptBuilder};
use crate::time::TimeDuration;

/// A script sized for the board's routines.
pub type RoutineScript<D> = Script<D, SCRIPT_CAPACITY>;

/// C major scale played during the audio test (Hz).
pub const DEMO_SCALE: [u32; 8] = [262, 294, 330, 349, 392, 440, 494, 523];

const DEMO_NOTE_MS: u64 = 50;
const DEMO_GAP_MS: u64 = 10;
const DEMO_PAGE_MS: u64 = 1000;
const FINALE_FLASHES: usize = 5;
const FINALE_FLASH_MS: u64 = 500;

fn ms<D: TimeDuration>(millis: u64) -> D {
    D::from_millis(millis)
}

fn chirp<D: TimeDuration>(
    builder: ScriptBuilder<D, SCRIPT_CAPACITY>,
) -> Result<ScriptBuilder<D, SCRIPT_CAPACITY>, ScriptError> {
    builder.cue(Cue::Tone(PRESS_CHIRP_HZ), ms(CHIRP_MS))
}

/// The BUT1 demo: a title card, a scale on the buzzer, then a tour of the
/// display's text layout rules.
pub fn demo_script<D: TimeDuration>() -> Result<RoutineScript<D>, ScriptError> {
    let mut builder = chirp(Script::builder().then(Cue::Text("WOPR DEMO"))?)?
        .cue(Cue::Mute, ms(DEMO_PAGE_MS - CHIRP_MS))?
        .then(Cue::Text("AUDIO"))?;

    for note in DEMO_SCALE {
        builder = builder
            .cue(Cue::Tone(note), ms(DEMO_NOTE_MS))?
            .cue(Cue::Mute, ms(DEMO_GAP_MS))?;
    }

    let pages = [
        Cue::Text("AUDIO DONE"),
        Cue::PaddedText("LEFT"),
        Cue::Text("RIGHT"),
        Cue::PaddedText("ABCDEFGHIJKL"),
        Cue::Text("0123456789AB"),
        Cue::PaddedText("WOPR"),
        Cue::Text("WOPR"),
        Cue::PaddedText("TOO LONG MY MAN"),
        Cue::Text("TOO LONG MY MAN"),
        Cue::AllSegments,
        Cue::Text("DEMO OVER"),
    ];
    for page in pages {
        builder = builder.cue(page, ms(DEMO_PAGE_MS))?;
    }

    builder.build()
}

/// One pass of `message` scrolling in from the right, `step_ms` per character.
pub fn marquee_script<D: TimeDuration>(
    message: &str,
    step_ms: u64,
) -> Result<RoutineScript<D>, ScriptError> {
    let mut builder = chirp(Script::builder())?.then(Cue::Mute)?;
    for c in message.chars() {
        builder = builder.cue(Cue::Scroll(c), ms(step_ms))?;
    }
    builder.build()
}

/// Plays once the code is cracked: DEFCON 1, the code flashing with a beep,
/// then the launch announcement.
///
/// The cracked code comes from the player's recall frame.
pub fn finale_script<D: TimeDuration>() -> Result<RoutineScript<D>, ScriptError> {
    let mut builder = Script::builder()
        .then(Cue::Mute)?
        .then(Cue::DefconFill(OFF))?
        .cue(Cue::DefconSet(0, WHITE), ms(1000))?;

    for _ in 0..FINALE_FLASHES {
        builder = builder
            .then(Cue::DefconFill(OFF))?
            .cue(Cue::Blank, ms(FINALE_FLASH_MS))?
            .then(Cue::DefconSet(0, WHITE))?
            .then(Cue::Recall)?
            .cue(Cue::Tone(SOLVED_BEEP_HZ), ms(FINALE_FLASH_MS))?
            .then(Cue::Mute)?;
    }

    for _ in 0..FINALE_FLASHES {
        builder = builder
            .cue(Cue::Blank, ms(FINALE_FLASH_MS))?
            .cue(Cue::Text("LAUNCHING ..."), ms(FINALE_FLASH_MS))?;
    }

    builder.build()
}
