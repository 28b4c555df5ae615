//! Integration tests for Script and ScriptPlayer

mod common;
use common::*;

use wopr_sequencer::colors::{GREEN, RED, WHITE};
use wopr_sequencer::routines::{demo_script, marquee_script};
use wopr_sequencer::{
    Cue, DisplayBuffer, Script, ScriptError, ScriptPlayer, ServiceTiming, TimeSource,
};

type TestPlayer = ScriptPlayer<TestInstant, 8>;

fn script(cues: &[(Cue, u64)]) -> Script<TestDuration, 8> {
    let mut builder = Script::builder();
    for (cue, hold) in cues {
        builder = builder.cue(*cue, TestDuration(*hold)).unwrap();
    }
    builder.build().unwrap()
}

#[test]
fn cues_fire_at_their_start_time() {
    let timer = MockTimeSource::new();
    let mut peripherals = mock_peripherals();
    let mut player: TestPlayer = ScriptPlayer::start(
        script(&[
            (Cue::Text("A"), 100),
            (Cue::Tone(440), 0),
            (Cue::Text("B"), 100),
        ]),
        DisplayBuffer::new(),
        timer.now(),
    );

    let timing = player.service(timer.now(), &mut peripherals);
    assert_eq!(timing, ServiceTiming::Delay(TestDuration(100)));
    assert_eq!(player.cues_applied(), 1);
    assert_eq!(peripherals.display.text(), "           A");
    assert_eq!(peripherals.buzzer.playing(), None);

    timer.advance(TestDuration(99));
    assert_eq!(
        player.service(timer.now(), &mut peripherals),
        ServiceTiming::Delay(TestDuration(1))
    );
    assert_eq!(player.cues_applied(), 1);

    // Zero-hold cues fire together with the next one.
    timer.advance(TestDuration(1));
    player.service(timer.now(), &mut peripherals);
    assert_eq!(player.cues_applied(), 3);
    assert_eq!(peripherals.buzzer.playing(), Some(440));
    assert_eq!(peripherals.display.text(), "           B");
}

#[test]
fn completes_after_the_final_hold() {
    let timer = MockTimeSource::new();
    let mut peripherals = mock_peripherals();
    let mut player: TestPlayer =
        ScriptPlayer::start(script(&[(Cue::Mute, 250)]), DisplayBuffer::new(), timer.now());

    player.service(timer.now(), &mut peripherals);
    timer.advance(TestDuration(249));
    assert!(matches!(
        player.service(timer.now(), &mut peripherals),
        ServiceTiming::Delay(_)
    ));

    timer.advance(TestDuration(1));
    assert_eq!(
        player.service(timer.now(), &mut peripherals),
        ServiceTiming::Complete
    );
}

#[test]
fn late_service_applies_every_missed_cue_once_in_order() {
    let timer = MockTimeSource::new();
    let mut peripherals = mock_peripherals();
    let mut player: TestPlayer = ScriptPlayer::start(
        script(&[
            (Cue::Text("ONE"), 100),
            (Cue::Text("TWO"), 100),
            (Cue::Text("THREE"), 100),
        ]),
        DisplayBuffer::new(),
        timer.now(),
    );

    timer.advance(TestDuration(1000));
    assert_eq!(
        player.service(timer.now(), &mut peripherals),
        ServiceTiming::Complete
    );

    let shown: Vec<String> = peripherals
        .display
        .frames()
        .iter()
        .map(|frame| frame.chars().collect::<String>().trim().to_string())
        .collect();
    assert_eq!(shown, ["ONE", "TWO", "THREE"]);
}

#[test]
fn recall_restores_the_start_frame() {
    let timer = MockTimeSource::new();
    let mut peripherals = mock_peripherals();
    let mut player: TestPlayer = ScriptPlayer::start(
        script(&[(Cue::Blank, 100), (Cue::Recall, 100)]),
        DisplayBuffer::from_text("CODE"),
        timer.now(),
    );

    player.service(timer.now(), &mut peripherals);
    assert!(peripherals.display.current().is_blank());

    timer.advance(TestDuration(100));
    player.service(timer.now(), &mut peripherals);
    assert_eq!(peripherals.display.text(), "        CODE");
}

#[test]
fn scroll_continues_from_the_start_frame() {
    let timer = MockTimeSource::new();
    let mut peripherals = mock_peripherals();
    let mut player: TestPlayer = ScriptPlayer::start(
        script(&[(Cue::Scroll('!'), 10)]),
        DisplayBuffer::from_text("HELLO"),
        timer.now(),
    );

    player.service(timer.now(), &mut peripherals);
    assert_eq!(peripherals.display.text(), "      HELLO!");
    assert_eq!(player.frame().chars().last(), Some('!'));
}

#[test]
fn led_cues_reach_the_leds() {
    let timer = MockTimeSource::new();
    let mut peripherals = mock_peripherals();
    let mut player: TestPlayer = ScriptPlayer::start(
        script(&[
            (Cue::DefconFill(RED), 0),
            (Cue::DefconSet(2, GREEN), 0),
            (Cue::StatusPixel(WHITE), 0),
        ]),
        DisplayBuffer::new(),
        timer.now(),
    );

    assert_eq!(
        player.service(timer.now(), &mut peripherals),
        ServiceTiming::Complete
    );
    assert!(colors_equal(peripherals.leds.defcon(0), RED));
    assert!(colors_equal(peripherals.leds.defcon(2), GREEN));
    assert!(colors_equal(peripherals.leds.status(), WHITE));
}

#[test]
fn builder_reports_capacity() {
    let mut builder = Script::<TestDuration, 2>::builder();
    builder = builder.cue(Cue::Blank, TestDuration(1)).unwrap();
    builder = builder.cue(Cue::Blank, TestDuration(1)).unwrap();
    assert_eq!(
        builder.cue(Cue::Blank, TestDuration(1)).err(),
        Some(ScriptError::CapacityExceeded)
    );
}

#[test]
fn marquee_scrolls_the_whole_message() {
    let timer = MockTimeSource::new();
    let mut peripherals = mock_peripherals();
    let mut player = ScriptPlayer::<TestInstant, 64>::start(
        marquee_script("HELLO WORLD", 100).unwrap(),
        DisplayBuffer::new(),
        timer.now(),
    );

    while player.service(timer.now(), &mut peripherals) != ServiceTiming::Complete {
        timer.advance(TestDuration(10));
    }

    assert_eq!(peripherals.display.text(), " HELLO WORLD");
    assert!(peripherals.buzzer.played(880));
    assert_eq!(peripherals.buzzer.playing(), None);
    assert_eq!(timer.now(), TestInstant(20 + 11 * 100));
}

#[test]
fn demo_walks_the_scale() {
    let timer = MockTimeSource::new();
    let mut peripherals = mock_peripherals();
    let mut player = ScriptPlayer::<TestInstant, 64>::start(
        demo_script().unwrap(),
        DisplayBuffer::new(),
        timer.now(),
    );

    while player.service(timer.now(), &mut peripherals) != ServiceTiming::Complete {
        timer.advance(TestDuration(5));
    }

    let notes: Vec<u32> = peripherals
        .buzzer
        .history()
        .iter()
        .flatten()
        .copied()
        .filter(|hz| *hz != 880)
        .collect();
    assert_eq!(notes, [262, 294, 330, 349, 392, 440, 494, 523]);
    assert_eq!(peripherals.display.text(), "   DEMO OVER");
}
