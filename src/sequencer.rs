//! The WOPR mode state machine.
//!
//! Provides [`WoprSequencer`], which owns the board's outputs and decides
//! which routine drives them. The host calls [`poll`](WoprSequencer::poll)
//! in its main loop and may sleep for the returned delay between calls:
//!
//! ```text
//! loop {
//!     match sequencer.poll(&mut buttons) {
//!         ServiceTiming::Delay(d) => sleep(d),
//!         _ => {}
//!     }
//! }
//! ```
//!
//! Every poll samples the buttons once, handles their edges and gives the
//! active routine one step of work. Routines never block, so the BUT2 abort
//! of the WOPR codebreak takes effect on the same poll that sees the press.

use crate::button::ButtonBank;
use crate::clock::{ClockFace, ClockTime, WallClock};
use crate::codebreak::{CodebreakTarget, Codebreaker, SolveInterval};
use crate::config::{
    CHIRP_MS, MAX_POLL_DELAY_MS, RELEASE_CHIRP_HZ, SCRIPT_CAPACITY, SequencerConfig,
};
use crate::display::DisplayBuffer;
use crate::driver::{Buzzer, ButtonInputs, DefconLeds, Peripherals, RawButtons, SegmentDisplay};
use crate::error::Error;
use crate::routines::{RoutineScript, demo_script, finale_script, marquee_script};
use crate::script::ScriptPlayer;
use crate::status::BootStatus;
use crate::time::{Countdown, TimeInstant, TimeSource};
use crate::types::{Button, Edge, Mode, ServiceTiming};
use rand::RngCore;

/// The routine currently driving the board, with its progress.
enum Activity<I: TimeInstant> {
    Clock(ClockFace<I>),
    Demo(ScriptPlayer<I, SCRIPT_CAPACITY>),
    WoprCodebreak(Codebreaker<I, SCRIPT_CAPACITY>),
    UmCodebreak(Codebreaker<I, SCRIPT_CAPACITY>),
    ScrollMessage(ScriptPlayer<I, SCRIPT_CAPACITY>),
}

impl<I: TimeInstant> Activity<I> {
    fn mode(&self) -> Mode {
        match self {
            Activity::Clock(_) => Mode::Clock,
            Activity::Demo(_) => Mode::Demo,
            Activity::WoprCodebreak(_) => Mode::WoprCodebreak,
            Activity::UmCodebreak(_) => Mode::UmCodebreak,
            Activity::ScrollMessage(_) => Mode::ScrollMessage,
        }
    }
}

/// Drives the WOPR board from four buttons.
///
/// Starts in [`Mode::Clock`]. From the clock, BUT1 to BUT4 start the demo,
/// the WOPR codebreak, the UM codebreak and the marquee. Every routine
/// returns to the clock when it finishes; only the WOPR codebreak can be
/// cut short, by pressing BUT2 again.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `D` - Segment display driver
/// * `L` - Defcon LED driver
/// * `B` - Buzzer driver
/// * `R` - Random number generator for the codebreaks
pub struct WoprSequencer<'t, I, T, D, L, B, R>
where
    I: TimeInstant,
    T: TimeSource<I>,
    D: SegmentDisplay,
    L: DefconLeds,
    B: Buzzer,
    R: RngCore,
{
    time_source: &'t T,
    peripherals: Peripherals<D, L, B>,
    rng: R,
    buttons: ButtonBank<I>,
    clock: WallClock<I>,
    solve_interval: SolveInterval,
    wopr_target: CodebreakTarget,
    um_target: CodebreakTarget,
    demo: RoutineScript<I::Duration>,
    marquee: RoutineScript<I::Duration>,
    finale: RoutineScript<I::Duration>,
    activity: Activity<I>,
    chirp: Option<Countdown<I>>,
}

impl<'t, I, T, D, L, B, R> WoprSequencer<'t, I, T, D, L, B, R>
where
    I: TimeInstant,
    T: TimeSource<I>,
    D: SegmentDisplay,
    L: DefconLeds,
    B: Buzzer,
    R: RngCore,
{
    /// Validates `config`, builds the routines and clears the board.
    ///
    /// The sequencer starts in clock mode with an unsynchronized clock.
    ///
    /// # Errors
    /// * `Error::Config` - A configuration field is out of range
    /// * `Error::Script` - A routine does not fit its script
    pub fn new(
        mut peripherals: Peripherals<D, L, B>,
        time_source: &'t T,
        rng: R,
        config: SequencerConfig,
    ) -> Result<Self, Error> {
        config.validate()?;

        let demo = demo_script()?;
        let marquee = marquee_script(config.marquee_message, config.marquee_step_ms)?;
        let finale = finale_script()?;

        peripherals.reset();
        let now = time_source.now();
        info!("WOPR sequencer ready");

        Ok(Self {
            time_source,
            peripherals,
            rng,
            buttons: ButtonBank::new(config.debounce_ms),
            clock: WallClock::new(now, config.tz_offset_hours),
            solve_interval: SolveInterval {
                min_ms: config.solve_interval_min_ms,
                max_ms: config.solve_interval_max_ms,
                multiplier: config.solve_interval_multiplier,
            },
            wopr_target: config.wopr_target,
            um_target: config.um_target,
            demo,
            marquee,
            finale,
            activity: Activity::Clock(ClockFace::new()),
            chirp: None,
        })
    }

    /// Puts a start-up status screen on the board.
    ///
    /// Meant for the host's network bring-up before the first poll. In
    /// clock mode the next clock frame draws over it.
    pub fn show_status(&mut self, status: BootStatus) {
        if status.is_error() {
            warn!("Status: {}", status);
        } else {
            info!("Status: {}", status);
        }
        status.render(&mut self.peripherals);
    }

    /// Hands over the UTC time fetched by the host.
    pub fn synchronize(&mut self, utc: ClockTime) {
        self.clock.synchronize(utc, self.time_source.now());
        info!("Clock synchronized: {}", utc);
    }

    /// Samples `pins` and runs one iteration.
    pub fn poll<P: ButtonInputs>(&mut self, pins: &mut P) -> ServiceTiming<I::Duration> {
        self.poll_levels(RawButtons::sample(pins))
    }

    /// Runs one iteration with already sampled button levels.
    ///
    /// Returns how long the caller may wait before the next poll. The delay
    /// never exceeds [`MAX_POLL_DELAY_MS`], and `Complete` is never returned:
    /// the clock runs forever.
    pub fn poll_levels(&mut self, levels: RawButtons) -> ServiceTiming<I::Duration> {
        let now = self.time_source.now();

        if let Some(chirp) = self.chirp {
            if chirp.is_expired(now) {
                self.peripherals.buzzer.mute();
                self.chirp = None;
            }
        }

        for event in self.buttons.poll(levels, now) {
            match (self.mode(), event.edge) {
                (Mode::Clock, Edge::Pressed) => {
                    info!("{} pressed", event.button);
                    self.enter(Mode::triggered_by(event.button), now);
                    break;
                }
                (mode, Edge::Released) => {
                    info!("{} released", event.button);
                    if mode == Mode::Clock {
                        self.release_chirp(now);
                    }
                }
                (mode, Edge::Pressed)
                    if mode.is_abortable() && event.is_press_of(Button::But2) =>
                {
                    self.abort(now);
                    break;
                }
                _ => {}
            }
        }

        self.service(now).capped(MAX_POLL_DELAY_MS)
    }

    fn service(&mut self, now: I) -> ServiceTiming<I::Duration> {
        loop {
            let timing = match &mut self.activity {
                Activity::Clock(face) => face.service(now, &self.clock, &mut self.peripherals),
                Activity::Demo(player) | Activity::ScrollMessage(player) => {
                    player.service(now, &mut self.peripherals)
                }
                Activity::WoprCodebreak(codebreaker) | Activity::UmCodebreak(codebreaker) => {
                    codebreaker.service(now, &mut self.peripherals, &mut self.rng)
                }
            };

            match timing {
                ServiceTiming::Complete if self.mode() != Mode::Clock => {
                    info!("{} complete", self.mode());
                    self.enter(Mode::Clock, now);
                }
                timing => return timing,
            }
        }
    }

    fn enter(&mut self, mode: Mode, now: I) {
        info!("Mode: {} -> {}", self.mode(), mode);
        self.chirp = None;

        self.activity = match mode {
            Mode::Clock => {
                self.peripherals.buzzer.mute();
                Activity::Clock(ClockFace::new())
            }
            Mode::Demo => {
                self.peripherals.reset();
                Activity::Demo(ScriptPlayer::start(self.demo.clone(), DisplayBuffer::new(), now))
            }
            Mode::WoprCodebreak => Activity::WoprCodebreak(Codebreaker::start(
                self.wopr_target.clone(),
                self.finale.clone(),
                self.solve_interval,
                now,
                &mut self.peripherals,
            )),
            Mode::UmCodebreak => Activity::UmCodebreak(Codebreaker::start(
                self.um_target.clone(),
                self.finale.clone(),
                self.solve_interval,
                now,
                &mut self.peripherals,
            )),
            Mode::ScrollMessage => {
                self.peripherals.reset();
                Activity::ScrollMessage(ScriptPlayer::start(
                    self.marquee.clone(),
                    DisplayBuffer::new(),
                    now,
                ))
            }
        };
    }

    fn abort(&mut self, now: I) {
        warn!("{} aborted", self.mode());
        self.chirp = None;
        self.activity = Activity::Clock(ClockFace::aborted(now, &mut self.peripherals));
    }

    fn release_chirp(&mut self, now: I) {
        if let Activity::Clock(face) = &self.activity {
            if face.is_showing_banner() {
                return;
            }
        }
        self.peripherals.buzzer.tone(RELEASE_CHIRP_HZ);
        self.chirp = Some(Countdown::start(now, CHIRP_MS));
    }

    /// The active mode.
    pub fn mode(&self) -> Mode {
        self.activity.mode()
    }

    /// Returns true once [`synchronize`](Self::synchronize) has been called.
    pub fn is_clock_synchronized(&self) -> bool {
        self.clock.is_synchronized()
    }

    /// Local time of day as the clock mode shows it.
    pub fn clock_time(&self) -> ClockTime {
        self.clock.time_at(self.time_source.now())
    }

    /// Debounced state of `button`.
    pub fn is_pressed(&self, button: Button) -> bool {
        self.buttons.is_pressed(button)
    }

    /// The running codebreak, if any.
    pub fn codebreaker(&self) -> Option<&Codebreaker<I, SCRIPT_CAPACITY>> {
        match &self.activity {
            Activity::WoprCodebreak(codebreaker) | Activity::UmCodebreak(codebreaker) => {
                Some(codebreaker)
            }
            _ => None,
        }
    }

    /// Shared access to the drivers.
    pub fn peripherals(&self) -> &Peripherals<D, L, B> {
        &self.peripherals
    }

    /// Mutable access to the drivers.
    ///
    /// Writes made here are overwritten by the next routine frame.
    pub fn peripherals_mut(&mut self) -> &mut Peripherals<D, L, B> {
        &mut self.peripherals
    }

    /// Stops the sequencer and returns the drivers.
    pub fn into_peripherals(self) -> Peripherals<D, L, B> {
        self.peripherals
    }
}
