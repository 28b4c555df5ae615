//! Wall-clock time for the clock mode.
//!
//! The board has no battery-backed RTC worth trusting, so the host fetches
//! the time once (usually NTP over Wi-Fi) and hands it over.
//! [`WallClock`] anchors that value to a monotonic instant and derives the
//! time of day from there on.

use core::fmt::Write;

use crate::colors::wheel;
use crate::config::{
    ABORT_BANNER_MS, CLOCK_FRAME_MS, DEFCON_LED_COUNT, DEFCON_WHEEL_SPACING, SOLVED_BEEP_HZ,
};
use crate::display::DisplayBuffer;
use crate::driver::{Buzzer, DefconLeds, Peripherals, SegmentDisplay};
use crate::time::{Countdown, TimeDuration, TimeInstant};
use crate::types::ServiceTiming;

const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// A time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl ClockTime {
    /// Midnight.
    pub const MIDNIGHT: ClockTime = ClockTime {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Builds a time, returning `None` for out-of-range fields.
    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Option<Self> {
        if hours < 24 && minutes < 60 && seconds < 60 {
            Some(Self {
                hours,
                minutes,
                seconds,
            })
        } else {
            None
        }
    }

    /// Builds a time from seconds since midnight, wrapping at 24 h.
    pub fn from_seconds_of_day(seconds: u32) -> Self {
        let s = seconds % SECONDS_PER_DAY;
        Self {
            hours: (s / 3600) as u8,
            minutes: (s / 60 % 60) as u8,
            seconds: (s % 60) as u8,
        }
    }

    /// Seconds since midnight.
    pub fn seconds_of_day(&self) -> u32 {
        self.hours as u32 * 3600 + self.minutes as u32 * 60 + self.seconds as u32
    }

    /// Shifts by whole hours, wrapping around midnight in either direction.
    pub fn offset_hours(&self, hours: i8) -> Self {
        let shifted = self.seconds_of_day() as i64 + hours as i64 * 3600;
        Self::from_seconds_of_day(shifted.rem_euclid(SECONDS_PER_DAY as i64) as u32)
    }
}

/// Text shown by the clock mode: `HH MM SS ` (printed right-aligned).
pub fn format_clock(time: ClockTime) -> heapless::String<12> {
    let mut text = heapless::String::new();
    // Nine characters always fit.
    let _ = write!(
        text,
        "{:02} {:02} {:02} ",
        time.hours, time.minutes, time.seconds
    );
    text
}

/// Time of day derived from one synchronization point.
#[derive(Debug, Clone, Copy)]
pub struct WallClock<I: TimeInstant> {
    boot: I,
    anchor: Option<(ClockTime, I)>,
    tz_offset_hours: i8,
}

impl<I: TimeInstant> WallClock<I> {
    /// Creates an unsynchronized clock that starts counting at `boot`.
    pub fn new(boot: I, tz_offset_hours: i8) -> Self {
        Self {
            boot,
            anchor: None,
            tz_offset_hours,
        }
    }

    /// Records that it was `utc` at `now`.
    pub fn synchronize(&mut self, utc: ClockTime, now: I) {
        self.anchor = Some((utc.offset_hours(self.tz_offset_hours), now));
    }

    /// Returns true once [`synchronize`](Self::synchronize) has been called.
    pub fn is_synchronized(&self) -> bool {
        self.anchor.is_some()
    }

    /// Local time of day at `now`.
    ///
    /// Before synchronization this counts up from midnight at boot, like
    /// the board's unset RTC.
    pub fn time_at(&self, now: I) -> ClockTime {
        let (base, since) = self.anchor.unwrap_or((ClockTime::MIDNIGHT, self.boot));
        let elapsed_secs = now.duration_since(since).as_millis() / 1000;
        let secs = (base.seconds_of_day() as u64 + elapsed_secs) % SECONDS_PER_DAY as u64;
        ClockTime::from_seconds_of_day(secs as u32)
    }
}

/// Renders the clock mode: the time on the display and a colour wheel
/// running across the defcon LEDs and the status pixel.
///
/// A face can open with a banner (`ABORT` after a cancelled codebreak)
/// that holds the display for a moment before the time comes back.
#[derive(Debug, Clone, Copy)]
pub struct ClockFace<I: TimeInstant> {
    wheel: u8,
    banner: Option<Countdown<I>>,
    last_frame: Option<I>,
    frame: DisplayBuffer,
}

impl<I: TimeInstant> ClockFace<I> {
    /// A face that renders on its first service.
    pub fn new() -> Self {
        Self {
            wheel: 0,
            banner: None,
            last_frame: None,
            frame: DisplayBuffer::new(),
        }
    }

    /// Shows `ABORT` with the 1500 Hz beep. The time comes back after
    /// [`ABORT_BANNER_MS`].
    pub fn aborted<D, L, B>(now: I, peripherals: &mut Peripherals<D, L, B>) -> Self
    where
        D: SegmentDisplay,
        L: DefconLeds,
        B: Buzzer,
    {
        let frame = DisplayBuffer::from_text("ABORT");
        peripherals.display.show(&frame);
        peripherals.buzzer.tone(SOLVED_BEEP_HZ);
        Self {
            banner: Some(Countdown::start(now, ABORT_BANNER_MS)),
            frame,
            ..Self::new()
        }
    }

    /// Returns true while the banner holds the display.
    pub fn is_showing_banner(&self) -> bool {
        self.banner.is_some()
    }

    /// Renders a frame if one is due.
    pub fn service<D, L, B>(
        &mut self,
        now: I,
        clock: &WallClock<I>,
        peripherals: &mut Peripherals<D, L, B>,
    ) -> ServiceTiming<I::Duration>
    where
        D: SegmentDisplay,
        L: DefconLeds,
        B: Buzzer,
    {
        if let Some(banner) = self.banner {
            if !banner.is_expired(now) {
                return ServiceTiming::Delay(banner.remaining(now));
            }
            peripherals.buzzer.mute();
            self.banner = None;
        }

        if let Some(last) = self.last_frame {
            let since = now.duration_since(last).as_millis();
            if since < CLOCK_FRAME_MS {
                return ServiceTiming::Delay(I::Duration::from_millis(CLOCK_FRAME_MS - since));
            }
        }

        self.frame.print(&format_clock(clock.time_at(now)));
        peripherals.display.show(&self.frame);

        peripherals.leds.set_status(wheel(self.wheel));
        for k in 0..DEFCON_LED_COUNT {
            let offset = (k as u8).wrapping_mul(DEFCON_WHEEL_SPACING);
            peripherals.leds.set(k, wheel(self.wheel.wrapping_add(offset)));
        }
        self.wheel = self.wheel.wrapping_add(1);
        self.last_frame = Some(now);

        ServiceTiming::Delay(I::Duration::from_millis(CLOCK_FRAME_MS))
    }
}

impl<I: TimeInstant> Default for ClockFace<I> {
    fn default() -> Self {
        Self::new()
    }
}
