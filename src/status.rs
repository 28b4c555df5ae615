//! Start-up status screens.
//!
//! Before the clock is synchronized the host joins the network and fetches
//! the time. [`BootStatus`] is what the board shows meanwhile, on the
//! display and on the carrier's status pixel.

use crate::colors::{BLUE, GREEN, OFF, RED};
use crate::display::DisplayBuffer;
use crate::driver::{Buzzer, DefconLeds, Peripherals, SegmentDisplay};
use core::fmt::Write;
use palette::Srgb;

/// One step of the host's network bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootStatus {
    /// Power-on greeting.
    Hello,
    /// Joining the wireless network.
    WifiConnecting,
    /// Joined, with the IPv4 address the board got.
    WifiConnected([u8; 4]),
    /// Joining failed.
    WifiError,
    /// Fetching the time.
    SettingTime,
    /// Fetching the time failed.
    TimeError,
}

impl BootStatus {
    /// Text for the display, printed right-aligned.
    ///
    /// Address dots land on the decimal points, so any IPv4 address fits.
    pub fn text(&self) -> heapless::String<16> {
        let mut text = heapless::String::new();
        // 15 characters at most, always fits.
        let _ = match self {
            BootStatus::Hello => text.write_str("HELLO WORLD"),
            BootStatus::WifiConnecting => text.write_str("WIFI CONNECT"),
            BootStatus::WifiConnected([a, b, c, d]) => write!(text, "{}.{}.{}.{}", a, b, c, d),
            BootStatus::WifiError => text.write_str("WiFi ERROR"),
            BootStatus::SettingTime => text.write_str("SET TIME"),
            BootStatus::TimeError => text.write_str("TIME ERROR"),
        };
        text
    }

    /// Status pixel colour.
    pub fn pixel(&self) -> Srgb {
        match self {
            BootStatus::Hello => OFF,
            BootStatus::WifiConnecting => BLUE,
            BootStatus::WifiConnected(_) | BootStatus::SettingTime => GREEN,
            BootStatus::WifiError | BootStatus::TimeError => RED,
        }
    }

    /// Returns true for the failure screens.
    pub fn is_error(&self) -> bool {
        matches!(self, BootStatus::WifiError | BootStatus::TimeError)
    }

    /// Shows the screen and sets the status pixel.
    pub fn render<D, L, B>(&self, peripherals: &mut Peripherals<D, L, B>)
    where
        D: SegmentDisplay,
        L: DefconLeds,
        B: Buzzer,
    {
        peripherals.display.show(&DisplayBuffer::from_text(&self.text()));
        peripherals.leds.set_status(self.pixel());
    }
}
