//! Twelve-digit 14-segment display buffer.
//!
//! The WOPR board chains three 4-digit 14-segment backpacks into one
//! twelve-digit row. [`DisplayBuffer`] holds what that row should show;
//! a [`SegmentDisplay`](crate::driver::SegmentDisplay) implementation turns
//! it into segment masks and pushes it over the bus.
//!
//! Text placement follows the backpack driver's `print` semantics: each
//! character scrolls the row one digit to the left and lands in the
//! rightmost digit. Short text therefore ends up right-aligned and long
//! text shows only its last twelve characters. Use
//! [`DisplayBuffer::print_padded`] for left-aligned text.

use crate::config::DIGIT_COUNT;

/// Segment mask with every segment and the decimal point lit.
pub const ALL_SEGMENTS: u16 = 0xFFFF;

/// What a single digit shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    /// Nothing lit.
    #[default]
    Blank,
    /// A character, rendered with the driver's font.
    Char(char),
    /// A raw segment mask, bypassing the font.
    Raw(u16),
}

/// Contents of the twelve-digit display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBuffer {
    glyphs: [Glyph; DIGIT_COUNT],
    dots: [bool; DIGIT_COUNT],
}

impl DisplayBuffer {
    /// Creates a blank buffer.
    pub const fn new() -> Self {
        Self {
            glyphs: [Glyph::Blank; DIGIT_COUNT],
            dots: [false; DIGIT_COUNT],
        }
    }

    /// Creates a buffer showing `text` as [`print`](Self::print) would.
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.print(text);
        buffer
    }

    /// Blanks every digit and decimal point.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Clears the buffer, then prints `text` right-aligned.
    pub fn print(&mut self, text: &str) {
        self.clear();
        for c in text.chars() {
            self.push(c);
        }
    }

    /// Clears the buffer, then prints `text` padded or truncated to the
    /// display width, so it reads from the leftmost digit.
    pub fn print_padded(&mut self, text: &str) {
        self.clear();
        let mut written = 0;
        for c in text.chars().take(DIGIT_COUNT) {
            self.push(c);
            written += 1;
        }
        for _ in written..DIGIT_COUNT {
            self.push(' ');
        }
    }

    /// Scrolls one character in from the right.
    ///
    /// A `.` lights the decimal point of the rightmost digit when that digit
    /// has none yet. Otherwise it takes a digit of its own.
    pub fn push(&mut self, c: char) {
        let last = DIGIT_COUNT - 1;
        if c == '.' && !self.dots[last] {
            self.dots[last] = true;
            return;
        }

        self.glyphs.copy_within(1.., 0);
        self.dots.copy_within(1.., 0);

        if c == '.' {
            self.glyphs[last] = Glyph::Blank;
            self.dots[last] = true;
        } else {
            self.glyphs[last] = if c == ' ' { Glyph::Blank } else { Glyph::Char(c) };
            self.dots[last] = false;
        }
    }

    /// Sets every digit to the same raw segment mask.
    pub fn fill_raw(&mut self, mask: u16) {
        self.glyphs = [Glyph::Raw(mask); DIGIT_COUNT];
        self.dots = [false; DIGIT_COUNT];
    }

    /// Sets a single digit. Out-of-range indices are ignored.
    pub fn set_glyph(&mut self, index: usize, glyph: Glyph) {
        if let Some(slot) = self.glyphs.get_mut(index) {
            *slot = glyph;
        }
    }

    /// Returns the glyph at `index`, `Blank` when out of range.
    pub fn glyph(&self, index: usize) -> Glyph {
        self.glyphs.get(index).copied().unwrap_or_default()
    }

    /// Returns true if the decimal point at `index` is lit.
    pub fn has_dot(&self, index: usize) -> bool {
        self.dots.get(index).copied().unwrap_or(false)
    }

    /// All glyphs, leftmost first.
    pub fn glyphs(&self) -> &[Glyph; DIGIT_COUNT] {
        &self.glyphs
    }

    /// Returns true if nothing is lit.
    pub fn is_blank(&self) -> bool {
        self.glyphs.iter().all(|g| *g == Glyph::Blank) && !self.dots.iter().any(|d| *d)
    }

    /// The digits as characters: blanks become spaces, raw masks `#`.
    /// Decimal points are not included.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.iter().map(|g| match g {
            Glyph::Blank => ' ',
            Glyph::Char(c) => *c,
            Glyph::Raw(_) => '#',
        })
    }

    /// Returns true if the characters shown equal `text` exactly.
    pub fn shows(&self, text: &str) -> bool {
        text.chars().count() == DIGIT_COUNT && self.chars().eq(text.chars())
    }
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_right_aligns_short_text() {
        let buffer = DisplayBuffer::from_text("WOPR");
        assert!(buffer.shows("        WOPR"));
    }

    #[test]
    fn print_keeps_the_tail_of_long_text() {
        let buffer = DisplayBuffer::from_text("TOO LONG MY MAN");
        assert!(buffer.shows(" LONG MY MAN"));
    }

    #[test]
    fn print_padded_left_aligns_and_truncates() {
        let mut buffer = DisplayBuffer::new();
        buffer.print_padded("LEFT");
        assert!(buffer.shows("LEFT        "));

        buffer.print_padded("TOO LONG MY MAN");
        assert!(buffer.shows("TOO LONG MY "));
    }

    #[test]
    fn dot_attaches_to_previous_digit() {
        let buffer = DisplayBuffer::from_text("10.0.0.1");
        assert!(buffer.shows("       10001"));
        assert!(buffer.has_dot(8));
        assert!(buffer.has_dot(9));
        assert!(buffer.has_dot(10));
        assert!(!buffer.has_dot(11));
    }

    #[test]
    fn repeated_dots_take_their_own_digits() {
        let buffer = DisplayBuffer::from_text("LAUNCHING ...");
        assert!(buffer.shows("LAUNCHING   "));
        assert!(!buffer.has_dot(8));
        assert!(buffer.has_dot(9));
        assert!(buffer.has_dot(10));
        assert!(buffer.has_dot(11));
    }

    #[test]
    fn fill_raw_lights_every_digit() {
        let mut buffer = DisplayBuffer::from_text("X");
        buffer.fill_raw(ALL_SEGMENTS);
        assert!(buffer.glyphs().iter().all(|g| *g == Glyph::Raw(ALL_SEGMENTS)));
        assert!(!buffer.is_blank());
    }

    #[test]
    fn empty_text_blanks_the_display() {
        let mut buffer = DisplayBuffer::from_text("HELLO WORLD");
        buffer.print("");
        assert!(buffer.is_blank());
    }
}
