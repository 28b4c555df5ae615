//! Colour helpers for the defcon LEDs and status pixel.
//!
//! All functions return `palette::Srgb` (0.0-1.0 components), the same
//! format the [`DefconLeds`](crate::driver::DefconLeds) trait takes.

use palette::Srgb;

/// LED off.
pub const OFF: Srgb = Srgb::new(0.0, 0.0, 0.0);

pub const WHITE: Srgb = Srgb::new(1.0, 1.0, 1.0);
pub const RED: Srgb = Srgb::new(1.0, 0.0, 0.0);
pub const YELLOW: Srgb = Srgb::new(1.0, 1.0, 0.0);
pub const GREEN: Srgb = Srgb::new(0.0, 1.0, 0.0);
pub const BLUE: Srgb = Srgb::new(0.0, 0.0, 1.0);

/// Colour of each defcon level, indexed by LED (0 = DEFCON 1, rightmost).
pub const DEFCON_COLORS: [Srgb; 5] = [WHITE, RED, YELLOW, GREEN, BLUE];

/// Classic 8-bit colour wheel: red to green to blue and back to red.
///
/// Same curve as the board support package's `rgb_color_wheel`.
pub fn wheel(position: u8) -> Srgb {
    let (r, g, b) = match position {
        0..=84 => (255 - position * 3, position * 3, 0),
        85..=169 => {
            let p = position - 85;
            (0, 255 - p * 3, p * 3)
        }
        _ => {
            let p = position - 170;
            (p * 3, 0, 255 - p * 3)
        }
    };
    Srgb::<u8>::new(r, g, b).into_format()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors_equal(a: Srgb, b: Srgb) -> bool {
        const EPSILON: f32 = 0.01;
        (a.red - b.red).abs() < EPSILON
            && (a.green - b.green).abs() < EPSILON
            && (a.blue - b.blue).abs() < EPSILON
    }

    #[test]
    fn wheel_hits_primaries_at_segment_starts() {
        assert!(colors_equal(wheel(0), RED));
        assert!(colors_equal(wheel(85), GREEN));
        assert!(colors_equal(wheel(170), BLUE));
    }

    #[test]
    fn wheel_blends_between_primaries() {
        // 42 * 3 = 126 of 255 towards green.
        let c = wheel(42);
        assert!(colors_equal(c, Srgb::new(129.0 / 255.0, 126.0 / 255.0, 0.0)));
        // Last position is almost back at red.
        let c = wheel(255);
        assert!(colors_equal(c, Srgb::new(255.0 / 255.0, 0.0, 0.0)));
    }
}
