//! Hue wheel color mapper.
//!
//! Maps a byte position to a color on a red → green → blue → red hue cycle.
//! The 0-255 input range is divided into three 85-wide bands; within each
//! band one channel ramps down while the next ramps up, so the output is
//! continuous and near-cyclic (`wheel(0)` equals `wheel(255)` up to the
//! per-step delta).
//!
//! Used for the boot rainbow sweep on the ring. Total over its input domain:
//! no side effects, no error conditions.

use embedded_graphics::pixelcolor::Rgb888;

use crate::ring::{LedRing, RING_LEDS};

/// Map a wheel position to an RGB color.
///
/// Band layout (boundaries at 85 and 170):
/// - `0..85`: red falls, green rises, blue stays 0
/// - `85..170`: green falls, blue rises, red stays 0
/// - `170..=255`: blue falls, red rises, green stays 0
pub const fn wheel(pos: u8) -> Rgb888 {
    // Widen before scaling: 3 * 84 overflows u8.
    let p = pos as u16;
    if p < 85 {
        Rgb888::new((255 - 3 * p) as u8, (3 * p) as u8, 0)
    } else if p < 170 {
        let q = p - 85;
        Rgb888::new(0, (255 - 3 * q) as u8, (3 * q) as u8)
    } else {
        let q = p - 170;
        Rgb888::new((3 * q) as u8, 0, (255 - 3 * q) as u8)
    }
}

/// Paint the whole ring with wheel colors, rotated by `offset`.
///
/// Pixel `i` gets `wheel(i * 256 / RING_LEDS + offset)`, wrapping, so
/// stepping `offset` each frame spins the rainbow around the ring.
pub fn rainbow<R: LedRing>(
    ring: &mut R,
    offset: u8,
) {
    for i in 0..RING_LEDS {
        let pos = ((i * 256 / RING_LEDS) as u8).wrapping_add(offset);
        ring.set_pixel(i, wheel(pos));
    }
    ring.show();
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::RgbColor;

    use super::*;

    fn channels(c: Rgb888) -> [i16; 3] { [i16::from(c.r()), i16::from(c.g()), i16::from(c.b())] }

    #[test]
    fn test_wheel_endpoints() {
        // wheel(0) is pure red and wheel(255) wraps back onto it
        assert_eq!(wheel(0), Rgb888::new(255, 0, 0));
        let start = channels(wheel(0));
        let end = channels(wheel(255));
        for ch in 0..3 {
            assert!(
                (start[ch] - end[ch]).abs() <= 3,
                "wheel should be near-cyclic, channel {ch} jumped from {} to {}",
                end[ch],
                start[ch]
            );
        }
    }

    #[test]
    fn test_wheel_continuity() {
        // No channel may jump by more than 3 per unit step
        for pos in 0..255u8 {
            let a = channels(wheel(pos));
            let b = channels(wheel(pos + 1));
            for ch in 0..3 {
                assert!(
                    (a[ch] - b[ch]).abs() <= 3,
                    "discontinuity at pos {pos}, channel {ch}: {} -> {}",
                    a[ch],
                    b[ch]
                );
            }
        }
    }

    #[test]
    fn test_wheel_one_channel_dark() {
        // Away from band boundaries exactly one channel is fully off
        for pos in 0..=255u8 {
            if matches!(pos, 0 | 85 | 170 | 255) {
                continue;
            }
            let zeros = channels(wheel(pos)).iter().filter(|&&c| c == 0).count();
            assert_eq!(zeros, 1, "expected exactly one dark channel at pos {pos}");
        }
    }

    #[test]
    fn test_wheel_band_hues() {
        // Spot-check the middle of each band
        let c = wheel(42); // red-green band
        assert!(c.r() > 0 && c.g() > 0 && c.b() == 0);
        let c = wheel(127); // green-blue band
        assert!(c.r() == 0 && c.g() > 0 && c.b() > 0);
        let c = wheel(212); // blue-red band
        assert!(c.r() > 0 && c.g() == 0 && c.b() > 0);
    }
}
