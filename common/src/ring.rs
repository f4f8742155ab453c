//! LED ring renderer.
//!
//! Maps a live sensor value onto the 16-pixel ring according to the active
//! [`GaugeConfig`], in three regimes:
//!
//! 1. **In-range**: linear map from `[low, high)` to a lit-count, pixels lit
//!    from the top of the ring, colored by position against the two level
//!    boundaries. The strip is only rewritten when the lit-count changes.
//! 2. **Alarm**: at or above `high` with the alarm enabled, the ring blinks
//!    an alternating even/odd pixel pattern in `color2`, toggling every
//!    [`BLINK_INTERVAL_MS`] on the injected monotonic clock. Non-blocking:
//!    a call that lands mid-interval changes nothing.
//! 3. **Below range**: the strip is cleared once and left dark.
//!
//! Exactly at `high` the alarm regime wins when the alarm is enabled;
//! with the alarm disabled the in-range map simply clamps to full scale.
//!
//! Hardware access goes through the [`LedRing`] trait so the renderer runs
//! unchanged against the WS2812 driver, the simulator view, or a counting
//! mock in tests.

use embedded_graphics::pixelcolor::Rgb888;
use micromath::F32Ext;

use crate::colors::OFF;
use crate::gauge::GaugeConfig;

// =============================================================================
// Ring Configuration
// =============================================================================

/// Number of pixels on the ring. Fixed by the board.
pub const RING_LEDS: usize = 16;

/// Alarm blink half-period in milliseconds.
pub const BLINK_INTERVAL_MS: u64 = 150;

// =============================================================================
// LED Strip Abstraction
// =============================================================================

/// Addressable LED strip collaborator.
///
/// `set_pixel` writes the local buffer only; `show` commits the whole buffer
/// to the hardware. Brightness is a global scalar the sketch sets once at
/// startup.
pub trait LedRing {
    /// Stage a pixel color in the strip buffer.
    fn set_pixel(
        &mut self,
        index: usize,
        color: Rgb888,
    );

    /// Push the staged buffer to the hardware.
    fn show(&mut self);

    /// Set the global brightness scalar.
    fn set_brightness(
        &mut self,
        brightness: u8,
    );

    /// Stage every pixel off. Does not `show`.
    fn clear_pixels(&mut self) {
        for i in 0..RING_LEDS {
            self.set_pixel(i, OFF);
        }
    }
}

// =============================================================================
// Renderer State
// =============================================================================

/// What the strip currently shows, as far as the renderer knows.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LitState {
    /// Initial state, or the blink pattern is on the strip.
    Unknown,
    /// The strip was cleared and is dark.
    Cleared,
    /// This many pixels are lit from the top.
    Lit(usize),
}

/// Renderer-owned strip state. Mutated only by [`render`].
pub struct RingState {
    lit: LitState,
    blink_phase: bool,
    last_blink_ms: u64,
}

impl RingState {
    /// New state; the first render always writes the strip.
    pub const fn new() -> Self {
        Self {
            lit: LitState::Unknown,
            blink_phase: false,
            last_blink_ms: 0,
        }
    }

    /// Current lit state.
    pub const fn lit(&self) -> LitState { self.lit }

    /// Current blink phase (even pixels lit when `false`).
    pub const fn blink_phase(&self) -> bool { self.blink_phase }
}

impl Default for RingState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Rendering
// =============================================================================

/// Number of pixels lit for a value, by linear map and clamp.
///
/// Maps `[low, high)` onto `0..=RING_LEDS` with floor truncation, so a value
/// just under `high` lights `RING_LEDS - 1` pixels and only the clamped
/// overflow case (alarm disabled) lights the full ring.
fn lit_count(
    value: f32,
    cfg: &GaugeConfig,
) -> usize {
    let scaled = (value - cfg.low) / (cfg.high - cfg.low) * RING_LEDS as f32;
    let scaled = scaled.floor();
    if scaled <= 0.0 {
        0
    } else if scaled >= RING_LEDS as f32 {
        RING_LEDS
    } else {
        scaled as usize
    }
}

/// Color for a lit pixel at `index`, by position against the level boundaries.
const fn pixel_color(
    index: usize,
    cfg: &GaugeConfig,
) -> Rgb888 {
    if index >= cfg.level1 {
        cfg.color0
    } else if index >= cfg.level2 {
        cfg.color1
    } else {
        cfg.color2
    }
}

/// Render one sensor value onto the ring.
///
/// `now_ms` is a monotonic millisecond clock; the alarm blink is timed from
/// it independently of the poll rate. Redundant strip commits are debounced
/// through [`RingState`], so calling this every loop pass is cheap.
pub fn render<R: LedRing>(
    ring: &mut R,
    state: &mut RingState,
    cfg: &GaugeConfig,
    value: f32,
    now_ms: u64,
) {
    // Alarm regime: at or above the high stage point with the alarm enabled.
    if value >= cfg.high && cfg.alarm {
        let entering = state.lit != LitState::Unknown;
        state.lit = LitState::Unknown;

        let mut toggled = false;
        if now_ms.saturating_sub(state.last_blink_ms) >= BLINK_INTERVAL_MS {
            state.blink_phase = !state.blink_phase;
            state.last_blink_ms = now_ms;
            toggled = true;
        }

        if entering || toggled {
            for i in 0..RING_LEDS {
                let lit = (i % 2 == 0) != state.blink_phase;
                ring.set_pixel(i, if lit { cfg.color2 } else { OFF });
            }
            ring.show();
        }
        return;
    }

    // Below range: clear once, then leave the strip alone.
    if value < cfg.low {
        if state.lit != LitState::Cleared {
            ring.clear_pixels();
            ring.show();
            state.lit = LitState::Cleared;
        }
        return;
    }

    // In-range (including clamped overflow when the alarm is disabled).
    let count = lit_count(value, cfg);
    if state.lit == LitState::Lit(count) {
        return;
    }
    for i in 0..RING_LEDS {
        let color = if i < count { pixel_color(i, cfg) } else { OFF };
        ring.set_pixel(i, color);
    }
    ring.show();
    state.lit = LitState::Lit(count);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gauge::GaugeMode;

    /// Counting mock strip: records the buffer and every commit.
    struct MockRing {
        pixels: [Rgb888; RING_LEDS],
        show_count: usize,
    }

    impl MockRing {
        fn new() -> Self {
            Self {
                pixels: [OFF; RING_LEDS],
                show_count: 0,
            }
        }

        fn lit_pixels(&self) -> usize { self.pixels.iter().filter(|&&p| p != OFF).count() }
    }

    impl LedRing for MockRing {
        fn set_pixel(
            &mut self,
            index: usize,
            color: Rgb888,
        ) {
            self.pixels[index] = color;
        }

        fn show(&mut self) { self.show_count += 1; }

        fn set_brightness(
            &mut self,
            _brightness: u8,
        ) {
        }
    }

    fn tach() -> GaugeConfig { GaugeConfig::for_mode(GaugeMode::Tachometer) }

    // -------------------------------------------------------------------------
    // In-range mapping
    // -------------------------------------------------------------------------

    #[test]
    fn test_value_at_low_lights_nothing() {
        let cfg = tach();
        let mut ring = MockRing::new();
        let mut state = RingState::new();

        render(&mut ring, &mut state, &cfg, cfg.low, 0);
        assert_eq!(state.lit(), LitState::Lit(0));
        assert_eq!(ring.lit_pixels(), 0);
        assert_eq!(ring.show_count, 1, "transition from Unknown must commit once");
    }

    #[test]
    fn test_value_just_below_high_lights_all_but_one() {
        let cfg = tach();
        let mut ring = MockRing::new();
        let mut state = RingState::new();

        render(&mut ring, &mut state, &cfg, cfg.high - 1.0, 0);
        assert_eq!(state.lit(), LitState::Lit(RING_LEDS - 1));
        assert_eq!(ring.lit_pixels(), RING_LEDS - 1);
    }

    #[test]
    fn test_overflow_clamps_when_alarm_disabled() {
        let cfg = GaugeConfig::for_mode(GaugeMode::FuelLevel);
        assert!(!cfg.alarm);
        let mut ring = MockRing::new();
        let mut state = RingState::new();

        render(&mut ring, &mut state, &cfg, cfg.high + 50.0, 0);
        assert_eq!(state.lit(), LitState::Lit(RING_LEDS), "clamped to full scale");
        assert_eq!(ring.lit_pixels(), RING_LEDS);
    }

    #[test]
    fn test_value_at_high_is_full_scale_when_alarm_disabled() {
        let cfg = GaugeConfig::for_mode(GaugeMode::Ambient);
        let mut ring = MockRing::new();
        let mut state = RingState::new();

        render(&mut ring, &mut state, &cfg, cfg.high, 0);
        assert_eq!(state.lit(), LitState::Lit(RING_LEDS));
    }

    #[test]
    fn test_band_colors_by_position() {
        let cfg = tach();
        let mut ring = MockRing::new();
        let mut state = RingState::new();

        // Light the whole ring (alarm disabled variant of the same table)
        let cfg = GaugeConfig { alarm: false, ..cfg };
        render(&mut ring, &mut state, &cfg, cfg.high, 0);

        for (i, px) in ring.pixels.iter().enumerate() {
            let expected = if i >= cfg.level1 {
                cfg.color0
            } else if i >= cfg.level2 {
                cfg.color1
            } else {
                cfg.color2
            };
            assert_eq!(*px, expected, "pixel {i}");
        }
    }

    #[test]
    fn test_unchanged_lit_count_skips_commit() {
        let cfg = tach();
        let mut ring = MockRing::new();
        let mut state = RingState::new();

        // Both values land in the same lit-count bucket
        render(&mut ring, &mut state, &cfg, 1000.0, 0);
        let commits = ring.show_count;
        render(&mut ring, &mut state, &cfg, 1010.0, 20);
        assert_eq!(ring.show_count, commits, "same lit-count must not re-commit");
    }

    // -------------------------------------------------------------------------
    // Below range
    // -------------------------------------------------------------------------

    #[test]
    fn test_below_range_clears_once() {
        let cfg = GaugeConfig::for_mode(GaugeMode::Boost);
        let mut ring = MockRing::new();
        let mut state = RingState::new();

        render(&mut ring, &mut state, &cfg, cfg.low - 5.0, 0);
        assert_eq!(state.lit(), LitState::Cleared);
        assert_eq!(ring.show_count, 1);

        render(&mut ring, &mut state, &cfg, cfg.low - 6.0, 20);
        assert_eq!(ring.show_count, 1, "already-cleared strip must not be rewritten");
    }

    // -------------------------------------------------------------------------
    // Alarm regime
    // -------------------------------------------------------------------------

    #[test]
    fn test_alarm_at_exact_high_threshold() {
        let cfg = tach();
        let mut ring = MockRing::new();
        let mut state = RingState::new();

        render(&mut ring, &mut state, &cfg, cfg.high, 1000);
        assert_eq!(state.lit(), LitState::Unknown, "alarm takes over the lit state");
        assert_eq!(ring.lit_pixels(), RING_LEDS / 2, "half the pixels blink");
    }

    #[test]
    fn test_blink_respects_interval() {
        let cfg = tach();
        let mut ring = MockRing::new();
        let mut state = RingState::new();

        // First alarm call toggles (well past the zero-initialized timestamp)
        render(&mut ring, &mut state, &cfg, cfg.high + 100.0, 1000);
        let phase = state.blink_phase();
        let commits = ring.show_count;

        // 50 ms later: no state change, no commit
        render(&mut ring, &mut state, &cfg, cfg.high + 100.0, 1050);
        assert_eq!(state.blink_phase(), phase, "no toggle before 150 ms");
        assert_eq!(ring.show_count, commits);

        // 200 ms after the toggle: exactly one more toggle
        render(&mut ring, &mut state, &cfg, cfg.high + 100.0, 1200);
        assert_eq!(state.blink_phase(), !phase, "one toggle after >= 150 ms");
        assert_eq!(ring.show_count, commits + 1);
    }

    #[test]
    fn test_blink_alternates_even_odd() {
        let cfg = tach();
        let mut ring = MockRing::new();
        let mut state = RingState::new();

        render(&mut ring, &mut state, &cfg, cfg.high, 1000);
        let first: [bool; RING_LEDS] = core::array::from_fn(|i| ring.pixels[i] != OFF);

        render(&mut ring, &mut state, &cfg, cfg.high, 1200);
        for i in 0..RING_LEDS {
            assert_ne!(ring.pixels[i] != OFF, first[i], "pixel {i} should invert on toggle");
        }
    }

    #[test]
    fn test_alarm_recovery_redraws_gauge() {
        let cfg = tach();
        let mut ring = MockRing::new();
        let mut state = RingState::new();

        render(&mut ring, &mut state, &cfg, cfg.high, 1000);
        assert_eq!(state.lit(), LitState::Unknown);

        // Back in range: the gauge pattern replaces the blink pattern
        render(&mut ring, &mut state, &cfg, 3000.0, 1100);
        assert!(matches!(state.lit(), LitState::Lit(_)));
    }
}
