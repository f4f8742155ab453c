//! Rate-limited numeric readout for the OLED.
//!
//! One label line plus a large centered value, drawn through any
//! [`DrawTarget`] so the same code serves the SSD1306-class hardware panel
//! and the simulator viewport.
//!
//! # Anti-flicker
//!
//! Two guards keep the panel calm:
//! - a value identical to the last drawn one is skipped entirely. This is an
//!   **exact** float comparison on purpose: the collaborator hands back
//!   already-quantized readings, and a tolerance here would hide real
//!   single-step changes.
//! - actual redraws are limited to one per [`REDRAW_INTERVAL_MS`]. A change
//!   arriving inside the window is deferred, and whatever value is current
//!   when the window reopens is what gets drawn.
//!
//! Formatting uses `heapless::String` + `core::fmt::Write`; no heap, no
//! `format!`.

use core::fmt::Write;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use heapless::String;
use profont::{PROFONT_10_POINT, PROFONT_24_POINT};

// =============================================================================
// Readout Configuration
// =============================================================================

/// Minimum interval between screen redraws.
pub const REDRAW_INTERVAL_MS: u64 = 100;

/// Label line font.
const LABEL_FONT: &MonoFont = &PROFONT_10_POINT;

/// Value line font.
const VALUE_FONT: &MonoFont = &PROFONT_24_POINT;

/// Max formatted value length ("-12345.6" style readings fit easily).
const VALUE_LEN: usize = 12;

// =============================================================================
// Readout State
// =============================================================================

/// Display updater state. One instance owns the whole readout area.
pub struct Readout<C: PixelColor> {
    fg: C,
    bg: C,
    width: u32,
    height: u32,
    last_value: Option<f32>,
    last_draw_ms: Option<u64>,
    no_data_shown: bool,
}

impl<C: PixelColor> Readout<C> {
    /// New readout covering a `width` x `height` area from the origin.
    pub const fn new(
        fg: C,
        bg: C,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            fg,
            bg,
            width,
            height,
            last_value: None,
            last_draw_ms: None,
            no_data_shown: false,
        }
    }

    /// The most recently drawn value, if any.
    pub const fn last_value(&self) -> Option<f32> { self.last_value }

    /// Forget the drawn state so the next call redraws immediately.
    ///
    /// Called on a gauge mode switch: the anti-flicker guards compare
    /// against the previous mode otherwise, and a coincidentally equal
    /// value would leave the old label on screen.
    pub fn reset(&mut self) {
        self.last_value = None;
        self.last_draw_ms = None;
        self.no_data_shown = false;
    }

    /// Show a value with its label. Returns whether the screen was redrawn.
    pub fn update<D>(
        &mut self,
        display: &mut D,
        value: f32,
        precision: usize,
        label: &str,
        now_ms: u64,
    ) -> bool
    where
        D: DrawTarget<Color = C>,
    {
        // Exact equality on purpose, see module docs.
        if self.last_value == Some(value) {
            return false;
        }
        if let Some(last) = self.last_draw_ms
            && now_ms.saturating_sub(last) < REDRAW_INTERVAL_MS
        {
            // Deferred: last_value stays stale so the next call retries.
            return false;
        }

        let mut text: String<VALUE_LEN> = String::new();
        let _ = write!(text, "{value:.precision$}");
        self.draw_lines(display, label, &text);

        self.last_value = Some(value);
        self.last_draw_ms = Some(now_ms);
        self.no_data_shown = false;
        true
    }

    /// Show the static "No Data" message for a failed sensor read.
    ///
    /// Idempotent across consecutive calls; any successful [`update`]
    /// afterwards redraws unconditionally.
    ///
    /// [`update`]: Self::update
    pub fn show_no_data<D>(
        &mut self,
        display: &mut D,
    ) -> bool
    where
        D: DrawTarget<Color = C>,
    {
        if self.no_data_shown {
            return false;
        }
        self.draw_lines(display, "", "No Data");
        self.last_value = None;
        self.no_data_shown = true;
        true
    }

    /// Clear the area and draw the label and value lines, both centered
    /// from their rendered pixel width.
    fn draw_lines<D>(
        &self,
        display: &mut D,
        label: &str,
        value: &str,
    ) where
        D: DrawTarget<Color = C>,
    {
        Rectangle::new(Point::zero(), Size::new(self.width, self.height))
            .into_styled(PrimitiveStyle::with_fill(self.bg))
            .draw(display)
            .ok();

        if !label.is_empty() {
            let style = MonoTextStyle::new(LABEL_FONT, self.fg);
            let x = self.centered_x(label, LABEL_FONT);
            let y = LABEL_FONT.character_size.height as i32;
            Text::new(label, Point::new(x, y), style).draw(display).ok();
        }

        let style = MonoTextStyle::new(VALUE_FONT, self.fg);
        let x = self.centered_x(value, VALUE_FONT);
        let y = self.height as i32 - 8;
        Text::new(value, Point::new(x, y), style).draw(display).ok();
    }

    /// Left edge that centers `text` in the readout area.
    fn centered_x(
        &self,
        text: &str,
        font: &MonoFont,
    ) -> i32 {
        let glyph = font.character_size.width + font.character_spacing;
        let text_width = text.len() as u32 * glyph;
        (self.width as i32 - text_width as i32) / 2
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::pixelcolor::BinaryColor;

    use super::*;

    fn display() -> MockDisplay<BinaryColor> {
        let mut d = MockDisplay::new();
        // The readout repaints its background; overdraw is expected.
        d.set_allow_overdraw(true);
        d.set_allow_out_of_bounds_drawing(true);
        d
    }

    fn readout() -> Readout<BinaryColor> { Readout::new(BinaryColor::On, BinaryColor::Off, 64, 64) }

    #[test]
    fn test_identical_value_skips_redraw() {
        let mut d = display();
        let mut r = readout();

        assert!(r.update(&mut d, 42.0, 0, "RPM", 0), "first value must draw");
        assert!(!r.update(&mut d, 42.0, 0, "RPM", 500), "unchanged value must not");
        assert!(!r.update(&mut d, 42.0, 0, "RPM", 10_000));
    }

    #[test]
    fn test_rate_limit_defers_to_latest_value() {
        let mut d = display();
        let mut r = readout();

        assert!(r.update(&mut d, 1.0, 0, "MPH", 0));
        // Changed inside the 100 ms window: deferred
        assert!(!r.update(&mut d, 2.0, 0, "MPH", 50));
        // Window reopens: the value current *now* is drawn
        assert!(r.update(&mut d, 3.0, 0, "MPH", 120));
        assert_eq!(r.last_value(), Some(3.0));
        // And it sticks, proving 2.0 was never recorded
        assert!(!r.update(&mut d, 3.0, 0, "MPH", 240));
    }

    #[test]
    fn test_exact_equality_passes_tiny_changes() {
        let mut d = display();
        let mut r = readout();

        assert!(r.update(&mut d, 14.7, 1, "AFR", 0));
        assert!(
            r.update(&mut d, 14.700001, 1, "AFR", 200),
            "any bit-level change is a change"
        );
    }

    #[test]
    fn test_no_data_is_idempotent() {
        let mut d = display();
        let mut r = readout();

        assert!(r.show_no_data(&mut d), "first No Data must draw");
        assert!(!r.show_no_data(&mut d), "repeat No Data must not");

        // A real value afterwards redraws, then No Data draws again
        assert!(r.update(&mut d, 60.0, 0, "MPH", 1000));
        assert!(r.show_no_data(&mut d));
    }

    #[test]
    fn test_no_data_resets_value_memory() {
        let mut d = display();
        let mut r = readout();

        assert!(r.update(&mut d, 55.0, 0, "MPH", 0));
        r.show_no_data(&mut d);
        // Same value as before the outage still redraws
        assert!(r.update(&mut d, 55.0, 0, "MPH", 5000));
    }
}
