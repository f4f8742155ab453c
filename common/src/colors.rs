//! Color constants for the LED ring.
//!
//! # Why `Rgb888`
//!
//! The ring is a WS2812-class addressable strip that takes one full byte per
//! channel, so colors are kept in `Rgb888` end to end. The `embedded_graphics`
//! crate provides pre-defined constants through the `RgbColor` trait; using
//! these instead of manually constructing `Rgb888::new(r, g, b)` ensures
//! optimal values and improves code clarity. Sketch code that targets an
//! RGB565 panel (like the simulator) converts at the edge with
//! `Rgb565::from(..)`.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait - guaranteed full-scale values)
// =============================================================================

/// All channels off. Used for unlit ring pixels.
pub const OFF: Rgb888 = Rgb888::BLACK;

/// Pure red (255, 0, 0). Top-of-range segment for tach/speed/boost/coolant.
pub const RED: Rgb888 = Rgb888::RED;

/// Pure green (0, 255, 0). Healthy-range segment.
pub const GREEN: Rgb888 = Rgb888::GREEN;

/// Pure blue (0, 0, 255). Cold/vacuum segment for coolant, ambient and boost.
pub const BLUE: Rgb888 = Rgb888::BLUE;

/// Pure yellow (255, 255, 0). Mid-range warning segment.
pub const YELLOW: Rgb888 = Rgb888::YELLOW;

/// Pure white (255, 255, 255). Top segment of the lux gauge.
pub const WHITE: Rgb888 = Rgb888::WHITE;

/// Pure cyan (0, 255, 255). Mid segment of the lux gauge.
pub const CYAN: Rgb888 = Rgb888::CYAN;
