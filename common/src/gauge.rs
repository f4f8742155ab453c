//! Gauge modes and per-mode calibration tables.
//!
//! A gauge mode selects which metric is shown, how its value maps onto the
//! ring, and how the readout formats it. The calibration tables are literal
//! constants validated at compile time; changing a threshold out of order
//! fails the build with a clear error.
//!
//! # Ring mapping recap
//!
//! `low`/`high` are the stage points delimiting the lit range. Pixels at or
//! above `level1` light in `color0`, pixels between `level2` and `level1`
//! light in `color1`, pixels below `level2` light in `color2`. When `alarm`
//! is set, values at or above `high` switch the ring into the blink regime
//! instead of pegging full scale (see [`crate::ring`]).

use embedded_graphics::pixelcolor::Rgb888;

use crate::colors::{BLUE, CYAN, GREEN, RED, WHITE, YELLOW};
use crate::ring::RING_LEDS;

// =============================================================================
// Gauge Mode
// =============================================================================

/// The 8 selectable gauge presentations, cycled by the mode button.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GaugeMode {
    /// Engine RPM with redline alarm.
    Tachometer,
    /// Vehicle speed in mph.
    Speed,
    /// Instantaneous fuel economy derived from speed and mass air flow.
    InstantMpg,
    /// Boost/vacuum in PSI relative to barometric pressure.
    Boost,
    /// Fuel tank level in percent.
    FuelLevel,
    /// Engine coolant temperature in Fahrenheit.
    Coolant,
    /// Ambient air temperature in Fahrenheit.
    Ambient,
    /// Cabin light level from the onboard light sensor.
    Lux,
}

impl GaugeMode {
    /// Number of gauge modes the button cycles through.
    pub const COUNT: usize = 8;

    /// The next mode in button-press order, wrapping after [`GaugeMode::Lux`].
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Tachometer => Self::Speed,
            Self::Speed => Self::InstantMpg,
            Self::InstantMpg => Self::Boost,
            Self::Boost => Self::FuelLevel,
            Self::FuelLevel => Self::Coolant,
            Self::Coolant => Self::Ambient,
            Self::Ambient => Self::Lux,
            Self::Lux => Self::Tachometer,
        }
    }

    /// Label line shown above the readout value.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tachometer => "RPM",
            Self::Speed => "MPH",
            Self::InstantMpg => "MPG",
            Self::Boost => "BOOST PSI",
            Self::FuelLevel => "FUEL %",
            Self::Coolant => "COOLANT F",
            Self::Ambient => "AMBIENT F",
            Self::Lux => "LUX",
        }
    }

    /// Decimal places for the readout value.
    pub const fn precision(self) -> usize {
        match self {
            Self::InstantMpg | Self::Boost => 1,
            _ => 0,
        }
    }

    /// Extra loop delay requested after rendering this mode.
    ///
    /// The light sensor settles slowly, so the lux gauge polls at 1 Hz while
    /// every other mode is delay-free polling.
    pub const fn pace_ms(self) -> u64 {
        match self {
            Self::Lux => 1000,
            _ => 0,
        }
    }
}

// =============================================================================
// Gauge Config
// =============================================================================

/// Fully populated configuration for the active gauge mode.
///
/// Overwritten wholesale on every loop pass before rendering; nothing
/// persists across mode switches.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GaugeConfig {
    /// Bottom stage point. Values below it clear the ring.
    pub low: f32,
    /// Top stage point. Values at or above it either peg the ring full scale
    /// or trigger the alarm blink, depending on `alarm`.
    pub high: f32,
    /// Pixel index at or above which lit pixels use `color0`.
    pub level1: usize,
    /// Pixel index at or above which lit pixels use `color1` (below `level1`).
    pub level2: usize,
    /// Color of the top pixel band.
    pub color0: Rgb888,
    /// Color of the middle pixel band.
    pub color1: Rgb888,
    /// Color of the bottom pixel band; also the alarm blink color.
    pub color2: Rgb888,
    /// Whether values at or above `high` blink the ring instead of pegging it.
    pub alarm: bool,
}

impl GaugeConfig {
    /// Calibration table for a gauge mode.
    ///
    /// These are the tuned per-mode constants; tests enumerate all eight, and
    /// `const` assertions below verify boundary ordering at compile time.
    #[must_use]
    pub const fn for_mode(mode: GaugeMode) -> Self {
        match mode {
            // Redline at 6500 RPM: green base, yellow from pixel 8, red from 12.
            GaugeMode::Tachometer => Self {
                low: 0.0,
                high: 6500.0,
                level1: 12,
                level2: 8,
                color0: RED,
                color1: YELLOW,
                color2: GREEN,
                alarm: true,
            },
            // Overspeed warning at 80 mph.
            GaugeMode::Speed => Self {
                low: 0.0,
                high: 80.0,
                level1: 12,
                level2: 8,
                color0: RED,
                color1: YELLOW,
                color2: GREEN,
                alarm: true,
            },
            // Economy gauge: more pixels is better, so the bottom band is red.
            GaugeMode::InstantMpg => Self {
                low: 0.0,
                high: 40.0,
                level1: 10,
                level2: 5,
                color0: GREEN,
                color1: YELLOW,
                color2: RED,
                alarm: false,
            },
            // Differential pressure: negative low covers vacuum, alarm is
            // overboost at 15 PSI.
            GaugeMode::Boost => Self {
                low: -12.0,
                high: 15.0,
                level1: 12,
                level2: 6,
                color0: RED,
                color1: YELLOW,
                color2: BLUE,
                alarm: true,
            },
            // Low-tank pixels are red so a nearly empty ring reads as urgent.
            GaugeMode::FuelLevel => Self {
                low: 0.0,
                high: 100.0,
                level1: 8,
                level2: 4,
                color0: GREEN,
                color1: YELLOW,
                color2: RED,
                alarm: false,
            },
            // Overheat alarm at 240F; blue pixels while warming up.
            GaugeMode::Coolant => Self {
                low: 120.0,
                high: 240.0,
                level1: 13,
                level2: 4,
                color0: RED,
                color1: GREEN,
                color2: BLUE,
                alarm: true,
            },
            GaugeMode::Ambient => Self {
                low: 0.0,
                high: 100.0,
                level1: 11,
                level2: 5,
                color0: RED,
                color1: GREEN,
                color2: BLUE,
                alarm: false,
            },
            GaugeMode::Lux => Self {
                low: 0.0,
                high: 1000.0,
                level1: 12,
                level2: 6,
                color0: WHITE,
                color1: CYAN,
                color2: BLUE,
                alarm: false,
            },
        }
    }
}

// =============================================================================
// Compile-Time Validation
// =============================================================================
//
// Invariant per mode: level1 >= level2, level1 within the ring, low < high
// (the boost gauge's negative low still satisfies low < high).

const fn validate(cfg: &GaugeConfig) {
    assert!(cfg.level2 <= cfg.level1);
    assert!(cfg.level1 <= RING_LEDS - 1);
    assert!(cfg.low < cfg.high);
}

const _: () = validate(&GaugeConfig::for_mode(GaugeMode::Tachometer));
const _: () = validate(&GaugeConfig::for_mode(GaugeMode::Speed));
const _: () = validate(&GaugeConfig::for_mode(GaugeMode::InstantMpg));
const _: () = validate(&GaugeConfig::for_mode(GaugeMode::Boost));
const _: () = validate(&GaugeConfig::for_mode(GaugeMode::FuelLevel));
const _: () = validate(&GaugeConfig::for_mode(GaugeMode::Coolant));
const _: () = validate(&GaugeConfig::for_mode(GaugeMode::Ambient));
const _: () = validate(&GaugeConfig::for_mode(GaugeMode::Lux));

// =============================================================================
// Tests
// =============================================================================
