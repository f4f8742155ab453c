//! Common types and logic for the OBD-II LED ring gauge.
//!
//! This crate contains the platform-agnostic code shared between the
//! desktop simulator and hardware sketches:
//!
//! - [`colors`]: RGB color constants for the LED ring
//! - [`wheel`]: hue wheel mapper and rainbow sweep
//! - [`gauge`]: gauge modes and per-mode calibration tables
//! - [`ring`]: LED ring renderer with alarm blink regime
//! - [`readout`]: rate-limited OLED numeric readout
//! - [`pids`]: OBD-II PID definitions, ECU trait, unit conversions
//! - [`controller`]: mode cycling and per-iteration dispatch
//! - [`diag`]: status message ring buffer (no time dependencies)
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` compatible and can be used on embedded targets.
//! Hardware collaborators (CAN/ECU transport, LED strip driver, display,
//! light sensor) are consumed through traits; time enters as a monotonic
//! millisecond value passed into every time-dependent call, so there is no
//! dependency on `std::time` or platform clocks.

#![no_std]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod colors;
pub mod controller;
pub mod diag;
pub mod gauge;
pub mod pids;
pub mod readout;
pub mod ring;
pub mod wheel;

// Re-export commonly used items
pub use controller::{ModeController, StepOutcome, StepResult};
pub use gauge::{GaugeConfig, GaugeMode};
pub use pids::{Ecu, LightSensor, Pid, RetryPolicy, init_ecu};
pub use readout::Readout;
pub use ring::{LedRing, LitState, RING_LEDS, RingState};
