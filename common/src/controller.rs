//! Mode controller: button-driven gauge cycling and per-iteration dispatch.
//!
//! One [`step`] call is one pass of the polling loop: sample the button,
//! query whatever the current mode needs, convert units, and hand the value
//! to the readout and the ring renderer. A failed query shows the static
//! "No Data" message and leaves the strip untouched for that pass; mode
//! state is unaffected and the next pass retries.
//!
//! The button edge detector is a one-sample debounce: a press registers on
//! the first pass that sees the pressed level and cannot repeat until a
//! released sample is seen. Callers translate the active-low pin level
//! before passing it in.
//!
//! [`step`]: ModeController::step

use embedded_graphics::draw_target::DrawTarget;

use crate::gauge::{GaugeConfig, GaugeMode};
use crate::pids::{Ecu, LightSensor, Pid, celsius_to_fahrenheit, instant_mpg, kpa_to_psi, ms_to_mph};
use crate::readout::Readout;
use crate::ring::{self, LedRing, RingState};

// =============================================================================
// Step Outcome
// =============================================================================

/// What one loop pass did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StepOutcome {
    /// A reading was obtained and the gauge was rendered.
    Rendered,
    /// The query came back empty; "No Data" is on the screen.
    NoData,
}

/// Outcome of one pass plus the delay the sketch should insert before the
/// next one (only the lux gauge asks for one).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct StepResult {
    /// What happened this pass.
    pub outcome: StepOutcome,
    /// Requested post-pass delay in milliseconds.
    pub pace_ms: u64,
}

// =============================================================================
// Mode Controller
// =============================================================================

/// State machine over the 8 gauge modes.
pub struct ModeController {
    mode: GaugeMode,
    button_was_pressed: bool,
}

impl ModeController {
    /// Start on the tachometer, button released.
    pub const fn new() -> Self {
        Self {
            mode: GaugeMode::Tachometer,
            button_was_pressed: false,
        }
    }

    /// The currently selected gauge mode.
    pub const fn mode(&self) -> GaugeMode { self.mode }

    /// Sample the button and advance the mode on a press edge.
    ///
    /// Returns whether the mode changed this pass.
    pub fn poll_button(
        &mut self,
        pressed: bool,
    ) -> bool {
        let edge = pressed && !self.button_was_pressed;
        self.button_was_pressed = pressed;
        if edge {
            self.mode = self.mode.next();
        }
        edge
    }

    /// Query and convert the metric for `mode`.
    fn sample<E, L>(
        mode: GaugeMode,
        ecu: &mut E,
        light: &mut L,
    ) -> Option<f32>
    where
        E: Ecu,
        L: LightSensor,
    {
        match mode {
            GaugeMode::Tachometer => ecu.query(Pid::EngineRpm),
            GaugeMode::Speed => ecu.query(Pid::VehicleSpeed).map(ms_to_mph),
            GaugeMode::InstantMpg => {
                let mph = ms_to_mph(ecu.query(Pid::VehicleSpeed)?);
                let maf = ecu.query(Pid::MassAirFlow)?;
                instant_mpg(mph, maf)
            }
            GaugeMode::Boost => {
                let map = ecu.query(Pid::ManifoldPressure)?;
                let baro = ecu.query(Pid::BarometricPressure)?;
                Some(kpa_to_psi(map - baro))
            }
            GaugeMode::FuelLevel => ecu.query(Pid::FuelLevel),
            GaugeMode::Coolant => ecu.query(Pid::CoolantTemp).map(celsius_to_fahrenheit),
            GaugeMode::Ambient => ecu.query(Pid::AmbientTemp).map(celsius_to_fahrenheit),
            GaugeMode::Lux => light.read_lux(),
        }
    }

    /// Run one pass of the polling loop.
    #[allow(clippy::too_many_arguments)] // one collaborator per hardware seam
    pub fn step<E, L, D, R>(
        &mut self,
        ecu: &mut E,
        light: &mut L,
        display: &mut D,
        readout: &mut Readout<D::Color>,
        ring: &mut R,
        ring_state: &mut RingState,
        button_pressed: bool,
        now_ms: u64,
    ) -> StepResult
    where
        E: Ecu,
        L: LightSensor,
        D: DrawTarget,
        R: LedRing,
    {
        if self.poll_button(button_pressed) {
            // New gauge: the anti-flicker memories belong to the old one.
            readout.reset();
            *ring_state = RingState::new();
        }

        let mode = self.mode;
        let pace_ms = mode.pace_ms();

        let Some(value) = Self::sample(mode, ecu, light) else {
            readout.show_no_data(display);
            return StepResult {
                outcome: StepOutcome::NoData,
                pace_ms,
            };
        };

        let cfg = GaugeConfig::for_mode(mode);
        readout.update(display, value, mode.precision(), mode.label(), now_ms);
        ring::render(ring, ring_state, &cfg, value, now_ms);

        StepResult {
            outcome: StepOutcome::Rendered,
            pace_ms,
        }
    }
}

impl Default for ModeController {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================
