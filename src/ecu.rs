//! Simulated ECU and light sensor.
//!
//! Stands in for the CAN transceiver and the I2C lux sensor so the whole
//! gauge stack runs on the desktop. Readings are triangle waves with
//! per-PID ranges and periods, which exercises every band of every gauge
//! including the alarm regimes. Init failures and a full "no data" dropout
//! are scriptable from the keyboard.

use gaugering_common::pids::{Ecu, LightSensor, Pid};

/// Simulated ECU link. Advance with [`tick`] once per frame.
///
/// [`tick`]: SimEcu::tick
pub struct SimEcu {
    init_failures_left: u32,
    dropout: bool,
    frame: u32,
}

impl SimEcu {
    /// New simulated ECU that fails CAN init `init_failures` times first,
    /// to exercise the startup retry path.
    pub const fn new(init_failures: u32) -> Self {
        Self {
            init_failures_left: init_failures,
            dropout: false,
            frame: 0,
        }
    }

    /// Advance the simulation by one frame.
    pub fn tick(&mut self) { self.frame = self.frame.wrapping_add(1); }

    /// Force every query to return no data (key `N` in the simulator).
    pub fn set_dropout(
        &mut self,
        dropout: bool,
    ) {
        self.dropout = dropout;
    }

    /// Triangle wave over `[lo, hi]` with the given period in frames.
    fn sweep(
        &self,
        lo: f32,
        hi: f32,
        period: u32,
    ) -> f32 {
        let phase = (self.frame % period) as f32 / period as f32;
        let ramp = if phase < 0.5 { phase * 2.0 } else { 2.0 - phase * 2.0 };
        lo + (hi - lo) * ramp
    }
}

impl Ecu for SimEcu {
    fn init(&mut self) -> bool {
        if self.init_failures_left > 0 {
            self.init_failures_left -= 1;
            false
        } else {
            true
        }
    }

    fn query(&mut self, pid: Pid) -> Option<f32> {
        if self.dropout {
            return None;
        }
        // Ranges deliberately overshoot the calibration tables so the clamp
        // and alarm paths get hit during a sweep.
        Some(match pid {
            Pid::EngineRpm => self.sweep(800.0, 7000.0, 500),
            Pid::VehicleSpeed => self.sweep(0.0, 40.0, 700), // m/s, tops ~89 mph
            Pid::MassAirFlow => self.sweep(2.0, 110.0, 500),
            Pid::ManifoldPressure => self.sweep(35.0, 220.0, 400),
            Pid::BarometricPressure => 101.3,
            Pid::FuelLevel => self.sweep(0.0, 100.0, 1500),
            Pid::CoolantTemp => self.sweep(15.0, 125.0, 1200),
            Pid::AmbientTemp => self.sweep(-5.0, 40.0, 2000),
        })
    }
}

/// Simulated cabin light sensor.
pub struct SimLight {
    frame: u32,
}

impl SimLight {
    pub const fn new() -> Self { Self { frame: 0 } }

    /// Advance the simulation by one frame.
    pub fn tick(&mut self) { self.frame = self.frame.wrapping_add(1); }
}

impl LightSensor for SimLight {
    fn read_lux(&mut self) -> Option<f32> {
        let period = 900;
        let phase = (self.frame % period) as f32 / period as f32;
        let ramp = if phase < 0.5 { phase * 2.0 } else { 2.0 - phase * 2.0 };
        Some(1200.0 * ramp)
    }
}
