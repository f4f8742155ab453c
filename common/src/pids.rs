//! OBD-II PID definitions, the ECU collaborator trait, unit conversions,
//! and CAN startup.
//!
//! The CAN transport and PID request/response framing live in the board
//! support library; this module only names the PIDs the gauges use and the
//! seam they are read through. A query either yields a scaled reading or
//! `None` for no data / request failed.

use crate::diag::StatusLog;

// =============================================================================
// PIDs
// =============================================================================

/// OBD-II service 01 parameters queried by the gauges.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Pid {
    /// Engine RPM.
    EngineRpm,
    /// Vehicle speed, m/s as scaled by the ECU library.
    VehicleSpeed,
    /// Mass air flow, g/s.
    MassAirFlow,
    /// Intake manifold absolute pressure, kPa.
    ManifoldPressure,
    /// Barometric pressure, kPa.
    BarometricPressure,
    /// Fuel tank level, percent.
    FuelLevel,
    /// Engine coolant temperature, Celsius.
    CoolantTemp,
    /// Ambient air temperature, Celsius.
    AmbientTemp,
}

impl Pid {
    /// The standardized service-01 PID code.
    pub const fn code(self) -> u8 {
        match self {
            Self::EngineRpm => 0x0C,
            Self::VehicleSpeed => 0x0D,
            Self::MassAirFlow => 0x10,
            Self::ManifoldPressure => 0x0B,
            Self::BarometricPressure => 0x33,
            Self::FuelLevel => 0x2F,
            Self::CoolantTemp => 0x05,
            Self::AmbientTemp => 0x46,
        }
    }
}

// =============================================================================
// Collaborator Traits
// =============================================================================

/// ECU query collaborator over the CAN bus.
pub trait Ecu {
    /// Bring up the CAN controller. Returns whether init succeeded.
    fn init(&mut self) -> bool;

    /// Request one PID. `None` means no data / request failed; the failure
    /// is local to this query and carries no state into later ones.
    fn query(
        &mut self,
        pid: Pid,
    ) -> Option<f32>;
}

/// Onboard I2C light sensor collaborator.
pub trait LightSensor {
    /// Current illuminance in lux, or `None` when the sensor is unavailable.
    fn read_lux(&mut self) -> Option<f32>;
}

// =============================================================================
// Unit Conversions
// =============================================================================

/// Meters per second to miles per hour.
pub const MS_TO_MPH: f32 = 2.23694;

/// Kilopascal to pounds per square inch.
pub const KPA_TO_PSI: f32 = 0.145038;

/// Stoichiometric air-fuel ratio for gasoline (14.7:1).
pub const AFR_STOICH: f32 = 14.7;

/// Grams of gasoline per US gallon (6.17 lb/gal).
pub const GASOLINE_G_PER_GAL: f32 = 2801.0;

/// Convert a speed reading from m/s to mph.
pub fn ms_to_mph(ms: f32) -> f32 { ms * MS_TO_MPH }

/// Convert Celsius to Fahrenheit.
pub fn celsius_to_fahrenheit(c: f32) -> f32 { c * 9.0 / 5.0 + 32.0 }

/// Convert a (possibly negative, differential) pressure from kPa to PSI.
pub fn kpa_to_psi(kpa: f32) -> f32 { kpa * KPA_TO_PSI }

/// Instantaneous fuel economy from speed and mass air flow.
///
/// MAF fixes the fuel mass rate through the stoichiometric ratio; dividing
/// distance rate by the implied gallons-per-hour yields miles per gallon.
/// `None` for a non-positive air flow (engine off / decel fuel cut), where
/// the quotient is meaningless.
pub fn instant_mpg(
    speed_mph: f32,
    maf_g_per_s: f32,
) -> Option<f32> {
    if maf_g_per_s <= 0.0 {
        return None;
    }
    let gallons_per_hour = maf_g_per_s * 3600.0 / (AFR_STOICH * GASOLINE_G_PER_GAL);
    Some(speed_mph / gallons_per_hour)
}

// =============================================================================
// CAN Startup
// =============================================================================

/// Delay between CAN init attempts.
pub const INIT_RETRY_MS: u32 = 5000;

/// How long to keep retrying CAN bus initialization.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RetryPolicy {
    /// Retry every [`INIT_RETRY_MS`] forever; the gauge is useless without
    /// the bus, so on hardware this is the default.
    Forever,
    /// Give up after this many attempts.
    Attempts(u32),
}

/// Initialize the ECU link, retrying per `policy` with a status message per
/// attempt. `sleep_ms` is injected so tests (and the simulator) control the
/// backoff.
pub fn init_ecu<E, S>(
    ecu: &mut E,
    policy: RetryPolicy,
    mut sleep_ms: S,
    log: &mut StatusLog,
) -> bool
where
    E: Ecu,
    S: FnMut(u32),
{
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        if ecu.init() {
            log.push("CAN bus ready");
            return true;
        }
        log.push("CAN init failed, retrying in 5s");

        if let RetryPolicy::Attempts(max) = policy
            && attempt >= max
        {
            log.push("CAN init giving up");
            return false;
        }
        sleep_ms(INIT_RETRY_MS);
    }
}

// =============================================================================
// Tests
// =============================================================================
