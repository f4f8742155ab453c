// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

//! Desktop simulator for the OBD-II LED ring gauge.
//!
//! Runs the full gauge stack from `gaugering-common` against simulated
//! hardware: the OLED readout occupies the top slice of the window and the
//! 16-pixel NeoPixel ring is drawn as circles below it. Startup mirrors the
//! hardware sketch - CAN init with retry (the simulated bus fails twice),
//! then a rainbow sweep on the ring - before dropping into the polling loop.
//!
//! # Controls
//!
//! | Key | Action |
//! |-----|--------|
//! | `B` | Mode button (hold = pressed; press edge cycles the 8 gauges) |
//! | `N` | Toggle an ECU dropout (every query returns no data) |
//!
//! Key repeat is ignored so holding `B` advances exactly one mode.

mod ecu;
mod oled;
mod ring_view;

use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use gaugering_common::diag::StatusLog;
use gaugering_common::pids::{RetryPolicy, init_ecu};
use gaugering_common::wheel::rainbow;
use gaugering_common::{LedRing, ModeController, Readout, RingState};

use crate::ecu::{SimEcu, SimLight};
use crate::oled::{OLED_HEIGHT, OLED_WIDTH};
use crate::ring_view::RingView;

const SCREEN_WIDTH: u32 = 128;
const SCREEN_HEIGHT: u32 = 152;

/// Polling loop pace (~50 Hz), matching the hardware sketch.
const FRAME_TIME: Duration = Duration::from_millis(20);

/// Ring placement below the OLED slice.
const RING_CENTER: Point = Point::new(64, 108);
const RING_RADIUS: u32 = 34;

/// Global strip brightness, set once at startup.
const RING_BRIGHTNESS: u8 = 160;

fn main() {
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(3).build();
    let mut window = Window::new("OBD Gauge Ring", &output_settings);

    display.clear(Rgb565::BLACK).ok();
    oled::draw_bezel(&mut display).ok();
    window.update(&display);

    // Simulated bus refuses to come up twice to exercise the retry path.
    // The 5 s backoff is compressed so startup stays snappy on the desktop.
    let mut sim_ecu = SimEcu::new(2);
    let mut log = StatusLog::new();
    init_ecu(
        &mut sim_ecu,
        RetryPolicy::Forever,
        |ms| thread::sleep(Duration::from_millis(u64::from(ms) / 25)),
        &mut log,
    );
    for line in log.iter() {
        println!("{line}");
    }

    let mut ring = RingView::new(RING_CENTER, RING_RADIUS);
    ring.set_brightness(RING_BRIGHTNESS);

    if !run_rainbow_sweep(&mut ring, &mut display, &mut window) {
        return;
    }

    let mut light = SimLight::new();
    let mut controller = ModeController::new();
    let mut readout = Readout::new(Rgb565::WHITE, Rgb565::BLACK, OLED_WIDTH, OLED_HEIGHT);
    let mut ring_state = RingState::new();

    let started = Instant::now();
    let mut button_pressed = false;
    let mut dropout = false;

    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, repeat: false, .. } => match keycode {
                    Keycode::B => button_pressed = true,
                    Keycode::N => {
                        dropout = !dropout;
                        sim_ecu.set_dropout(dropout);
                        println!("ECU dropout {}", if dropout { "on" } else { "off" });
                    }
                    _ => {}
                },
                SimulatorEvent::KeyUp { keycode: Keycode::B, .. } => button_pressed = false,
                _ => {}
            }
        }

        sim_ecu.tick();
        light.tick();
        let now_ms = started.elapsed().as_millis() as u64;

        let result = {
            let mut panel = display.clipped(&oled::area());
            controller.step(
                &mut sim_ecu,
                &mut light,
                &mut panel,
                &mut readout,
                &mut ring,
                &mut ring_state,
                button_pressed,
                now_ms,
            )
        };
        ring.draw(&mut display).ok();
        window.update(&display);

        // Only the lux gauge asks for a pace delay; everyone else just
        // tops the frame up to the poll rate.
        if result.pace_ms > 0 {
            thread::sleep(Duration::from_millis(result.pace_ms));
        } else {
            let elapsed = frame_start.elapsed();
            if elapsed < FRAME_TIME {
                thread::sleep(FRAME_TIME - elapsed);
            }
        }
    }
}

/// Boot animation: spin the hue wheel around the ring for a moment.
///
/// Returns `false` if the window was closed during the sweep.
fn run_rainbow_sweep(
    ring: &mut RingView,
    display: &mut SimulatorDisplay<Rgb565>,
    window: &mut Window,
) -> bool {
    for offset in (0..=255u16).step_by(4) {
        rainbow(ring, offset as u8);
        ring.draw(display).ok();
        window.update(display);
        for event in window.events() {
            if matches!(event, SimulatorEvent::Quit) {
                return false;
            }
        }
        thread::sleep(FRAME_TIME);
    }
    true
}
