//! On-screen stand-in for the NeoPixel ring.
//!
//! Implements [`LedRing`] over a local pixel buffer; `show` marks the buffer
//! dirty and [`draw`] renders the 16 pixels as filled circles arranged in a
//! ring, pixel 0 at the top, indices running clockwise. Brightness scales
//! each channel the way the strip driver would.
//!
//! [`draw`]: RingView::draw

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};
use gaugering_common::ring::{LedRing, RING_LEDS};

/// Diameter of one drawn pixel.
const PIXEL_DIA: u32 = 11;

/// Outline color for unlit pixels, so the ring stays visible when dark.
const SOCKET: Rgb565 = Rgb565::new(6, 12, 6);

pub struct RingView {
    center: Point,
    radius: f32,
    pixels: [Rgb888; RING_LEDS],
    brightness: u8,
    dirty: bool,
}

impl RingView {
    /// Ring of circles around `center` at `radius` pixels.
    pub fn new(
        center: Point,
        radius: u32,
    ) -> Self {
        Self {
            center,
            radius: radius as f32,
            pixels: [Rgb888::BLACK; RING_LEDS],
            brightness: 255,
            // Dirty so the sockets render before the first show
            dirty: true,
        }
    }

    /// Screen position of ring pixel `index` (0 = top, clockwise).
    fn position(
        &self,
        index: usize,
    ) -> Point {
        let angle = index as f32 / RING_LEDS as f32 * core::f32::consts::TAU - core::f32::consts::FRAC_PI_2;
        Point::new(
            self.center.x + (angle.cos() * self.radius).round() as i32,
            self.center.y + (angle.sin() * self.radius).round() as i32,
        )
    }

    /// WS2812-style global brightness scaling.
    fn scaled(
        &self,
        color: Rgb888,
    ) -> Rgb888 {
        let scale = u16::from(self.brightness) + 1;
        Rgb888::new(
            ((u16::from(color.r()) * scale) >> 8) as u8,
            ((u16::from(color.g()) * scale) >> 8) as u8,
            ((u16::from(color.b()) * scale) >> 8) as u8,
        )
    }

    /// Render the ring if a `show` happened since the last draw.
    pub fn draw<D>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if !self.dirty {
            return Ok(());
        }
        for i in 0..RING_LEDS {
            let p = self.position(i);
            let circle = Circle::with_center(p, PIXEL_DIA);
            if self.pixels[i] == Rgb888::BLACK {
                circle.into_styled(PrimitiveStyle::with_fill(Rgb565::BLACK)).draw(display)?;
                circle.into_styled(PrimitiveStyle::with_stroke(SOCKET, 1)).draw(display)?;
            } else {
                let color = Rgb565::from(self.scaled(self.pixels[i]));
                circle.into_styled(PrimitiveStyle::with_fill(color)).draw(display)?;
            }
        }
        self.dirty = false;
        Ok(())
    }
}

impl LedRing for RingView {
    fn set_pixel(
        &mut self,
        index: usize,
        color: Rgb888,
    ) {
        if index < RING_LEDS {
            self.pixels[index] = color;
        }
    }

    fn show(&mut self) { self.dirty = true; }

    fn set_brightness(
        &mut self,
        brightness: u8,
    ) {
        self.brightness = brightness;
    }
}
