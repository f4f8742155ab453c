//! OLED viewport on the simulator display.
//!
//! The readout believes it owns a 128x64 SSD1306-class panel drawing from
//! the origin; on the simulator that panel is the top slice of the window,
//! fenced off with a clip rectangle so stray draws cannot leak into the
//! ring area below.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

/// Panel width in pixels.
pub const OLED_WIDTH: u32 = 128;

/// Panel height in pixels.
pub const OLED_HEIGHT: u32 = 64;

/// The panel area on the simulator display.
pub const fn area() -> Rectangle { Rectangle::new(Point::zero(), Size::new(OLED_WIDTH, OLED_HEIGHT)) }

/// Thin frame under the panel separating it from the ring area.
pub fn draw_bezel<D>(
    display: &mut D,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(Point::new(0, OLED_HEIGHT as i32), Size::new(OLED_WIDTH, 2))
        .into_styled(PrimitiveStyle::with_fill(Rgb565::new(8, 16, 8)))
        .draw(display)
}
