//! Redraw routines for the layers the face paints itself

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Polyline, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle};

use crate::application::layout::BATTERY_BAR_WIDTH;
use crate::system::gfx::{PathInfo, INK};

/// How far down the screen the top of the battery bar sits.
///
/// `drained` is the used share of the battery, `100 - percent`, so the bar
/// covers `percent` of the height and shrinks towards the bottom as the
/// battery drains. The visible bar is `height - offset` tall.
pub fn drain_offset(drained: u8, height: u32) -> u32 {
    (u32::from(drained.min(100)) * height / 100).min(height)
}

/// The battery bar, hugging the right edge of `bounds`
pub fn battery_bar(bounds: &Rectangle, drained: u8) -> Rectangle {
    let Size { width, height } = bounds.size;
    let offset = drain_offset(drained, height);
    let bar_width = BATTERY_BAR_WIDTH.min(width);
    Rectangle::new(
        bounds.top_left + Point::new((width - bar_width) as i32, offset as i32),
        Size::new(bar_width, height - offset),
    )
}

pub fn draw_line<D>(display: &mut D, path: &PathInfo) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Polyline::new(path.points)
        .into_styled(PrimitiveStyle::with_stroke(INK, 1))
        .draw(display)
}

pub fn draw_battery_line<D>(display: &mut D, bounds: &Rectangle, drained: u8) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = PrimitiveStyleBuilder::new()
        .stroke_color(INK)
        .stroke_width(1)
        .fill_color(INK)
        .build();
    battery_bar(bounds, drained).into_styled(style).draw(display)
}
