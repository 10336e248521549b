//! Layout
//!
//! Where everything sits on the screen, for both display shapes

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::system::gfx::{FontKey, PathInfo, TextAlignment, TextStyle, INK};

pub const RECT_WIDTH: u32 = 144;
pub const RECT_HEIGHT: u32 = 168;
pub const ROUND_DIAMETER: u32 = 180;

/// Gap between the left edge and the text layers
pub const TEXT_PADDING_LEFT: i32 = 15;
/// Width of the battery bar along the right edge
pub const BATTERY_BAR_WIDTH: u32 = 4;

pub const TIME_HEIGHT: u32 = 42;
pub const DATE_HEIGHT: u32 = 30;
pub const WEEK_DAY_HEIGHT: u32 = 30;

/// The horizontal rule under the date
pub static LINE_PATH: PathInfo = PathInfo {
    points: &[Point::new(0, 111), Point::new(122, 111)],
};

pub const TIME_STYLE: TextStyle = TextStyle {
    font: FontKey::Bitham42Bold,
    color: INK,
    background: None,
    alignment: TextAlignment::Left,
};

pub const DATE_STYLE: TextStyle = TextStyle {
    font: FontKey::Gothic24Bold,
    color: INK,
    background: None,
    alignment: TextAlignment::Left,
};

pub const WEEK_DAY_STYLE: TextStyle = DATE_STYLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rect,
    Round,
}

impl Default for Shape {
    /// The shape the crate was built for, see the `round` feature
    fn default() -> Self {
        if cfg!(feature = "round") {
            Shape::Round
        } else {
            Shape::Rect
        }
    }
}

impl Shape {
    /// Pick `round` on round displays and `rect` everywhere else
    pub const fn if_round(self, round: i32, rect: i32) -> i32 {
        match self {
            Shape::Round => round,
            Shape::Rect => rect,
        }
    }

    pub const fn screen_size(self) -> Size {
        match self {
            Shape::Rect => Size::new(RECT_WIDTH, RECT_HEIGHT),
            Shape::Round => Size::new(ROUND_DIAMETER, ROUND_DIAMETER),
        }
    }
}

/// A full width text row starting at `y`, indented by [`TEXT_PADDING_LEFT`]
fn text_row(bounds: &Rectangle, y: i32, height: u32) -> Rectangle {
    let width = bounds.size.width.saturating_sub(TEXT_PADDING_LEFT as u32);
    Rectangle::new(
        bounds.top_left + Point::new(TEXT_PADDING_LEFT, y),
        Size::new(width, height),
    )
}

pub fn time_frame(shape: Shape, bounds: &Rectangle) -> Rectangle {
    text_row(bounds, shape.if_round(70, 105), TIME_HEIGHT)
}

pub fn date_frame(shape: Shape, bounds: &Rectangle) -> Rectangle {
    text_row(bounds, shape.if_round(70, 80), DATE_HEIGHT)
}

pub fn week_day_frame(shape: Shape, bounds: &Rectangle) -> Rectangle {
    text_row(bounds, shape.if_round(50, 60), WEEK_DAY_HEIGHT)
}
