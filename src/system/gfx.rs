//! Graphics types shared between the face and the platform

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::Point;

/// Foreground colour, black on the panel
pub const INK: BinaryColor = BinaryColor::On;
/// Background colour, white on the panel
pub const PAPER: BinaryColor = BinaryColor::Off;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathId(pub u8);

/// System fonts, looked up by key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKey {
    Bitham42Bold,
    Gothic24Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub font: FontKey,
    pub color: BinaryColor,
    /// `None` leaves whatever is underneath visible
    pub background: Option<BinaryColor>,
    pub alignment: TextAlignment,
}

/// Points of an open path
#[derive(Debug, PartialEq, Eq)]
pub struct PathInfo {
    pub points: &'static [Point],
}
