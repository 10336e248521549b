//! Frame buffer
//!
//! One bit per pixel, big enough for either display shape

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::application::layout::{Shape, ROUND_DIAMETER};

const FB_BYTES: usize = (ROUND_DIAMETER * ROUND_DIAMETER) as usize / 8;

pub struct FrameBuffer {
    bits: [u8; FB_BYTES],
    size: Size,
}

impl FrameBuffer {
    /// A blank (all paper) buffer the size of `shape`'s screen
    pub fn new(shape: Shape) -> Self {
        Self {
            bits: [0; FB_BYTES],
            size: shape.screen_size(),
        }
    }

    fn index(&self, point: Point) -> Option<usize> {
        let (x, y) = (point.x, point.y);
        if x < 0 || y < 0 || x as u32 >= self.size.width || y as u32 >= self.size.height {
            return None;
        }
        Some(x as usize + y as usize * self.size.width as usize)
    }

    /// Colour at `point`, `None` when off screen
    pub fn pixel(&self, point: Point) -> Option<BinaryColor> {
        self.index(point).map(|i| {
            if self.bits[i / 8] & (1 << (i % 8)) != 0 {
                BinaryColor::On
            } else {
                BinaryColor::Off
            }
        })
    }

    /// Number of inked pixels
    pub fn ink_count(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point) {
                match color {
                    BinaryColor::On => self.bits[i / 8] |= 1 << (i % 8),
                    BinaryColor::Off => self.bits[i / 8] &= !(1 << (i % 8)),
                }
            }
        }
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        self.size
    }
}
