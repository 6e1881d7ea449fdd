// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixels being carved.
//!
//! Decoding and encoding belong to whoever hands us the image; the
//! carver only ever sees a width, a height, and a row-major run of
//! RGBA pixels.  Conversions to and from `image::RgbaImage` are
//! provided for that collaborator's convenience.

use crate::error::{CarveError, Result};
use crate::grid::{Grid, GridView};
use image::{Rgba, RgbaImage};
use std::convert::TryFrom;

/// Four unsigned 8-bit channels: red, green, blue, alpha.
pub type Pixel = Rgba<u8>;

/// An image in memory.  `pixels.len() == width * height` always
/// holds; seam removal replaces the storage and shrinks one dimension
/// by exactly one.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    grid: Grid<Pixel>,
}

impl PixelBuffer {
    /// Wrap a row-major pixel vector.  Both dimensions must be at
    /// least one and the vector must hold exactly `width * height`
    /// pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        let len = pixels.len();
        let shape_error = CarveError::BufferShape { width, height, len };
        if width == 0 || height == 0 {
            return Err(shape_error);
        }
        Grid::from_vec(width, height, pixels)
            .map(|grid| PixelBuffer { grid })
            .ok_or(shape_error)
    }

    /// A `width` × `height` image of a single color.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self> {
        PixelBuffer::from_pixels(width, height, vec![pixel; width as usize * height as usize])
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.grid.dimensions()
    }

    /// The pixel at (x, y); coordinates outside the image read the
    /// nearest edge pixel.
    pub fn pixel(&self, x: i64, y: i64) -> Pixel {
        self.grid.clamped(x, y)
    }

    /// Write the pixel at (x, y).  Writes outside the image are
    /// dropped and reported as `false`.
    pub fn put_pixel(&mut self, x: i64, y: i64, pixel: Pixel) -> bool {
        self.grid.set(x, y, pixel)
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Pixel] {
        self.grid.as_slice()
    }

    // Only seam removal gets to swap the storage out from under the
    // buffer, and it has already checked the new shape.
    pub(crate) fn replace(&mut self, width: u32, height: u32, pixels: Vec<Pixel>) -> Result<()> {
        *self = PixelBuffer::from_pixels(width, height, pixels)?;
        Ok(())
    }

    /// Hand the pixels back as an `image` buffer, ready to encode.
    pub fn into_image(self) -> RgbaImage {
        let (width, height) = self.dimensions();
        let raw = self
            .grid
            .into_vec()
            .into_iter()
            .flat_map(|p| p.0.to_vec())
            .collect::<Vec<u8>>();
        // The lengths agree by construction, so this cannot fail.
        RgbaImage::from_raw(width, height, raw).unwrap_or_else(|| RgbaImage::new(width, height))
    }
}

impl GridView<Pixel> for PixelBuffer {
    fn width(&self) -> u32 {
        self.grid.width()
    }

    fn height(&self) -> u32 {
        self.grid.height()
    }

    fn get(&self, x: u32, y: u32) -> Pixel {
        self.grid[(x, y)]
    }
}

impl TryFrom<RgbaImage> for PixelBuffer {
    type Error = CarveError;

    fn try_from(image: RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        let pixels = image.pixels().copied().collect();
        PixelBuffer::from_pixels(width, height, pixels)
    }
}

impl From<PixelBuffer> for RgbaImage {
    fn from(buffer: PixelBuffer) -> Self {
        buffer.into_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red(r: u8) -> Pixel {
        Rgba([r, 0, 0, 255])
    }

    #[test]
    fn rejects_mismatched_storage() {
        assert!(matches!(
            PixelBuffer::from_pixels(2, 2, vec![red(0); 3]),
            Err(CarveError::BufferShape { width: 2, height: 2, len: 3 })
        ));
        assert!(PixelBuffer::from_pixels(0, 0, vec![]).is_err());
    }

    #[test]
    fn reads_clamp_and_writes_drop_outside() {
        let mut buffer = PixelBuffer::from_pixels(2, 2, (0..4).map(red).collect()).unwrap();
        assert_eq!(buffer.pixel(-3, 0), red(0));
        assert_eq!(buffer.pixel(5, 5), red(3));
        assert!(!buffer.put_pixel(2, 0, red(9)));
        assert_eq!(buffer.pixels(), &[red(0), red(1), red(2), red(3)]);
        assert!(buffer.put_pixel(1, 0, red(9)));
        assert_eq!(buffer.pixel(1, 0), red(9));
    }

    #[test]
    fn converts_to_and_from_image() {
        let mut image = RgbaImage::new(3, 2);
        image.put_pixel(2, 1, Rgba([1, 2, 3, 4]));
        let buffer = PixelBuffer::try_from(image.clone()).unwrap();
        assert_eq!(buffer.dimensions(), (3, 2));
        assert_eq!(buffer.pixel(2, 1), Rgba([1, 2, 3, 4]));
        assert_eq!(buffer.into_image(), image);
    }

    #[test]
    fn empty_images_are_refused() {
        assert!(PixelBuffer::try_from(RgbaImage::new(0, 4)).is_err());
    }
}
