//! RGB and indexed rasters

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{OriginDimensions, Point, Size};
use embedded_graphics_core::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics_core::Pixel;

use super::palette::Palette;

/// Owned 24-bit RGB raster, row major
///
/// Implements [`DrawTarget`], so frames can be composed with
/// embedded-graphics primitives before being sent to a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: u32,
    height: u32,
    pixels: Vec<Rgb888>,
}

impl RgbImage {
    /// White frame of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb888::WHITE; width as usize * height as usize],
        }
    }

    /// Wrap existing pixels, `None` if the count does not match the size
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb888>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub(crate) fn from_pixels_unchecked(width: u32, height: u32, pixels: Vec<Rgb888>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb888] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, `None` outside the frame
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        self.offset(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at `(x, y)`; writes outside the frame are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb888) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Fill the whole frame with one color
    pub fn fill(&mut self, color: Rgb888) {
        self.pixels.fill(color);
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }
}

impl DrawTarget for RgbImage {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x >= 0 && y >= 0 {
                self.set_pixel(x as u32, y as u32, color);
            }
        }

        Ok(())
    }
}

impl OriginDimensions for RgbImage {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Palette-indexed raster, one byte per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    width: u32,
    height: u32,
    indices: Vec<u8>,
    palette: Palette,
}

impl IndexedImage {
    /// Wrap existing indices, `None` if the count does not match the size
    pub fn new(width: u32, height: u32, indices: Vec<u8>, palette: Palette) -> Option<Self> {
        (indices.len() == width as usize * height as usize)
            .then(|| Self::from_parts(width, height, indices, palette))
    }

    pub(crate) fn from_parts(width: u32, height: u32, indices: Vec<u8>, palette: Palette) -> Self {
        Self {
            width,
            height,
            indices,
            palette,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette index at `(x, y)`
    pub fn index_at(&self, x: u32, y: u32) -> Option<u8> {
        (x < self.width && y < self.height).then(|| self.indices[(y * self.width + x) as usize])
    }

    /// Resolved color at `(x, y)`
    pub fn color_at(&self, x: u32, y: u32) -> Option<Rgb888> {
        self.index_at(x, y).map(|i| self.palette.color(i))
    }

    /// Same indices under a different palette
    ///
    /// Used to isolate one ink of a quantized frame: remapping the other
    /// inks to white leaves a two-tone copy.
    pub fn with_palette(&self, palette: Palette) -> Self {
        Self {
            width: self.width,
            height: self.height,
            indices: self.indices.clone(),
            palette,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics_core::prelude::*;

    #[test]
    fn test_new_is_white() {
        let img = RgbImage::new(3, 2);
        assert_eq!(img.pixels().len(), 6);
        assert!(img.pixels().iter().all(|c| *c == Rgb888::WHITE));
    }

    #[test]
    fn test_from_pixels_checks_len() {
        assert!(RgbImage::from_pixels(2, 2, vec![Rgb888::BLACK; 3]).is_none());
        assert!(IndexedImage::new(2, 2, vec![0; 5], Palette::default()).is_none());
    }

    #[test]
    fn test_draw_clips_to_frame() {
        let mut img = RgbImage::new(4, 4);
        let pixels = [
            Pixel(Point::new(1, 2), Rgb888::BLACK),
            Pixel(Point::new(-1, 0), Rgb888::BLACK),
            Pixel(Point::new(4, 0), Rgb888::BLACK),
        ];
        img.draw_iter(pixels).unwrap();

        assert_eq!(img.pixel(1, 2), Some(Rgb888::BLACK));
        assert_eq!(img.pixels().iter().filter(|c| **c == Rgb888::BLACK).count(), 1);
        assert_eq!(img.pixel(4, 0), None);
        assert_eq!(img.size(), Size::new(4, 4));
    }

    #[test]
    fn test_with_palette_keeps_indices() {
        let img = IndexedImage::new(3, 1, vec![0, 1, 2], Palette::padded(&[
            Rgb888::WHITE,
            Rgb888::BLACK,
            Rgb888::RED,
        ]))
        .unwrap();

        let black = img.with_palette(Palette::padded(&[Rgb888::WHITE, Rgb888::BLACK, Rgb888::WHITE]));
        assert_eq!(black.indices(), img.indices());
        assert_eq!(black.color_at(1, 0), Some(Rgb888::BLACK));
        assert_eq!(black.color_at(2, 0), Some(Rgb888::WHITE));
        assert_eq!(img.color_at(2, 0), Some(Rgb888::RED));
    }
}
