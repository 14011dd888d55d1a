//! Image frames
//!
//! Frames arrive either as plain RGB rasters or as palette-indexed rasters.
//! Before a frame reaches a vendor driver it may be oriented (rotate, flip)
//! and reduced to the adapter's palette filter.

mod image;
pub mod pack;
mod palette;
mod transform;

pub use image::{IndexedImage, RgbImage};
pub use palette::{Palette, PaletteFilter, MAX_FILTER_COLORS, PALETTE_SIZE};
pub use transform::Rotation;

use embedded_graphics_core::pixelcolor::Rgb888;

/// A frame handed to the display adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Image {
    /// 24-bit RGB raster
    Rgb(RgbImage),
    /// Palette-indexed raster
    Indexed(IndexedImage),
}

impl Image {
    /// Frame width in pixels
    pub fn width(&self) -> u32 {
        match self {
            Image::Rgb(img) => img.width(),
            Image::Indexed(img) => img.width(),
        }
    }

    /// Frame height in pixels
    pub fn height(&self) -> u32 {
        match self {
            Image::Rgb(img) => img.height(),
            Image::Indexed(img) => img.height(),
        }
    }

    /// `(width, height)`
    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Color of the pixel at `(x, y)`, `None` outside the frame
    pub fn color_at(&self, x: u32, y: u32) -> Option<Rgb888> {
        match self {
            Image::Rgb(img) => img.pixel(x, y),
            Image::Indexed(img) => img.color_at(x, y),
        }
    }

    /// Reduce the frame to the colors of `filter`
    ///
    /// Every pixel maps to the nearest filter color by squared RGB distance,
    /// ties going to the earlier color. No dithering. The resulting palette
    /// is the filter padded to 256 entries with black.
    pub fn quantize(&self, filter: &PaletteFilter) -> IndexedImage {
        let indices = match self {
            Image::Rgb(img) => img.pixels().iter().map(|c| filter.nearest(*c)).collect(),
            Image::Indexed(img) => {
                // Resolve each palette entry once instead of once per pixel
                let palette = img.palette();
                let mut lookup = [0u8; PALETTE_SIZE];
                for (slot, color) in lookup.iter_mut().zip(palette.entries()) {
                    *slot = filter.nearest(*color);
                }
                img.indices().iter().map(|i| lookup[*i as usize]).collect()
            }
        };

        IndexedImage::from_parts(self.width(), self.height(), indices, filter.palette())
    }
}

impl From<RgbImage> for Image {
    fn from(img: RgbImage) -> Self {
        Image::Rgb(img)
    }
}

impl From<IndexedImage> for Image {
    fn from(img: IndexedImage) -> Self {
        Image::Indexed(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use embedded_graphics_core::pixelcolor::RgbColor;
    use proptest::prelude::*;

    #[test]
    fn test_quantize_monochrome() {
        let img = RgbImage::from_pixels(
            4,
            1,
            vec![
                Rgb888::WHITE,
                Rgb888::BLACK,
                Rgb888::new(200, 200, 200),
                Rgb888::new(40, 40, 40),
            ],
        )
        .unwrap();

        let out = Image::from(img).quantize(&PaletteFilter::monochrome());
        assert_eq!(out.indices(), &[0, 1, 0, 1]);
        assert_eq!(out.palette().color(0), Rgb888::WHITE);
        assert_eq!(out.palette().color(1), Rgb888::BLACK);
        assert_eq!(out.palette().color(255), Rgb888::BLACK);
    }

    #[test]
    fn test_quantize_accent() {
        let mut filter = PaletteFilter::monochrome();
        filter.push(Rgb888::RED).unwrap();

        let img = RgbImage::from_pixels(
            3,
            1,
            vec![Rgb888::new(230, 20, 10), Rgb888::new(250, 250, 240), Rgb888::BLACK],
        )
        .unwrap();

        let out = Image::from(img).quantize(&filter);
        assert_eq!(out.indices(), &[2, 0, 1]);
    }

    #[test]
    fn test_quantize_tie_goes_to_first_color() {
        let between = Rgb888::new(1, 0, 0);
        let img = Image::from(RgbImage::from_pixels(1, 1, vec![between]).unwrap());

        let dark_first = PaletteFilter::from_colors(&[Rgb888::BLACK, Rgb888::new(2, 0, 0)]).unwrap();
        assert_eq!(img.quantize(&dark_first).indices(), &[0]);

        let light_first = PaletteFilter::from_colors(&[Rgb888::new(2, 0, 0), Rgb888::BLACK]).unwrap();
        assert_eq!(img.quantize(&light_first).indices(), &[0]);
    }

    #[test]
    fn test_quantize_indexed_source() {
        let palette = Palette::padded(&[Rgb888::new(10, 10, 10), Rgb888::new(240, 240, 240)]);
        let img = IndexedImage::new(2, 2, vec![0, 1, 1, 7], palette).unwrap();

        let out = Image::from(img).quantize(&PaletteFilter::monochrome());
        // Index 7 is padding, which is black
        assert_eq!(out.indices(), &[1, 0, 0, 1]);
    }

    proptest! {
        #[test]
        fn prop_quantize_stays_in_filter(
            pixels in proptest::collection::vec(any::<(u8, u8, u8)>(), 1..64),
            extra in any::<(u8, u8, u8)>(),
        ) {
            let mut filter = PaletteFilter::monochrome();
            filter.push(Rgb888::new(extra.0, extra.1, extra.2)).unwrap();

            let width = pixels.len() as u32;
            let colors = pixels.iter().map(|(r, g, b)| Rgb888::new(*r, *g, *b)).collect();
            let img = Image::from(RgbImage::from_pixels(width, 1, colors).unwrap());
            let out = img.quantize(&filter);

            prop_assert_eq!(out.size(), (width, 1));
            prop_assert!(out.indices().iter().all(|i| (*i as usize) < filter.colors().len()));

            // Re-quantizing a quantized frame is a no-op
            let again = Image::from(out.clone()).quantize(&filter);
            prop_assert_eq!(again.indices(), out.indices());
        }
    }
}
