//! Palette filter and indexed palettes

use embedded_graphics_core::pixelcolor::{Rgb888, RgbColor};
use heapless::Vec;

/// Entries in an indexed palette
pub const PALETTE_SIZE: usize = 256;

/// Most colors a palette filter can hold (7 panel colors plus headroom)
pub const MAX_FILTER_COLORS: usize = 8;

/// Fixed 256-entry palette of an indexed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: [Rgb888; PALETTE_SIZE],
}

impl Palette {
    /// Palette starting with `colors`, remaining entries black
    ///
    /// Colors beyond the 256th are ignored.
    pub fn padded(colors: &[Rgb888]) -> Self {
        let mut entries = [Rgb888::BLACK; PALETTE_SIZE];
        for (slot, color) in entries.iter_mut().zip(colors) {
            *slot = *color;
        }
        Self { entries }
    }

    /// Color stored at `index`
    pub fn color(&self, index: u8) -> Rgb888 {
        self.entries[index as usize]
    }

    /// All 256 entries
    pub fn entries(&self) -> &[Rgb888; PALETTE_SIZE] {
        &self.entries
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::padded(&[Rgb888::WHITE, Rgb888::BLACK])
    }
}

/// Ordered colors a frame is reduced to before conversion
///
/// Index 0 is conventionally white and index 1 black; tri-color adapters
/// append their accent ink as index 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteFilter {
    colors: Vec<Rgb888, MAX_FILTER_COLORS>,
}

impl PaletteFilter {
    /// `[white, black]`
    pub fn monochrome() -> Self {
        Self {
            colors: [Rgb888::WHITE, Rgb888::BLACK].into_iter().collect(),
        }
    }

    /// `[white, black, accent]`
    pub fn accented(accent: Rgb888) -> Self {
        Self {
            colors: [Rgb888::WHITE, Rgb888::BLACK, accent].into_iter().collect(),
        }
    }

    /// Filter with exactly `colors`, `None` if there are too many
    pub fn from_colors(colors: &[Rgb888]) -> Option<Self> {
        Vec::from_slice(colors).ok().map(|colors| Self { colors })
    }

    /// Append a color, handing it back if the filter is full
    pub fn push(&mut self, color: Rgb888) -> Result<(), Rgb888> {
        self.colors.push(color)
    }

    /// Filter colors in order
    pub fn colors(&self) -> &[Rgb888] {
        &self.colors
    }

    /// Index of the closest filter color, earliest on ties
    pub fn nearest(&self, color: Rgb888) -> u8 {
        let mut best = 0;
        let mut best_distance = u32::MAX;

        for (index, candidate) in self.colors.iter().enumerate() {
            let distance = distance_sq(color, *candidate);
            if distance < best_distance {
                best = index;
                best_distance = distance;
            }
        }

        best as u8
    }

    /// The filter as a 256-entry palette padded with black
    pub fn palette(&self) -> Palette {
        Palette::padded(&self.colors)
    }
}

impl Default for PaletteFilter {
    fn default() -> Self {
        Self::monochrome()
    }
}

fn distance_sq(a: Rgb888, b: Rgb888) -> u32 {
    let dr = a.r() as i32 - b.r() as i32;
    let dg = a.g() as i32 - b.g() as i32;
    let db = a.b() as i32 - b.b() as i32;
    (dr * dr + dg * dg + db * db) as u32
}
