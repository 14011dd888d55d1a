//! Frame orientation
//!
//! Frames are rotated counter-clockwise first, then mirrored.

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Image, IndexedImage, RgbImage};

/// Counter-clockwise rotation in quarter turns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16", into = "u16"))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Whether the rotation swaps width and height
    pub const fn is_quarter(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = &'static str;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err("rotation must be 0, 90, 180 or 270"),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Source offset for each destination pixel, row major
fn rotate_map(width: u32, height: u32, rotation: Rotation) -> (u32, u32, Vec<usize>) {
    let (w, h) = (width as usize, height as usize);
    let (out_w, out_h) = if rotation.is_quarter() { (h, w) } else { (w, h) };
    let mut map = Vec::with_capacity(w * h);

    for y in 0..out_h {
        for x in 0..out_w {
            let (sx, sy) = match rotation {
                Rotation::Deg0 => (x, y),
                Rotation::Deg90 => (w - 1 - y, x),
                Rotation::Deg180 => (w - 1 - x, h - 1 - y),
                Rotation::Deg270 => (y, h - 1 - x),
            };
            map.push(sy * w + sx);
        }
    }

    (out_w as u32, out_h as u32, map)
}

fn flip_map(width: u32, height: u32, horizontal: bool, vertical: bool) -> Vec<usize> {
    let (w, h) = (width as usize, height as usize);
    let mut map = Vec::with_capacity(w * h);

    for y in 0..h {
        let sy = if vertical { h - 1 - y } else { y };
        for x in 0..w {
            let sx = if horizontal { w - 1 - x } else { x };
            map.push(sy * w + sx);
        }
    }

    map
}

fn remap<T: Copy>(src: &[T], map: &[usize]) -> Vec<T> {
    map.iter().map(|i| src[*i]).collect()
}

impl Image {
    fn remapped(&self, width: u32, height: u32, map: &[usize]) -> Image {
        match self {
            Image::Rgb(img) => Image::Rgb(RgbImage::from_pixels_unchecked(
                width,
                height,
                remap(img.pixels(), map),
            )),
            Image::Indexed(img) => Image::Indexed(IndexedImage::from_parts(
                width,
                height,
                remap(img.indices(), map),
                img.palette().clone(),
            )),
        }
    }

    /// Rotate counter-clockwise, swapping width and height for quarter turns
    pub fn rotated(&self, rotation: Rotation) -> Image {
        if rotation == Rotation::Deg0 {
            return self.clone();
        }
        let (width, height, map) = rotate_map(self.width(), self.height(), rotation);
        self.remapped(width, height, &map)
    }

    /// Mirror left-right and/or top-bottom
    pub fn flipped(&self, horizontal: bool, vertical: bool) -> Image {
        if !horizontal && !vertical {
            return self.clone();
        }
        let map = flip_map(self.width(), self.height(), horizontal, vertical);
        self.remapped(self.width(), self.height(), &map)
    }
}
