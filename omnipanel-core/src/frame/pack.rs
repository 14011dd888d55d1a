//! Buffer packing
//!
//! Helpers for vendor `getbuffer` implementations. A frame is accepted
//! either in panel orientation (`width x height`) or turned a quarter
//! (`height x width`); the latter is mapped back onto the panel the way the
//! vendor routines do.

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics_core::pixelcolor::{Rgb888, RgbColor};

use super::Image;
use crate::traits::DriverError;

/// Luma at or above this is white in 1 bpp buffers
pub const MONO_THRESHOLD: u8 = 128;

/// Bytes in a 1 bpp buffer, rows padded to whole bytes
pub const fn buffer_len(width: u32, height: u32) -> usize {
    ((width as usize + 7) / 8) * height as usize
}

/// Bytes in a 2 bpp buffer, rows padded to whole bytes
pub const fn gray4_buffer_len(width: u32, height: u32) -> usize {
    ((width as usize + 3) / 4) * height as usize
}

/// ITU-R 601 luma
pub fn luma(color: Rgb888) -> u8 {
    let l = color.r() as u32 * 299 + color.g() as u32 * 587 + color.b() as u32 * 114;
    (l / 1000) as u8
}

/// Color shown at panel pixel `(x, y)`
fn panel_pixel(image: &Image, width: u32, height: u32, x: u32, y: u32) -> Rgb888 {
    let upright = image.size() == (width, height);
    let color = if upright {
        image.color_at(x, y)
    } else {
        image.color_at(height - 1 - y, x)
    };
    color.unwrap_or(Rgb888::WHITE)
}

fn check_size(image: &Image, width: u32, height: u32) -> Result<(), DriverError> {
    let size = image.size();
    if size == (width, height) || size == (height, width) {
        Ok(())
    } else {
        Err(DriverError::BufferSize {
            expected: width as usize * height as usize,
            actual: size.0 as usize * size.1 as usize,
        })
    }
}

/// 1 bpp, MSB first, set bit = white
pub fn mono(image: &Image, width: u32, height: u32) -> Result<Vec<u8>, DriverError> {
    check_size(image, width, height)?;

    let line = (width as usize + 7) / 8;
    let mut buf = vec![0u8; buffer_len(width, height)];

    for y in 0..height {
        for x in 0..width {
            if luma(panel_pixel(image, width, height, x, y)) >= MONO_THRESHOLD {
                buf[y as usize * line + x as usize / 8] |= 0x80 >> (x % 8);
            }
        }
    }

    Ok(buf)
}

/// 2 bpp, MSB first, 0 = black .. 3 = white
pub fn gray4(image: &Image, width: u32, height: u32) -> Result<Vec<u8>, DriverError> {
    check_size(image, width, height)?;

    let line = (width as usize + 3) / 4;
    let mut buf = vec![0u8; gray4_buffer_len(width, height)];

    for y in 0..height {
        for x in 0..width {
            let level = luma(panel_pixel(image, width, height, x, y)) >> 6;
            buf[y as usize * line + x as usize / 4] |= level << (6 - 2 * (x % 4));
        }
    }

    Ok(buf)
}
