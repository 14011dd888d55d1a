//! Tri-color panels
//!
//! Black/white panels with one accent ink, red or yellow depending on the
//! model. Several models share a driver module and differ only in the
//! accent, which the registry records as the second supported mode.
//!
//! The controller takes two planes per refresh: a black plane and an
//! accent plane, each 1 bpp with 0 marking inked pixels.

use alloc::vec;

use embedded_graphics_core::pixelcolor::{Rgb888, RgbColor};
use omnipanel_core::frame::pack;
use omnipanel_core::{Image, Mode, Palette, PaletteFilter, Result};

use crate::panel::{Panel, PanelDriver};

/// Keeps black, turns the accent white
const BLACK_PLANE: [Rgb888; 3] = [Rgb888::WHITE, Rgb888::BLACK, Rgb888::WHITE];
/// Turns black white, shows the accent as black
const ACCENT_PLANE: [Rgb888; 3] = [Rgb888::WHITE, Rgb888::WHITE, Rgb888::BLACK];

/// Adapter for black/white/accent panels
pub struct TriColorDisplay {
    panel: Panel,
}

impl TriColorDisplay {
    pub(crate) fn new(mut panel: Panel) -> Self {
        // Every mode, bw included, reports the accent in its filter
        let accent = panel.descriptor.modes.iter().find_map(|m| m.accent());
        if let Some(accent) = accent {
            panel.palette_filter = PaletteFilter::accented(accent);
        }
        Self { panel }
    }
}

impl PanelDriver for TriColorDisplay {
    fn panel(&self) -> &Panel {
        &self.panel
    }

    fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    fn init(&mut self) -> Result<()> {
        self.panel.device.init(None)?;
        Ok(())
    }

    fn send(&mut self, image: &Image) -> Result<()> {
        let panel = &mut self.panel;

        if panel.mode == Mode::Bw {
            let buffer = panel.device.get_buffer(image)?;
            // Some drivers read the accent plane even when it carries nothing
            let blank = vec![0u8; pack::buffer_len(panel.width, panel.height)];
            panel.device.display(&buffer, Some(&blank))?;
            return Ok(());
        }

        let reduced = image.quantize(&panel.palette_filter);
        let black = Image::Indexed(reduced.with_palette(Palette::padded(&BLACK_PLANE)));
        let accent = Image::Indexed(reduced.with_palette(Palette::padded(&ACCENT_PLANE)));

        let black = panel.device.get_buffer(&black)?;
        let accent = panel.device.get_buffer(&accent)?;
        panel.device.display(&black, Some(&accent))?;
        Ok(())
    }
}
