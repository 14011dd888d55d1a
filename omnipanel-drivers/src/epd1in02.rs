//! The 1.02 inch panel
//!
//! Behaves like a plain black/white panel, but its driver spells the entry
//! points `Init`, `Display`, `Sleep` and `Clear`.

use omnipanel_core::{Image, Result};

use crate::panel::{Panel, PanelDriver};

/// Adapter for the 1.02 inch panel
pub struct Epd1in02Display {
    panel: Panel,
}

impl Epd1in02Display {
    pub(crate) fn new(panel: Panel) -> Self {
        Self { panel }
    }
}

impl PanelDriver for Epd1in02Display {
    fn panel(&self) -> &Panel {
        &self.panel
    }

    fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    fn init(&mut self) -> Result<()> {
        self.panel.device.legacy_init()?;
        Ok(())
    }

    fn send(&mut self, image: &Image) -> Result<()> {
        let device = &mut self.panel.device;
        let buffer = device.get_buffer(image)?;
        device.legacy_display(&buffer)?;
        Ok(())
    }

    fn power_down(&mut self) -> Result<()> {
        self.panel.device.legacy_sleep()?;
        Ok(())
    }

    fn blank(&mut self) -> Result<()> {
        self.panel.device.legacy_clear()?;
        Ok(())
    }
}
