//! Black/white panels
//!
//! Init takes one of three forms depending on the model: the driver's
//! `lut_full_update` waveform, a fixed update-mode number, or no parameter.
//! Frames go to the vendor `getbuffer` unfiltered.

use alloc::vec::Vec;

use omnipanel_core::{AltInit, DriverError, EntryPoint, Image, InitParam, Result};

use crate::panel::{Panel, PanelDriver};

/// Adapter for black/white panels
pub struct BwDisplay {
    panel: Panel,
}

impl BwDisplay {
    pub(crate) fn new(panel: Panel) -> Self {
        Self { panel }
    }
}

impl PanelDriver for BwDisplay {
    fn panel(&self) -> &Panel {
        &self.panel
    }

    fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    fn init(&mut self) -> Result<()> {
        let device = &mut self.panel.device;
        let param = match self.panel.descriptor.alt_init {
            Some(AltInit::LutFullUpdate) => {
                let lut = device
                    .lut_full_update()
                    .map(<[u8]>::to_vec)
                    .ok_or(DriverError::MissingEntryPoint(EntryPoint::LutFullUpdate))?;
                Some(InitParam::Lut(lut))
            }
            Some(AltInit::ModeParam(n)) => Some(InitParam::Mode(n)),
            _ => None,
        };
        device.init(param)?;
        Ok(())
    }

    fn send(&mut self, image: &Image) -> Result<()> {
        let device = &mut self.panel.device;
        let buffer: Vec<u8> = device.get_buffer(image)?;
        device.display(&buffer, None)?;
        Ok(())
    }
}
