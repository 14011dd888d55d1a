//! 7 color panels
//!
//! In `color` mode the frame goes to the vendor routine as is, which does
//! its own 7 color reduction. In `bw` mode the frame is reduced to the
//! black/white palette filter first.

use alloc::borrow::Cow;

use omnipanel_core::{Image, Mode, Result};

use crate::panel::{Panel, PanelDriver};

/// Adapter for 7 color panels
pub struct MultiColorDisplay {
    panel: Panel,
}

impl MultiColorDisplay {
    pub(crate) fn new(panel: Panel) -> Self {
        Self { panel }
    }
}

impl PanelDriver for MultiColorDisplay {
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
        let frame = match self.panel.mode {
            Mode::Bw => Cow::Owned(Image::Indexed(image.quantize(&self.panel.palette_filter))),
            _ => Cow::Borrowed(image),
        };

        let device = &mut self.panel.device;
        let buffer = device.get_buffer(&frame)?;
        device.display(&buffer, None)?;
        Ok(())
    }
}
