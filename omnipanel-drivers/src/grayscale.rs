//! 4 level grayscale panels
//!
//! Gray levels are left to the vendor buffer routines, no palette filter is
//! applied. Most models switch to grayscale through `Init_4Gray` and the
//! `*_4Gray` buffer/display pair. Models registered with
//! [`AltInit::GrayModeNumber`] select the depth through an `init` parameter
//! instead and refresh black/white frames through `display_1Gray`.

use omnipanel_core::{AltInit, Image, InitParam, Mode, Result};

use crate::panel::{Panel, PanelDriver};

/// Adapter for 4 level grayscale panels
pub struct GrayscaleDisplay {
    panel: Panel,
}

impl GrayscaleDisplay {
    pub(crate) fn new(panel: Panel) -> Self {
        Self { panel }
    }

    fn gray_mode_number(&self) -> Option<(u8, u8)> {
        match self.panel.descriptor.alt_init {
            Some(AltInit::GrayModeNumber { gray4, bw }) => Some((gray4, bw)),
            _ => None,
        }
    }
}

impl PanelDriver for GrayscaleDisplay {
    fn panel(&self) -> &Panel {
        &self.panel
    }

    fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    fn init(&mut self) -> Result<()> {
        let gray4 = self.panel.mode == Mode::Gray4;
        let numbers = self.gray_mode_number();
        let device = &mut self.panel.device;

        match numbers {
            Some((gray4_param, bw_param)) => {
                let n = if gray4 { gray4_param } else { bw_param };
                device.init(Some(InitParam::Mode(n)))?;
            }
            None if gray4 => device.init_4gray()?,
            None => device.init(None)?,
        }
        Ok(())
    }

    fn send(&mut self, image: &Image) -> Result<()> {
        let single_gray = self.gray_mode_number().is_some();
        let device = &mut self.panel.device;

        if self.panel.mode == Mode::Gray4 {
            let buffer = device.get_buffer_4gray(image)?;
            device.display_4gray(&buffer)?;
        } else if single_gray {
            let buffer = device.get_buffer(image)?;
            device.display_1gray(&buffer)?;
        } else {
            let buffer = device.get_buffer(image)?;
            device.display(&buffer, None)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use omnipanel_core::{DisplayAdapter, DisplayConfig, EntryPoint, Image, InitParam, Mode, RgbImage};
    use omnipanel_hal::mock::{self, Call, CallLog};

    use crate::Display;

    fn run(device: &str, mode: Mode) -> CallLog {
        let log = CallLog::new();
        let loader = mock::loader(&log, 16, 8);
        let config = DisplayConfig::for_device(device).with_mode(mode);
        let mut display = Display::open(device, &config, &loader).unwrap();
        assert_eq!(display.max_colors(), 4);

        display.prepare().unwrap();
        display.render_and_send(&Image::Rgb(RgbImage::new(16, 8))).unwrap();
        display.close().unwrap();
        log
    }

    /// Panel calls, without the bus teardown
    fn entry_points(log: &CallLog) -> Vec<EntryPoint> {
        log.entry_points()
            .into_iter()
            .filter(|e| !matches!(e, EntryPoint::ModuleInit | EntryPoint::ModuleExit))
            .collect()
    }

    #[test]
    fn test_numbered_init_gray4() {
        let log = run("epd3in7", Mode::Gray4);

        assert_eq!(log.calls()[0], Call::Init(Some(InitParam::Mode(0))));
        assert_eq!(
            entry_points(&log),
            [EntryPoint::Init, EntryPoint::GetBuffer4Gray, EntryPoint::Display4Gray]
        );
    }

    #[test]
    fn test_numbered_init_bw_uses_single_gray() {
        let log = run("epd3in7", Mode::Bw);

        assert_eq!(log.calls()[0], Call::Init(Some(InitParam::Mode(1))));
        assert_eq!(
            entry_points(&log),
            [EntryPoint::Init, EntryPoint::GetBuffer, EntryPoint::Display1Gray]
        );
    }

    #[test]
    fn test_init_4gray() {
        let log = run("epd2in7", Mode::Gray4);

        assert_eq!(
            entry_points(&log),
            [EntryPoint::Init4Gray, EntryPoint::GetBuffer4Gray, EntryPoint::Display4Gray]
        );
        // 2 bpp, all white
        assert_eq!(log.calls()[2], Call::Display4Gray(vec![0xFF; 32]));
    }

    #[test]
    fn test_plain_bw() {
        let log = run("epd4in2", Mode::Bw);

        assert_eq!(log.calls()[0], Call::Init(None));
        assert_eq!(
            entry_points(&log),
            [EntryPoint::Init, EntryPoint::GetBuffer, EntryPoint::Display]
        );
    }

    #[test]
    fn test_no_palette_filtering() {
        let log = CallLog::new();
        let loader = mock::loader(&log, 16, 8);
        let config = DisplayConfig::for_device("epd4in2").with_mode(Mode::Gray4);
        let mut display = Display::open("epd4in2", &config, &loader).unwrap();

        let mut frame = RgbImage::new(16, 8);
        frame.set_pixel(3, 3, embedded_graphics_core::pixelcolor::Rgb888::new(90, 90, 90));
        let frame = Image::Rgb(frame);

        display.prepare().unwrap();
        display.render_and_send(&frame).unwrap();
        assert_eq!(log.calls()[1], Call::GetBuffer4Gray(frame));
    }
}
