//! Display selection
//!
//! [`Display`] is the adapter callers hold. Opening one looks the device up
//! in the registry, picks the family variant once and from then on every
//! call goes to that variant.

use embedded_graphics_core::pixelcolor::Rgb888;
use omnipanel_core::registry;
use omnipanel_core::{
    DeviceDescriptor, DisplayAdapter, DisplayConfig, DriverLoader, Error, Family, Image, Mode,
    Result,
};

use crate::panel::{Panel, PanelDriver};
use crate::{BwDisplay, Epd1in02Display, GrayscaleDisplay, MultiColorDisplay, TriColorDisplay};

/// An open e-paper display of any supported family
pub enum Display {
    Bw(BwDisplay),
    TriColor(TriColorDisplay),
    Grayscale(GrayscaleDisplay),
    MultiColor(MultiColorDisplay),
    Epd1in02(Epd1in02Display),
}

impl Display {
    /// Open `device_id` (namespaced or bare model name)
    ///
    /// `config.epd.device` is ignored here; `config.epd.mode` selects the
    /// mode and defaults to the device's first supported mode.
    pub fn open(device_id: &str, config: &DisplayConfig, loader: &dyn DriverLoader) -> Result<Self> {
        let descriptor =
            registry::lookup(device_id).ok_or_else(|| Error::UnsupportedDevice(device_id.into()))?;
        let panel = Panel::open(descriptor, config, loader)?;

        Ok(match descriptor.family {
            Family::Bw => Display::Bw(BwDisplay::new(panel)),
            Family::TriColor => Display::TriColor(TriColorDisplay::new(panel)),
            Family::Grayscale => Display::Grayscale(GrayscaleDisplay::new(panel)),
            Family::MultiColor => Display::MultiColor(MultiColorDisplay::new(panel)),
            Family::Epd1in02 => Display::Epd1in02(Epd1in02Display::new(panel)),
        })
    }

    /// Open the device named by `config.epd.device`
    pub fn from_config(config: &DisplayConfig, loader: &dyn DriverLoader) -> Result<Self> {
        let device = config
            .epd
            .device
            .as_deref()
            .ok_or_else(|| Error::Config("no device in [epd] section".into()))?;
        Self::open(device, config, loader)
    }

    /// Family the device was classified as
    pub fn family(&self) -> Family {
        self.descriptor().family
    }

    fn driver(&self) -> &dyn PanelDriver {
        match self {
            Display::Bw(d) => d,
            Display::TriColor(d) => d,
            Display::Grayscale(d) => d,
            Display::MultiColor(d) => d,
            Display::Epd1in02(d) => d,
        }
    }

    fn driver_mut(&mut self) -> &mut dyn PanelDriver {
        match self {
            Display::Bw(d) => d,
            Display::TriColor(d) => d,
            Display::Grayscale(d) => d,
            Display::MultiColor(d) => d,
            Display::Epd1in02(d) => d,
        }
    }

    fn panel(&self) -> &Panel {
        self.driver().panel()
    }
}

impl DisplayAdapter for Display {
    fn descriptor(&self) -> &'static DeviceDescriptor {
        self.panel().descriptor
    }

    fn mode(&self) -> Mode {
        self.panel().mode
    }

    fn dimensions(&self) -> (u32, u32) {
        let panel = self.panel();
        (panel.width, panel.height)
    }

    fn palette_filter(&self) -> &[Rgb888] {
        self.panel().palette_filter.colors()
    }

    fn prepare(&mut self) -> Result<()> {
        let driver = self.driver_mut();
        if driver.panel().prepared {
            return Err(Error::AlreadyPrepared);
        }

        omnipanel_core::debug!(
            "prepare {} in {} mode",
            driver.panel().descriptor.model,
            driver.panel().mode.as_str()
        );
        driver.init()?;
        driver.panel_mut().prepared = true;
        Ok(())
    }

    fn render_and_send(&mut self, image: &Image) -> Result<()> {
        let driver = self.driver_mut();
        if !driver.panel().prepared {
            return Err(Error::NotPrepared);
        }

        let frame = driver.panel().orient(image)?;
        omnipanel_core::debug!(
            "render {}x{} frame on {}",
            frame.width(),
            frame.height(),
            driver.panel().descriptor.model
        );
        driver.send(&frame)
    }

    fn sleep(&mut self) -> Result<()> {
        let driver = self.driver_mut();
        omnipanel_core::debug!("sleep {}", driver.panel().descriptor.model);
        driver.power_down()?;
        // Waking takes a fresh init
        driver.panel_mut().prepared = false;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let driver = self.driver_mut();
        omnipanel_core::debug!("clear {}", driver.panel().descriptor.model);
        driver.blank()
    }

    fn close(mut self) -> Result<()> {
        let panel = self.driver_mut().panel_mut();
        omnipanel_core::info!("close {}", panel.descriptor.model);
        panel.release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omnipanel_core::registry::WAVESHARE_PKG;
    use omnipanel_core::{DriverError, EntryPoint, LoadError, RgbImage, Rotation};
    use omnipanel_hal::mock::{self, Call, CallLog, MockBus, MockPanel};
    use omnipanel_hal::{DriverPackage, PackageLoader};

    const WIDTH: u32 = 16;
    const HEIGHT: u32 = 8;

    fn blank_frame() -> Image {
        Image::Rgb(RgbImage::new(WIDTH, HEIGHT))
    }

    fn open(device: &str, log: &CallLog) -> Display {
        let loader = mock::loader(log, WIDTH, HEIGHT);
        Display::open(device, &DisplayConfig::for_device(device), &loader).unwrap()
    }

    #[test]
    fn test_every_listed_device_opens() {
        let log = CallLog::new();
        let loader = mock::loader(&log, WIDTH, HEIGHT);

        for family in Family::ALL {
            for id in registry::list_supported(&loader, family) {
                let display = Display::open(&id, &DisplayConfig::default(), &loader).unwrap();

                assert_eq!(display.family(), family);
                assert!(!display.supported_modes().is_empty());
                assert_eq!(display.mode(), display.supported_modes()[0]);
                assert_eq!(display.max_colors(), family.max_colors());
                assert_eq!(display.dimensions(), (WIDTH, HEIGHT));
                assert_eq!(format!("{}.{}", WAVESHARE_PKG, display.device_id()), id);
            }
        }
    }

    #[test]
    fn test_scenario_epd7in5_v2() {
        let log = CallLog::new();
        let mut display = open("epd7in5_V2", &log);
        assert_eq!(display.family(), Family::Bw);

        display.prepare().unwrap();
        display.render_and_send(&blank_frame()).unwrap();
        display.sleep().unwrap();
        display.close().unwrap();

        assert_eq!(
            log.entry_points(),
            [
                EntryPoint::Init,
                EntryPoint::GetBuffer,
                EntryPoint::Display,
                EntryPoint::Sleep,
                EntryPoint::ModuleInit,
                EntryPoint::ModuleExit,
            ]
        );
        assert_eq!(log.calls()[0], Call::Init(None));
        assert_eq!(log.calls()[1], Call::GetBuffer(blank_frame()));
    }

    #[test]
    fn test_unsupported_device() {
        let log = CallLog::new();
        let loader = mock::loader(&log, WIDTH, HEIGHT);

        let err = Display::open("epd9in99", &DisplayConfig::default(), &loader).err();
        assert_eq!(err, Some(Error::UnsupportedDevice("epd9in99".into())));
        assert!(log.is_empty());
    }

    #[test]
    fn test_package_not_installed() {
        let loader = PackageLoader::new();

        // Registry membership is checked before the package
        assert!(matches!(
            Display::open("epd9in99", &DisplayConfig::default(), &loader),
            Err(Error::UnsupportedDevice(_))
        ));
        assert_eq!(
            Display::open("epd7in5_V2", &DisplayConfig::default(), &loader).err(),
            Some(Error::DriverLoad(LoadError::NotInstalled(WAVESHARE_PKG.into())))
        );
    }

    #[test]
    fn test_invalid_mode() {
        let log = CallLog::new();
        let loader = mock::loader(&log, WIDTH, HEIGHT);
        let config = DisplayConfig::default().with_mode(Mode::Red);

        assert_eq!(
            Display::open("epd2in13c", &config, &loader).err(),
            Some(Error::InvalidMode {
                device: "epd2in13c".into(),
                mode: "red".into()
            })
        );
        assert!(Display::open("epd7in5_V2", &config, &loader).is_err());
        assert!(Display::open("epd2in13b", &config, &loader).is_ok());
    }

    #[test]
    fn test_from_config() {
        let log = CallLog::new();
        let loader = mock::loader(&log, WIDTH, HEIGHT);

        let config = DisplayConfig::for_device("waveshare_epd.epd2in7").with_mode(Mode::Gray4);
        let display = Display::from_config(&config, &loader).unwrap();
        assert_eq!(display.family(), Family::Grayscale);
        assert_eq!(display.mode(), Mode::Gray4);

        assert!(matches!(
            Display::from_config(&DisplayConfig::default(), &loader),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_render_before_prepare() {
        let log = CallLog::new();
        let mut display = open("epd7in5_V2", &log);

        assert_eq!(display.render_and_send(&blank_frame()), Err(Error::NotPrepared));
        assert!(log.is_empty());
    }

    #[test]
    fn test_prepare_twice() {
        let log = CallLog::new();
        let mut display = open("epd7in5_V2", &log);

        display.prepare().unwrap();
        assert_eq!(display.prepare(), Err(Error::AlreadyPrepared));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_sleep_needs_prepare_to_wake() {
        let log = CallLog::new();
        let mut display = open("epd7in5_V2", &log);

        display.prepare().unwrap();
        display.sleep().unwrap();
        assert_eq!(display.render_and_send(&blank_frame()), Err(Error::NotPrepared));

        display.prepare().unwrap();
        display.render_and_send(&blank_frame()).unwrap();
    }

    #[test]
    fn test_clear_delegates_to_lowercase_entry_point() {
        let log = CallLog::new();
        let mut display = open("epd2in9_V2", &log);

        display.clear().unwrap();
        assert_eq!(log.entry_points(), [EntryPoint::Clear]);
    }

    #[test]
    fn test_frame_size_checked() {
        let log = CallLog::new();
        let mut display = open("epd7in5_V2", &log);
        display.prepare().unwrap();

        let err = display.render_and_send(&Image::Rgb(RgbImage::new(10, 10)));
        assert_eq!(
            err,
            Err(Error::FrameSize {
                width: 10,
                height: 10,
                panel_width: WIDTH,
                panel_height: HEIGHT
            })
        );

        // Quarter turned frames are accepted
        let tall = Image::Rgb(RgbImage::new(HEIGHT, WIDTH));
        display.render_and_send(&tall).unwrap();
    }

    #[test]
    fn test_orientation_applied_before_conversion() {
        let log = CallLog::new();
        let loader = mock::loader(&log, WIDTH, HEIGHT);
        let mut config = DisplayConfig::for_device("epd7in5_V2");
        config.display.rotate = Rotation::Deg180;
        config.display.flip_horizontal = true;
        let mut display = Display::open("epd7in5_V2", &config, &loader).unwrap();

        let mut frame = RgbImage::new(WIDTH, HEIGHT);
        frame.set_pixel(0, 0, Rgb888::new(0, 0, 0));
        let frame = Image::Rgb(frame);

        display.prepare().unwrap();
        display.render_and_send(&frame).unwrap();

        // 180 then a horizontal flip is a vertical flip
        assert_eq!(log.calls()[1], Call::GetBuffer(frame.flipped(false, true)));
    }

    #[test]
    fn test_driver_errors_pass_through() {
        let log = CallLog::new();
        let (panel_log, bus_log) = (log.clone(), log.clone());
        let loader = PackageLoader::new().with_package(
            DriverPackage::new(WAVESHARE_PKG)
                .with_module("epd7in5_V2", move || {
                    Ok(Box::new(
                        MockPanel::new(&panel_log, WIDTH, HEIGHT)
                            .failing(EntryPoint::Display, DriverError::Spi),
                    ))
                })
                .with_bus(move || Box::new(MockBus::new(&bus_log))),
        );
        let mut display =
            Display::open("epd7in5_V2", &DisplayConfig::default(), &loader).unwrap();

        display.prepare().unwrap();
        assert_eq!(
            display.render_and_send(&blank_frame()),
            Err(Error::Driver(DriverError::Spi))
        );
        // No retry
        assert_eq!(
            log.entry_points(),
            [EntryPoint::Init, EntryPoint::GetBuffer, EntryPoint::Display]
        );
    }

    #[test]
    fn test_missing_bus_module() {
        let log = CallLog::new();
        let panel_log = log.clone();
        let loader = PackageLoader::new().with_package(
            DriverPackage::new(WAVESHARE_PKG).with_module("epd7in5_V2", move || {
                Ok(Box::new(MockPanel::new(&panel_log, WIDTH, HEIGHT)))
            }),
        );

        assert_eq!(
            Display::open("epd7in5_V2", &DisplayConfig::default(), &loader).err(),
            Some(Error::DriverLoad(LoadError::MissingModule {
                package: WAVESHARE_PKG.into(),
                module: "epdconfig".into()
            }))
        );
    }

    #[test]
    fn test_drop_releases_bus() {
        let log = CallLog::new();
        {
            let mut display = open("epd7in5_V2", &log);
            display.prepare().unwrap();
        }

        assert_eq!(
            log.entry_points(),
            [EntryPoint::Init, EntryPoint::ModuleInit, EntryPoint::ModuleExit]
        );
    }

    #[test]
    fn test_close_runs_teardown_once() {
        let log = CallLog::new();
        let display = open("epd2in7", &log);

        display.close().unwrap();
        assert_eq!(log.entry_points(), [EntryPoint::ModuleInit, EntryPoint::ModuleExit]);
    }

    #[test]
    fn test_close_reports_bus_failure() {
        let log = CallLog::new();
        let (panel_log, bus_log) = (log.clone(), log.clone());
        let loader = PackageLoader::new().with_package(
            DriverPackage::new(WAVESHARE_PKG)
                .with_module("epd7in5_V2", move || {
                    Ok(Box::new(MockPanel::new(&panel_log, WIDTH, HEIGHT)))
                })
                .with_bus(move || Box::new(MockBus::failing_exit(&bus_log))),
        );

        let display = Display::open("epd7in5_V2", &DisplayConfig::default(), &loader).unwrap();
        assert_eq!(display.close(), Err(Error::Driver(DriverError::Gpio)));

        // Dropping after a failed close does not tear down again
        assert_eq!(log.len(), 2);

        // Dropping without close logs the failure instead of panicking
        let display = Display::open("epd7in5_V2", &DisplayConfig::default(), &loader).unwrap();
        drop(display);
        assert_eq!(log.len(), 4);
    }
}
