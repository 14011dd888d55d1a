//! State shared by every family adapter
//!
//! [`Panel`] owns the vendor EPD object and the bus module and tracks the
//! prepare/sleep lifecycle. Family adapters only supply the init and
//! conversion steps through [`PanelDriver`].

use alloc::borrow::Cow;
use alloc::boxed::Box;

use omnipanel_core::registry::WAVESHARE_PKG;
use omnipanel_core::{
    BusControl, DeviceDescriptor, DisplayConfig, DriverLoader, Epd, Error, Image, Mode,
    PaletteFilter, Result, TransformConfig,
};

pub(crate) struct Panel {
    pub(crate) descriptor: &'static DeviceDescriptor,
    pub(crate) mode: Mode,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) palette_filter: PaletteFilter,
    pub(crate) device: Box<dyn Epd>,
    transform: TransformConfig,
    bus: Option<Box<dyn BusControl>>,
    pub(crate) prepared: bool,
}

impl Panel {
    /// Load the driver module and bus module for `descriptor` and claim the panel
    pub(crate) fn open(
        descriptor: &'static DeviceDescriptor,
        config: &DisplayConfig,
        loader: &dyn DriverLoader,
    ) -> Result<Self> {
        let mode = match config.epd.mode {
            None => descriptor.default_mode(),
            Some(mode) if descriptor.supports(mode) => mode,
            Some(mode) => {
                return Err(Error::InvalidMode {
                    device: descriptor.model.into(),
                    mode: mode.as_str().into(),
                })
            }
        };

        let module = loader.load_module(WAVESHARE_PKG, descriptor.driver)?;
        let bus = loader.load_bus(WAVESHARE_PKG)?;
        let device = module.create()?;
        let (width, height) = (device.width(), device.height());

        omnipanel_core::info!(
            "opened {} via {} ({}x{}, mode {})",
            descriptor.model,
            descriptor.driver,
            width,
            height,
            mode.as_str()
        );

        Ok(Self {
            descriptor,
            mode,
            width,
            height,
            palette_filter: PaletteFilter::monochrome(),
            device,
            transform: config.display,
            bus: Some(bus),
            prepared: false,
        })
    }

    /// Apply the configured rotation and flips, then check the frame fits
    ///
    /// Frames may arrive in panel orientation or turned a quarter; the
    /// vendor buffer routines accept both.
    pub(crate) fn orient<'a>(&self, image: &'a Image) -> Result<Cow<'a, Image>> {
        let oriented = if self.transform.is_identity() {
            Cow::Borrowed(image)
        } else {
            let t = &self.transform;
            Cow::Owned(
                image
                    .rotated(t.rotate)
                    .flipped(t.flip_horizontal, t.flip_vertical),
            )
        };

        let (width, height) = oriented.size();
        if (width, height) == (self.width, self.height)
            || (width, height) == (self.height, self.width)
        {
            Ok(oriented)
        } else {
            Err(Error::FrameSize {
                width,
                height,
                panel_width: self.width,
                panel_height: self.height,
            })
        }
    }

    /// Bring the bus module up and straight back down
    ///
    /// Leaves every control pin low. Runs at most once.
    pub(crate) fn release(&mut self) -> Result<()> {
        let Some(mut bus) = self.bus.take() else {
            return Ok(());
        };
        self.prepared = false;

        let init = bus.module_init();
        let exit = bus.module_exit();
        init.and(exit)?;
        Ok(())
    }
}

impl Drop for Panel {
    fn drop(&mut self) {
        if self.bus.is_none() {
            return;
        }
        if self.release().is_err() {
            omnipanel_core::warn!(
                "releasing {} on drop failed, control pins may be left high",
                self.descriptor.model
            );
        }
    }
}

/// Family-specific half of an adapter
pub(crate) trait PanelDriver {
    fn panel(&self) -> &Panel;

    fn panel_mut(&mut self) -> &mut Panel;

    /// Initialise the controller for the active mode
    fn init(&mut self) -> Result<()>;

    /// Convert an oriented frame and refresh the panel
    fn send(&mut self, image: &Image) -> Result<()>;

    fn power_down(&mut self) -> Result<()> {
        self.panel_mut().device.sleep()?;
        Ok(())
    }

    fn blank(&mut self) -> Result<()> {
        self.panel_mut().device.clear()?;
        Ok(())
    }
}
