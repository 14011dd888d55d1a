//! Vendor EPD object trait
//!
//! A vendor driver module constructs one EPD object per panel. The object
//! exposes a small common set of entry points (`init`, `clear`, `sleep`,
//! `display`, `getbuffer`) and, depending on the model, extra ones for
//! grayscale refresh, LUT based init or the capitalised names used by the
//! 1.02 inch driver.
//!
//! Extension entry points have default implementations that fail with
//! [`DriverError::MissingEntryPoint`], so a driver only implements what its
//! panel really has.

use alloc::vec::Vec;
use thiserror::Error;

use crate::frame::Image;

/// Vendor entry points, named the way the driver packages spell them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryPoint {
    /// `init([param])`
    Init,
    /// `Init()` (1.02 inch driver)
    LegacyInit,
    /// `Init_4Gray()`
    Init4Gray,
    /// `clear()`
    Clear,
    /// `Clear()` (1.02 inch driver)
    LegacyClear,
    /// `sleep()`
    Sleep,
    /// `Sleep()` (1.02 inch driver)
    LegacySleep,
    /// `display(buffer[, accent])`
    Display,
    /// `Display(buffer)` (1.02 inch driver)
    LegacyDisplay,
    /// `display_4Gray(buffer)`
    Display4Gray,
    /// `display_1Gray(buffer)`
    Display1Gray,
    /// `getbuffer(image)`
    GetBuffer,
    /// `getbuffer_4Gray(image)`
    GetBuffer4Gray,
    /// `lut_full_update` constant
    LutFullUpdate,
    /// `epdconfig.module_init()`
    ModuleInit,
    /// `epdconfig.module_exit()`
    ModuleExit,
}

impl EntryPoint {
    /// Name of the entry point as exposed by the vendor package
    pub const fn name(self) -> &'static str {
        match self {
            EntryPoint::Init => "init",
            EntryPoint::LegacyInit => "Init",
            EntryPoint::Init4Gray => "Init_4Gray",
            EntryPoint::Clear => "clear",
            EntryPoint::LegacyClear => "Clear",
            EntryPoint::Sleep => "sleep",
            EntryPoint::LegacySleep => "Sleep",
            EntryPoint::Display => "display",
            EntryPoint::LegacyDisplay => "Display",
            EntryPoint::Display4Gray => "display_4Gray",
            EntryPoint::Display1Gray => "display_1Gray",
            EntryPoint::GetBuffer => "getbuffer",
            EntryPoint::GetBuffer4Gray => "getbuffer_4Gray",
            EntryPoint::LutFullUpdate => "lut_full_update",
            EntryPoint::ModuleInit => "module_init",
            EntryPoint::ModuleExit => "module_exit",
        }
    }
}

/// Errors reported by a vendor driver
///
/// These are passed through to callers untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// SPI transfer failed
    #[error("SPI transfer failed")]
    Spi,
    /// GPIO access failed
    #[error("GPIO access failed")]
    Gpio,
    /// Panel never released its busy line
    #[error("panel stayed busy")]
    BusyTimeout,
    /// Driver does not provide the requested entry point
    #[error("driver has no `{}` entry point", .0.name())]
    MissingEntryPoint(EntryPoint),
    /// Buffer handed to the driver has the wrong length
    #[error("buffer is {actual} bytes, driver expects {expected}")]
    BufferSize {
        /// Length the driver expects
        expected: usize,
        /// Length it was given
        actual: usize,
    },
}

/// Parameter passed to `init`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitParam {
    /// Waveform LUT, typically the driver's `lut_full_update`
    Lut(Vec<u8>),
    /// Numeric update mode (full/partial refresh or gray depth)
    Mode(u8),
}

/// Vendor EPD object
///
/// Calls block for as long as the physical refresh takes, which can be
/// several seconds.
pub trait Epd {
    /// Panel width in pixels
    fn width(&self) -> u32;

    /// Panel height in pixels
    fn height(&self) -> u32;

    /// `init()` or `init(param)`
    fn init(&mut self, param: Option<InitParam>) -> Result<(), DriverError>;

    /// Clear the panel to white
    fn clear(&mut self) -> Result<(), DriverError>;

    /// Put the panel into deep sleep
    fn sleep(&mut self) -> Result<(), DriverError>;

    /// Send one frame buffer, plus the accent plane on tri-color panels
    fn display(&mut self, buffer: &[u8], accent: Option<&[u8]>) -> Result<(), DriverError>;

    /// Convert an image to the driver's native buffer format
    fn get_buffer(&self, image: &Image) -> Result<Vec<u8>, DriverError>;

    /// Full update waveform used as the init parameter by LUT based drivers
    fn lut_full_update(&self) -> Option<&[u8]> {
        None
    }

    /// `Init_4Gray()`
    fn init_4gray(&mut self) -> Result<(), DriverError> {
        Err(DriverError::MissingEntryPoint(EntryPoint::Init4Gray))
    }

    /// `getbuffer_4Gray(image)`
    fn get_buffer_4gray(&self, _image: &Image) -> Result<Vec<u8>, DriverError> {
        Err(DriverError::MissingEntryPoint(EntryPoint::GetBuffer4Gray))
    }

    /// `display_4Gray(buffer)`
    fn display_4gray(&mut self, _buffer: &[u8]) -> Result<(), DriverError> {
        Err(DriverError::MissingEntryPoint(EntryPoint::Display4Gray))
    }

    /// `display_1Gray(buffer)`
    fn display_1gray(&mut self, _buffer: &[u8]) -> Result<(), DriverError> {
        Err(DriverError::MissingEntryPoint(EntryPoint::Display1Gray))
    }

    /// `Init()`
    fn legacy_init(&mut self) -> Result<(), DriverError> {
        Err(DriverError::MissingEntryPoint(EntryPoint::LegacyInit))
    }

    /// `Display(buffer)`
    fn legacy_display(&mut self, _buffer: &[u8]) -> Result<(), DriverError> {
        Err(DriverError::MissingEntryPoint(EntryPoint::LegacyDisplay))
    }

    /// `Sleep()`
    fn legacy_sleep(&mut self) -> Result<(), DriverError> {
        Err(DriverError::MissingEntryPoint(EntryPoint::LegacySleep))
    }

    /// `Clear()`
    fn legacy_clear(&mut self) -> Result<(), DriverError> {
        Err(DriverError::MissingEntryPoint(EntryPoint::LegacyClear))
    }
}
