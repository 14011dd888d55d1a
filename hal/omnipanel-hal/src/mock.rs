//! Recording mock vendor package
//!
//! Stands in for the real `waveshare_epd` package on machines without a
//! panel. Every driver module the registry references is present, each
//! backed by a [`MockPanel`] that appends the entry points it receives to a
//! shared [`CallLog`]. Panels only expose the extension entry points their
//! real counterparts have, so calling the wrong one fails the same way.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use omnipanel_core::frame::pack;
use omnipanel_core::registry::WAVESHARE_PKG;
use omnipanel_core::{
    AltInit, BusControl, DeviceDescriptor, DriverError, EntryPoint, Epd, Family, Image, InitParam,
};

use crate::package::{DriverPackage, PackageLoader};

/// Waveform exposed as `lut_full_update` by LUT based mock panels
pub const MOCK_LUT: &[u8] = &[0x02, 0x02, 0x01, 0x11, 0x12, 0x12, 0x22, 0x22];

/// One recorded vendor call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Init(Option<InitParam>),
    LegacyInit,
    Init4Gray,
    Clear,
    LegacyClear,
    Sleep,
    LegacySleep,
    Display {
        buffer: Vec<u8>,
        accent: Option<Vec<u8>>,
    },
    LegacyDisplay(Vec<u8>),
    Display4Gray(Vec<u8>),
    Display1Gray(Vec<u8>),
    GetBuffer(Image),
    GetBuffer4Gray(Image),
    ModuleInit,
    ModuleExit,
}

impl Call {
    /// Entry point this call went through
    pub fn entry_point(&self) -> EntryPoint {
        match self {
            Call::Init(_) => EntryPoint::Init,
            Call::LegacyInit => EntryPoint::LegacyInit,
            Call::Init4Gray => EntryPoint::Init4Gray,
            Call::Clear => EntryPoint::Clear,
            Call::LegacyClear => EntryPoint::LegacyClear,
            Call::Sleep => EntryPoint::Sleep,
            Call::LegacySleep => EntryPoint::LegacySleep,
            Call::Display { .. } => EntryPoint::Display,
            Call::LegacyDisplay(_) => EntryPoint::LegacyDisplay,
            Call::Display4Gray(_) => EntryPoint::Display4Gray,
            Call::Display1Gray(_) => EntryPoint::Display1Gray,
            Call::GetBuffer(_) => EntryPoint::GetBuffer,
            Call::GetBuffer4Gray(_) => EntryPoint::GetBuffer4Gray,
            Call::ModuleInit => EntryPoint::ModuleInit,
            Call::ModuleExit => EntryPoint::ModuleExit,
        }
    }
}

/// Shared, ordered record of vendor calls
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    /// Snapshot of every call so far
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    /// Entry points called so far, in order
    pub fn entry_points(&self) -> Vec<EntryPoint> {
        self.0.borrow().iter().map(Call::entry_point).collect()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Forget recorded calls
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// In-memory panel
pub struct MockPanel {
    log: CallLog,
    width: u32,
    height: u32,
    lut: Option<Vec<u8>>,
    init_4gray: bool,
    gray4: bool,
    single_gray: bool,
    legacy: bool,
    failure: Option<(EntryPoint, DriverError)>,
}

impl MockPanel {
    /// Plain panel with only the common entry points
    pub fn new(log: &CallLog, width: u32, height: u32) -> Self {
        Self {
            log: log.clone(),
            width,
            height,
            lut: None,
            init_4gray: false,
            gray4: false,
            single_gray: false,
            legacy: false,
            failure: None,
        }
    }

    /// Expose `lut_full_update`
    pub fn with_lut(mut self, lut: Vec<u8>) -> Self {
        self.lut = Some(lut);
        self
    }

    /// Expose `Init_4Gray`
    pub fn with_init_4gray(mut self) -> Self {
        self.init_4gray = true;
        self
    }

    /// Expose `getbuffer_4Gray` and `display_4Gray`
    pub fn with_gray4(mut self) -> Self {
        self.gray4 = true;
        self
    }

    /// Expose `display_1Gray`
    pub fn with_single_gray(mut self) -> Self {
        self.single_gray = true;
        self
    }

    /// Capitalised `Init`/`Display`/`Sleep`/`Clear` instead of the lowercase ones
    pub fn legacy(mut self) -> Self {
        self.legacy = true;
        self
    }

    /// Make `entry` fail with `error` after it has been recorded
    pub fn failing(mut self, entry: EntryPoint, error: DriverError) -> Self {
        self.failure = Some((entry, error));
        self
    }

    fn enter(&self, entry: EntryPoint, available: bool, call: Call) -> Result<(), DriverError> {
        if !available {
            return Err(DriverError::MissingEntryPoint(entry));
        }
        self.log.push(call);
        match self.failure {
            Some((failing, error)) if failing == entry => Err(error),
            _ => Ok(()),
        }
    }

    fn check_len(expected: usize, buffer: &[u8]) -> Result<(), DriverError> {
        if buffer.len() == expected {
            Ok(())
        } else {
            Err(DriverError::BufferSize {
                expected,
                actual: buffer.len(),
            })
        }
    }

    fn mono_len(&self) -> usize {
        pack::buffer_len(self.width, self.height)
    }
}

impl Epd for MockPanel {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn init(&mut self, param: Option<InitParam>) -> Result<(), DriverError> {
        self.enter(EntryPoint::Init, !self.legacy, Call::Init(param))
    }

    fn clear(&mut self) -> Result<(), DriverError> {
        self.enter(EntryPoint::Clear, !self.legacy, Call::Clear)
    }

    fn sleep(&mut self) -> Result<(), DriverError> {
        self.enter(EntryPoint::Sleep, !self.legacy, Call::Sleep)
    }

    fn display(&mut self, buffer: &[u8], accent: Option<&[u8]>) -> Result<(), DriverError> {
        if !self.legacy {
            Self::check_len(self.mono_len(), buffer)?;
            if let Some(accent) = accent {
                Self::check_len(self.mono_len(), accent)?;
            }
        }
        let call = Call::Display {
            buffer: buffer.to_vec(),
            accent: accent.map(<[u8]>::to_vec),
        };
        self.enter(EntryPoint::Display, !self.legacy, call)
    }

    fn get_buffer(&self, image: &Image) -> Result<Vec<u8>, DriverError> {
        self.enter(EntryPoint::GetBuffer, true, Call::GetBuffer(image.clone()))?;
        pack::mono(image, self.width, self.height)
    }

    fn lut_full_update(&self) -> Option<&[u8]> {
        self.lut.as_deref()
    }

    fn init_4gray(&mut self) -> Result<(), DriverError> {
        self.enter(EntryPoint::Init4Gray, self.init_4gray, Call::Init4Gray)
    }

    fn get_buffer_4gray(&self, image: &Image) -> Result<Vec<u8>, DriverError> {
        let call = Call::GetBuffer4Gray(image.clone());
        self.enter(EntryPoint::GetBuffer4Gray, self.gray4, call)?;
        pack::gray4(image, self.width, self.height)
    }

    fn display_4gray(&mut self, buffer: &[u8]) -> Result<(), DriverError> {
        if self.gray4 {
            Self::check_len(pack::gray4_buffer_len(self.width, self.height), buffer)?;
        }
        let call = Call::Display4Gray(buffer.to_vec());
        self.enter(EntryPoint::Display4Gray, self.gray4, call)
    }

    fn display_1gray(&mut self, buffer: &[u8]) -> Result<(), DriverError> {
        if self.single_gray {
            Self::check_len(self.mono_len(), buffer)?;
        }
        let call = Call::Display1Gray(buffer.to_vec());
        self.enter(EntryPoint::Display1Gray, self.single_gray, call)
    }

    fn legacy_init(&mut self) -> Result<(), DriverError> {
        self.enter(EntryPoint::LegacyInit, self.legacy, Call::LegacyInit)
    }

    fn legacy_display(&mut self, buffer: &[u8]) -> Result<(), DriverError> {
        if self.legacy {
            Self::check_len(self.mono_len(), buffer)?;
        }
        let call = Call::LegacyDisplay(buffer.to_vec());
        self.enter(EntryPoint::LegacyDisplay, self.legacy, call)
    }

    fn legacy_sleep(&mut self) -> Result<(), DriverError> {
        self.enter(EntryPoint::LegacySleep, self.legacy, Call::LegacySleep)
    }

    fn legacy_clear(&mut self) -> Result<(), DriverError> {
        self.enter(EntryPoint::LegacyClear, self.legacy, Call::LegacyClear)
    }
}

/// Mock `epdconfig` module
pub struct MockBus {
    log: CallLog,
    fail_exit: bool,
}

impl MockBus {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            fail_exit: false,
        }
    }

    /// Bus whose `module_exit` reports a GPIO failure
    pub fn failing_exit(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            fail_exit: true,
        }
    }
}

impl BusControl for MockBus {
    fn module_init(&mut self) -> Result<(), DriverError> {
        self.log.push(Call::ModuleInit);
        Ok(())
    }

    fn module_exit(&mut self) -> Result<(), DriverError> {
        self.log.push(Call::ModuleExit);
        if self.fail_exit {
            Err(DriverError::Gpio)
        } else {
            Ok(())
        }
    }
}

/// Mock panel with the entry points the real driver for `device` has
pub fn panel_for(log: &CallLog, device: &DeviceDescriptor, width: u32, height: u32) -> MockPanel {
    let panel = MockPanel::new(log, width, height);
    match (device.family, device.alt_init) {
        (Family::Bw, Some(AltInit::LutFullUpdate)) => panel.with_lut(MOCK_LUT.to_vec()),
        (Family::Grayscale, Some(AltInit::GrayModeNumber { .. })) => {
            panel.with_gray4().with_single_gray()
        }
        (Family::Grayscale, _) => panel.with_init_4gray().with_gray4(),
        (Family::Epd1in02, _) => panel.legacy(),
        _ => panel,
    }
}

/// Mock `waveshare_epd` package with every registered driver module
///
/// All panels report the same `width x height`.
pub fn waveshare(log: &CallLog, width: u32, height: u32) -> DriverPackage {
    let mut package = DriverPackage::new(WAVESHARE_PKG);

    for family in Family::ALL {
        for device in family.devices() {
            let log = log.clone();
            package = package.with_module(device.driver, move || {
                Ok(Box::new(panel_for(&log, device, width, height)))
            });
        }
    }

    let log = log.clone();
    package.with_bus(move || Box::new(MockBus::new(&log)))
}

/// Loader with only the mock `waveshare_epd` package installed
pub fn loader(log: &CallLog, width: u32, height: u32) -> PackageLoader {
    PackageLoader::new().with_package(waveshare(log, width, height))
}
