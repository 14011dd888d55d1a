//! `epdconfig` bus module over embedded-hal
//!
//! Powers the panel on `module_init` and drives every control pin low on
//! `module_exit`, so a closed panel never sits with RST or DC floating high.

use embedded_hal::digital::OutputPin;
use omnipanel_core::{BusControl, DriverError};

/// Control pins of one panel
///
/// - `RST`: panel reset (active low)
/// - `DC`: data/command select
/// - `PWR`: panel power switch (active high)
pub struct PinBus<RST, DC, PWR> {
    rst: RST,
    dc: DC,
    pwr: PWR,
    powered: bool,
}

impl<RST, DC, PWR> PinBus<RST, DC, PWR>
where
    RST: OutputPin,
    DC: OutputPin,
    PWR: OutputPin,
{
    pub fn new(rst: RST, dc: DC, pwr: PWR) -> Self {
        Self {
            rst,
            dc,
            pwr,
            powered: false,
        }
    }

    /// Whether `module_init` ran without a matching `module_exit`
    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Give the pins back
    pub fn release(self) -> (RST, DC, PWR) {
        (self.rst, self.dc, self.pwr)
    }
}

impl<RST, DC, PWR> BusControl for PinBus<RST, DC, PWR>
where
    RST: OutputPin,
    DC: OutputPin,
    PWR: OutputPin,
{
    fn module_init(&mut self) -> Result<(), DriverError> {
        self.pwr.set_high().map_err(|_| DriverError::Gpio)?;
        self.powered = true;
        Ok(())
    }

    fn module_exit(&mut self) -> Result<(), DriverError> {
        // Try every pin even if one fails, then report the first failure
        let rst = self.rst.set_low().map_err(|_| DriverError::Gpio);
        let dc = self.dc.set_low().map_err(|_| DriverError::Gpio);
        let pwr = self.pwr.set_low().map_err(|_| DriverError::Gpio);
        self.powered = false;

        rst.and(dc).and(pwr)
    }
}
