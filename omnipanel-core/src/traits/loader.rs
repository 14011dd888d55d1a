//! Driver loader boundary
//!
//! A driver package (e.g. `waveshare_epd`) is a set of named driver
//! modules, one per panel controller, plus an `epdconfig` companion module
//! that owns the SPI/GPIO bus. A package that is not installed is an
//! expected condition, not a crash.

use alloc::boxed::Box;
use alloc::string::String;
use thiserror::Error;

use super::epd::{DriverError, Epd};

/// Name of the bus companion module inside every driver package
pub const BUS_MODULE: &str = "epdconfig";

/// Errors from resolving a driver package or module
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The vendor package is not present on this system
    #[error("driver package `{0}` is not installed")]
    NotInstalled(String),
    /// The package exists but has no module with this name
    #[error("driver package `{package}` has no module `{module}`")]
    MissingModule {
        /// Package that was searched
        package: String,
        /// Module that was requested
        module: String,
    },
}

/// A loaded driver module
pub trait EpdModule {
    /// Construct the module's EPD object, claiming the panel
    fn create(&self) -> Result<Box<dyn Epd>, DriverError>;
}

/// Bus setup and teardown (`epdconfig`)
pub trait BusControl {
    /// Claim and power the SPI/GPIO bus
    fn module_init(&mut self) -> Result<(), DriverError>;

    /// Release the bus and drive the control pins low
    fn module_exit(&mut self) -> Result<(), DriverError>;
}

/// Resolves package and module names to driver handles
pub trait DriverLoader {
    /// Check whether a vendor package is available
    fn is_installed(&self, package: &str) -> bool;

    /// Resolve a driver module inside a package
    fn load_module(&self, package: &str, module: &str) -> Result<&dyn EpdModule, LoadError>;

    /// Resolve the package's bus companion module
    fn load_bus(&self, package: &str) -> Result<Box<dyn BusControl>, LoadError>;
}
