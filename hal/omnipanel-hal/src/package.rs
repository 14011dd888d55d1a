//! Driver packages
//!
//! A [`DriverPackage`] groups the driver modules of one vendor under a
//! package name, together with the factory for its `epdconfig` bus module.
//! [`PackageLoader`] holds the packages installed on this system.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use omnipanel_core::traits::BUS_MODULE;
use omnipanel_core::{BusControl, DriverError, DriverLoader, Epd, EpdModule, LoadError};

type EpdFactory = Box<dyn Fn() -> Result<Box<dyn Epd>, DriverError>>;
type BusFactory = Box<dyn Fn() -> Box<dyn BusControl>>;

/// One named driver module
pub struct DriverModule {
    name: String,
    factory: EpdFactory,
}

impl DriverModule {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl EpdModule for DriverModule {
    fn create(&self) -> Result<Box<dyn Epd>, DriverError> {
        (self.factory)()
    }
}

/// A vendor driver package
pub struct DriverPackage {
    name: String,
    modules: Vec<DriverModule>,
    bus: Option<BusFactory>,
}

impl DriverPackage {
    /// Empty package
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            modules: Vec::new(),
            bus: None,
        }
    }

    /// Add a driver module; a later module with the same name replaces it
    pub fn with_module<F>(mut self, name: &str, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn Epd>, DriverError> + 'static,
    {
        self.modules.retain(|m| m.name != name);
        self.modules.push(DriverModule {
            name: name.into(),
            factory: Box::new(factory),
        });
        self
    }

    /// Set the `epdconfig` bus module
    ///
    /// The factory runs once per adapter, so it must open the bus afresh
    /// each time.
    pub fn with_bus<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn BusControl> + 'static,
    {
        self.bus = Some(Box::new(factory));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a driver module by name
    pub fn module(&self, name: &str) -> Option<&DriverModule> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Names of every driver module
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.name.as_str())
    }
}

/// Loader over the packages installed in-process
#[derive(Default)]
pub struct PackageLoader {
    packages: Vec<DriverPackage>,
}

impl PackageLoader {
    /// Loader with no packages installed
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a package, replacing one with the same name
    pub fn install(&mut self, package: DriverPackage) {
        self.packages.retain(|p| p.name != package.name);
        self.packages.push(package);
    }

    /// Builder form of [`install`](Self::install)
    pub fn with_package(mut self, package: DriverPackage) -> Self {
        self.install(package);
        self
    }

    fn package(&self, name: &str) -> Result<&DriverPackage, LoadError> {
        self.packages
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| LoadError::NotInstalled(name.into()))
    }
}

impl DriverLoader for PackageLoader {
    fn is_installed(&self, package: &str) -> bool {
        self.package(package).is_ok()
    }

    fn load_module(&self, package: &str, module: &str) -> Result<&dyn EpdModule, LoadError> {
        let pkg = self.package(package)?;
        match pkg.module(module) {
            Some(m) => Ok(m),
            None => Err(LoadError::MissingModule {
                package: package.into(),
                module: module.into(),
            }),
        }
    }

    fn load_bus(&self, package: &str) -> Result<Box<dyn BusControl>, LoadError> {
        let pkg = self.package(package)?;
        match &pkg.bus {
            Some(factory) => Ok(factory()),
            None => Err(LoadError::MissingModule {
                package: package.into(),
                module: BUS_MODULE.into(),
            }),
        }
    }
}
