//! Board-agnostic core of the omnipanel e-paper shim
//!
//! This crate holds everything that does not depend on a concrete vendor
//! driver package:
//!
//! - Device registry (which model belongs to which display family)
//! - Display modes, families and per-model init quirks
//! - Image frames, palette filtering and buffer packing helpers
//! - Vendor driver traits (`Epd`, `DriverLoader`, `BusControl`)
//! - The caller-facing `DisplayAdapter` trait
//! - Configuration types and error types

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

// Logging macros: defmt when enabled, otherwise the log facade
cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        pub use defmt::{trace, debug, info, warn, error};
    }
    else if #[cfg(feature = "log")] {
        pub use log::{trace, debug, info, warn, error};
    }
}

// No-op fallbacks stay outside `cfg_if!` so `crate::debug!` resolves inside
// this crate too
#[cfg(not(any(feature = "defmt", feature = "log")))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {{}};
}
#[cfg(not(any(feature = "defmt", feature = "log")))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{}};
}
#[cfg(not(any(feature = "defmt", feature = "log")))]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{}};
}
#[cfg(not(any(feature = "defmt", feature = "log")))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{}};
}
#[cfg(not(any(feature = "defmt", feature = "log")))]
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{}};
}

pub mod config;
pub mod error;
pub mod frame;
pub mod registry;
pub mod traits;

pub use config::{DisplayConfig, EpdConfig, TransformConfig};
pub use error::{Error, Result};
pub use frame::{Image, IndexedImage, Palette, PaletteFilter, RgbImage, Rotation};
pub use registry::{AltInit, DeviceDescriptor, Family, Mode};
pub use traits::{
    BusControl, DisplayAdapter, DriverError, DriverLoader, EntryPoint, Epd, EpdModule,
    InitParam, LoadError,
};
