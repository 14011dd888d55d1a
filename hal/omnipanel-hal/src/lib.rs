//! Omnipanel driver loader boundary
//!
//! This crate connects the adapter layer to vendor driver code:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  omnipanel-drivers (Display adapters)   │
//! └─────────────────────────────────────────┘
//!                     │ DriverLoader
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  omnipanel-hal (this crate)             │
//! │  PackageLoader ─ DriverPackage          │
//! └─────────────────────────────────────────┘
//!         │                       │
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ vendor Epd    │       │ PinBus        │
//! │ modules       │       │ (epdconfig)   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! - [`package::DriverPackage`] - named driver modules plus the bus module
//! - [`package::PackageLoader`] - resolves package and module names
//! - [`bus::PinBus`] - bus power and teardown over `embedded-hal` pins
//! - `mock` (feature `mock`) - in-memory vendor package that records calls

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod bus;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod package;

pub use bus::PinBus;
pub use package::{DriverModule, DriverPackage, PackageLoader};
