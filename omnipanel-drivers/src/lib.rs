//! Display adapter implementations
//!
//! This crate provides one adapter per e-paper family, implementing
//! [`omnipanel_core::DisplayAdapter`]:
//!
//! - Black/white panels (plain, LUT and mode-number init)
//! - Tri-color panels (black/white plus red or yellow)
//! - 4 level grayscale panels
//! - 7 color panels
//! - The 1.02 inch panel with its capitalised entry points
//!
//! [`Display`] picks the family once, from the device registry, when it is
//! opened.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod bw;
pub mod display;
pub mod epd1in02;
pub mod grayscale;
pub mod multicolor;
mod panel;
pub mod tricolor;

pub use bw::BwDisplay;
pub use display::Display;
pub use epd1in02::Epd1in02Display;
pub use grayscale::GrayscaleDisplay;
pub use multicolor::MultiColorDisplay;
pub use tricolor::TriColorDisplay;
