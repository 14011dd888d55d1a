//! Device registry
//!
//! Static per-family tables mapping a panel model to its driver module,
//! supported modes and init quirks. The tables are the single source of
//! truth for per-device behaviour; adapters read the descriptor instead of
//! comparing model names.
//!
//! Device identifiers are namespaced by vendor package
//! (`waveshare_epd.epd7in5_V2`). A bare model name is accepted too and is
//! resolved in the default package.

mod tables;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use embedded_graphics_core::pixelcolor::{Rgb888, RgbColor};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::DriverLoader;

pub use tables::{
    BW_DEVICES, EPD1IN02_DEVICES, GRAYSCALE_DEVICES, MULTICOLOR_DEVICES, TRICOLOR_DEVICES,
};

/// Vendor package every registered device lives in
pub const WAVESHARE_PKG: &str = "waveshare_epd";

/// Display family
///
/// The family decides how a device is initialised and how frames are
/// converted; it is picked once when the adapter is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Family {
    /// Black/white panels
    Bw,
    /// Black/white plus one accent color (red or yellow)
    TriColor,
    /// 4 level grayscale panels
    Grayscale,
    /// 7 color panels
    MultiColor,
    /// The 1.02 inch panel with its own entry point names
    Epd1in02,
}

impl Family {
    /// Every family, in enumeration order
    pub const ALL: [Family; 5] = [
        Family::Bw,
        Family::TriColor,
        Family::Grayscale,
        Family::MultiColor,
        Family::Epd1in02,
    ];

    /// Number of colors panels of this family can show
    pub const fn max_colors(self) -> u8 {
        match self {
            Family::Bw | Family::Epd1in02 => 2,
            Family::TriColor => 3,
            Family::Grayscale => 4,
            Family::MultiColor => 7,
        }
    }

    /// Registry table for this family
    pub fn devices(self) -> &'static [DeviceDescriptor] {
        match self {
            Family::Bw => BW_DEVICES,
            Family::TriColor => TRICOLOR_DEVICES,
            Family::Grayscale => GRAYSCALE_DEVICES,
            Family::MultiColor => MULTICOLOR_DEVICES,
            Family::Epd1in02 => EPD1IN02_DEVICES,
        }
    }
}

/// Display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// Black and white
    Bw,
    /// Black, white and red
    Red,
    /// Black, white and yellow
    Yellow,
    /// 4 level grayscale
    Gray4,
    /// Full panel color (7 color panels)
    Color,
}

impl Mode {
    /// Mode name as used in configuration
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Bw => "bw",
            Mode::Red => "red",
            Mode::Yellow => "yellow",
            Mode::Gray4 => "gray4",
            Mode::Color => "color",
        }
    }

    /// Accent ink for tri-color modes
    pub const fn accent(self) -> Option<Rgb888> {
        match self {
            Mode::Red => Some(Rgb888::RED),
            Mode::Yellow => Some(Rgb888::YELLOW),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bw" => Ok(Mode::Bw),
            "red" => Ok(Mode::Red),
            "yellow" => Ok(Mode::Yellow),
            "gray4" => Ok(Mode::Gray4),
            "color" => Ok(Mode::Color),
            _ => Err(()),
        }
    }
}

/// Init quirk of a specific device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AltInit {
    /// `init(lut_full_update)`
    LutFullUpdate,
    /// `init(n)` with a fixed update mode number
    ModeParam(u8),
    /// `init(n)` selecting gray depth, paired with `display_1Gray` for bw
    GrayModeNumber {
        /// Init parameter for `gray4`
        gray4: u8,
        /// Init parameter for `bw`
        bw: u8,
    },
}

/// Registry entry for one panel model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Model name, unique within the package
    pub model: &'static str,
    /// Driver module implementing the model (may be shared by several models)
    pub driver: &'static str,
    /// Display family
    pub family: Family,
    /// Supported modes, first entry is the default
    pub modes: &'static [Mode],
    /// Init quirk, `None` for a plain `init()`
    pub alt_init: Option<AltInit>,
}

impl DeviceDescriptor {
    /// Namespaced identifier, e.g. `waveshare_epd.epd7in5_V2`
    pub fn device_id(&self) -> String {
        format!("{}.{}", WAVESHARE_PKG, self.model)
    }

    /// Number of colors the panel can show
    pub const fn max_colors(&self) -> u8 {
        self.family.max_colors()
    }

    /// Mode used when the configuration does not name one
    pub fn default_mode(&self) -> Mode {
        self.modes[0]
    }

    /// Check whether `mode` is allowed for this device
    pub fn supports(&self, mode: Mode) -> bool {
        self.modes.contains(&mode)
    }
}

/// Split a device identifier into `(package, model)`
pub fn split_device_id(device_id: &str) -> (&str, &str) {
    device_id
        .split_once('.')
        .unwrap_or((WAVESHARE_PKG, device_id))
}

/// Look up a device by namespaced or bare identifier
pub fn lookup(device_id: &str) -> Option<&'static DeviceDescriptor> {
    let (package, model) = split_device_id(device_id);
    if package != WAVESHARE_PKG {
        return None;
    }

    Family::ALL
        .iter()
        .flat_map(|family| family.devices())
        .find(|d| d.model == model)
}

/// Namespaced identifiers of every device in `family`
///
/// Returns an empty list when the vendor package is not installed.
pub fn list_supported(loader: &dyn DriverLoader, family: Family) -> Vec<String> {
    if !loader.is_installed(WAVESHARE_PKG) {
        crate::debug!("{} is not installed, no {:?} devices", WAVESHARE_PKG, family);
        return Vec::new();
    }

    family.devices().iter().map(DeviceDescriptor::device_id).collect()
}

/// Namespaced identifiers of every supported device, family by family
pub fn list_all(loader: &dyn DriverLoader) -> Vec<String> {
    Family::ALL
        .iter()
        .flat_map(|family| list_supported(loader, *family))
        .collect()
}
