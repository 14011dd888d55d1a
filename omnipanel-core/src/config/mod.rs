//! Display configuration
//!
//! Options recognised by the adapter. The configuration file itself is
//! owned by the application; it hands the relevant sections over either as
//! already-built structs or as TOML text:
//!
//! ```toml
//! [epd]
//! device = "waveshare_epd.epd2in13b_V3"
//! mode = "red"
//!
//! [display]
//! rotate = 90
//! flip_horizontal = false
//! flip_vertical = false
//! ```

use alloc::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::frame::Rotation;
use crate::registry::Mode;

/// Panel selection (`[epd]`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EpdConfig {
    /// Device identifier, namespaced (`waveshare_epd.epd7in5_V2`) or bare
    pub device: Option<String>,
    /// Color/refresh mode; the device's default when unset
    pub mode: Option<Mode>,
}

/// Frame orientation (`[display]`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransformConfig {
    /// Counter-clockwise rotation applied before conversion
    pub rotate: Rotation,
    /// Mirror left-right after rotating
    pub flip_horizontal: bool,
    /// Mirror top-bottom after rotating
    pub flip_vertical: bool,
}

impl TransformConfig {
    /// True when frames pass through unchanged
    pub fn is_identity(&self) -> bool {
        self.rotate == Rotation::Deg0 && !self.flip_horizontal && !self.flip_vertical
    }
}

/// Everything the adapter reads from configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    pub epd: EpdConfig,
    pub display: TransformConfig,
}

impl DisplayConfig {
    /// Configuration for `device` with every other option at its default
    pub fn for_device(device: &str) -> Self {
        Self {
            epd: EpdConfig {
                device: Some(device.into()),
                mode: None,
            },
            display: TransformConfig::default(),
        }
    }

    /// Select a mode
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.epd.mode = Some(mode);
        self
    }

    /// Parse the `[epd]` and `[display]` sections of a TOML document
    ///
    /// Other sections are ignored.
    #[cfg(feature = "toml")]
    pub fn from_toml(input: &str) -> crate::Result<Self> {
        use alloc::string::ToString;

        toml::from_str(input).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
