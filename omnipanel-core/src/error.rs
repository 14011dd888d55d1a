//! Caller-facing error type
//!
//! Every fallible adapter operation returns [`Error`]. Failures reported by
//! the vendor driver are carried unchanged in [`Error::Driver`]; this layer
//! never retries a half-finished panel refresh.

use alloc::string::String;
use thiserror::Error;

use crate::traits::{DriverError, LoadError};

/// Errors surfaced to callers of the display adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Device identifier is not in any family's registry
    #[error("unsupported device `{0}`")]
    UnsupportedDevice(String),

    /// Vendor package or driver module is missing
    #[error(transparent)]
    DriverLoad(#[from] LoadError),

    /// Requested mode is not one of the device's supported modes
    #[error("mode `{mode}` is not supported by `{device}`")]
    InvalidMode {
        /// Device the mode was requested for
        device: String,
        /// Mode that was requested
        mode: String,
    },

    /// `render_and_send` called before `prepare`
    #[error("display has not been prepared")]
    NotPrepared,

    /// `prepare` called twice without an intervening `sleep`
    #[error("display is already prepared")]
    AlreadyPrepared,

    /// Frame does not match the panel in either orientation
    #[error("frame is {width}x{height}, panel is {panel_width}x{panel_height}")]
    FrameSize {
        /// Frame width after orientation transforms
        width: u32,
        /// Frame height after orientation transforms
        height: u32,
        /// Panel width reported by the driver
        panel_width: u32,
        /// Panel height reported by the driver
        panel_height: u32,
    },

    /// Configuration could not be parsed or is incomplete
    #[error("configuration error: {0}")]
    Config(String),

    /// Hardware failure reported by the vendor driver
    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// Result alias used throughout omnipanel
pub type Result<T> = core::result::Result<T, Error>;
