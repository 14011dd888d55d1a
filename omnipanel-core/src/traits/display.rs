//! Display adapter capability
//!
//! The one interface callers use regardless of which panel family sits
//! behind it.
//!
//! ## Lifecycle
//! 1. construct (loads the vendor driver, reads the panel size)
//! 2. `prepare()` once
//! 3. `render_and_send(image)` per frame
//! 4. `sleep()`; call `prepare()` again to wake
//! 5. `close()` exactly once, after the last refresh has returned
//!
//! Nothing here is thread safe and every call blocks for the full physical
//! refresh. Only one adapter may drive a given SPI/GPIO bus at a time.
//!
//! Whether `sleep()` and `clear()` are idempotent is up to the vendor
//! driver. Do not rely on calling them twice.

use embedded_graphics_core::pixelcolor::Rgb888;

use crate::error::Result;
use crate::frame::Image;
use crate::registry::{DeviceDescriptor, Mode};

/// Abstract e-paper display
pub trait DisplayAdapter {
    /// Registry entry the adapter was built from
    fn descriptor(&self) -> &'static DeviceDescriptor;

    /// Bare model name, e.g. `epd7in5_V2`
    fn device_id(&self) -> &'static str {
        self.descriptor().model
    }

    /// Active color/refresh mode
    fn mode(&self) -> Mode;

    /// Modes this device accepts, first entry is the default
    fn supported_modes(&self) -> &'static [Mode] {
        self.descriptor().modes
    }

    /// Number of distinct colors the panel can show
    fn max_colors(&self) -> u8 {
        self.descriptor().max_colors()
    }

    /// Panel size as reported by the driver, `(width, height)`
    fn dimensions(&self) -> (u32, u32);

    /// Colors images are reduced to before conversion, where filtering applies
    fn palette_filter(&self) -> &[Rgb888];

    /// One-time device initialisation
    fn prepare(&mut self) -> Result<()>;

    /// Convert `image` to the driver's buffer format and refresh the panel
    fn render_and_send(&mut self, image: &Image) -> Result<()>;

    /// Enter low-power state
    fn sleep(&mut self) -> Result<()>;

    /// Clear the panel to blank
    fn clear(&mut self) -> Result<()>;

    /// Release the SPI/GPIO bus
    fn close(self) -> Result<()>
    where
        Self: Sized;
}
