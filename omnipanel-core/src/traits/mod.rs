//! Hardware abstraction traits
//!
//! These traits define the boundary between the adapter logic and the
//! vendor driver packages that actually talk to a panel, plus the
//! capability interface the adapters present to callers.

pub mod display;
pub mod epd;
pub mod loader;

pub use display::DisplayAdapter;
pub use epd::{DriverError, EntryPoint, Epd, InitParam};
pub use loader::{BusControl, DriverLoader, EpdModule, LoadError, BUS_MODULE};
