//! LED output drivers

pub mod spi;

pub use spi::SpiLed;
