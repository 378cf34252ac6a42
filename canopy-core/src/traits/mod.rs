//! Hardware abstraction traits
//!
//! These traits define the interface between the coordinator and the
//! chip drivers in `canopy-drivers`.

pub mod display;
pub mod led;
pub mod sensor;

pub use display::CharacterDisplay;
pub use led::LedOutput;
pub use sensor::{AmbientLightSensor, LightSample, TemperatureSample, TemperatureSensor};

/// Errors a device reports to the coordinator
///
/// Drivers carry their own bus-specific error types; these are what is
/// left once they cross into board-agnostic code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError {
    /// Bus transfer failed
    Bus,
    /// Transaction could not be framed
    Framing,
}

impl<E> From<canopy_hal::TransportError<E>> for DeviceError {
    fn from(e: canopy_hal::TransportError<E>) -> Self {
        match e {
            canopy_hal::TransportError::Bus(_) => DeviceError::Bus,
            canopy_hal::TransportError::PayloadTooLong => DeviceError::Framing,
        }
    }
}
