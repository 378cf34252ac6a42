//! Shared device state
//!
//! Only mutated by the coordinator, after a successful sensor read or a
//! button press. Never touched from edge context, so it needs no
//! synchronization.

/// What drives the LED brightness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedSource {
    /// Follows the ambient light sensor
    #[default]
    Light,
    /// Fixed level chosen by the user
    Manual,
}

impl LedSource {
    /// The other source
    pub const fn toggled(self) -> Self {
        match self {
            LedSource::Light => LedSource::Manual,
            LedSource::Manual => LedSource::Light,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LedSource::Light => "Auto",
            LedSource::Manual => "Manual",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceState {
    pub is_night: bool,
    pub is_overheating: bool,
    pub led_source: LedSource,
    /// Last decoded temperature, if any reading succeeded yet
    pub temperature_c: Option<f32>,
}

impl DeviceState {
    pub const fn new() -> Self {
        Self {
            is_night: false,
            is_overheating: false,
            led_source: LedSource::Light,
            temperature_c: None,
        }
    }
}
