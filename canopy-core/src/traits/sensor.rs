//! Sensor traits

use super::DeviceError;

/// Result of servicing a light-sensor interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightSample {
    /// 20-bit intensity
    pub raw: u32,
    /// New night flag, or `None` if the reading was inside the band
    pub night: Option<bool>,
    /// Whether the latched interrupt was cleared afterwards
    pub rearmed: bool,
}

/// Result of servicing a temperature-sensor interrupt
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureSample {
    pub celsius: f32,
    /// New overheat flag, or `None` if the reading was inside the band
    pub overheating: Option<bool>,
}

/// Ambient light sensor with hardware threshold interrupt
pub trait AmbientLightSensor {
    /// Read the current intensity
    fn read_raw(&mut self) -> Result<u32, DeviceError>;

    /// Handle one threshold-crossing edge
    ///
    /// Reads, reprograms the threshold window if the reading crossed a
    /// bound, and re-arms the interrupt line. Once the window has been
    /// reprogrammed the sample is returned even if re-arming failed.
    fn service(&mut self) -> Result<LightSample, DeviceError>;
}

/// Temperature sensor with comparator output
pub trait TemperatureSensor {
    /// Read the current temperature in °C
    ///
    /// Takes `&mut self` because bus reads require mutable access.
    fn read_celsius(&mut self) -> Result<f32, DeviceError>;

    /// Handle one comparator edge
    fn service(&mut self) -> Result<TemperatureSample, DeviceError>;
}
