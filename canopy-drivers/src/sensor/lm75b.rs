//! LM75B-class temperature sensor
//!
//! The comparator output is configured in interrupt mode: it asserts when
//! the temperature rises past the overtemperature threshold and again when
//! it falls back through the hysteresis threshold. Each assertion is
//! cleared by the next temperature read.
//!
//! After setup the register pointer is parked on the temperature register,
//! so every later read is a plain two-byte read with no pointer write.

use canopy_core::config::TemperatureThresholds;
use canopy_core::hysteresis::TemperatureBand;
use canopy_core::traits::{DeviceError, TemperatureSample, TemperatureSensor};
use canopy_hal::{I2cBus, RegisterBus, TransportError};

/// Default 7-bit bus address
pub const DEFAULT_ADDRESS: u8 = 0x49;

/// Register map
pub mod reg {
    pub const TEMP: u8 = 0x00;
    pub const CONF: u8 = 0x01;
    pub const THYST: u8 = 0x02;
    pub const TOS: u8 = 0x03;
}

/// Comparator in interrupt mode, normal operation
const CONF_OS_INTERRUPT: u8 = 0x02;

/// Degrees per LSB of the 11-bit temperature field
const RESOLUTION_C: f32 = 0.125;

/// Operating range of the part; thresholds are clamped into it
const MIN_C: i16 = -55;
const MAX_C: i16 = 125;

/// Encode a whole-degree threshold as the 9-bit half-degree field,
/// most significant byte first
pub fn encode_threshold(celsius: i16) -> [u8; 2] {
    let half_degrees = celsius.clamp(MIN_C, MAX_C) * 2;
    (half_degrees << 7).to_be_bytes()
}

/// Decode a temperature read
///
/// The first byte read is the low byte of the word; the word's top eleven
/// bits are a two's complement count of eighth degrees.
pub fn decode_temperature(bytes: [u8; 2]) -> f32 {
    let word = i16::from_le_bytes(bytes);
    (word >> 5) as f32 * RESOLUTION_C
}

/// LM75B driver
pub struct Lm75b<B> {
    bus: B,
    address: u8,
    band: TemperatureBand,
}

impl<B: I2cBus> Lm75b<B> {
    /// Create a driver; no bus traffic until [`Self::init`]
    pub fn new(bus: B, address: u8, thresholds: TemperatureThresholds) -> Self {
        Self {
            bus,
            address,
            band: TemperatureBand::new(thresholds),
        }
    }

    /// Configure interrupt mode and both thresholds, then park the
    /// register pointer on the temperature register
    pub fn init(&mut self) -> Result<(), TransportError<B::Error>> {
        let address = self.address;
        let thresholds = self.band.thresholds();

        self.bus
            .write_register_u8(address, reg::CONF, CONF_OS_INTERRUPT)?;
        self.bus
            .write_register(address, reg::THYST, &encode_threshold(thresholds.clear_c))?;
        self.bus
            .write_register(address, reg::TOS, &encode_threshold(thresholds.overheat_c))?;
        self.bus.write(address, &[reg::TEMP])?;
        Ok(())
    }

    /// Read the current temperature in °C
    pub fn read(&mut self) -> Result<f32, B::Error> {
        let mut bytes = [0u8; 2];
        self.bus.read(self.address, &mut bytes)?;
        Ok(decode_temperature(bytes))
    }

    /// Handle one comparator edge
    pub fn handle_crossing(&mut self) -> Result<TemperatureSample, B::Error> {
        let celsius = self.read()?;
        Ok(TemperatureSample {
            celsius,
            overheating: self.band.evaluate(celsius),
        })
    }

    pub fn thresholds(&self) -> TemperatureThresholds {
        self.band.thresholds()
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: I2cBus> TemperatureSensor for Lm75b<B> {
    fn read_celsius(&mut self) -> Result<f32, DeviceError> {
        self.read().map_err(|_| DeviceError::Bus)
    }

    fn service(&mut self) -> Result<TemperatureSample, DeviceError> {
        self.handle_crossing().map_err(|_| DeviceError::Bus)
    }
}
