//! SPI LED current driver
//!
//! Every command is one three-byte frame `[opcode, register, value]`
//! sent as a single `SpiDevice` transaction, so chip select framing
//! belongs to whoever builds the device (`ExclusiveDevice` on the board).

use canopy_core::state::LedSource;
use canopy_core::traits::{DeviceError, LedOutput};
use embedded_hal::spi::SpiDevice;

/// Register write opcode
pub const WRITE_OPCODE: u8 = 0x40;

/// Register map
pub mod reg {
    pub const BRIGHTNESS: u8 = 0x01;
    pub const SOURCE: u8 = 0x02;
}

/// Build a register write frame
pub const fn frame(register: u8, value: u8) -> [u8; 3] {
    [WRITE_OPCODE, register, value]
}

/// Value written to the source register
pub const fn source_code(source: LedSource) -> u8 {
    match source {
        LedSource::Light => 0x00,
        LedSource::Manual => 0x01,
    }
}

/// LED driver on its own SPI device
pub struct SpiLed<S> {
    spi: S,
    level: u8,
    source: LedSource,
}

impl<S: SpiDevice> SpiLed<S> {
    pub fn new(spi: S) -> Self {
        Self {
            spi,
            level: 0,
            source: LedSource::default(),
        }
    }

    /// Write one register
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), S::Error> {
        self.spi.write(&frame(register, value))
    }

    /// Last level written
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Last source written
    pub fn source(&self) -> LedSource {
        self.source
    }

    /// Give the device back
    pub fn release(self) -> S {
        self.spi
    }
}

impl<S: SpiDevice> LedOutput for SpiLed<S> {
    fn set_brightness(&mut self, level: u8) -> Result<(), DeviceError> {
        self.write_register(reg::BRIGHTNESS, level)
            .map_err(|_| DeviceError::Bus)?;
        self.level = level;
        Ok(())
    }

    fn set_source(&mut self, source: LedSource) -> Result<(), DeviceError> {
        self.write_register(reg::SOURCE, source_code(source))
            .map_err(|_| DeviceError::Bus)?;
        self.source = source;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockCs, MockSpiBus, MockSpiDevice, SpiEvent, SpiLog};
    use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};

    type BoardLed = SpiLed<ExclusiveDevice<MockSpiBus, MockCs, NoDelay>>;

    fn exclusive_led(log: &SpiLog, fail: bool) -> BoardLed {
        let bus = MockSpiBus::new(log, fail);
        let cs = MockCs::new(log);
        SpiLed::new(ExclusiveDevice::new_no_delay(bus, cs).unwrap())
    }

    /// Events without the bus flushes, which are an `ExclusiveDevice` detail
    fn framing(log: &SpiLog) -> Vec<SpiEvent> {
        log.borrow()
            .iter()
            .filter(|e| **e != SpiEvent::Flush)
            .cloned()
            .collect()
    }

    #[test]
    fn test_new_sends_nothing() {
        let led = SpiLed::new(MockSpiDevice::default());
        assert_eq!(led.level(), 0);
        assert_eq!(led.source(), LedSource::Light);
        assert!(led.release().frames.is_empty());
    }

    #[test]
    fn test_brightness_frame() {
        let mut led = SpiLed::new(MockSpiDevice::default());
        led.set_brightness(0xFF).unwrap();

        assert_eq!(led.level(), 0xFF);
        assert_eq!(led.release().frames, [vec![0x40, 0x01, 0xFF]]);
    }

    #[test]
    fn test_source_frames() {
        let mut led = SpiLed::new(MockSpiDevice::default());
        led.set_source(LedSource::Manual).unwrap();
        led.set_source(LedSource::Light).unwrap();

        assert_eq!(led.source(), LedSource::Light);
        assert_eq!(
            led.release().frames,
            [vec![0x40, 0x02, 0x01], vec![0x40, 0x02, 0x00]]
        );
    }

    #[test]
    fn test_failed_write_keeps_last_level() {
        let mut led = SpiLed::new(MockSpiDevice {
            fail: true,
            ..Default::default()
        });
        assert_eq!(led.set_brightness(0xFF), Err(DeviceError::Bus));
        assert_eq!(led.set_source(LedSource::Manual), Err(DeviceError::Bus));
        assert_eq!(led.level(), 0);
        assert_eq!(led.source(), LedSource::Light);
    }

    #[test]
    fn test_frame_is_one_chip_select_pulse() {
        let log = SpiLog::default();
        let mut led = exclusive_led(&log, false);
        led.set_brightness(0x80).unwrap();

        assert_eq!(
            framing(&log),
            [
                SpiEvent::CsHigh,
                SpiEvent::CsLow,
                SpiEvent::Write(vec![0x40, 0x01, 0x80]),
                SpiEvent::CsHigh,
            ]
        );
    }

    #[test]
    fn test_chip_select_released_when_transfer_fails() {
        let log = SpiLog::default();
        let mut led = exclusive_led(&log, true);

        assert_eq!(led.set_brightness(0x80), Err(DeviceError::Bus));
        assert_eq!(led.level(), 0);
        assert_eq!(framing(&log).last(), Some(&SpiEvent::CsHigh));
        assert!(!framing(&log).iter().any(|e| matches!(e, SpiEvent::Write(_))));
    }
}
