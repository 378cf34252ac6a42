//! LTR-390 ambient light sensor
//!
//! Runs in ALS mode with 20-bit resolution and 18x gain. The sensor
//! interrupts when two consecutive readings fall outside its threshold
//! window; the driver narrows that window after each transition so only
//! the opposite crossing can fire next.
//!
//! Reading the status register clears a latched interrupt, so it is the
//! last step of every service and is attempted even when an earlier step
//! failed; an uncleared latch holds the line low and no further edge
//! would arrive.

use canopy_core::config::{LightThresholds, LIGHT_MAX_COUNTS};
use canopy_core::hysteresis::{LightBand, ThresholdPair};
use canopy_core::traits::{AmbientLightSensor, DeviceError, LightSample};
use canopy_hal::{I2cBus, RegisterBus, TransportError};

/// Default 7-bit bus address
pub const DEFAULT_ADDRESS: u8 = 0x52;

/// Register map
pub mod reg {
    pub const MAIN_CTRL: u8 = 0x00;
    pub const MEAS_RATE: u8 = 0x04;
    pub const GAIN: u8 = 0x05;
    pub const MAIN_STATUS: u8 = 0x07;
    pub const ALS_DATA: u8 = 0x0D;
    pub const INT_CFG: u8 = 0x19;
    pub const INT_PST: u8 = 0x1A;
    pub const THRES_UP: u8 = 0x21;
    pub const THRES_LOW: u8 = 0x24;
}

/// Values written during setup
mod setup {
    /// ALS mode, sensor active
    pub const MAIN_CTRL_ALS_ENABLE: u8 = 0x02;
    /// 20-bit resolution, 25 ms rate
    pub const MEAS_RATE_20BIT: u8 = 0x00;
    /// 18x gain
    pub const GAIN_18X: u8 = 0x04;
    /// ALS channel, interrupt enabled
    pub const INT_CFG_ALS: u8 = 0x14;
    /// Interrupt after two consecutive out-of-window readings
    pub const INT_PST_TWO: u8 = 0x10;
}

/// Encode a threshold as the sensor's 3-byte little-endian field
///
/// Only the low 20 bits are kept.
pub fn encode_threshold(counts: u32) -> [u8; 3] {
    let counts = counts & LIGHT_MAX_COUNTS;
    [counts as u8, (counts >> 8) as u8, ((counts >> 16) & 0x0F) as u8]
}

/// Decode the 3-byte little-endian data field into a 20-bit reading
pub fn decode_reading(bytes: [u8; 3]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0]) & LIGHT_MAX_COUNTS
}

/// LTR-390 driver
pub struct Ltr390<B> {
    bus: B,
    address: u8,
    band: LightBand,
    window: ThresholdPair,
}

impl<B: I2cBus> Ltr390<B> {
    /// Create a driver; no bus traffic until [`Self::init`]
    pub fn new(bus: B, address: u8, thresholds: LightThresholds) -> Self {
        let band = LightBand::new(thresholds);
        Self {
            bus,
            address,
            band,
            window: band.initial(),
        }
    }

    /// Power up, configure measurement and arm the threshold interrupt
    ///
    /// Every step is attempted once; the first failure aborts the rest.
    pub fn init(&mut self) -> Result<(), TransportError<B::Error>> {
        let address = self.address;
        self.bus
            .write_register_u8(address, reg::MAIN_CTRL, setup::MAIN_CTRL_ALS_ENABLE)?;
        self.bus
            .write_register_u8(address, reg::MEAS_RATE, setup::MEAS_RATE_20BIT)?;
        self.bus.write_register_u8(address, reg::GAIN, setup::GAIN_18X)?;
        self.bus
            .write_register_u8(address, reg::INT_CFG, setup::INT_CFG_ALS)?;
        self.bus
            .write_register_u8(address, reg::INT_PST, setup::INT_PST_TWO)?;
        self.program_window(self.band.initial())
    }

    /// Read the current 20-bit intensity
    pub fn read(&mut self) -> Result<u32, B::Error> {
        let mut bytes = [0u8; 3];
        self.bus
            .read_register(self.address, reg::ALS_DATA, &mut bytes)?;
        Ok(decode_reading(bytes))
    }

    /// Read the status register, clearing a latched interrupt
    pub fn read_status(&mut self) -> Result<u8, B::Error> {
        let mut status = [0u8; 1];
        self.bus
            .read_register(self.address, reg::MAIN_STATUS, &mut status)?;
        Ok(status[0])
    }

    /// Program both threshold registers
    ///
    /// The bound being armed goes out before the one being parked, so a
    /// write that fails halfway leaves both bounds armed rather than none.
    pub fn program_window(&mut self, window: ThresholdPair) -> Result<(), TransportError<B::Error>> {
        let address = self.address;
        let upper = (reg::THRES_UP, encode_threshold(window.upper));
        let lower = (reg::THRES_LOW, encode_threshold(window.lower));
        let order = if window.upper == LIGHT_MAX_COUNTS {
            [lower, upper]
        } else {
            [upper, lower]
        };
        for (register, value) in order {
            self.bus.write_register(address, register, &value)?;
        }
        self.window = window;
        Ok(())
    }

    /// Handle one interrupt edge
    ///
    /// Reads, reprograms the window on a transition, then clears the
    /// interrupt by reading the status register. A failed status read
    /// does not discard a decision the window already reflects; it is
    /// reported through [`LightSample::rearmed`].
    pub fn handle_crossing(&mut self) -> Result<LightSample, TransportError<B::Error>> {
        let outcome = self.evaluate();
        let rearmed = self.read_status().is_ok();
        outcome.map(|sample| LightSample { rearmed, ..sample })
    }

    fn evaluate(&mut self) -> Result<LightSample, TransportError<B::Error>> {
        let raw = self.read()?;
        let decision = self.band.evaluate(raw);
        if let Some(decision) = decision {
            self.program_window(decision.band)?;
        }
        Ok(LightSample {
            raw,
            night: decision.map(|d| d.night),
            rearmed: false,
        })
    }

    /// Currently programmed window
    pub fn window(&self) -> ThresholdPair {
        self.window
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: I2cBus> AmbientLightSensor for Ltr390<B> {
    fn read_raw(&mut self) -> Result<u32, DeviceError> {
        self.read().map_err(|_| DeviceError::Bus)
    }

    fn service(&mut self) -> Result<LightSample, DeviceError> {
        self.handle_crossing().map_err(DeviceError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockBus, Transaction};

    fn sensor() -> Ltr390<MockBus> {
        Ltr390::new(MockBus::default(), DEFAULT_ADDRESS, LightThresholds::default())
    }

    #[test]
    fn test_threshold_encoding() {
        assert_eq!(encode_threshold(1500), [0xDC, 0x05, 0x00]);
        assert_eq!(encode_threshold(1000), [0xE8, 0x03, 0x00]);
        assert_eq!(encode_threshold(0xF_FFFF), [0xFF, 0xFF, 0x0F]);
        assert_eq!(encode_threshold(0xFFF_FFFF), [0xFF, 0xFF, 0x0F]);
    }

    #[test]
    fn test_reading_decode() {
        assert_eq!(decode_reading([0xE8, 0x03, 0x00]), 1000);
        assert_eq!(decode_reading([0xFF, 0xFF, 0xFF]), 0xF_FFFF);
    }

    #[test]
    fn test_init_sequence() {
        let mut s = sensor();
        s.init().unwrap();

        let writes = s.release().writes_to(DEFAULT_ADDRESS);
        assert_eq!(
            writes,
            [
                vec![0x00, 0x02],
                vec![0x04, 0x00],
                vec![0x05, 0x04],
                vec![0x19, 0x14],
                vec![0x1A, 0x10],
                vec![0x21, 0xDC, 0x05, 0x00],
                vec![0x24, 0xE8, 0x03, 0x00],
            ]
        );
    }

    #[test]
    fn test_dark_reading_arms_upper_only() {
        let mut s = sensor();
        s.bus.respond(&[0x90, 0x01, 0x00]); // 400
        let sample = s.handle_crossing().unwrap();

        assert_eq!(
            sample,
            LightSample { raw: 400, night: Some(true), rearmed: true }
        );
        assert_eq!(s.window(), ThresholdPair { upper: 1500, lower: 0 });
        assert_eq!(
            s.bus.log,
            [
                Transaction::WriteRead { address: 0x52, bytes: vec![0x0D], len: 3 },
                Transaction::Write { address: 0x52, bytes: vec![0x21, 0xDC, 0x05, 0x00] },
                Transaction::Write { address: 0x52, bytes: vec![0x24, 0x00, 0x00, 0x00] },
                Transaction::WriteRead { address: 0x52, bytes: vec![0x07], len: 1 },
            ]
        );
    }

    #[test]
    fn test_bright_reading_arms_lower_only() {
        let mut s = sensor();
        s.bus.respond(&[0xD0, 0x07, 0x00]); // 2000
        let sample = s.handle_crossing().unwrap();

        assert_eq!(sample.night, Some(false));
        assert_eq!(s.window(), ThresholdPair { upper: 0xF_FFFF, lower: 1000 });
        assert_eq!(
            s.bus.writes_to(DEFAULT_ADDRESS),
            [vec![0x24, 0xE8, 0x03, 0x00], vec![0x21, 0xFF, 0xFF, 0x0F]]
        );
    }

    #[test]
    fn test_in_band_reading_only_clears_status() {
        let mut s = sensor();
        s.bus.respond(&[0xE2, 0x04, 0x00]); // 1250
        let sample = s.handle_crossing().unwrap();

        assert_eq!(
            sample,
            LightSample { raw: 1250, night: None, rearmed: true }
        );
        assert!(s.bus.writes_to(DEFAULT_ADDRESS).is_empty());
        assert_eq!(s.bus.log.len(), 2);
        assert_eq!(s.window(), ThresholdPair { upper: 1500, lower: 1000 });
    }

    #[test]
    fn test_failed_status_read_keeps_decision() {
        let mut s = sensor();
        s.bus.fail_register = Some(reg::MAIN_STATUS);
        s.bus.respond(&[0x90, 0x01, 0x00]); // 400

        let sample = s.handle_crossing().unwrap();
        assert_eq!(
            sample,
            LightSample { raw: 400, night: Some(true), rearmed: false }
        );
        assert_eq!(s.window(), ThresholdPair { upper: 1500, lower: 0 });
    }

    #[test]
    fn test_failed_window_write_still_clears_status() {
        let mut s = sensor();
        s.bus.fail_register = Some(reg::THRES_LOW);
        s.bus.respond(&[0x90, 0x01, 0x00]); // 400

        assert!(s.handle_crossing().is_err());
        // Upper bound went out first, the old lower bound is still armed
        assert_eq!(s.bus.writes_to(DEFAULT_ADDRESS), [vec![0x21, 0xDC, 0x05, 0x00]]);
        assert_eq!(s.window(), ThresholdPair { upper: 1500, lower: 1000 });
        assert_eq!(
            s.bus.log.last(),
            Some(&Transaction::WriteRead { address: 0x52, bytes: vec![0x07], len: 1 })
        );
    }

    #[test]
    fn test_failed_read_still_clears_status() {
        let mut s = sensor();
        s.bus.fail_register = Some(reg::ALS_DATA);

        assert!(s.handle_crossing().is_err());
        assert!(s.bus.writes_to(DEFAULT_ADDRESS).is_empty());
        assert_eq!(
            s.bus.log,
            [Transaction::WriteRead { address: 0x52, bytes: vec![0x07], len: 1 }]
        );
    }

    #[test]
    fn test_bus_failure_maps_to_device_error() {
        let mut s = sensor();
        s.bus.fail = true;
        assert_eq!(s.service(), Err(DeviceError::Bus));
        assert_eq!(s.read_raw(), Err(DeviceError::Bus));
    }
}
