//! Reference board wiring and the I2C adapter
//!
//! Pin assignments (RP2040):
//! - I2C0: SDA = GPIO4, SCL = GPIO5 (sensors and display backpacks)
//! - SPI0: SCK = GPIO18, MOSI = GPIO19, CS = GPIO17 (LED driver)
//! - Light sensor interrupt: GPIO6
//! - Temperature sensor interrupt: GPIO7
//! - Push button: GPIO8
//!
//! `main` looks each interrupt GPIO up in `EdgeMap::default()` for its
//! source and bias.

use canopy_hal::i2c::I2cConfig;
use canopy_hal::spi::{Phase, Polarity, SpiConfig};
use canopy_hal::{I2cBus, Pull};
use embassy_rp::gpio;
use embassy_rp::{i2c, spi};

/// Display backpack addresses, in attach order
pub const DISPLAY_ADDRESSES: [u8; 2] = [
    canopy_drivers::display::hd44780::SECONDARY_ADDRESS,
    canopy_drivers::display::hd44780::DEFAULT_ADDRESS,
];

pub fn i2c_config() -> i2c::Config {
    let mut config = i2c::Config::default();
    config.frequency = I2cConfig::STANDARD.frequency;
    config
}

pub fn spi_config() -> spi::Config {
    let shield = SpiConfig::default();
    let (polarity, phase): (Polarity, Phase) = shield.mode.into();

    let mut config = spi::Config::default();
    config.frequency = shield.frequency;
    config.polarity = match polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    config.phase = match phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    config
}

/// Map a line's bias onto the RP2040 pad setting
pub fn pull(pull: Pull) -> gpio::Pull {
    match pull {
        Pull::None => gpio::Pull::None,
        Pull::Up => gpio::Pull::Up,
        Pull::Down => gpio::Pull::Down,
    }
}

/// Blocking `embedded-hal` I2C master as a shield bus
pub struct I2cAdapter<T>(T);

impl<T: embedded_hal::i2c::I2c> I2cAdapter<T> {
    pub fn new(i2c: T) -> Self {
        Self(i2c)
    }
}

impl<T: embedded_hal::i2c::I2c> I2cBus for I2cAdapter<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.0.read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.0.write_read(address, write_data, read_buf)
    }
}
