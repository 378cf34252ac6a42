//! PCF8574 I2C backpack framing
//!
//! The backpack's expander drives the HD44780 in 4-bit mode. Each expander
//! write sets all eight lines at once:
//!
//! | Bit | Line      |
//! |-----|-----------|
//! | 7-4 | D7-D4     |
//! | 3   | Backlight |
//! | 2   | EN        |
//! | 1   | RW        |
//! | 0   | RS        |
//!
//! A byte is latched as two nibbles, high first, each presented with EN
//! high and then with EN low. RW stays low; the driver never reads.

pub const RS: u8 = 0x01;
pub const EN: u8 = 0x04;
pub const BACKLIGHT: u8 = 0x08;

/// Destination register of a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Instruction register (RS = 0)
    Command,
    /// Data register (RS = 1)
    Data,
}

impl Register {
    const fn rs(self) -> u8 {
        match self {
            Register::Command => 0,
            Register::Data => RS,
        }
    }
}

/// Expander writes that latch one nibble
pub type NibbleStrobe = [u8; 2];

/// Expander writes for one byte: high nibble strobe, then low nibble strobe
pub const fn frame(byte: u8, register: Register) -> [NibbleStrobe; 2] {
    let lines = BACKLIGHT | register.rs();
    let high = byte & 0xF0;
    let low = (byte << 4) & 0xF0;
    [
        [high | EN | lines, high | lines],
        [low | EN | lines, low | lines],
    ]
}
