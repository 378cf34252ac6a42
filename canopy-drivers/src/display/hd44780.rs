//! HD44780 character display behind a PCF8574 backpack
//!
//! The controller is driven blind: instead of polling the busy flag, every
//! nibble is followed by a wait longer than the slowest instruction.
//!
//! A 4x20 panel is two 40-character DDRAM lines folded in half. Rows 0 and
//! 2 share the first line (0x00), rows 1 and 3 the second (0x40), and rows
//! 2 and 3 start `columns` further in.

use canopy_core::config::DisplayGeometry;
use canopy_core::glyph::{self, Glyph, GLYPH_SLOTS};
use canopy_core::traits::{CharacterDisplay, DeviceError};
use canopy_hal::I2cBus;
use embedded_hal::delay::DelayNs;

use super::backpack::{self, Register};

/// Backpack address of the primary display
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// Backpack address of the secondary display on the reference board
pub const SECONDARY_ADDRESS: u8 = 0x24;

/// Instruction set
pub mod cmd {
    pub const CLEAR: u8 = 0x01;
    /// Sent while the controller is still in 8-bit mode; switches it to 4-bit
    pub const ENTER_4BIT: u8 = 0x02;
    /// 4-bit bus, two lines, 5x8 font
    pub const FUNCTION_SET: u8 = 0x28;
    /// Display on, cursor off, blink off
    pub const DISPLAY_ON: u8 = 0x0C;
    pub const SET_CGRAM: u8 = 0x40;
    pub const SET_DDRAM: u8 = 0x80;
}

/// Controller busy time after power reaches 4.5 V
const POWER_ON_WAIT_MS: u32 = 11;

/// Longest instruction execution time, rounded up
const SETTLE_MS: u32 = 2;

/// Start of the second DDRAM line
const LINE_TWO: u8 = 0x40;

/// DDRAM address of a position, or `None` if it is off the display
pub fn ddram_address(geometry: DisplayGeometry, row: u8, column: u8) -> Option<u8> {
    if !geometry.contains(row, column) {
        return None;
    }
    let line = if row % 2 == 1 { LINE_TWO } else { 0 };
    let fold = if row >= 2 { geometry.columns } else { 0 };
    Some(column + line + fold)
}

/// HD44780 driver
pub struct Hd44780<B, D> {
    bus: B,
    delay: D,
    address: u8,
    geometry: DisplayGeometry,
}

impl<B: I2cBus, D: DelayNs> Hd44780<B, D> {
    /// Create a driver; no bus traffic until [`Self::init`]
    ///
    /// The geometry is clamped to 4x20.
    pub fn new(bus: B, delay: D, address: u8, geometry: DisplayGeometry) -> Self {
        Self {
            bus,
            delay,
            address,
            geometry: DisplayGeometry::new(geometry.rows, geometry.columns),
        }
    }

    /// Bring the controller up with the shield's glyphs registered
    pub fn init(&mut self) -> Result<(), B::Error> {
        self.init_with_glyphs(&glyph::BUILTIN)
    }

    /// Bring the controller up with a custom glyph set
    pub fn init_with_glyphs(&mut self, glyphs: &[Glyph]) -> Result<(), B::Error> {
        self.delay.delay_ms(POWER_ON_WAIT_MS);

        self.write_command(cmd::ENTER_4BIT)?;
        self.write_command(cmd::FUNCTION_SET)?;
        self.write_command(cmd::DISPLAY_ON)?;

        for glyph in glyphs {
            self.register_glyph(glyph.code, &glyph.rows)?;
        }
        self.clear()
    }

    /// Send one byte to the instruction register
    pub fn write_command(&mut self, command: u8) -> Result<(), B::Error> {
        self.send(command, Register::Command)
    }

    /// Send one byte to the data register
    pub fn write_data(&mut self, data: u8) -> Result<(), B::Error> {
        self.send(data, Register::Data)
    }

    fn send(&mut self, byte: u8, register: Register) -> Result<(), B::Error> {
        for strobe in backpack::frame(byte, register) {
            for lines in strobe {
                self.bus.write(self.address, &[lines])?;
            }
            self.delay.delay_ms(SETTLE_MS);
        }
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), B::Error> {
        self.write_command(cmd::CLEAR)
    }

    /// Move the cursor; ignored if the position is off the display
    pub fn set_cursor(&mut self, row: u8, column: u8) -> Result<(), B::Error> {
        match ddram_address(self.geometry, row, column) {
            Some(address) => self.write_command(cmd::SET_DDRAM | address),
            None => Ok(()),
        }
    }

    /// Write one character at a position; ignored if off the display
    pub fn write_character(&mut self, c: u8, row: u8, column: u8) -> Result<(), B::Error> {
        if !self.geometry.contains(row, column) {
            return Ok(());
        }
        self.set_cursor(row, column)?;
        self.write_data(c)
    }

    /// Repaint a whole row: spaces up to `offset`, then `text`, then
    /// spaces to the end of the row
    ///
    /// Ignored if the row is off the display or the text would not fit.
    pub fn write_line(&mut self, text: &str, row: u8, offset: u8) -> Result<(), B::Error> {
        let columns = self.geometry.columns as usize;
        if row >= self.geometry.rows || text.len() + offset as usize > columns {
            return Ok(());
        }

        let body = text.bytes();
        let padded = core::iter::repeat(b' ')
            .take(offset as usize)
            .chain(body)
            .chain(core::iter::repeat(b' '))
            .take(columns);
        for (column, c) in padded.enumerate() {
            self.write_character(c, row, column as u8)?;
        }
        Ok(())
    }

    /// Store a glyph bitmap in one of the eight custom character slots
    ///
    /// Ignored if `code` is not a valid slot.
    pub fn register_glyph(&mut self, code: u8, rows: &[u8; 8]) -> Result<(), B::Error> {
        if code >= GLYPH_SLOTS {
            return Ok(());
        }
        self.write_command(cmd::SET_CGRAM | (code * 8))?;
        for &row in rows {
            self.write_data(row)?;
        }
        Ok(())
    }

    pub fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus and delay back
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

impl<B: I2cBus, D: DelayNs> CharacterDisplay for Hd44780<B, D> {
    fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    fn clear(&mut self) -> Result<(), DeviceError> {
        Hd44780::clear(self).map_err(|_| DeviceError::Bus)
    }

    fn write_character(&mut self, c: u8, row: u8, column: u8) -> Result<(), DeviceError> {
        Hd44780::write_character(self, c, row, column).map_err(|_| DeviceError::Bus)
    }

    fn write_line(&mut self, text: &str, row: u8, offset: u8) -> Result<(), DeviceError> {
        Hd44780::write_line(self, text, row, offset).map_err(|_| DeviceError::Bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockBus, MockDelay};

    fn display() -> Hd44780<MockBus, MockDelay> {
        Hd44780::new(
            MockBus::default(),
            MockDelay::default(),
            DEFAULT_ADDRESS,
            DisplayGeometry::default(),
        )
    }

    /// Reassemble the (register, byte) pairs from raw expander writes
    fn decode(writes: &[Vec<u8>]) -> Vec<(Register, u8)> {
        writes
            .chunks(4)
            .map(|w| {
                let register = if w[0][0] & backpack::RS != 0 {
                    Register::Data
                } else {
                    Register::Command
                };
                (register, (w[0][0] & 0xF0) | (w[2][0] >> 4))
            })
            .collect()
    }

    #[test]
    fn test_ddram_addresses() {
        let g = DisplayGeometry::default();
        assert_eq!(ddram_address(g, 0, 5), Some(0x05));
        assert_eq!(ddram_address(g, 1, 5), Some(0x45));
        assert_eq!(ddram_address(g, 2, 0), Some(0x14));
        assert_eq!(ddram_address(g, 3, 0), Some(0x54));
        assert_eq!(ddram_address(g, 4, 0), None);
        assert_eq!(ddram_address(g, 0, 20), None);
    }

    #[test]
    fn test_each_byte_is_four_single_writes() {
        let mut d = display();
        d.write_command(cmd::FUNCTION_SET).unwrap();

        assert_eq!(d.delay.total_ms(), 4);
        let (bus, _) = d.release();
        assert_eq!(
            bus.writes_to(DEFAULT_ADDRESS),
            [vec![0x2C], vec![0x28], vec![0x8C], vec![0x88]]
        );
    }

    #[test]
    fn test_init_sequence() {
        let mut d = display();
        d.init().unwrap();

        let (bus, delay) = d.release();
        let sent = decode(&bus.writes_to(DEFAULT_ADDRESS));

        // Three setup commands, four glyphs of 1 + 8 bytes, clear
        assert_eq!(sent.len(), 3 + 4 * 9 + 1);
        assert_eq!(
            sent[..4],
            [
                (Register::Command, 0x02),
                (Register::Command, 0x28),
                (Register::Command, 0x0C),
                (Register::Command, 0x48),
            ]
        );
        assert_eq!(sent[4], (Register::Data, glyph::CLOCK.rows[0]));
        assert_eq!(sent.last(), Some(&(Register::Command, cmd::CLEAR)));
        assert_eq!(delay.total_ms(), 11 + sent.len() as u64 * 4);
    }

    #[test]
    fn test_set_cursor_out_of_range_is_silent() {
        let mut d = display();
        d.set_cursor(4, 0).unwrap();
        d.set_cursor(0, 20).unwrap();
        d.write_character(b'X', 4, 0).unwrap();

        assert!(d.release().0.log.is_empty());
    }

    #[test]
    fn test_write_line_pads_whole_row() {
        let mut d = display();
        d.write_line("HI", 0, 3).unwrap();

        let sent = decode(&d.release().0.writes_to(DEFAULT_ADDRESS));
        // Every column: cursor command then one data byte
        assert_eq!(sent.len(), 40);

        let data: Vec<u8> = sent
            .iter()
            .filter(|(r, _)| *r == Register::Data)
            .map(|(_, b)| *b)
            .collect();
        let mut expected = b"   HI".to_vec();
        expected.resize(20, b' ');
        assert_eq!(data, expected);

        assert_eq!(sent[0], (Register::Command, 0x80));
        assert_eq!(sent[38], (Register::Command, 0x80 | 19));
    }

    #[test]
    fn test_write_line_second_row_addresses() {
        let mut d = display();
        d.write_line("", 3, 0).unwrap();

        let sent = decode(&d.release().0.writes_to(DEFAULT_ADDRESS));
        assert_eq!(sent[0], (Register::Command, 0x80 | 0x54));
    }

    #[test]
    fn test_write_line_rejects_overflow() {
        let mut d = display();
        d.write_line("0123456789", 0, 11).unwrap();
        d.write_line("x", 4, 0).unwrap();

        assert!(d.release().0.log.is_empty());
    }

    #[test]
    fn test_write_line_centered_offset() {
        let mut d = display();
        CharacterDisplay::write_line_centered(&mut d, "OK", 1).unwrap();

        let sent = decode(&d.release().0.writes_to(DEFAULT_ADDRESS));
        let data: Vec<u8> = sent
            .iter()
            .filter(|(r, _)| *r == Register::Data)
            .map(|(_, b)| *b)
            .collect();
        assert_eq!(&data[9..11], b"OK");
        assert!(data[..9].iter().all(|&c| c == b' '));
    }

    #[test]
    fn test_register_glyph() {
        let mut d = display();
        d.register_glyph(8, &[0xFF; 8]).unwrap();
        assert!(d.bus.log.is_empty());

        d.register_glyph(3, &glyph::NIGHT.rows).unwrap();
        let sent = decode(&d.release().0.writes_to(DEFAULT_ADDRESS));
        assert_eq!(sent[0], (Register::Command, 0x58));
        let rows: Vec<u8> = sent[1..].iter().map(|(_, b)| *b).collect();
        assert_eq!(rows, glyph::NIGHT.rows);
    }

    #[test]
    fn test_small_geometry() {
        let mut d = Hd44780::new(
            MockBus::default(),
            MockDelay::default(),
            SECONDARY_ADDRESS,
            DisplayGeometry::new(2, 16),
        );
        d.write_line("", 2, 0).unwrap();
        d.write_line("", 1, 0).unwrap();

        let (bus, _) = d.release();
        let sent = decode(&bus.writes_to(SECONDARY_ADDRESS));
        assert_eq!(sent.len(), 32);
        assert_eq!(sent[0], (Register::Command, 0x80 | 0x40));
    }

    #[test]
    fn test_bus_failure_maps_to_device_error() {
        let mut d = display();
        d.bus.fail = true;
        assert_eq!(CharacterDisplay::clear(&mut d), Err(DeviceError::Bus));
    }
}
