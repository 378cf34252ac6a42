//! Custom display glyphs
//!
//! A glyph is an 8-row bitmap for one character cell, packed one byte per
//! row with the top row first. Only the low five bits of each row are lit
//! on a 5x8 font. Character codes 0-7 select the controller's custom
//! slots; the shield reserves 1-4.

/// Reserved glyph codes
pub mod code {
    pub const CLOCK: u8 = 0x01;
    pub const DAY: u8 = 0x02;
    pub const NIGHT: u8 = 0x03;
    pub const OVERHEAT: u8 = 0x04;
}

/// Number of custom glyph slots on the controller
pub const GLYPH_SLOTS: u8 = 8;

/// One custom character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph {
    /// Character code the glyph is stored under
    pub code: u8,
    /// Pixel rows, top first
    pub rows: [u8; 8],
}

impl Glyph {
    pub const fn new(code: u8, rows: [u8; 8]) -> Self {
        Self { code, rows }
    }

    /// Unpack a bitmap stored as a 64-bit word, top row in the most
    /// significant byte
    pub const fn from_bits(code: u8, bits: u64) -> Self {
        Self {
            code,
            rows: bits.to_be_bytes(),
        }
    }

    /// The glyph as a `char` for embedding in display text
    pub const fn as_char(&self) -> char {
        self.code as char
    }
}

pub const CLOCK: Glyph = Glyph::from_bits(code::CLOCK, 0x0000_0E15_1513_0E00);
pub const DAY: Glyph = Glyph::from_bits(code::DAY, 0x0015_0E1B_0E15_0000);
pub const NIGHT: Glyph = Glyph::from_bits(code::NIGHT, 0x0004_0C08_0C06_0000);
pub const OVERHEAT: Glyph = Glyph::from_bits(code::OVERHEAT, 0x0214_0D0E_1A13_190E);

/// Glyphs registered on every display at initialization
pub const BUILTIN: [Glyph; 4] = [CLOCK, DAY, NIGHT, OVERHEAT];
