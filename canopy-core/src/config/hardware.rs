//! Hardware configuration types
//!
//! Pin assignments for the interrupt lines: which GPIO raises which
//! [`EdgeSource`], and how each line is biased.

use canopy_hal::gpio::EdgeConfig;

use crate::flags::EdgeSource;

/// One interrupt-capable input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeLine {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Logical source raised by this line
    pub source: EdgeSource,
    /// Edge and bias
    pub config: EdgeConfig,
}

impl EdgeLine {
    /// Pulled-up, falling-edge line
    pub const fn falling(pin: u8, source: EdgeSource) -> Self {
        Self {
            pin,
            source,
            config: EdgeConfig {
                edge: canopy_hal::gpio::Edge::Falling,
                pull: canopy_hal::gpio::Pull::Up,
            },
        }
    }
}

/// Interrupt lines, one per [`EdgeSource`] in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeMap {
    pub lines: [EdgeLine; EdgeSource::COUNT],
}

impl Default for EdgeMap {
    /// Reference board wiring
    fn default() -> Self {
        Self {
            lines: [
                EdgeLine::falling(6, EdgeSource::Light),
                EdgeLine::falling(7, EdgeSource::Temperature),
                EdgeLine::falling(8, EdgeSource::Button),
            ],
        }
    }
}

impl EdgeMap {
    /// Line wired to GPIO `pin`, if any
    pub fn line_for(&self, pin: u8) -> Option<EdgeLine> {
        self.lines.iter().copied().find(|line| line.pin == pin)
    }
}
