//! Character display trait

use super::DeviceError;
use crate::config::DisplayGeometry;

/// Text-mode character display
///
/// Positions outside the geometry are silently ignored: the call succeeds
/// and nothing is sent.
pub trait CharacterDisplay {
    /// Visible rows and columns
    fn geometry(&self) -> DisplayGeometry;

    /// Blank the whole display
    fn clear(&mut self) -> Result<(), DeviceError>;

    /// Write one character at a position
    fn write_character(&mut self, c: u8, row: u8, column: u8) -> Result<(), DeviceError>;

    /// Repaint a full row with `text` starting at `offset`
    fn write_line(&mut self, text: &str, row: u8, offset: u8) -> Result<(), DeviceError>;

    /// Repaint a full row with `text` centered (left-biased)
    fn write_line_centered(&mut self, text: &str, row: u8) -> Result<(), DeviceError> {
        let columns = self.geometry().columns as usize;
        if text.len() > columns {
            return Ok(());
        }
        self.write_line(text, row, ((columns - text.len()) / 2) as u8)
    }
}
