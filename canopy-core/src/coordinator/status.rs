//! Status screen layout
//!
//! Every attached display shows the same four rows. Rows past a display's
//! height are dropped by the display itself.

use core::fmt::Write;

use heapless::String;

use crate::config::MAX_COLUMNS;
use crate::glyph;
use crate::state::DeviceState;
use crate::traits::{CharacterDisplay, DeviceError};

pub const ROW_DAYLIGHT: u8 = 0;
pub const ROW_WARNING: u8 = 1;
pub const ROW_TEMPERATURE: u8 = 2;
pub const ROW_LED: u8 = 3;

/// All status rows, top to bottom
pub const ROWS: [u8; 4] = [ROW_DAYLIGHT, ROW_WARNING, ROW_TEMPERATURE, ROW_LED];

/// One row of text
pub type Line = String<{ MAX_COLUMNS as usize }>;

/// Compose the text for `row`
///
/// Returns an empty line for rows that are currently blank (and for rows
/// outside the layout).
pub fn line(row: u8, state: &DeviceState) -> Line {
    let mut line = Line::new();
    // Every composed string fits in MAX_COLUMNS, so pushes cannot fail
    let _ = match row {
        ROW_DAYLIGHT => {
            if state.is_night {
                write!(line, "{} Night", glyph::NIGHT.as_char())
            } else {
                write!(line, "{} Day", glyph::DAY.as_char())
            }
        }
        ROW_WARNING if state.is_overheating => {
            write!(line, "{} Overheating", glyph::OVERHEAT.as_char())
        }
        ROW_TEMPERATURE => match state.temperature_c {
            Some(celsius) => write!(line, "Temp {:.1}C", celsius),
            None => Ok(()),
        },
        ROW_LED => write!(line, "LED {}", state.led_source.label()),
        _ => Ok(()),
    };
    line
}

/// Repaint `row` on one display
pub fn paint<D: CharacterDisplay>(
    display: &mut D,
    row: u8,
    state: &DeviceState,
) -> Result<(), DeviceError> {
    display.write_line_centered(&line(row, state), row)
}
