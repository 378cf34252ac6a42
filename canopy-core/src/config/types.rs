//! Configuration type definitions

/// Largest value the 20-bit light sensor can report
pub const LIGHT_MAX_COUNTS: u32 = 0xF_FFFF;

/// Maximum rows a character display supports
pub const MAX_ROWS: u8 = 4;

/// Maximum columns a character display supports
pub const MAX_COLUMNS: u8 = 20;

/// Number of displays the coordinator can drive
pub const MAX_DISPLAYS: usize = 2;

/// Day/night switching points of the ambient light sensor (raw counts)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightThresholds {
    /// Readings below this mean night
    pub lower: u32,
    /// Readings above this mean day
    pub upper: u32,
}

impl Default for LightThresholds {
    fn default() -> Self {
        Self {
            lower: 1000,
            upper: 1500,
        }
    }
}

/// Overheat warning points of the temperature sensor (whole °C)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureThresholds {
    /// At or above this the device is overheating
    pub overheat_c: i16,
    /// At or below this the warning clears
    pub clear_c: i16,
}

impl Default for TemperatureThresholds {
    fn default() -> Self {
        Self {
            overheat_c: 40,
            clear_c: 30,
        }
    }
}

/// LED brightness levels per source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedLevels {
    /// Light-driven level during the day
    pub day: u8,
    /// Light-driven level at night
    pub night: u8,
    /// Fixed level in manual mode
    pub manual: u8,
}

impl Default for LedLevels {
    fn default() -> Self {
        Self {
            day: 0x00,
            night: 0xFF,
            manual: 0x80,
        }
    }
}

/// Character display size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayGeometry {
    pub rows: u8,
    pub columns: u8,
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self {
            rows: MAX_ROWS,
            columns: MAX_COLUMNS,
        }
    }
}

impl DisplayGeometry {
    /// Create a geometry, clamped to what the controller can address
    pub const fn new(rows: u8, columns: u8) -> Self {
        Self {
            rows: if rows > MAX_ROWS { MAX_ROWS } else { rows },
            columns: if columns > MAX_COLUMNS {
                MAX_COLUMNS
            } else {
                columns
            },
        }
    }

    /// Check whether a position lies on the display
    pub const fn contains(&self, row: u8, column: u8) -> bool {
        row < self.rows && column < self.columns
    }
}

/// Coordinator configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoordinatorConfig {
    pub led: LedLevels,
}
