//! LED output trait

use super::DeviceError;
use crate::state::LedSource;

/// LED current driver
///
/// Write-only: the driver never reports its state back.
pub trait LedOutput {
    /// Set the output level (0 = off)
    fn set_brightness(&mut self, level: u8) -> Result<(), DeviceError>;

    /// Tell the driver what is controlling it
    fn set_source(&mut self, source: LedSource) -> Result<(), DeviceError>;
}
