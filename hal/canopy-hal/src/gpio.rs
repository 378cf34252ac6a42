//! GPIO line configuration
//!
//! Edge and pull settings used when arming interrupt lines.

/// Interrupt edge selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// High to low transition
    Falling,
    /// Low to high transition
    Rising,
}

/// Input bias
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    None,
    Up,
    Down,
}

/// Configuration of one interrupt-capable input line
///
/// All shield interrupt lines are open-drain, active-low outputs on the
/// peripheral side, hence the pulled-up falling-edge default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeConfig {
    pub edge: Edge,
    pub pull: Pull,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            edge: Edge::Falling,
            pull: Pull::Up,
        }
    }
}
