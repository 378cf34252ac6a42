//! Hysteresis bands
//!
//! Both sensors switch state at two different points so a reading that
//! hovers around one cutoff cannot make the state oscillate.
//!
//! The light sensor enforces this in hardware as well: it only interrupts
//! when a reading leaves its programmed window, so after each transition
//! one bound is parked at an extreme value and only the opposite crossing
//! can fire next.

use crate::config::{LightThresholds, TemperatureThresholds, LIGHT_MAX_COUNTS};

/// Light sensor threshold window (raw counts)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThresholdPair {
    pub upper: u32,
    pub lower: u32,
}

impl ThresholdPair {
    /// Both bounds armed (power-up window)
    pub const fn both(thresholds: LightThresholds) -> Self {
        Self {
            upper: thresholds.upper,
            lower: thresholds.lower,
        }
    }

    /// Only the upper bound armed, so only a rise to day can fire
    pub const fn upper_only(thresholds: LightThresholds) -> Self {
        Self {
            upper: thresholds.upper,
            lower: 0,
        }
    }

    /// Only the lower bound armed, so only a fall to night can fire
    pub const fn lower_only(thresholds: LightThresholds) -> Self {
        Self {
            upper: LIGHT_MAX_COUNTS,
            lower: thresholds.lower,
        }
    }
}

/// Outcome of evaluating a light reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightDecision {
    /// New night flag
    pub night: bool,
    /// Window to program into the sensor
    pub band: ThresholdPair,
}

/// Day/night hysteresis for the ambient light sensor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightBand {
    thresholds: LightThresholds,
}

impl LightBand {
    pub const fn new(thresholds: LightThresholds) -> Self {
        Self { thresholds }
    }

    pub const fn thresholds(&self) -> LightThresholds {
        self.thresholds
    }

    /// Window programmed at power-up
    pub const fn initial(&self) -> ThresholdPair {
        ThresholdPair::both(self.thresholds)
    }

    /// Decide what a raw reading means
    ///
    /// `None` when the reading is inside `lower..=upper`.
    pub fn evaluate(&self, raw: u32) -> Option<LightDecision> {
        if raw < self.thresholds.lower {
            Some(LightDecision {
                night: true,
                band: ThresholdPair::upper_only(self.thresholds),
            })
        } else if raw > self.thresholds.upper {
            Some(LightDecision {
                night: false,
                band: ThresholdPair::lower_only(self.thresholds),
            })
        } else {
            None
        }
    }
}

/// Overheat hysteresis for the temperature sensor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureBand {
    thresholds: TemperatureThresholds,
}

impl TemperatureBand {
    pub const fn new(thresholds: TemperatureThresholds) -> Self {
        Self { thresholds }
    }

    pub const fn thresholds(&self) -> TemperatureThresholds {
        self.thresholds
    }

    /// Decide the overheat flag for `celsius`
    ///
    /// `None` when the reading is strictly between the two thresholds.
    pub fn evaluate(&self, celsius: f32) -> Option<bool> {
        if celsius >= self.thresholds.overheat_c as f32 {
            Some(true)
        } else if celsius <= self.thresholds.clear_c as f32 {
            Some(false)
        } else {
            None
        }
    }

    /// Apply a reading to the current flag
    pub fn apply(&self, celsius: f32, overheating: bool) -> bool {
        self.evaluate(celsius).unwrap_or(overheating)
    }
}
