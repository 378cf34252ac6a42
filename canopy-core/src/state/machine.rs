//! Coordinator phase machine
//!
//! Each tick starts and ends in `Idle`. In between, the coordinator visits
//! at most one processing phase per pending flag, in fixed priority order.

use crate::flags::EdgeSource;

/// Coordinator phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Waiting for the next tick
    #[default]
    Idle,
    /// Servicing the ambient light sensor
    Light,
    /// Servicing the temperature sensor
    Temperature,
    /// Servicing the push button
    Button,
}

/// Phase machine inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Light flag was taken
    LightPending,
    /// Temperature flag was taken
    TemperaturePending,
    /// Button flag was taken
    ButtonPending,
    /// Current handler finished (successfully or not)
    Done,
}

impl From<EdgeSource> for Event {
    fn from(source: EdgeSource) -> Self {
        match source {
            EdgeSource::Light => Event::LightPending,
            EdgeSource::Temperature => Event::TemperaturePending,
            EdgeSource::Button => Event::ButtonPending,
        }
    }
}

impl Phase {
    /// Check whether a handler is running
    pub fn is_busy(&self) -> bool {
        !matches!(self, Phase::Idle)
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Phase::*;

        match (self, event) {
            (Idle, LightPending) => Light,
            (Idle, TemperaturePending) => Temperature,
            (Idle, ButtonPending) => Button,

            (Light | Temperature | Button, Done) => Idle,

            // A handler never starts while another is running
            _ => self,
        }
    }
}
