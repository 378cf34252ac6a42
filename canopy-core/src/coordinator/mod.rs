//! Tick-driven coordinator
//!
//! The coordinator is the only code that performs bus I/O in response to
//! an edge. On each `tick` it:
//! - Takes each pending flag, in priority order (light, temperature, button)
//! - Runs the matching handler to completion
//! - Updates `DeviceState` from the handler's result
//! - Repaints the affected status rows and drives the LED
//!
//! A tick with no pending flag performs no I/O at all. A failing handler
//! is reported as an [`Activity::Fault`] and its flag stays consumed. If the
//! sensor itself failed, the state keeps its previous value. Once a reading
//! is in, the state follows the sensor; an LED or display write that fails
//! after that leaves its output marked stale, and the next handler that
//! runs (or [`Coordinator::refresh`]) writes it again.

pub mod status;

use heapless::Vec;

use crate::config::{CoordinatorConfig, MAX_DISPLAYS};
use crate::flags::{EdgeSource, InterruptFlags};
use crate::state::{DeviceState, Event, LedSource, Phase};
use crate::traits::{
    AmbientLightSensor, CharacterDisplay, DeviceError, LedOutput, TemperatureSensor,
};

/// What one handler did during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Activity {
    /// Light sensor serviced; `rearmed` is false when its interrupt could
    /// not be cleared
    Light { raw: u32, night: bool, rearmed: bool },
    /// Temperature sensor serviced
    Temperature { celsius: f32, overheating: bool },
    /// Button toggled the LED source
    Button { source: LedSource },
    /// A handler failed
    Fault { source: EdgeSource, error: DeviceError },
}

/// Everything that happened in one tick, in handling order
pub type Activities = Vec<Activity, { EdgeSource::COUNT }>;

/// Outputs still waiting to be brought in line with the state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Stale {
    source: bool,
    level: bool,
    /// One bit per status row
    rows: u8,
}

impl Stale {
    const ALL: Self = Self {
        source: true,
        level: true,
        rows: (1 << status::ROWS.len()) - 1,
    };

    fn mark_row(&mut self, row: u8) {
        self.rows |= 1 << row;
    }

    fn has_row(&self, row: u8) -> bool {
        self.rows & (1 << row) != 0
    }

    fn clear_row(&mut self, row: u8) {
        self.rows &= !(1 << row);
    }
}

/// Shield coordinator
pub struct Coordinator<'a, L, T, O, D> {
    flags: &'a InterruptFlags,
    light: L,
    temperature: T,
    led: O,
    displays: Vec<D, MAX_DISPLAYS>,
    state: DeviceState,
    stale: Stale,
    phase: Phase,
    config: CoordinatorConfig,
}

impl<'a, L, T, O, D> Coordinator<'a, L, T, O, D>
where
    L: AmbientLightSensor,
    T: TemperatureSensor,
    O: LedOutput,
    D: CharacterDisplay,
{
    /// Create a coordinator over already-initialized devices
    ///
    /// No I/O happens until [`Self::refresh`] or [`Self::tick`].
    pub fn new(
        flags: &'a InterruptFlags,
        light: L,
        temperature: T,
        led: O,
        config: CoordinatorConfig,
    ) -> Self {
        Self {
            flags,
            light,
            temperature,
            led,
            displays: Vec::new(),
            state: DeviceState::new(),
            stale: Stale::default(),
            phase: Phase::Idle,
            config,
        }
    }

    /// Attach a display
    ///
    /// Gives the display back if [`MAX_DISPLAYS`] are already attached.
    pub fn attach_display(&mut self, display: D) -> Result<(), D> {
        self.displays.push(display)
    }

    /// Push the whole current state out: LED source and level, and every
    /// status row on every display
    pub fn refresh(&mut self) -> Result<(), DeviceError> {
        self.stale = Stale::ALL;
        self.flush()
    }

    /// Service every pending flag once
    pub fn tick(&mut self) -> Activities {
        let mut activities = Activities::new();

        for source in EdgeSource::ALL {
            if !self.flags.take(source) {
                continue;
            }

            self.phase = self.phase.transition(source.into());
            let result = match self.phase {
                Phase::Light => self.service_light(),
                Phase::Temperature => self.service_temperature(),
                Phase::Button => self.service_button(),
                Phase::Idle => continue,
            };
            self.phase = self.phase.transition(Event::Done);

            let activity = result.unwrap_or_else(|error| Activity::Fault { source, error });
            // One entry per source at most, so the capacity always suffices
            let _ = activities.push(activity);
        }

        activities
    }

    fn service_light(&mut self) -> Result<Activity, DeviceError> {
        let sample = self.light.service()?;

        let mut next = self.state;
        if let Some(night) = sample.night {
            next.is_night = night;
        }
        if next.is_night != self.state.is_night {
            self.stale.mark_row(status::ROW_DAYLIGHT);
        }
        self.commit(next)?;

        Ok(Activity::Light {
            raw: sample.raw,
            night: next.is_night,
            rearmed: sample.rearmed,
        })
    }

    fn service_temperature(&mut self) -> Result<Activity, DeviceError> {
        let sample = self.temperature.service()?;

        let mut next = self.state;
        next.temperature_c = Some(sample.celsius);
        next.is_overheating = sample.overheating.unwrap_or(self.state.is_overheating);
        if next.is_overheating != self.state.is_overheating {
            self.stale.mark_row(status::ROW_WARNING);
        }
        self.stale.mark_row(status::ROW_TEMPERATURE);
        self.commit(next)?;

        Ok(Activity::Temperature {
            celsius: sample.celsius,
            overheating: next.is_overheating,
        })
    }

    fn service_button(&mut self) -> Result<Activity, DeviceError> {
        let mut next = self.state;
        next.led_source = self.state.led_source.toggled();

        // A toggle always rewrites both LED registers
        self.stale.source = true;
        self.stale.level = true;
        self.stale.mark_row(status::ROW_LED);
        self.commit(next)?;

        Ok(Activity::Button {
            source: next.led_source,
        })
    }

    /// Brightness the LED should have in the current state
    pub fn led_level(&self) -> u8 {
        self.level_for(&self.state)
    }

    fn level_for(&self, state: &DeviceState) -> u8 {
        let levels = self.config.led;
        match state.led_source {
            LedSource::Manual => levels.manual,
            LedSource::Light if state.is_night => levels.night,
            LedSource::Light => levels.day,
        }
    }

    /// Store `next` and write every output that no longer matches
    fn commit(&mut self, next: DeviceState) -> Result<(), DeviceError> {
        if next.led_source != self.state.led_source {
            self.stale.source = true;
        }
        if self.level_for(&next) != self.led_level() {
            self.stale.level = true;
        }
        self.state = next;
        self.flush()
    }

    /// Write the stale outputs; each is marked fresh once it lands
    fn flush(&mut self) -> Result<(), DeviceError> {
        if self.stale.source {
            self.led.set_source(self.state.led_source)?;
            self.stale.source = false;
        }
        if self.stale.level {
            self.led.set_brightness(self.led_level())?;
            self.stale.level = false;
        }
        for row in status::ROWS {
            if self.stale.has_row(row) {
                self.paint(row)?;
                self.stale.clear_row(row);
            }
        }
        Ok(())
    }

    fn paint(&mut self, row: u8) -> Result<(), DeviceError> {
        for display in self.displays.iter_mut() {
            status::paint(display, row, &self.state)?;
        }
        Ok(())
    }
}

impl<L, T, O, D> Coordinator<'_, L, T, O, D> {
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn flags(&self) -> &InterruptFlags {
        self.flags
    }

    pub fn light(&self) -> &L {
        &self.light
    }

    pub fn temperature(&self) -> &T {
        &self.temperature
    }

    pub fn led(&self) -> &O {
        &self.led
    }

    pub fn displays(&self) -> &[D] {
        &self.displays
    }
}
