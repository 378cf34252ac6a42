//! Canopy - Sensor Shield Firmware
//!
//! Main firmware binary for RP2040 boards carrying the sensor shield.
//! Edge tasks latch interrupt flags; the main task ticks the coordinator,
//! which does all sensor, LED and display I/O.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pin};
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::spi::Spi;
use embassy_rp::Peri;
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use canopy_core::config::{
    CoordinatorConfig, DisplayGeometry, EdgeMap, LightThresholds, TemperatureThresholds,
};
use canopy_core::{Activity, Coordinator, EdgeSource};
use canopy_drivers::display::Hd44780;
use canopy_drivers::input::EdgeInput;
use canopy_drivers::led::SpiLed;
use canopy_drivers::sensor::{lm75b, ltr390, Lm75b, Ltr390};
use canopy_hal::SharedBus;

use crate::board::I2cAdapter;
use crate::tasks::FLAGS;

mod board;
mod tasks;

type Bus = I2cAdapter<I2c<'static, I2C0, Blocking>>;

// Shared I2C bus (must live forever for the drivers' handles)
static I2C_BUS: StaticCell<SharedBus<Bus>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Canopy firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Shared I2C bus: both sensors and both display backpacks
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, board::i2c_config());
    let bus: &'static SharedBus<Bus> = I2C_BUS.init(SharedBus::new(I2cAdapter::new(i2c)));

    let mut light = Ltr390::new(bus.handle(), ltr390::DEFAULT_ADDRESS, LightThresholds::default());
    match light.init() {
        Ok(()) => info!("Light sensor configured"),
        Err(e) => warn!("Light sensor setup failed: {}", e),
    }

    let mut temperature = Lm75b::new(
        bus.handle(),
        lm75b::DEFAULT_ADDRESS,
        TemperatureThresholds::default(),
    );
    match temperature.init() {
        Ok(()) => info!("Temperature sensor configured"),
        Err(e) => warn!("Temperature sensor setup failed: {}", e),
    }

    // LED driver on SPI0 (transmit only), chip select on GPIO17
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, board::spi_config());
    let cs = Output::new(p.PIN_17, Level::High);
    let Ok(led_device) = ExclusiveDevice::new_no_delay(spi, cs);
    let led = SpiLed::new(led_device);

    let mut coordinator = Coordinator::new(
        &FLAGS,
        light,
        temperature,
        led,
        CoordinatorConfig::default(),
    );

    for address in board::DISPLAY_ADDRESSES {
        let mut display = Hd44780::new(bus.handle(), Delay, address, DisplayGeometry::default());
        match display.init() {
            Ok(()) => {
                if coordinator.attach_display(display).is_err() {
                    warn!("No room for display at {=u8:#x}", address);
                } else {
                    info!("Display at {=u8:#x} initialized", address);
                }
            }
            Err(e) => warn!("Display at {=u8:#x} not responding: {}", address, e),
        }
    }

    if let Err(e) = coordinator.refresh() {
        warn!("Initial status refresh failed: {}", e);
    }

    // Interrupt lines: each GPIO is looked up in the edge map for its
    // source and bias
    let map = EdgeMap::default();
    let edge_pins: [Peri<'static, AnyPin>; EdgeSource::COUNT] =
        [p.PIN_6.into(), p.PIN_7.into(), p.PIN_8.into()];
    for pin in edge_pins {
        let number = pin.pin();
        let Some(line) = map.line_for(number) else {
            warn!("GPIO{} is not in the edge map", number);
            continue;
        };
        info!("GPIO{} -> {}", line.pin, line.source);

        let input = Input::new(pin, board::pull(line.config.pull));
        let edge = match line.source {
            EdgeSource::Button => EdgeInput::button(input, Delay),
            source => EdgeInput::sensor(input, Delay, source),
        };
        spawner.spawn(tasks::edge_task(edge)).unwrap();
    }

    info!("All tasks spawned, entering tick loop");

    loop {
        for activity in coordinator.tick() {
            report(&activity);
        }
        yield_now().await;
    }
}

/// Log what one handler did
fn report(activity: &Activity) {
    match activity {
        Activity::Light {
            raw,
            night,
            rearmed,
        } => {
            info!("Light: {} counts, night={}", raw, night);
            if !rearmed {
                warn!("Light interrupt not cleared");
            }
        }
        Activity::Temperature {
            celsius,
            overheating,
        } => {
            info!("Temperature: {}C, overheating={}", celsius, overheating);
        }
        Activity::Button { source } => {
            info!("LED source: {}", source);
        }
        Activity::Fault { source, error } => {
            warn!("{} handler failed: {}", source, error);
        }
    }
}
