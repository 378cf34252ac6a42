//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in canopy-core for the shield's parts:
//!
//! - Ambient light sensor (LTR-390, I2C)
//! - Temperature sensor (LM75B-class, I2C)
//! - LED current driver (any `embedded-hal` SPI device)
//! - Character displays (HD44780 behind a PCF8574 I2C backpack)
//! - Edge-watching inputs for the interrupt lines and the push button

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod input;
pub mod led;
pub mod sensor;

#[cfg(test)]
mod testing;
