//! Canopy Hardware Abstraction Layer
//!
//! This crate defines the I2C transport the shield drivers are written
//! against, plus the line and link settings the board translates for its
//! HAL. Chip-specific glue (the RP2040 firmware, or a mock in tests)
//! implements the traits, so every driver and the coordinator run
//! unchanged on the host. The SPI LED driver uses `embedded-hal`'s
//! `SpiDevice` directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  canopy-firmware (RP2040 superloop)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  canopy-core / canopy-drivers           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  canopy-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`i2c::RegisterBus`] - Register-framed transactions on top of [`i2c::I2cBus`]
//! - [`shared::SharedBus`] - One I2C bus handed out to several drivers

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod shared;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::{Edge, Pull};
pub use i2c::{I2cBus, RegisterBus, TransportError};
pub use shared::{BusHandle, SharedBus};
pub use spi::SpiConfig;
