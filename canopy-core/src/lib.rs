//! Board-agnostic core logic for the sensor shield firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Interrupt flags bridging edge context and the polling loop
//! - Hysteresis bands for the light and temperature thresholds
//! - Device state and the coordinator's phase machine
//! - The coordinator itself (`tick`)
//! - Custom glyph bitmaps for the character displays
//! - Device traits implemented by `canopy-drivers`
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod coordinator;
pub mod flags;
pub mod glyph;
pub mod hysteresis;
pub mod state;
pub mod traits;

pub use coordinator::{Activities, Activity, Coordinator};
pub use flags::{EdgeHandler, EdgeSource, InterruptFlag, InterruptFlags};
pub use state::{DeviceState, LedSource};
