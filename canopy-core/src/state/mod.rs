//! Device state and coordinator phases
//!
//! `DeviceState` is what the shield currently believes about the world;
//! `Phase` is where the coordinator is inside a tick.

pub mod device;
pub mod machine;

pub use device::{DeviceState, LedSource};
pub use machine::{Event, Phase};
