//! Sensor drivers
//!
//! Both shield sensors sit on the shared I2C bus and signal threshold
//! crossings on an open-drain interrupt line.

pub mod lm75b;
pub mod ltr390;

pub use lm75b::Lm75b;
pub use ltr390::Ltr390;
