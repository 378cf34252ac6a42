//! Configuration types
//!
//! Board-agnostic configuration structures. Everything is fixed at build
//! time; nothing is read from flash or changed at runtime.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
