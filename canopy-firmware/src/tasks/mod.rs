//! Embassy async tasks
//!
//! Edge tasks only raise flags; all bus work happens in the main task's
//! tick loop.

pub mod edge;

pub use edge::{edge_task, FLAGS};
