//! Interrupt flags
//!
//! The only state shared between interrupt context and the polling loop.
//! Edge context raises a flag and returns; the coordinator takes it on its
//! next `tick`. A flag is a latch, not a counter: edges arriving before the
//! take collapse into one.

use portable_atomic::{AtomicBool, Ordering};

/// Logical edge sources, in coordinator priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeSource {
    /// Ambient light threshold crossing
    Light,
    /// Temperature comparator output
    Temperature,
    /// Push button
    Button,
}

impl EdgeSource {
    /// Number of sources
    pub const COUNT: usize = 3;

    /// All sources, highest priority first
    pub const ALL: [EdgeSource; Self::COUNT] =
        [EdgeSource::Light, EdgeSource::Temperature, EdgeSource::Button];

    const fn index(self) -> usize {
        match self {
            EdgeSource::Light => 0,
            EdgeSource::Temperature => 1,
            EdgeSource::Button => 2,
        }
    }
}

/// Receiver of edge notifications
///
/// Called from interrupt (or edge-watching task) context, so implementations
/// must not block and must not touch a bus.
pub trait EdgeHandler {
    fn on_edge(&self, source: EdgeSource);
}

/// One edge latch
#[derive(Debug)]
pub struct InterruptFlag {
    pending: AtomicBool,
}

impl Default for InterruptFlag {
    fn default() -> Self {
        Self::new(false)
    }
}

impl InterruptFlag {
    /// Create a flag, optionally already pending
    pub const fn new(pending: bool) -> Self {
        Self {
            pending: AtomicBool::new(pending),
        }
    }

    /// Mark the flag pending (edge context)
    pub fn raise(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Observe and clear in one step (polling context)
    ///
    /// An edge that lands after this returns is kept for the next take.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Observe without clearing
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

/// The shield's set of edge latches
#[derive(Debug, Default)]
pub struct InterruptFlags {
    flags: [InterruptFlag; EdgeSource::COUNT],
}

impl InterruptFlags {
    /// All flags clear
    pub const fn new() -> Self {
        Self {
            flags: [
                InterruptFlag::new(false),
                InterruptFlag::new(false),
                InterruptFlag::new(false),
            ],
        }
    }

    /// Sensor flags pending so the first tick takes an initial reading
    pub const fn primed() -> Self {
        Self {
            flags: [
                InterruptFlag::new(true),
                InterruptFlag::new(true),
                InterruptFlag::new(false),
            ],
        }
    }

    /// Access the flag for `source`
    pub fn flag(&self, source: EdgeSource) -> &InterruptFlag {
        &self.flags[source.index()]
    }

    pub fn raise(&self, source: EdgeSource) {
        self.flag(source).raise();
    }

    pub fn take(&self, source: EdgeSource) -> bool {
        self.flag(source).take()
    }

    pub fn is_pending(&self, source: EdgeSource) -> bool {
        self.flag(source).is_pending()
    }

    /// Check whether any flag is pending
    pub fn any_pending(&self) -> bool {
        EdgeSource::ALL.iter().any(|&s| self.is_pending(s))
    }
}

impl EdgeHandler for InterruptFlags {
    fn on_edge(&self, source: EdgeSource) {
        self.raise(source);
    }
}

impl<H: EdgeHandler + ?Sized> EdgeHandler for &H {
    fn on_edge(&self, source: EdgeSource) {
        (**self).on_edge(source);
    }
}
