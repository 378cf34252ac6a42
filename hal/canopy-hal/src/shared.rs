//! Shared I2C bus
//!
//! The sensors and both displays sit on the same bus. [`SharedBus`] owns it
//! and hands out [`BusHandle`]s, each of which is a full [`I2cBus`]. All
//! bus I/O happens from the polling context, so a borrow never overlaps
//! another; the `RefCell` only turns a violation of that into a panic
//! instead of aliasing.

use core::cell::RefCell;

use crate::i2c::I2cBus;

/// Bus owner shared by several device drivers
pub struct SharedBus<B> {
    bus: RefCell<B>,
}

impl<B: I2cBus> SharedBus<B> {
    /// Take ownership of `bus`
    pub const fn new(bus: B) -> Self {
        Self {
            bus: RefCell::new(bus),
        }
    }

    /// Get a handle usable as an independent [`I2cBus`]
    pub fn handle(&self) -> BusHandle<'_, B> {
        BusHandle { bus: &self.bus }
    }

    /// Run `f` with exclusive access to the underlying bus
    pub fn with<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        f(&mut self.bus.borrow_mut())
    }

    /// Release the underlying bus
    pub fn into_inner(self) -> B {
        self.bus.into_inner()
    }
}

/// A borrowed view of a [`SharedBus`]
pub struct BusHandle<'a, B> {
    bus: &'a RefCell<B>,
}

impl<B: I2cBus> I2cBus for BusHandle<'_, B> {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.borrow_mut().write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.borrow_mut().read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.bus.borrow_mut().write_read(address, write_data, read_buf)
    }
}
