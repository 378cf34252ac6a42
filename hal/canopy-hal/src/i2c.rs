//! I2C bus abstractions
//!
//! [`I2cBus`] is the raw master interface a chip HAL implements.
//! [`RegisterBus`] layers the register-addressed framing every shield
//! sensor uses on top of it: a write is the register byte followed by the
//! payload, a read writes the register pointer and then reads.
//!
//! The transport never interprets payload bytes and never retries. A
//! failing transfer is returned as-is; a hung bus blocks the caller for as
//! long as the underlying implementation blocks.

/// Maximum payload of a register-framed write, excluding the register byte
pub const MAX_PAYLOAD: usize = 8;

/// I2C bus master
///
/// Provides basic blocking I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        (**self).write_read(address, write_data, read_buf)
    }
}

/// Errors from register-framed transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<E> {
    /// The underlying bus reported a failure
    Bus(E),
    /// Payload exceeds [`MAX_PAYLOAD`]
    PayloadTooLong,
}

impl<E> From<E> for TransportError<E> {
    fn from(e: E) -> Self {
        TransportError::Bus(e)
    }
}

/// Register-addressed framing over an [`I2cBus`]
///
/// Blanket-implemented for every bus.
pub trait RegisterBus: I2cBus {
    /// Write `payload` starting at `register`
    ///
    /// Sends one transaction: `[register, payload...]`.
    fn write_register(
        &mut self,
        address: u8,
        register: u8,
        payload: &[u8],
    ) -> Result<(), TransportError<Self::Error>> {
        let frame = frame_write::<Self::Error>(register, payload)?;
        self.write(address, frame.as_bytes())?;
        Ok(())
    }

    /// Write a single byte to `register`
    fn write_register_u8(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> Result<(), TransportError<Self::Error>> {
        self.write_register(address, register, &[value])
    }

    /// Select `register` and read `buf.len()` bytes from it
    fn read_register(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.write_read(address, &[register], buf)
    }
}

impl<T: I2cBus + ?Sized> RegisterBus for T {}

/// A register write laid out in a fixed stack buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteFrame {
    bytes: [u8; MAX_PAYLOAD + 1],
    len: usize,
}

impl WriteFrame {
    /// Framed bytes, register first
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Frame a register write as `[register, payload...]`
pub fn frame_write<E>(register: u8, payload: &[u8]) -> Result<WriteFrame, TransportError<E>> {
    if payload.len() > MAX_PAYLOAD {
        return Err(TransportError::PayloadTooLong);
    }
    let mut bytes = [0u8; MAX_PAYLOAD + 1];
    bytes[0] = register;
    bytes[1..=payload.len()].copy_from_slice(payload);
    Ok(WriteFrame {
        bytes,
        len: payload.len() + 1,
    })
}

/// I2C configuration
#[derive(Debug, Clone, Copy)]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz). Every device on the shield tops out at
    /// 400 kHz; the displays' backpack is the slowest part.
    pub const STANDARD: Self = Self { frequency: 100_000 };
}
