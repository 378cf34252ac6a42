//! Recording mocks shared by the driver tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use canopy_hal::I2cBus;
use embedded_hal::spi::{ErrorKind, Operation};

/// One recorded bus transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Write { address: u8, bytes: Vec<u8> },
    Read { address: u8, len: usize },
    WriteRead { address: u8, bytes: Vec<u8>, len: usize },
}

/// Mock I2C bus
///
/// Reads are answered from `responses` in order (zeros when empty).
/// `fail` rejects every transfer; `fail_register` rejects only the
/// transfers whose first written byte is that register.
#[derive(Debug, Default)]
pub struct MockBus {
    pub log: Vec<Transaction>,
    pub responses: VecDeque<Vec<u8>>,
    pub fail: bool,
    pub fail_register: Option<u8>,
}

impl MockBus {
    pub fn respond(&mut self, bytes: &[u8]) {
        self.responses.push_back(bytes.to_vec());
    }

    /// Payloads of all plain writes to `address`
    pub fn writes_to(&self, address: u8) -> Vec<Vec<u8>> {
        self.log
            .iter()
            .filter_map(|t| match t {
                Transaction::Write { address: a, bytes } if *a == address => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    fn rejects(&self, data: &[u8]) -> bool {
        self.fail || (self.fail_register.is_some() && data.first().copied() == self.fail_register)
    }

    fn answer(&mut self, buf: &mut [u8]) {
        let data = self.responses.pop_front().unwrap_or_default();
        for (i, b) in buf.iter_mut().enumerate() {
            *b = data.get(i).copied().unwrap_or(0);
        }
    }
}

impl I2cBus for MockBus {
    type Error = ();

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
        if self.rejects(data) {
            return Err(());
        }
        self.log.push(Transaction::Write {
            address,
            bytes: data.to_vec(),
        });
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.log.push(Transaction::Read {
            address,
            len: buf.len(),
        });
        self.answer(buf);
        Ok(())
    }

    fn write_read(&mut self, address: u8, data: &[u8], buf: &mut [u8]) -> Result<(), ()> {
        if self.rejects(data) {
            return Err(());
        }
        self.log.push(Transaction::WriteRead {
            address,
            bytes: data.to_vec(),
            len: buf.len(),
        });
        self.answer(buf);
        Ok(())
    }
}

/// Mock blocking delay, accumulates requested time
#[derive(Debug, Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl MockDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

/// Mock SPI device, records the payload of each write
#[derive(Debug, Default)]
pub struct MockSpiDevice {
    pub frames: Vec<Vec<u8>>,
    pub fail: bool,
}

impl embedded_hal::spi::ErrorType for MockSpiDevice {
    type Error = ErrorKind;
}

impl embedded_hal::spi::SpiDevice for MockSpiDevice {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), ErrorKind> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        for op in operations.iter() {
            if let Operation::Write(bytes) = op {
                self.frames.push(bytes.to_vec());
            }
        }
        Ok(())
    }
}

/// What a raw SPI bus and its chip-select line saw, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpiEvent {
    CsLow,
    CsHigh,
    Write(Vec<u8>),
    Flush,
}

pub type SpiLog = Rc<RefCell<Vec<SpiEvent>>>;

/// Mock raw SPI bus for building an `ExclusiveDevice`
pub struct MockSpiBus {
    log: SpiLog,
    fail: bool,
}

impl MockSpiBus {
    pub fn new(log: &SpiLog, fail: bool) -> Self {
        Self {
            log: log.clone(),
            fail,
        }
    }

    fn check(&self) -> Result<(), ErrorKind> {
        if self.fail {
            Err(ErrorKind::Other)
        } else {
            Ok(())
        }
    }
}

impl embedded_hal::spi::ErrorType for MockSpiBus {
    type Error = ErrorKind;
}

impl embedded_hal::spi::SpiBus for MockSpiBus {
    fn read(&mut self, words: &mut [u8]) -> Result<(), ErrorKind> {
        self.check()?;
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), ErrorKind> {
        self.check()?;
        self.log.borrow_mut().push(SpiEvent::Write(words.to_vec()));
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), ErrorKind> {
        self.write(write)?;
        read.fill(0);
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), ErrorKind> {
        self.write(words)
    }

    fn flush(&mut self) -> Result<(), ErrorKind> {
        self.log.borrow_mut().push(SpiEvent::Flush);
        Ok(())
    }
}

/// Mock chip-select line sharing the bus log
pub struct MockCs {
    log: SpiLog,
}

impl MockCs {
    pub fn new(log: &SpiLog) -> Self {
        Self { log: log.clone() }
    }
}

impl embedded_hal::digital::ErrorType for MockCs {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for MockCs {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.log.borrow_mut().push(SpiEvent::CsLow);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.log.borrow_mut().push(SpiEvent::CsHigh);
        Ok(())
    }
}
