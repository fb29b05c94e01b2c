//! Hardware interface abstraction
//!
//! This module provides the [`RegisterInterface`] trait and the
//! [`I2cInterface`] struct for talking to the TC358743 register map over I2C.
//!
//! ## Wire Format
//!
//! Every transaction starts with the 16-bit register address, high byte
//! first. A write appends the payload to the same message. A read is a
//! combined transfer: the address write, then a repeated start and the read.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tc358743::{I2cInterface, RegisterInterface};
//!
//! let mut interface = I2cInterface::new(i2c);
//!
//! // Assert reset
//! interface.write(0x0002, &[0x00, 0x0F])?;
//!
//! // Read the video input status
//! let mut status = [0u8; 1];
//! interface.read(0x8521, &mut status)?;
//! ```

use core::fmt::Debug;
use embedded_hal::i2c::I2c;

use crate::I2C_ADDRESS;

/// Largest payload a single write may carry, excluding the address bytes
pub const MAX_WRITE_PAYLOAD: usize = 1022;

/// Trait for raw access to the TC358743 register map
///
/// Implementations perform each call as one atomic bus exchange. The
/// [`Bus`](crate::bus::Bus) layer on top decides what to do with failures.
pub trait RegisterInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Read `buf.len()` bytes starting at `register`
    ///
    /// # Errors
    ///
    /// Returns an error if the combined write/read transfer did not complete.
    fn read(&mut self, register: u16, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write `data` starting at `register`
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer did not complete or `data` is too long.
    fn write(&mut self, register: u16, data: &[u8]) -> Result<(), Self::Error>;
}

/// Errors that can occur at the interface level
#[derive(Debug)]
pub enum InterfaceError<I2cErr> {
    /// I2C communication error
    I2c(I2cErr),
    /// Payload exceeds [`MAX_WRITE_PAYLOAD`]
    PayloadTooLarge {
        /// Requested message length including the address bytes
        len: usize,
    },
}

impl<I2cErr: Debug> core::fmt::Display for InterfaceError<I2cErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InterfaceError::I2c(e) => write!(f, "I2C error: {e:?}"),
            InterfaceError::PayloadTooLarge { len } => {
                write!(f, "message of {len} bytes is too big")
            }
        }
    }
}

impl<I2cErr: Debug> core::error::Error for InterfaceError<I2cErr> {}

/// I2C implementation of [`RegisterInterface`]
///
/// Talks to the chip at [`I2C_ADDRESS`] unless built with
/// [`I2cInterface::with_address`].
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, I2C_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Give back the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> RegisterInterface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = InterfaceError<I2C::Error>;

    fn read(&mut self, register: u16, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c
            .write_read(self.address, &register.to_be_bytes(), buf)
            .map_err(InterfaceError::I2c)
    }

    fn write(&mut self, register: u16, data: &[u8]) -> Result<(), Self::Error> {
        if data.len() > MAX_WRITE_PAYLOAD {
            return Err(InterfaceError::PayloadTooLarge {
                len: data.len() + 2,
            });
        }

        let mut frame = [0u8; 2 + MAX_WRITE_PAYLOAD];
        frame[..2].copy_from_slice(&register.to_be_bytes());
        frame[2..2 + data.len()].copy_from_slice(data);

        self.i2c
            .write(self.address, &frame[..2 + data.len()])
            .map_err(InterfaceError::I2c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    /// Records every message and answers reads with a fixed byte
    struct FakeI2c {
        messages: Vec<(u8, Vec<u8>)>,
        read_fill: u8,
        fail: bool,
    }

    impl FakeI2c {
        fn new() -> Self {
            Self {
                messages: Vec::new(),
                read_fill: 0,
                fail: false,
            }
        }
    }

    impl ErrorType for FakeI2c {
        type Error = ErrorKind;
    }

    impl I2c for FakeI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => self.messages.push((address, bytes.to_vec())),
                    Operation::Read(buf) => buf.fill(self.read_fill),
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_write_prefixes_big_endian_register() {
        let mut interface = I2cInterface::new(FakeI2c::new());
        interface.write(0x8C10, &[0xAA, 0xBB]).unwrap();

        let i2c = interface.release();
        assert_eq!(i2c.messages, vec![(0x0F, vec![0x8C, 0x10, 0xAA, 0xBB])]);
    }

    #[test]
    fn test_read_sends_address_then_fills_buffer() {
        let mut fake = FakeI2c::new();
        fake.read_fill = 0x5C;
        let mut interface = I2cInterface::with_address(fake, 0x10);

        let mut buf = [0u8; 2];
        interface.read(0x8521, &mut buf).unwrap();

        assert_eq!(buf, [0x5C, 0x5C]);
        assert_eq!(interface.release().messages, vec![(0x10, vec![0x85, 0x21])]);
    }

    #[test]
    fn test_oversized_payload_is_rejected() {
        let mut interface = I2cInterface::new(FakeI2c::new());
        let data = [0u8; MAX_WRITE_PAYLOAD + 1];

        let err = interface.write(0x8C00, &data).unwrap_err();
        assert!(matches!(
            err,
            InterfaceError::PayloadTooLarge { len } if len == MAX_WRITE_PAYLOAD + 3
        ));
        assert!(interface.release().messages.is_empty());
    }

    #[test]
    fn test_transport_error_is_wrapped() {
        let mut fake = FakeI2c::new();
        fake.fail = true;
        let mut interface = I2cInterface::new(fake);

        let err = interface.write(0x8544, &[0x01]).unwrap_err();
        assert!(matches!(err, InterfaceError::I2c(ErrorKind::Other)));
    }
}
