//! Register access with log-and-continue semantics
//!
//! [`Bus`] wraps a [`RegisterInterface`] and never returns an error: a failed
//! read yields zero, a failed write is dropped. Each failure is logged at warn
//! level and counted so that the caller can report a total at the end.
//!
//! Register values wider than one byte travel least significant byte first.

use crate::error::{BusError, Direction};
use crate::interface::RegisterInterface;

/// Register access width
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    One,
    Two,
    Four,
}

impl Width {
    pub const fn bytes(self) -> usize {
        match self {
            Width::One => 1,
            Width::Two => 2,
            Width::Four => 4,
        }
    }

    pub const fn from_bytes(bytes: usize) -> Option<Self> {
        match bytes {
            1 => Some(Width::One),
            2 => Some(Width::Two),
            4 => Some(Width::Four),
            _ => None,
        }
    }
}

/// Permissive transaction driver over a [`RegisterInterface`]
pub struct Bus<I> {
    interface: I,
    failures: usize,
}

impl<I> Bus<I>
where
    I: RegisterInterface,
{
    pub fn new(interface: I) -> Self {
        Self {
            interface,
            failures: 0,
        }
    }

    /// Read a register, returning zero if the transaction fails
    pub fn read(&mut self, register: u16, width: Width) -> u32 {
        let mut buf = [0u8; 4];
        let len = width.bytes();

        match self.interface.read(register, &mut buf[..len]) {
            Ok(()) => u32::from_le_bytes(buf),
            Err(e) => {
                self.record_failure(register, Direction::Read, len, &e);
                0
            }
        }
    }

    /// Write the low `width` bytes of `value` to a register
    pub fn write(&mut self, register: u16, width: Width, value: u32) {
        let bytes = value.to_le_bytes();
        self.write_bytes(register, &bytes[..width.bytes()]);
    }

    /// Write a raw byte block starting at `register`
    pub fn write_bytes(&mut self, register: u16, data: &[u8]) {
        if let Err(e) = self.interface.write(register, data) {
            self.record_failure(register, Direction::Write, data.len(), &e);
        }
    }

    /// Write back `(current & mask) | value`
    ///
    /// The read and the write are separate transactions. If the read fails
    /// the current value is taken as zero and the write still happens.
    pub fn read_modify_write(&mut self, register: u16, width: Width, mask: u32, value: u32) {
        let current = self.read(register, width);
        self.write(register, width, (current & mask) | value);
    }

    /// Number of failed transactions since this bus was created
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Give back the underlying interface
    pub fn release(self) -> I {
        self.interface
    }

    fn record_failure(&mut self, register: u16, direction: Direction, len: usize, cause: &I::Error) {
        self.failures += 1;
        let err = BusError {
            register,
            direction,
            len,
        };
        log::warn!("{err}: {cause:?}");
    }
}
