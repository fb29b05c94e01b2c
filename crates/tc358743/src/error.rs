//! Error types for the driver
//!
//! None of these are returned from the start/stop sequences. They describe a
//! failed step so it can be logged, after which the sequence carries on.
//!
//! ## Error Types
//!
//! - [`BusError`] - A register transaction that did not complete
//! - [`UnsupportedOperation`] - A command table entry that was skipped
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level I2C errors
//!
//! ## Example
//!
//! ```
//! use tc358743::{BusError, error::Direction};
//!
//! let err = BusError { register: 0x8521, direction: Direction::Read, len: 1 };
//! assert_eq!(
//!     format!("{err}"),
//!     "reading 1 byte(s) at register 0x8521 failed"
//! );
//! ```

use crate::op::Access;

/// Direction of a register transaction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Address write followed by a read
    Read,
    /// Address and payload in one write
    Write,
}

/// A register transaction that did not complete as expected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusError {
    /// Register the transaction targeted
    pub register: u16,
    /// Whether the transaction was a read or a write
    pub direction: Direction,
    /// Payload length in bytes
    pub len: usize,
}

impl core::fmt::Display for BusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let verb = match self.direction {
            Direction::Read => "reading",
            Direction::Write => "writing",
        };
        write!(
            f,
            "{verb} {} byte(s) at register {:#06x} failed",
            self.len, self.register
        )
    }
}

impl core::error::Error for BusError {}

/// A command table entry whose access mode cannot be executed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnsupportedOperation {
    /// Position of the entry in its command list
    pub index: usize,
    /// The offending access mode
    pub access: Access,
}

impl core::fmt::Display for UnsupportedOperation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.access {
            Access::Unsupported(code) => {
                write!(f, "entry {}: unsupported access {code:#x}", self.index)
            }
            other => write!(f, "entry {}: unsupported access {other:?}", self.index),
        }
    }
}

impl core::error::Error for UnsupportedOperation {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn test_bus_error_message() {
        let err = BusError {
            register: 0x0004,
            direction: Direction::Write,
            len: 2,
        };
        assert_eq!(
            format!("{err}"),
            "writing 2 byte(s) at register 0x0004 failed"
        );
    }

    #[test]
    fn test_unsupported_message_shows_raw_code() {
        let err = UnsupportedOperation {
            index: 7,
            access: Access::Unsupported(0x13),
        };
        assert_eq!(format!("{err}"), "entry 7: unsupported access 0x13");
    }
}
