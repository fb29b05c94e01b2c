//! Register operations, the entries of a command table

/// How a [`RegisterOp`] touches its register
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Write the low byte of the value
    Write1,
    /// Write the low 16 bits of the value
    Write2,
    /// Write the full 32-bit value
    Write4,
    /// Read one byte, AND with `mask`, OR with the value, write back
    ReadModifyWrite1 { mask: u8 },
    /// Read 16 bits, AND with `mask`, OR with the value, write back
    ReadModifyWrite2 { mask: u16 },
    /// Pause for `value` milliseconds without touching the bus
    Sleep,
    /// Raw width code that has no meaning; the entry is skipped
    Unsupported(u16),
}

impl Access {
    /// Bytes moved on the bus by this access, if it moves any
    pub fn width(&self) -> Option<usize> {
        match self {
            Access::Write1 | Access::ReadModifyWrite1 { .. } => Some(1),
            Access::Write2 | Access::ReadModifyWrite2 { .. } => Some(2),
            Access::Write4 => Some(4),
            Access::Sleep | Access::Unsupported(_) => None,
        }
    }
}

/// One entry of a command table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterOp {
    /// Register address, ignored for [`Access::Sleep`]
    pub address: u16,
    /// Payload, or milliseconds for [`Access::Sleep`]
    pub value: u32,
    /// Access mode
    pub access: Access,
}

impl RegisterOp {
    pub const fn write8(address: u16, value: u8) -> Self {
        Self {
            address,
            value: value as u32,
            access: Access::Write1,
        }
    }

    pub const fn write16(address: u16, value: u16) -> Self {
        Self {
            address,
            value: value as u32,
            access: Access::Write2,
        }
    }

    pub const fn write32(address: u16, value: u32) -> Self {
        Self {
            address,
            value,
            access: Access::Write4,
        }
    }

    /// Set bits in an 8-bit register, keeping the bits in `mask`
    pub const fn modify8(address: u16, mask: u8, value: u8) -> Self {
        Self {
            address,
            value: value as u32,
            access: Access::ReadModifyWrite1 { mask },
        }
    }

    /// Set bits in a 16-bit register, keeping the bits in `mask`
    pub const fn modify16(address: u16, mask: u16, value: u16) -> Self {
        Self {
            address,
            value: value as u32,
            access: Access::ReadModifyWrite2 { mask },
        }
    }

    pub const fn sleep_ms(ms: u32) -> Self {
        Self {
            address: 0,
            value: ms,
            access: Access::Sleep,
        }
    }

    /// Decode an entry written with the chip vendor's table width codes
    ///
    /// | code     | access                               |
    /// |----------|--------------------------------------|
    /// | `1`      | [`Access::Write1`]                   |
    /// | `2`      | [`Access::Write2`]                   |
    /// | `4`      | [`Access::Write4`]                   |
    /// | `0x11`   | 8-bit read-modify-write, OR-in       |
    /// | `0x12`   | 16-bit read-modify-write, OR-in      |
    /// | `0xFFFF` | [`Access::Sleep`]                    |
    ///
    /// Anything else becomes [`Access::Unsupported`] and is skipped at run time.
    pub const fn from_raw(address: u16, value: u32, code: u16) -> Self {
        let access = match code {
            1 => Access::Write1,
            2 => Access::Write2,
            4 => Access::Write4,
            0x11 => Access::ReadModifyWrite1 { mask: 0xFF },
            0x12 => Access::ReadModifyWrite2 { mask: 0xFFFF },
            0xFFFF => Access::Sleep,
            other => Access::Unsupported(other),
        };
        Self {
            address,
            value,
            access,
        }
    }
}
