//! Bring-up driver for the Toshiba TC358743 HDMI to CSI-2 bridge.
//!
//! The chip is configured entirely through its 16-bit register map over I2C.
//! This crate drives that map from ordered command tables:
//!
//! - [`interface`]: the [`RegisterInterface`] seam and its `embedded-hal` I2C
//!   implementation
//! - [`bus`]: permissive 1/2/4-byte register access that logs and counts
//!   failures instead of returning them
//! - [`interpreter`]: runs a list of [`RegisterOp`] entries in order
//! - [`edid`]: hex-text EDID to checksummed binary
//! - [`tables`]: the command lists for start, tuning and stop
//! - [`device`]: the [`Tc358743`] start/stop sequencer
//!
//! ## Example
//!
//! ```rust,ignore
//! use tc358743::{Builder, CommandTables, I2cInterface, Tc358743};
//!
//! let config = Builder::new().build();
//! let tables = CommandTables::new(&config);
//! let mut bridge = Tc358743::new(I2cInterface::new(i2c), delay);
//!
//! let report = bridge.start_streaming(&tables);
//! log::info!("bring-up finished with {} bus failures", report.bus_failures);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unwrap_used
    )
)]

extern crate alloc;

mod command;

pub mod bus;
pub mod config;
pub mod device;
pub mod edid;
pub mod error;
pub mod interface;
pub mod interpreter;
pub mod op;
pub mod tables;
pub mod testing;

pub use bus::{Bus, Width};
pub use config::{Builder, ColorConfig, ColorConversion, Config, EdidProfile};
pub use device::{BringUpReport, BringUpState, ResolutionClass, ResolutionProfile, Tc358743};
pub use edid::{EDID_BASE_REGISTER, EDID_SIZE};
pub use error::{BusError, UnsupportedOperation};
pub use interface::{I2cInterface, InterfaceError, RegisterInterface};
pub use interpreter::RunSummary;
pub use op::{Access, RegisterOp};
pub use tables::CommandTables;

/// 7-bit I2C address of the TC358743 control port
pub const I2C_ADDRESS: u8 = 0x0F;
