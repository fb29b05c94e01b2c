//! Command table interpreter
//!
//! Runs a list of [`RegisterOp`] entries strictly in order. Adjacent writes
//! are never merged, and no entry can stop the ones after it: bus failures
//! are absorbed by [`Bus`] and unsupported entries are logged and skipped.

use embedded_hal::delay::DelayNs;

use crate::bus::{Bus, Width};
use crate::error::UnsupportedOperation;
use crate::interface::RegisterInterface;
use crate::op::{Access, RegisterOp};

/// What happened while running one command list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Entries that were carried out, sleeps included
    pub executed: usize,
    /// Entries skipped because their access mode is unsupported
    pub skipped: usize,
    /// Bus transactions that failed
    pub bus_failures: usize,
}

impl RunSummary {
    /// Skipped entries plus failed transactions
    pub fn warnings(&self) -> usize {
        self.skipped + self.bus_failures
    }

    /// Fold another summary into this one
    pub fn absorb(&mut self, other: RunSummary) {
        self.executed += other.executed;
        self.skipped += other.skipped;
        self.bus_failures += other.bus_failures;
    }
}

/// Execute `ops` in order against `bus`
pub fn run<I, D>(bus: &mut Bus<I>, delay: &mut D, ops: &[RegisterOp]) -> RunSummary
where
    I: RegisterInterface,
    D: DelayNs,
{
    let failures_before = bus.failures();
    let mut summary = RunSummary::default();

    for (index, op) in ops.iter().enumerate() {
        match op.access {
            Access::Write1 => bus.write(op.address, Width::One, op.value),
            Access::Write2 => bus.write(op.address, Width::Two, op.value),
            Access::Write4 => bus.write(op.address, Width::Four, op.value),
            Access::ReadModifyWrite1 { mask } => {
                bus.read_modify_write(op.address, Width::One, u32::from(mask), op.value & 0xFF)
            }
            Access::ReadModifyWrite2 { mask } => {
                bus.read_modify_write(op.address, Width::Two, u32::from(mask), op.value & 0xFFFF)
            }
            Access::Sleep => delay.delay_ms(op.value),
            Access::Unsupported(_) => {
                let err = UnsupportedOperation {
                    index,
                    access: op.access,
                };
                log::warn!("{err}");
                summary.skipped += 1;
                continue;
            }
        }
        summary.executed += 1;
    }

    summary.bus_failures = bus.failures() - failures_before;
    summary
}
