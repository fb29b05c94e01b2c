//! In-memory bus and delay for exercising command tables without hardware.
//!
//! [`RecordingBus`] models the chip's byte-addressed register map, records
//! every transaction in order and can fail chosen transactions on purpose.
//! [`RecordingDelay`] remembers every millisecond sleep instead of blocking.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::interface::RegisterInterface;

/// One recorded bus exchange
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transaction {
    Read { register: u16, len: usize },
    Write { register: u16, bytes: Vec<u8> },
}

impl Transaction {
    pub fn read(register: u16, len: usize) -> Self {
        Transaction::Read { register, len }
    }

    pub fn write(register: u16, bytes: &[u8]) -> Self {
        Transaction::Write {
            register,
            bytes: bytes.to_vec(),
        }
    }

    pub fn register(&self) -> u16 {
        match self {
            Transaction::Read { register, .. } | Transaction::Write { register, .. } => *register,
        }
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        match self {
            Transaction::Read { len, .. } => *len,
            Transaction::Write { bytes, .. } => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_write(&self) -> bool {
        matches!(self, Transaction::Write { .. })
    }
}

/// Error returned for a transaction chosen with [`RecordingBus::fail_nth`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InjectedFault {
    /// Index of the failed transaction
    pub index: usize,
}

/// Register map that records traffic instead of touching hardware
#[derive(Default)]
pub struct RecordingBus {
    memory: BTreeMap<u16, u8>,
    transactions: Vec<Transaction>,
    failing: BTreeSet<usize>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload register contents without recording a transaction
    pub fn set_register(&mut self, register: u16, bytes: &[u8]) {
        for (offset, byte) in bytes.iter().enumerate() {
            self.memory
                .insert(register.wrapping_add(offset as u16), *byte);
        }
    }

    /// Current contents of `len` bytes starting at `register`
    pub fn register(&self, register: u16, len: usize) -> Vec<u8> {
        (0..len)
            .map(|offset| {
                self.memory
                    .get(&register.wrapping_add(offset as u16))
                    .copied()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Make the `index`-th transaction (counting from zero) fail
    ///
    /// The failed transaction is still recorded but leaves memory untouched.
    pub fn fail_nth(&mut self, index: usize) {
        self.failing.insert(index);
    }

    /// Every transaction attempted so far, in order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Register and payload of every write, in order
    pub fn writes(&self) -> impl Iterator<Item = (u16, &[u8])> {
        self.transactions.iter().filter_map(|t| match t {
            Transaction::Write { register, bytes } => Some((*register, bytes.as_slice())),
            Transaction::Read { .. } => None,
        })
    }

    fn record(&mut self, transaction: Transaction) -> Result<(), InjectedFault> {
        let index = self.transactions.len();
        self.transactions.push(transaction);
        if self.failing.contains(&index) {
            Err(InjectedFault { index })
        } else {
            Ok(())
        }
    }
}

impl RegisterInterface for RecordingBus {
    type Error = InjectedFault;

    fn read(&mut self, register: u16, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.record(Transaction::read(register, buf.len()))?;
        buf.copy_from_slice(&self.register(register, buf.len()));
        Ok(())
    }

    fn write(&mut self, register: u16, data: &[u8]) -> Result<(), Self::Error> {
        self.record(Transaction::write(register, data))?;
        self.set_register(register, data);
        Ok(())
    }
}

/// Delay that records requested sleeps and returns immediately
#[derive(Default)]
pub struct RecordingDelay {
    sleeps_ms: Vec<u32>,
    total_ns: u64,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Millisecond sleeps requested through `delay_ms`, in order
    pub fn sleeps_ms(&self) -> &[u32] {
        &self.sleeps_ms
    }

    /// Total requested delay in nanoseconds
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.sleeps_ms.push(ms);
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}
