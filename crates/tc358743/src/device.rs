//! Start and stop sequencing

use embedded_hal::delay::DelayNs;

use crate::bus::{Bus, Width};
use crate::command::VI_STATUS;
use crate::edid;
use crate::interface::RegisterInterface;
use crate::interpreter::{self, RunSummary};
use crate::op::RegisterOp;
use crate::tables::CommandTables;

/// VI_STATUS bits holding the detected video format code
const FORMAT_CODE_MASK: u32 = 0x0F;

/// First format code that counts as 720p or above
pub const HD_FORMAT_CODE: u8 = 12;

/// Input resolution class, decided once per bring-up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionClass {
    /// Below 720p: one data lane
    SubHd,
    /// 720p and above: two data lanes
    HdOrAbove,
}

impl ResolutionClass {
    /// Classify a VI_STATUS format code; only the low nibble is used
    pub const fn from_format_code(code: u8) -> Self {
        if (code & 0x0F) < HD_FORMAT_CODE {
            ResolutionClass::SubHd
        } else {
            ResolutionClass::HdOrAbove
        }
    }

    /// Register values that depend on the class
    pub const fn profile(self) -> ResolutionProfile {
        match self {
            ResolutionClass::SubHd => ResolutionProfile {
                fifo_level: 0x0080,
                data_lane1: 0x1,
                csi_config: 0xA300_8080,
            },
            ResolutionClass::HdOrAbove => ResolutionProfile {
                fifo_level: 0x0008,
                data_lane1: 0x0,
                csi_config: 0xA300_8082,
            },
        }
    }
}

/// Register values chosen by a [`ResolutionClass`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolutionProfile {
    /// FIFO_CTL (0x0006)
    pub fifo_level: u16,
    /// D1W_CNTRL (0x0148): 0 enables data lane 1, 1 disables it
    pub data_lane1: u32,
    /// CSI_CONFW (0x0500) set-bit word
    pub csi_config: u32,
}

/// Progress through [`Tc358743::start_streaming`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BringUpState {
    #[default]
    Idle,
    StatusRead,
    VariantSelected,
    CoreConfigured,
    EdidLoaded,
    TunedAndEnabled,
}

/// Outcome of one bring-up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BringUpReport {
    /// Low nibble of VI_STATUS
    pub format_code: u8,
    /// Class selected from `format_code`
    pub class: ResolutionClass,
    /// Failed transactions, status read and EDID upload included
    pub bus_failures: usize,
    /// Command table entries skipped as unsupported
    pub skipped: usize,
}

impl BringUpReport {
    pub fn warnings(&self) -> usize {
        self.bus_failures + self.skipped
    }
}

/// TC358743 bridge driver
///
/// Owns the register interface and delay for as long as it lives. Every
/// operation runs to completion: failed transactions are logged and counted,
/// never retried or rolled back.
pub struct Tc358743<I, D> {
    bus: Bus<I>,
    delay: D,
    state: BringUpState,
}

impl<I, D> Tc358743<I, D>
where
    I: RegisterInterface,
    D: DelayNs,
{
    pub fn new(interface: I, delay: D) -> Self {
        Self {
            bus: Bus::new(interface),
            delay,
            state: BringUpState::Idle,
        }
    }

    /// Bring the bridge up and start CSI-2 streaming
    ///
    /// Reads the input format once, then runs the core list for its class,
    /// uploads the EDID, runs the tuning list and finally enables the
    /// transmit buffers.
    pub fn start_streaming(&mut self, tables: &CommandTables) -> BringUpReport {
        let failures_before = self.bus.failures();
        self.state = BringUpState::Idle;

        let format_code = (self.bus.read(VI_STATUS, Width::One) & FORMAT_CODE_MASK) as u8;
        self.advance(BringUpState::StatusRead);
        log::info!("VI_STATUS format code: {format_code}");

        let class = ResolutionClass::from_format_code(format_code);
        self.advance(BringUpState::VariantSelected);
        match class {
            ResolutionClass::SubHd => log::info!("Selected sub 720p registers"),
            ResolutionClass::HdOrAbove => log::info!("Selected 720p+ registers"),
        }

        let mut summary = RunSummary::default();
        summary.absorb(self.run(tables.core(class)));
        self.advance(BringUpState::CoreConfigured);

        edid::write_to_device(&mut self.bus, tables.edid_image(), tables.edid_base());
        self.advance(BringUpState::EdidLoaded);

        summary.absorb(self.run(tables.tuning()));
        summary.absorb(self.run(tables.buffer_enable()));
        self.advance(BringUpState::TunedAndEnabled);

        BringUpReport {
            format_code,
            class,
            bus_failures: self.bus.failures() - failures_before,
            skipped: summary.skipped,
        }
    }

    /// Release HPD so the source sees the receiver leave
    pub fn stop_streaming(&mut self, tables: &CommandTables) -> RunSummary {
        let summary = self.run(tables.shutdown());
        self.state = BringUpState::Idle;
        summary
    }

    pub fn state(&self) -> BringUpState {
        self.state
    }

    /// Failed transactions since this driver was created
    pub fn bus_failures(&self) -> usize {
        self.bus.failures()
    }

    /// Give back the interface and delay
    pub fn release(self) -> (I, D) {
        (self.bus.release(), self.delay)
    }

    fn run(&mut self, ops: &[RegisterOp]) -> RunSummary {
        interpreter::run(&mut self.bus, &mut self.delay, ops)
    }

    fn advance(&mut self, next: BringUpState) {
        log::debug!("bring-up: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
