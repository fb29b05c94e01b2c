//! Command tables for starting and stopping the bridge
//!
//! Order within each list is part of the chip's bring-up contract. In
//! particular the HDMI receiver tuning list must follow the EDID upload, and
//! `INIT_END` must be its last entry.

use alloc::vec;
use alloc::vec::Vec;

use crate::command::*;
use crate::config::{ColorConfig, Config};
use crate::device::{ResolutionClass, ResolutionProfile};
use crate::edid;
use crate::op::RegisterOp;

/// Disable value for a CSI-2 lane control register
const LANE_DISABLE: u32 = 0x1;
/// Enable value for a CSI-2 lane control register
const LANE_ENABLE: u32 = 0x0;

/// CONF_CTL bits that enable the video and audio transmit buffers
const CONF_CTL_BUFFER_ENABLE: u16 = 0x0003;

/// Return the HPD line to manual control, then drive it low
///
/// Unlike the start sequence there is no hold time between the two writes,
/// and the power-island and sleep writes are not issued.
pub const SHUTDOWN: [RegisterOp; 2] = [
    RegisterOp::write8(HPD_CTL, 0x01), // Regain manual control
    RegisterOp::write8(HPD_CTL, 0x00), // Disable HPD
];

/// Every command list and the EDID image, built once from a [`Config`]
#[derive(Clone, Debug)]
pub struct CommandTables {
    sub_hd_core: Vec<RegisterOp>,
    hd_core: Vec<RegisterOp>,
    tuning: Vec<RegisterOp>,
    buffer_enable: Vec<RegisterOp>,
    edid_image: Vec<u8>,
    edid_base: u16,
}

impl CommandTables {
    pub fn new(config: &Config) -> Self {
        let color = config.color();
        Self {
            sub_hd_core: core_list(&ResolutionClass::SubHd.profile(), &color),
            hd_core: core_list(&ResolutionClass::HdOrAbove.profile(), &color),
            tuning: tuning_list(&color, config.hpd_pulse_ms),
            buffer_enable: vec![RegisterOp::write16(
                CONF_CTL,
                color.config_control | CONF_CTL_BUFFER_ENABLE,
            )],
            edid_image: edid::default_image(config.edid_profile),
            edid_base: config.edid_base,
        }
    }

    /// Reset, PLL, CSI-2 lanes, D-PHY timing and CSI start for `class`
    pub fn core(&self, class: ResolutionClass) -> &[RegisterOp] {
        match class {
            ResolutionClass::SubHd => &self.sub_hd_core,
            ResolutionClass::HdOrAbove => &self.hd_core,
        }
    }

    /// HDMI receiver setup that has to follow the EDID upload
    pub fn tuning(&self) -> &[RegisterOp] {
        &self.tuning
    }

    /// Final transmit buffer enable
    pub fn buffer_enable(&self) -> &[RegisterOp] {
        &self.buffer_enable
    }

    pub fn shutdown(&self) -> &[RegisterOp] {
        &SHUTDOWN
    }

    /// Encoded EDID written to the chip during bring-up
    pub fn edid_image(&self) -> &[u8] {
        &self.edid_image
    }

    pub fn edid_base(&self) -> u16 {
        self.edid_base
    }
}

fn core_list(profile: &ResolutionProfile, color: &ColorConfig) -> Vec<RegisterOp> {
    vec![
        RegisterOp::write16(CONF_CTL, 0x0000), // Disable video TX buffer
        RegisterOp::write16(SYS_CTL, 0x0F00),  // Assert reset, exit sleep
        RegisterOp::sleep_ms(1),               // PLL lock time
        RegisterOp::write16(SYS_CTL, 0x0000),  // Release reset
        RegisterOp::write16(FIFO_CTL, profile.fifo_level),
        RegisterOp::write16(AUDIO_BUF_LEVEL, 0x005F), // 96 bytes
        RegisterOp::write16(INT_STATUS, 0xFFFF),      // Clear HDMI Rx, CSI Tx and system status
        RegisterOp::write16(INT_MASK, 0x051F),        // HDMI Rx (bit 9) and system (bit 5) only
        RegisterOp::write16(PLL_CTL0, 0x8111),        // PRD[15:12], FBD[8:0]
        RegisterOp::write16(PLL_CTL1, 0x0213),        // LBWS = 2, clock enable, ResetB, PLL enable
        RegisterOp::write16(CONF_CTL, color.config_control),
        // CSI-2 lanes
        RegisterOp::write32(CLW_CNTRL, LANE_ENABLE),
        RegisterOp::write32(D0W_CNTRL, LANE_ENABLE),
        RegisterOp::write32(D1W_CNTRL, profile.data_lane1),
        RegisterOp::write32(D2W_CNTRL, LANE_DISABLE),
        RegisterOp::write32(D3W_CNTRL, LANE_DISABLE),
        // D-PHY timing
        RegisterOp::write32(LINEINITCNT, 0x0000_2988), // LP11 = 100 us
        RegisterOp::write32(LPTXTIMECNT, 0x0000_0005),
        RegisterOp::write32(TCLK_HEADERCNT, 0x0000_1D04),
        RegisterOp::write32(TCLK_TRAILCNT, 0x0000_0002),
        RegisterOp::write32(THS_HEADERCNT, 0x0000_0504),
        RegisterOp::write32(TWAKEUP, 0x0000_4600),
        RegisterOp::write32(TCLK_POSTCNT, 0x0000_000A),
        RegisterOp::write32(THS_TRAILCNT, 0x0000_0004),
        RegisterOp::write32(HSTXVREGEN, 0x0000_001F), // Regulators for 4 data lanes + clock
        RegisterOp::write32(STARTCNTRL, 0x0000_0001), // Start PPI
        RegisterOp::write32(CSI_START, 0x0000_0001),
        RegisterOp::write32(CSI_CONFW, profile.csi_config),
    ]
}

fn tuning_list(color: &ColorConfig, hpd_pulse_ms: u32) -> Vec<RegisterOp> {
    vec![
        // Interrupts
        RegisterOp::write8(HDMI_INT0, 0x01), // HPD DDC power interrupt
        RegisterOp::write8(SYS_INTM, 0xFE),  // Unmask DDC power
        RegisterOp::write8(CLK_INTM, !0x20), // Video format change (bit 5)
        RegisterOp::write8(MISC_INTM, !0x02), // Format change (bit 1)
        // 27 MHz reference clock
        RegisterOp::write8(PHY_CTL0, 0x01), // DDC5V auto detection
        RegisterOp::write16(SYS_FREQ, 0x0A8C),
        RegisterOp::write32(FS_SET, 0x0004_1EB0),
        RegisterOp::write8(NCO_F0_MOD, 0x01),
        // PHY
        RegisterOp::write8(PHY_CTL1, 0x80), // Auto reset 1600 us
        RegisterOp::write8(PHY_BIAS, 0x40),
        RegisterOp::write8(PHY_CSQ, 0x0A), // Squelch 50 uA
        RegisterOp::write8(DDC_CTL, 0x32), // 5V detect delay 100 ms
        RegisterOp::write8(HPD_CTL, 0x10), // DDC5V interlock enable
        RegisterOp::write8(ANA_CTL, 0x31), // Audio PLL normal, DAC/PLL on
        RegisterOp::write8(AVM_CTL, 0x2D), // AVMUTE auto clear after 4.5 s
        // Internal EDID RAM
        RegisterOp::write8(EDID_MODE, 0x01), // 100 kHz, internal RAM + DDC2B
        RegisterOp::write8(EDID_LEN, 0x01),  // 256 bytes
        // HPD low pulse so the source rereads the EDID
        RegisterOp::write8(HPD_CTL, 0x01),
        RegisterOp::write8(HPD_CTL, 0x00),
        RegisterOp::sleep_ms(hpd_pulse_ms),
        RegisterOp::write8(HPD_CTL, 0x10),
        // HDCP
        RegisterOp::write8(HDCP_CMD, 0x01),     // Key loading
        RegisterOp::write8(HDCP_MODE, 0x24),    // KSV auto clear
        RegisterOp::write8(EESS_ERR_CTL, 0x11), // EESS error auto-unauth
        RegisterOp::write8(DI_ERR_CTL, 0x0F),   // Data island error auto-unauth
        // Color conversion
        RegisterOp::write8(VOUT_SET2, color.output_format),
        RegisterOp::write8(VOUT_CSC, color.color_mode),
        RegisterOp::write8(VOUT_SET3, color.color_space),
        // Audio
        RegisterOp::write8(FORCE_MUTE, 0x00), // Auto mute on
        RegisterOp::write8(AUTO_CMD0, 0xF3),
        RegisterOp::write8(AUTO_CMD1, 0x02),
        RegisterOp::write8(AUTO_CMD2, 0x0C), // Mute, buffer init, play
        RegisterOp::write8(BUFINIT_START, 0x05), // 0.5 s
        RegisterOp::write8(FS_MUTE, 0x00),
        RegisterOp::write8(SDO_MODE1, 0x00),
        RegisterOp::write8(LOCKDET_REF0, 0x01), // CTS adjustment on
        RegisterOp::write8(LOCKDET_REF1, 0x65), // 1000 / 2000 ppm
        RegisterOp::write8(LOCKDET_REF2, 0x07), // 4000 ppm
        RegisterOp::write8(SDO_MODE2, 0x02),    // 16-bit I2S
        RegisterOp::write8(DIV_MODE, 0x10),
        // Info packets
        RegisterOp::write8(PK_INT_MODE, 0xFF),
        RegisterOp::write8(NO_PKT_LIMIT, 0x2C),
        RegisterOp::write8(NO_PKT_CLR, 0x53),
        RegisterOp::write8(ERR_PK_LIMIT, 0x01),
        RegisterOp::write8(NO_PKT_LIMIT2, 0x30),
        RegisterOp::write8(NO_GDB_LIMIT, 0x10),
        RegisterOp::write8(INIT_END, 0x01), // Must be last
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Builder, ColorConversion};
    use crate::op::Access;

    fn find(ops: &[RegisterOp], address: u16) -> Option<RegisterOp> {
        ops.iter()
            .copied()
            .find(|op| op.address == address && op.access != Access::Sleep)
    }

    #[test]
    fn test_core_lists_differ_only_in_profile_registers() {
        let tables = CommandTables::new(&Config::default());
        let sub = tables.core(ResolutionClass::SubHd);
        let hd = tables.core(ResolutionClass::HdOrAbove);

        assert_eq!(sub.len(), hd.len());
        let differing: Vec<u16> = sub
            .iter()
            .zip(hd)
            .filter(|(a, b)| a != b)
            .map(|(a, _)| a.address)
            .collect();
        assert_eq!(differing, [FIFO_CTL, D1W_CNTRL, CSI_CONFW]);
    }

    #[test]
    fn test_core_starts_with_reset_and_pll_sleep() {
        let tables = CommandTables::new(&Config::default());
        let core = tables.core(ResolutionClass::HdOrAbove);

        assert_eq!(core[0], RegisterOp::write16(CONF_CTL, 0x0000));
        assert_eq!(core[1], RegisterOp::write16(SYS_CTL, 0x0F00));
        assert_eq!(core[2], RegisterOp::sleep_ms(1));
        assert_eq!(core[3], RegisterOp::write16(SYS_CTL, 0x0000));
    }

    #[test]
    fn test_tuning_ends_with_init_end() {
        let tables = CommandTables::new(&Config::default());
        let last = tables.tuning().last().copied();
        assert_eq!(last, Some(RegisterOp::write8(INIT_END, 0x01)));
    }

    #[test]
    fn test_tuning_pulses_hpd_with_configured_hold() {
        let config = Builder::new().hpd_pulse_ms(250).build();
        let tables = CommandTables::new(&config);
        let tuning = tables.tuning();

        let sleep = tuning
            .iter()
            .position(|op| op.access == Access::Sleep)
            .unwrap();
        assert_eq!(tuning[sleep].value, 250);
        assert_eq!(tuning[sleep - 2], RegisterOp::write8(HPD_CTL, 0x01));
        assert_eq!(tuning[sleep - 1], RegisterOp::write8(HPD_CTL, 0x00));
        assert_eq!(tuning[sleep + 1], RegisterOp::write8(HPD_CTL, 0x10));
    }

    #[test]
    fn test_color_conversion_flows_into_tables() {
        let config = Builder::new()
            .color_conversion(ColorConversion::RgbToYuv422)
            .build();
        let tables = CommandTables::new(&config);

        let core = tables.core(ResolutionClass::SubHd);
        assert_eq!(find(&core[4..], CONF_CTL).map(|op| op.value), Some(0x0EE4));
        assert_eq!(find(tables.tuning(), VOUT_CSC).map(|op| op.value), Some(0xC1));
        assert_eq!(find(tables.tuning(), VOUT_SET3).map(|op| op.value), Some(0x60));
        assert_eq!(
            tables.buffer_enable(),
            &[RegisterOp::write16(CONF_CTL, 0x0EE7)]
        );
    }

    #[test]
    fn test_passthrough_buffer_enable() {
        let tables = CommandTables::new(&Config::default());
        assert_eq!(
            tables.buffer_enable(),
            &[RegisterOp::write16(CONF_CTL, 0x0E27)]
        );
    }

    #[test]
    fn test_shutdown_list() {
        let tables = CommandTables::new(&Config::default());
        assert_eq!(
            tables.shutdown(),
            &[
                RegisterOp::write8(0x8544, 0x01),
                RegisterOp::write8(0x8544, 0x00),
            ]
        );
    }

    #[test]
    fn test_edid_image_is_prepared() {
        let tables = CommandTables::new(&Config::default());
        assert_eq!(tables.edid_image().len(), edid::EDID_SIZE);
        assert_eq!(tables.edid_base(), 0x8C00);
    }
}
