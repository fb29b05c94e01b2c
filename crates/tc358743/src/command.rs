// TC358743 register addresses used by the command tables

// Global control
pub const SYS_CTL: u16 = 0x0002; // Reset and sleep control
pub const CONF_CTL: u16 = 0x0004; // Output path, audio and buffer enables
pub const FIFO_CTL: u16 = 0x0006; // Video FIFO level
pub const AUDIO_BUF_LEVEL: u16 = 0x0008; // Audio buffer level
pub const INT_STATUS: u16 = 0x0014; // Interrupt status (write 1 to clear)
pub const INT_MASK: u16 = 0x0016; // Interrupt mask

// PLL
pub const PLL_CTL0: u16 = 0x0020; // PRD[15:12], FBD[8:0]
pub const PLL_CTL1: u16 = 0x0022; // FRS, LBWS, clock enable, reset, PLL enable

// CSI-2 lane enables
pub const CLW_CNTRL: u16 = 0x0140; // Clock lane
pub const D0W_CNTRL: u16 = 0x0144; // Data lane 0
pub const D1W_CNTRL: u16 = 0x0148; // Data lane 1
pub const D2W_CNTRL: u16 = 0x014C; // Data lane 2
pub const D3W_CNTRL: u16 = 0x0150; // Data lane 3

// D-PHY timing
pub const STARTCNTRL: u16 = 0x0204; // Start PPI
pub const LINEINITCNT: u16 = 0x0210; // LP11 init time
pub const LPTXTIMECNT: u16 = 0x0214; // LP Tx count
pub const TCLK_HEADERCNT: u16 = 0x0218; // TxClk prepare/zero
pub const TCLK_TRAILCNT: u16 = 0x021C; // TClk trail
pub const THS_HEADERCNT: u16 = 0x0220; // HS prepare/zero
pub const TWAKEUP: u16 = 0x0224; // Wakeup counter
pub const TCLK_POSTCNT: u16 = 0x0228; // TxClk post count
pub const THS_TRAILCNT: u16 = 0x022C; // THS trail
pub const HSTXVREGEN: u16 = 0x0234; // Voltage regulator enables per lane

// CSI-2 transmitter
pub const CSI_CONFW: u16 = 0x0500; // CSI configuration write word
pub const CSI_START: u16 = 0x0518; // Start CSI-2 Tx

// HDMI receiver interrupts
pub const HDMI_INT0: u16 = 0x8502; // HPD/DDC power interrupt
pub const SYS_INTM: u16 = 0x8512; // System interrupt mask
pub const CLK_INTM: u16 = 0x8513; // Clock interrupt mask
pub const MISC_INTM: u16 = 0x8515; // Misc interrupt mask

// Status
pub const VI_STATUS: u16 = 0x8521; // Video input status, [3:0] = format code

// HDMI PHY and system clock
pub const PHY_CTL0: u16 = 0x8531; // RefClk and DDC5V auto detection
pub const PHY_CTL1: u16 = 0x8532; // PHY auto reset and range mode
pub const PHY_BIAS: u16 = 0x8536; // Ibias and BGR count
pub const PHY_CSQ: u16 = 0x853F; // TMDS clock squelch level
pub const SYS_FREQ: u16 = 0x8540; // System clock frequency count
pub const DDC_CTL: u16 = 0x8543; // DDC 5V detect delay
pub const HPD_CTL: u16 = 0x8544; // DDC5V detection interlock (HPD)
pub const ANA_CTL: u16 = 0x8545; // Audio PLL and DAC power
pub const AVM_CTL: u16 = 0x8546; // AVMUTE automatic clear
pub const INIT_END: u16 = 0x854A; // HDMI Rx initialisation completed

// EDID and HDCP
pub const EDID_MODE: u16 = 0x85C7; // EDID speed and mode
pub const EDID_LEN: u16 = 0x85CB; // EDID length [10:8]
pub const HDCP_MODE: u16 = 0x8560; // KSV auto clear mode
pub const HDCP_CMD: u16 = 0x85D1; // Key loading command
pub const EESS_ERR_CTL: u16 = 0x8563; // EESS error auto-unauth
pub const DI_ERR_CTL: u16 = 0x8564; // Data island error auto-unauth

// Video color conversion
pub const VOUT_CSC: u16 = 0x8573; // Output color mode
pub const VOUT_SET2: u16 = 0x8574; // Output format
pub const VOUT_SET3: u16 = 0x8576; // Output color space

// Audio
pub const FORCE_MUTE: u16 = 0x8600; // Forced mute
pub const AUTO_CMD0: u16 = 0x8602; // Auto mute conditions
pub const AUTO_CMD1: u16 = 0x8603; // Auto mute on AVMUTE
pub const AUTO_CMD2: u16 = 0x8604; // Auto play
pub const BUFINIT_START: u16 = 0x8606; // Buffer init start time
pub const FS_MUTE: u16 = 0x8607; // Sampling frequency mute
pub const SDO_MODE1: u16 = 0x8620; // LPCM/NLPCM extraction
pub const FS_SET: u16 = 0x8630; // Audio FS lock detect control
pub const NCO_F0_MOD: u16 = 0x8670; // System clock 27/42 MHz select
pub const LOCKDET_REF0: u16 = 0x8640; // CTS adjustment
pub const LOCKDET_REF1: u16 = 0x8641; // Adjustment levels 1 and 2
pub const LOCKDET_REF2: u16 = 0x8642; // Adjustment level 3
pub const SDO_MODE2: u16 = 0x8652; // Audio data output format
pub const DIV_MODE: u16 = 0x8665; // 128 Fs clock divider

// Info packets
pub const PK_INT_MODE: u16 = 0x8709; // Update packets even on error
pub const NO_PKT_LIMIT: u16 = 0x870B; // ACP/AVI packet intervals
pub const NO_PKT_CLR: u16 = 0x870C; // Packet storage auto clear
pub const ERR_PK_LIMIT: u16 = 0x870D; // Error count before interrupt
pub const NO_PKT_LIMIT2: u16 = 0x870E; // VS/SPD packet intervals
pub const NO_GDB_LIMIT: u16 = 0x9007; // Auto clear without GBD

// EDID RAM
pub const EDID_RAM: u16 = 0x8C00; // Internal EDID RAM, 256 bytes
