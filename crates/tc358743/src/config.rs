//! Bring-up configuration types and builder

use crate::edid::EDID_BASE_REGISTER;

/// Color conversion performed between the HDMI input and the CSI-2 output
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorConversion {
    /// RGB in, RGB out
    #[default]
    RgbPassthrough,
    /// RGB in, YCbCr 4:2:2 out
    RgbToYuv422,
    /// RGB in, YCbCr 4:4:4 out
    RgbToYuv444,
    /// YCbCr 4:4:4 in, YCbCr 4:2:2 out
    Yuv444ToYuv422,
    /// YCbCr 4:2:2 in, YCbCr 4:4:4 out
    Yuv422ToYuv444,
}

impl ColorConversion {
    /// Resolve the register values this conversion needs
    pub const fn registers(self) -> ColorConfig {
        match self {
            ColorConversion::RgbPassthrough => ColorConfig {
                output_format: 0x00,
                color_mode: 0x00,
                color_space: 0x00,
                config_control: 0x0E24,
            },
            ColorConversion::RgbToYuv422 => ColorConfig {
                output_format: 0x08,
                color_mode: 0xC1,
                color_space: 0x60,
                config_control: 0x0EE4,
            },
            ColorConversion::RgbToYuv444 => ColorConfig {
                output_format: 0x08,
                color_mode: 0x01,
                color_space: 0x60,
                config_control: 0x0E24,
            },
            ColorConversion::Yuv444ToYuv422 => ColorConfig {
                output_format: 0x08,
                color_mode: 0x80,
                color_space: 0x00,
                config_control: 0x0EE4,
            },
            ColorConversion::Yuv422ToYuv444 => ColorConfig {
                output_format: 0x08,
                color_mode: 0x00,
                color_space: 0x00,
                config_control: 0x0E24,
            },
        }
    }
}

/// Register values derived from a [`ColorConversion`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorConfig {
    /// VOUT_SET2 (0x8574)
    pub output_format: u8,
    /// VOUT_CSC (0x8573), bit 7 selects YUV444 output
    pub color_mode: u8,
    /// VOUT_SET3 (0x8576), [7:5] select the output color space
    pub color_space: u8,
    /// CONF_CTL (0x0004): power isolation, 422 output, infoframe
    pub config_control: u16,
}

/// Built-in EDID to advertise to the HDMI source
///
/// The four-lane image advertises two extra VICs in its CEA block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdidProfile {
    #[default]
    TwoLane,
    FourLane,
}

/// Bring-up configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Color conversion on the output path
    pub color_conversion: ColorConversion,
    /// EDID image loaded into the chip's EDID RAM
    pub edid_profile: EdidProfile,
    /// First register of the EDID RAM
    pub edid_base: u16,
    /// How long HPD is held low after the EDID is loaded
    pub hpd_pulse_ms: u32,
}

impl Config {
    /// Register values for the configured color conversion
    pub fn color(&self) -> ColorConfig {
        self.color_conversion.registers()
    }
}

impl Default for Config {
    fn default() -> Self {
        Builder::new().build()
    }
}

/// Builder for constructing bring-up configuration
///
/// # Example
///
/// ```
/// use tc358743::{Builder, ColorConversion, EdidProfile};
///
/// let config = Builder::new()
///     .color_conversion(ColorConversion::RgbToYuv422)
///     .edid_profile(EdidProfile::FourLane)
///     .build();
///
/// assert_eq!(config.color().config_control, 0x0EE4);
/// ```
pub struct Builder {
    color_conversion: ColorConversion,
    edid_profile: EdidProfile,
    edid_base: u16,
    hpd_pulse_ms: u32,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            color_conversion: ColorConversion::RgbPassthrough,
            edid_profile: EdidProfile::TwoLane,
            edid_base: EDID_BASE_REGISTER,
            // HDMI requires HPD low for 100 ms when the EDID changes
            hpd_pulse_ms: 100,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output color conversion
    pub fn color_conversion(mut self, conversion: ColorConversion) -> Self {
        self.color_conversion = conversion;
        self
    }

    /// Set the built-in EDID profile
    pub fn edid_profile(mut self, profile: EdidProfile) -> Self {
        self.edid_profile = profile;
        self
    }

    /// Set the first EDID RAM register
    pub fn edid_base(mut self, register: u16) -> Self {
        self.edid_base = register;
        self
    }

    /// Set the HPD low pulse length in milliseconds
    pub fn hpd_pulse_ms(mut self, ms: u32) -> Self {
        self.hpd_pulse_ms = ms;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        Config {
            color_conversion: self.color_conversion,
            edid_profile: self.edid_profile,
            edid_base: self.edid_base,
            hpd_pulse_ms: self.hpd_pulse_ms,
        }
    }
}
