use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Parser, ValueEnum};
use tc358743::{ColorConversion, EdidProfile};

pub const DEFAULT_DEVICE: &str = "/dev/i2c-0";

/// Start or stop HDMI capture on a TC358743 bridge
#[derive(Debug, Parser)]
#[command(name = "tc-vcam", version, about)]
#[command(group(ArgGroup::new("action").required(true).args(["start", "stop"])))]
pub struct Args {
    /// Bring the bridge up and start CSI-2 streaming
    #[arg(short = 's', long)]
    pub start: bool,

    /// Release HPD and stop the bridge
    #[arg(short = 'c', long)]
    pub stop: bool,

    /// I2C bus the bridge is attached to
    #[arg(short, long, default_value = DEFAULT_DEVICE)]
    pub device: PathBuf,

    /// Color conversion between HDMI input and CSI-2 output
    #[arg(long, value_enum, default_value_t = Color::RgbPassthrough)]
    pub color: Color,

    /// CSI-2 lane count advertised in the EDID
    #[arg(long, value_enum, default_value_t = Lanes::Two)]
    pub lanes: Lanes,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
}

impl Args {
    pub fn action(&self) -> Action {
        if self.start {
            Action::Start
        } else {
            Action::Stop
        }
    }

    pub fn log_level(&self) -> Option<log::LevelFilter> {
        match self.verbose {
            0 => None,
            1 => Some(log::LevelFilter::Debug),
            _ => Some(log::LevelFilter::Trace),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Color {
    RgbPassthrough,
    RgbToYuv422,
    RgbToYuv444,
    Yuv444ToYuv422,
    Yuv422ToYuv444,
}

impl From<Color> for ColorConversion {
    fn from(color: Color) -> Self {
        match color {
            Color::RgbPassthrough => ColorConversion::RgbPassthrough,
            Color::RgbToYuv422 => ColorConversion::RgbToYuv422,
            Color::RgbToYuv444 => ColorConversion::RgbToYuv444,
            Color::Yuv444ToYuv422 => ColorConversion::Yuv444ToYuv422,
            Color::Yuv422ToYuv444 => ColorConversion::Yuv422ToYuv444,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Lanes {
    Two,
    Four,
}

impl From<Lanes> for EdidProfile {
    fn from(lanes: Lanes) -> Self {
        match lanes {
            Lanes::Two => EdidProfile::TwoLane,
            Lanes::Four => EdidProfile::FourLane,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["tc-vcam", "-s"]).unwrap();
        assert_eq!(args.action(), Action::Start);
        assert_eq!(args.device, PathBuf::from(DEFAULT_DEVICE));
        assert_eq!(ColorConversion::from(args.color), ColorConversion::default());
        assert_eq!(EdidProfile::from(args.lanes), EdidProfile::TwoLane);
        assert_eq!(args.log_level(), None);
    }

    #[test]
    fn test_stop_with_options() {
        let args = Args::try_parse_from([
            "tc-vcam",
            "--stop",
            "-d",
            "/dev/i2c-10",
            "--color",
            "rgb-to-yuv422",
            "--lanes",
            "four",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.action(), Action::Stop);
        assert_eq!(args.device, PathBuf::from("/dev/i2c-10"));
        assert_eq!(ColorConversion::from(args.color), ColorConversion::RgbToYuv422);
        assert_eq!(EdidProfile::from(args.lanes), EdidProfile::FourLane);
        assert_eq!(args.log_level(), Some(log::LevelFilter::Trace));
    }

    #[test]
    fn test_an_action_is_required() {
        let err = Args::try_parse_from(["tc-vcam"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_start_and_stop_conflict() {
        let err = Args::try_parse_from(["tc-vcam", "-s", "-c"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }
}
