mod cli;

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use linux_embedded_hal::i2cdev::linux::LinuxI2CError;
use linux_embedded_hal::{Delay, I2cdev};
use tc358743::{Builder, CommandTables, I2cInterface, Tc358743};

use cli::{Action, Args};

/// The I2C character device could not be opened
#[derive(Debug)]
struct DeviceOpenError {
    path: PathBuf,
    source: LinuxI2CError,
}

impl fmt::Display for DeviceOpenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot open {}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for DeviceOpenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

fn init_logging(args: &Args) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = args.log_level() {
        builder.filter_level(level);
    }
    builder.init();
}

fn open_device(path: &Path) -> Result<I2cdev, DeviceOpenError> {
    I2cdev::new(path).map_err(|source| DeviceOpenError {
        path: path.to_path_buf(),
        source,
    })
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    let i2c = match open_device(&args.device) {
        Ok(i2c) => i2c,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("opened {}", args.device.display());

    let config = Builder::new()
        .color_conversion(args.color.into())
        .edid_profile(args.lanes.into())
        .build();
    let tables = CommandTables::new(&config);
    let mut bridge = Tc358743::new(I2cInterface::new(i2c), Delay);

    let warnings = match args.action() {
        Action::Start => {
            log::info!("Starting HDMI capture");
            let report = bridge.start_streaming(&tables);
            log::info!(
                "Streaming with {:?} registers (format code {})",
                report.class,
                report.format_code
            );
            report.warnings()
        }
        Action::Stop => {
            log::info!("Stopping HDMI capture");
            bridge.stop_streaming(&tables).warnings()
        }
    };

    if warnings > 0 {
        log::warn!("{warnings} register operation(s) failed or were skipped");
    }
    ExitCode::SUCCESS
}
