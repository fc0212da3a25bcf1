//! Peg threshold calculator
//!
//! Prints the threshold of each peg, computed from an uncovered and a
//! covered capture, in a form that can be pasted into the device console.
//!
//! ## Usage
//!
//! ```bash
//! # First bench capture, comma separated
//! cargo run --bin peg_thresholds
//!
//! # Second bench capture, space separated
//! cargo run --bin peg_thresholds -- --preset capture-2
//!
//! # Fresh readings from the raw dump
//! cargo run --bin peg_thresholds -- --highs 833,712,700,677,674,569 --lows 40,34,33,34,37,32
//!
//! # Ready-to-paste console call
//! cargo run --bin peg_thresholds -- --format console
//! ```
//!
//! ## Capturing readings
//!
//! In the browser console, with the box connected through SimpleHID:
//!
//! ```js
//! async function poll(device) {
//!     console.log(await device.receive());
//!     setTimeout(() => poll(device), 0);
//! }
//! let device = await navigator.simpleHID.connect();
//! await poll(device);
//! // Uncover all pegs, dump raw values for a second
//! await device.send('toggle_raw'); setTimeout(() => device.send('toggle_raw'), 1000);
//! // Cover all pegs and run again
//! await device.send('toggle_raw'); setTimeout(() => device.send('toggle_raw'), 1000);
//! ```
//!
//! Then run this tool with the captured values and write the result back:
//!
//! ```js
//! await device.set_feature('peg_thresholds', [198,169,166,162,164,139]);
//! await device.get_feature('peg_thresholds');
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use peggy::adapters::{Preset, WriterOutput};
use peggy::app;
use peggy::config::{CalibrationConfig, Overrides, Settings};
use peggy::domain::OutputFormat;
use peggy::PeggyError;

#[derive(Parser, Debug)]
#[command(name = "peg_thresholds")]
#[command(about = "Compute peg detection thresholds from high/low captures")]
#[command(version)]
struct Cli {
    /// Hardcoded capture to use: capture-1, capture-2
    #[arg(short, long)]
    preset: Option<Preset>,

    /// Uncovered readings, comma separated
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, requires = "lows")]
    highs: Option<Vec<f64>>,

    /// Covered readings, comma separated
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, requires = "highs")]
    lows: Option<Vec<f64>>,

    /// TOML file with `highs` and `lows` arrays
    #[arg(short, long, conflicts_with_all = ["highs", "lows"])]
    readings: Option<PathBuf>,

    /// Configuration file (preset, separator, format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// String placed between values (default: the preset's)
    #[arg(short, long)]
    separator: Option<String>,

    /// Output format: decimal, hex, console
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            preset: self.preset,
            highs: self.highs.clone(),
            lows: self.lows.clone(),
            readings: self.readings.clone(),
            separator: self.separator.clone(),
            format: self.format,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries only the result line
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn execute(cli: &Cli) -> Result<(), PeggyError> {
    let config = cli
        .config
        .as_deref()
        .map(CalibrationConfig::load)
        .transpose()?;
    let settings = Settings::resolve(cli.overrides(), config)?;
    tracing::debug!(?settings, "resolved settings");

    let mut output = WriterOutput::stdout();
    app::run(&settings, &mut output)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = execute(&cli) {
        tracing::debug!(code = e.code(), "calibration failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
