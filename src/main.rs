//! Compact metric formatting for training progress bars.
//!
//! # Overview
//!
//! `smart-progress` renders the metrics of a training run in a short, readable form: floats
//! keep up to six significant digits with trailing zeros removed and switch to exponential
//! notation for very large or very small magnitudes, integers are shown in full.
//!
//! | Raw value     | Displayed  |
//! |---------------|------------|
//! | `1.0`         | `1`        |
//! | `0.123456789` | `0.123457` |
//! | `1.2e-9`      | `1.2e-09`  |
//! | `1200000.0`   | `1.2e+06`  |
//! | `42`          | `42`       |
//!
//! The tool reads metric snapshots as JSON lines, one object per refresh tick, from a file or
//! from stdin. Nested objects are kept and formatted recursively.
//!
//! # Usage
//!
//! **Format snapshots as JSON lines:**
//! ```bash
//! echo '{"loss": 0.333333333, "acc": {"top1": 1.0}}' | smart-progress format
//! # {"loss":"0.333333","acc":{"top1":"1"}}
//! ```
//!
//! **Play back snapshots through a progress bar:**
//! ```bash
//! smart-progress show metrics.jsonl --total 100 --delay-ms 50
//! #     Training [=========>               ] 40/100 loss=0.25 acc/top1=0.91
//! ```
//!
//! **Fewer digits:**
//! ```bash
//! smart-progress format --digits 3 metrics.jsonl
//! ```
//!
//! A line that is not a JSON object is treated like a failing metrics source: that tick shows
//! no metrics and processing continues.
//!
//! # Configuration
//!
//! **Generate a commented default configuration:**
//! ```bash
//! smart-progress init smart-progress.yml
//! ```
//!
//! **Default search locations:**
//! - `smart-progress.toml`
//! - `smart-progress.yml`
//! - `smart-progress.yaml`
//! - `smart-progress.json`
//!
//! ```toml
//! max_significant_digits = 6   # 1 to 256
//! nested_key_separator = "/"   # joins nested names in the progress bar
//! refresh_hz = 10              # maximum redraws per second
//! ```
//!
//! **Validate a configuration file:**
//! ```bash
//! smart-progress validate --config smart-progress.toml
//! ```
//!
//! # Logging
//!
//! `--log-level debug` reports configuration discovery and values that could not be
//! formatted; `warn` reports failing snapshots. While logging is enabled the progress bar
//! stays hidden so it doesn't interleave with log output.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use smart_progress::Result;

mod commands;

use crate::commands::{
    FormatArgs, InitArgs, ShowArgs, ValidateArgs, format_snapshots, init_config, show_snapshots, validate_config,
};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "smart-progress", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Format metric snapshots and write them as JSON lines
    Format(FormatArgs),
    /// Render metric snapshots through a live progress bar
    Show(ShowArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

fn main() -> Result<()> {
    match &Cli::parse().command {
        Command::Format(format_args) => format_snapshots(format_args),
        Command::Show(show_args) => show_snapshots(show_args),
        Command::Init(init_args) => init_config(init_args),
        Command::Validate(validate_args) => validate_config(validate_args),
    }
}
