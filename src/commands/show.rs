use crate::commands::common::{Common, CommonArgs, LineSource};
use clap::Parser;
use core::time::Duration;
use ohno::IntoAppError;
use smart_progress::display::MetricsProgressBar;
use smart_progress::{Result, SmartMetrics};
use std::io::BufRead;
use std::thread;

const LOG_TARGET: &str = "      show";

#[derive(Parser, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Total number of steps, for a determinate bar [default: spinner]
    #[arg(long, value_name = "STEPS", default_value_t = 0)]
    pub total: u64,

    /// Label shown in front of the progress bar
    #[arg(long, default_value = "Training")]
    pub phase: String,

    /// Pause between snapshots, to play back a recorded run
    #[arg(long, value_name = "MS", default_value_t = 0)]
    pub delay_ms: u64,
}

/// Drive a progress bar with one refresh tick per snapshot line
pub fn show_snapshots(args: &ShowArgs) -> Result<()> {
    let common = Common::new(&args.common)?;

    // When logging is enabled, keep the bar hidden so it doesn't interleave with log output
    let options = common.config.bar_options(common.use_colors(), common.logging_enabled());
    let adapter = SmartMetrics::with_format(LineSource::default(), common.config.number_format());
    let bar = MetricsProgressBar::new(args.total, adapter, &options)?;
    bar.set_phase(&args.phase);

    let mut position = 0;
    for line in common.open_input()?.lines() {
        let line = line.into_app_err("reading metric snapshots")?;
        if line.trim().is_empty() {
            continue;
        }

        position += 1;
        if let Err(e) = bar.metrics().source().set_line(&line) {
            bar.println(&format!("⚠️  Step {position}: {e}"));
        }
        bar.tick(position);
        log::info!(target: LOG_TARGET, "Step {position}: {}", bar.message());

        if args.delay_ms > 0 {
            thread::sleep(Duration::from_millis(args.delay_ms));
        }
    }

    bar.finish();
    println!("{}: {position} step(s) {}", args.phase, bar.message());
    Ok(())
}
