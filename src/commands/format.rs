use crate::commands::common::{Common, CommonArgs, LineSource};
use clap::Parser;
use ohno::IntoAppError;
use smart_progress::{DisplayMetrics, Result, SmartMetrics};
use std::io::{BufRead, Write, stdout};

#[derive(Parser, Debug)]
pub struct FormatArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Format each snapshot line and write it back out as a JSON line
pub fn format_snapshots(args: &FormatArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let adapter = SmartMetrics::with_format(LineSource::default(), common.config.number_format());

    let mut output = stdout().lock();
    for line in common.open_input()?.lines() {
        let line = line.into_app_err("reading metric snapshots")?;
        if line.trim().is_empty() {
            continue;
        }

        // A malformed line is reported by the adapter, which shows it as an empty snapshot
        let _ = adapter.source().set_line(&line);
        let metrics = adapter.display_metrics();
        let json = serde_json::to_string(&metrics).into_app_err("serializing formatted metrics")?;
        writeln!(output, "{json}")?;
    }

    Ok(())
}
