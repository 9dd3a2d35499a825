//! Common processing logic shared between the format and show commands.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use clap::ValueEnum;
use core::cell::RefCell;
use ohno::IntoAppError;
use smart_progress::Result;
use smart_progress::config::Config;
use smart_progress::{MetricsMap, MetricsSource, SourceError};
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, stderr};

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Common arguments shared between the format and show commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// File of JSON metric snapshots, one object per line [default: stdin]
    #[arg(value_name = "PATH")]
    pub input: Option<Utf8PathBuf>,

    /// Path to configuration file [default: one of smart-progress.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Maximum number of significant digits for floating-point metrics, overriding the configuration
    #[arg(long, short = 'd', value_name = "N")]
    pub digits: Option<usize>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

pub struct Common {
    pub config: Config,
    pub input: Option<Utf8PathBuf>,
    color: ColorMode,
    log_level: LogLevel,
}

impl Common {
    /// Initialize logging and load the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the digit override is invalid
    pub fn new(args: &CommonArgs) -> Result<Self> {
        Self::init_logging(args.log_level);

        let (mut config, mut warnings) = Config::load(Utf8Path::new("."), args.config.as_ref())?;

        if let Some(digits) = args.digits {
            config.max_significant_digits = digits;
            warnings.clear();
            config.validate(&mut warnings)?;
        }

        // Print warnings if any
        if !warnings.is_empty() {
            eprintln!("\n⚠️  Configuration validation warnings:");
            for warning in &warnings {
                eprintln!("   {warning}");
            }
            eprintln!();
        }

        Ok(Self {
            config,
            input: args.input.clone(),
            color: args.color,
            log_level: args.log_level,
        })
    }

    /// Initialize logger based on log level
    fn init_logging(log_level: LogLevel) {
        let level = match log_level {
            LogLevel::None => return,
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
            .init();
    }

    /// Whether the progress bar, drawn on stderr, should be styled
    pub fn use_colors(&self) -> bool {
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => stderr().is_terminal(),
        }
    }

    /// Log output and a live progress bar would fight over the terminal
    pub fn logging_enabled(&self) -> bool {
        self.log_level != LogLevel::None
    }

    /// Open the snapshot input, either the named file or stdin
    pub fn open_input(&self) -> Result<Box<dyn BufRead>> {
        match &self.input {
            Some(path) => {
                let file = File::open(path).into_app_err_with(|| format!("opening metric snapshots from {path}"))?;
                Ok(Box::new(BufReader::new(file)))
            }
            None => Ok(Box::new(io::stdin().lock())),
        }
    }
}

/// A metrics source that serves the snapshot parsed from the current input line.
///
/// The command loop stores each line before ticking the display, mirroring a training loop
/// whose metrics change between refresh ticks.
#[derive(Debug)]
pub struct LineSource {
    snapshot: RefCell<Result<MetricsMap, String>>,
}

impl Default for LineSource {
    fn default() -> Self {
        Self {
            snapshot: RefCell::new(Ok(MetricsMap::new())),
        }
    }
}

impl LineSource {
    /// Parse `line` as the snapshot for the next tick
    ///
    /// # Errors
    ///
    /// Returns the same error the next `collect` reports when the line is not a JSON object
    pub fn set_line(&self, line: &str) -> Result<(), SourceError> {
        let parsed: Result<MetricsMap, String> = serde_json::from_str(line).map_err(|e| e.to_string());
        let outcome = match &parsed {
            Ok(_) => Ok(()),
            Err(message) => Err(SourceError::Malformed(message.clone())),
        };

        *self.snapshot.borrow_mut() = parsed;
        outcome
    }
}

impl MetricsSource for LineSource {
    fn collect(&self) -> Result<MetricsMap, SourceError> {
        self.snapshot.borrow().clone().map_err(SourceError::Malformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_source_parses_current_line() {
        let source = LineSource::default();

        assert!(source.collect().unwrap().is_empty());

        source.set_line(r#"{"loss": 0.5}"#).unwrap();
        assert_eq!(source.collect().unwrap().len(), 1);

        source.set_line(r#"{"loss": 0.25, "acc": 0.9}"#).unwrap();
        assert_eq!(source.collect().unwrap().len(), 2);
    }

    #[test]
    fn test_line_source_rejects_non_objects() {
        let source = LineSource::default();

        assert!(matches!(source.set_line("[1, 2, 3]"), Err(SourceError::Malformed(_))));
        assert!(matches!(source.collect(), Err(SourceError::Malformed(_))));

        assert!(matches!(source.set_line("not json"), Err(SourceError::Malformed(_))));
        assert!(matches!(source.collect(), Err(SourceError::Malformed(_))));

        source.set_line(r#"{"loss": 0.5}"#).unwrap();
        assert!(source.collect().is_ok());
    }
}
