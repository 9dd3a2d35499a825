use camino::Utf8PathBuf;
use clap::Parser;
use ohno::{IntoAppError, bail};
use smart_progress::{NumberFormat, Result};
use smart_progress::config::Config;

const SAMPLE_VALUE: f64 = 0.123_456_789;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file [default: one of smart-progress.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

pub fn validate_config(args: &ValidateArgs) -> Result<()> {
    let base_dir = Utf8PathBuf::from(".");
    let config_path = args.config.as_ref();

    match Config::load(&base_dir, config_path) {
        Ok((config, warnings)) => {
            println!("Configuration validation successful");
            if let Some(path) = config_path {
                println!("Config file: {path}");
            } else {
                println!("Using default search locations");
            }
            println!("Significant digits: {}", config.max_significant_digits);
            println!("Nested key separator: {}", config.nested_key_separator);
            println!("Refresh rate: {} Hz", config.refresh_hz);

            let sample = config
                .number_format()
                .format_float(SAMPLE_VALUE)
                .into_app_err("formatting the sample value")?;
            println!("Sample: {SAMPLE_VALUE} is shown as {sample}");

            // Print warnings if any
            if !warnings.is_empty() {
                eprintln!("\n⚠️  Configuration validation warnings:");
                for warning in &warnings {
                    eprintln!("   {warning}");
                }
                eprintln!();
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Configuration validation failed: {e}");
            bail!("invalid configuration")
        }
    }
}
