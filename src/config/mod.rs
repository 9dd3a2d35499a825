//! Configuration for the metrics display
//!
//! Configuration is read from `smart-progress.toml`, `.yml`, `.yaml` or `.json`, or from an
//! explicitly named file. Every field has a default, so an empty file or no file at all is a
//! valid configuration.

mod config;

pub use config::{CONFIG_FILE_STEM, Config, DEFAULT_CONFIG_YAML, MAX_SIGNIFICANT_DIGITS, MAX_USEFUL_SIGNIFICANT_DIGITS};
