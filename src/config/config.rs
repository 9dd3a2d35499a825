use crate::Result;
use crate::display::BarOptions;
use crate::format::{DEFAULT_SIGNIFICANT_DIGITS, GeneralFormat};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

const LOG_TARGET: &str = "    config";

/// The default configuration YAML content, embedded from `default_config.yml`
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../../default_config.yml");

/// File name, without extension, searched for when no configuration path is given
pub const CONFIG_FILE_STEM: &str = "smart-progress";

/// An f64 round-trips through 17 significant digits; more only shows representation noise
pub const MAX_USEFUL_SIGNIFICANT_DIGITS: usize = 17;

/// Upper bound accepted for `max_significant_digits`
pub const MAX_SIGNIFICANT_DIGITS: usize = 256;

const fn default_max_significant_digits() -> usize {
    DEFAULT_SIGNIFICANT_DIGITS
}

fn default_nested_key_separator() -> String {
    "/".to_string()
}

const fn default_refresh_hz() -> u8 {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum number of significant digits kept for floating-point metrics
    #[serde(default = "default_max_significant_digits")]
    pub max_significant_digits: usize,

    /// Joins the names of nested metrics in the progress bar message
    #[serde(default = "default_nested_key_separator")]
    pub nested_key_separator: String,

    /// Maximum number of progress bar redraws per second
    #[serde(default = "default_refresh_hz")]
    pub refresh_hz: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_significant_digits: default_max_significant_digits(),
            nested_key_separator: default_nested_key_separator(),
            refresh_hz: default_refresh_hz(),
        }
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, the first existing `smart-progress.[toml|yml|yaml|json]` in
    /// `base_dir` is used. Returns the configuration together with any validation warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds invalid values
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration from {path}"))?;
            (path.clone(), text)
        } else {
            let mut found = None;
            for extension in ["toml", "yml", "yaml", "json"] {
                let path = base_dir.join(format!("{CONFIG_FILE_STEM}.{extension}"));
                match fs::read_to_string(&path) {
                    Ok(text) => {
                        found = Some((path, text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration from {path}")),
                }
            }

            let Some(result) = found else {
                log::debug!(target: LOG_TARGET, "No configuration file found in '{base_dir}', using defaults");
                return Ok((Self::default(), Vec::new()));
            };
            result
        };

        log::debug!(target: LOG_TARGET, "Loading configuration from '{final_path}'");

        let extension = final_path.extension().unwrap_or_default();
        let config: Self = match extension {
            "toml" => toml::from_str(&text).into_app_err_with(|| format!("parsing TOML configuration from {final_path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML configuration from {final_path}"))?,
            "json" => serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON configuration from {final_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        let mut warnings = Vec::new();
        config.validate(&mut warnings)?;

        Ok((config, warnings))
    }

    /// Check value ranges, collecting non-fatal findings into `warnings`
    ///
    /// # Errors
    ///
    /// Returns an error for values the display cannot work with
    pub fn validate(&self, warnings: &mut Vec<String>) -> Result<()> {
        if self.max_significant_digits == 0 {
            bail!("max_significant_digits must be at least 1");
        }

        if self.max_significant_digits > MAX_SIGNIFICANT_DIGITS {
            bail!(
                "max_significant_digits is {}, but must be at most {MAX_SIGNIFICANT_DIGITS}",
                self.max_significant_digits
            );
        }

        if self.nested_key_separator.is_empty() {
            bail!("nested_key_separator must not be empty");
        }

        if self.refresh_hz == 0 {
            bail!("refresh_hz must be at least 1");
        }

        if self.max_significant_digits > MAX_USEFUL_SIGNIFICANT_DIGITS {
            warnings.push(format!(
                "max_significant_digits is {}, but a 64-bit float carries at most {MAX_USEFUL_SIGNIFICANT_DIGITS} significant digits",
                self.max_significant_digits
            ));
        }

        Ok(())
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => toml::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to TOML for saving to {output_path}"))?,
            "yml" | "yaml" => serde_yaml::to_string(self)
                .into_app_err_with(|| format!("serializing configuration to YAML for saving to {output_path}"))?,
            "json" => serde_json::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to JSON for saving to {output_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing configuration to {output_path}"))?;
        Ok(())
    }

    /// Save the default configuration, keeping its comments when writing YAML
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default_with_comments(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        if matches!(extension, "yml" | "yaml") {
            fs::write(output_path, DEFAULT_CONFIG_YAML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        } else {
            self.save(output_path)?;
        }

        Ok(())
    }

    /// The number format described by this configuration
    #[must_use]
    pub const fn number_format(&self) -> GeneralFormat {
        GeneralFormat::new(self.max_significant_digits)
    }

    /// Progress bar options described by this configuration
    #[must_use]
    pub fn bar_options(&self, use_colors: bool, hidden: bool) -> BarOptions {
        BarOptions {
            use_colors,
            refresh_hz: self.refresh_hz,
            hidden,
            nested_key_separator: self.nested_key_separator.clone(),
        }
    }
}
