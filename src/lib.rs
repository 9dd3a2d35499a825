//! smart-progress crate
//!
//! Compact formatting of training metrics for console progress bars. Numeric leaves of a
//! metrics mapping are rendered in general numeric format (`1.0` becomes `1`, `1.2e-9` becomes
//! `1.2e-09`) before they reach the progress display, and every failure along the way degrades
//! to a sensible fallback instead of interrupting the training loop.
//!
//! # Module Organization
//!
//! - [`metrics`]: Metric values and the ordered metrics mapping
//! - [`format`]: The value formatter
//! - [`display`]: The metrics adapter and an `indicatif` progress bar that drives it
//! - [`config`]: Configuration file loading and validation

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod config;
pub mod display;
pub mod format;
pub mod metrics;

pub use crate::display::{DisplayMetrics, MetricsSource, SmartMetrics, SourceError};
pub use crate::format::{DEFAULT_SIGNIFICANT_DIGITS, FormatError, GeneralFormat, NumberFormat, format_value};
pub use crate::metrics::{MetricValue, MetricsMap};
