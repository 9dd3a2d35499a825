//! Value formatting for progress displays
//!
//! The formatter turns numeric metric leaves into short display strings:
//!
//! - floats use general numeric format (the `%g` conversion) with a configurable number of
//!   significant digits, trailing zeros stripped and exponential notation for very large or
//!   very small magnitudes;
//! - integers render as plain decimal strings;
//! - everything else is passed through untouched.
//!
//! Formatting is best-effort. The numeric rendering step reports a [`FormatError`], and
//! [`format_value`] answers such an error by returning the original value unchanged so a
//! progress display never aborts because of a single metric.
//!
//! The rendering policy lives behind the [`NumberFormat`] trait; [`GeneralFormat`] is the
//! implementation used by default.

mod general_format;
mod value_formatter;

pub use general_format::{DEFAULT_SIGNIFICANT_DIGITS, FormatError, GeneralFormat, MAX_PRECISION, NumberFormat};
pub use value_formatter::{format_metrics, format_value, format_value_with};
