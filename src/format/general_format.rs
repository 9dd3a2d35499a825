use core::num::ParseIntError;

/// Number of significant digits used when none is configured.
pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 6;

/// Largest number of fraction or mantissa digits a float can be rendered with.
pub const MAX_PRECISION: usize = 65_535;

/// Smallest decimal exponent rendered in fixed-point notation.
const MIN_FIXED_EXPONENT: i32 = -4;

/// A numeric value could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The scientific rendering of a float did not have the `<mantissa>e<exponent>` shape.
    #[error("unexpected scientific rendering '{0}'")]
    MalformedScientific(String),

    /// The exponent of a scientific rendering was not an integer.
    #[error("invalid exponent in scientific rendering")]
    InvalidExponent(#[from] ParseIntError),

    /// The requested number of digits is more than a float can be rendered with.
    #[error("precision of {0} digits exceeds the supported maximum of {max}", max = MAX_PRECISION)]
    PrecisionOutOfRange(usize),
}

/// A policy for rendering numeric metric values as display text.
pub trait NumberFormat {
    /// Render a floating-point value.
    fn format_float(&self, value: f64) -> Result<String, FormatError>;

    /// Render a signed integer. Defaults to its plain decimal representation.
    fn format_int(&self, value: i64) -> Result<String, FormatError> {
        Ok(value.to_string())
    }

    /// Render an unsigned integer. Defaults to its plain decimal representation.
    fn format_uint(&self, value: u64) -> Result<String, FormatError> {
        Ok(value.to_string())
    }
}

/// General numeric format with a maximum number of significant digits.
///
/// This is the `%g` conversion: a float is first rounded to `P` significant digits, and the
/// decimal exponent `X` of the rounded value picks the notation. When `-4 <= X < P` the value
/// is written in fixed-point notation, otherwise in exponential notation with a signed,
/// at-least-two-digit exponent. Trailing zeros of the fraction are removed in both cases.
///
/// ```
/// use smart_progress::{GeneralFormat, NumberFormat};
///
/// let format = GeneralFormat::default();
/// assert_eq!(format.format_float(1.0).unwrap(), "1");
/// assert_eq!(format.format_float(0.123456789).unwrap(), "0.123457");
/// assert_eq!(format.format_float(1.2e-9).unwrap(), "1.2e-09");
/// assert_eq!(format.format_float(1_200_000.0).unwrap(), "1.2e+06");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneralFormat {
    max_significant_digits: usize,
}

impl GeneralFormat {
    /// A precision of zero behaves like a precision of one.
    #[must_use]
    pub const fn new(max_significant_digits: usize) -> Self {
        Self { max_significant_digits }
    }

    #[must_use]
    pub const fn max_significant_digits(&self) -> usize {
        self.max_significant_digits
    }

    const fn precision(&self) -> usize {
        if self.max_significant_digits == 0 { 1 } else { self.max_significant_digits }
    }
}

impl Default for GeneralFormat {
    fn default() -> Self {
        Self::new(DEFAULT_SIGNIFICANT_DIGITS)
    }
}

impl NumberFormat for GeneralFormat {
    fn format_float(&self, value: f64) -> Result<String, FormatError> {
        if value.is_nan() {
            return Ok("nan".to_string());
        }

        if value.is_infinite() {
            return Ok(if value.is_sign_negative() { "-inf" } else { "inf" }.to_string());
        }

        let precision = self.precision();
        if precision > MAX_PRECISION {
            return Err(FormatError::PrecisionOutOfRange(precision));
        }

        // The exponent must come from the value after rounding, so 9.9999999 becomes 1e+01
        let scientific = format!("{value:.prec$e}", prec = precision - 1);
        let Some((mantissa, exponent)) = scientific.split_once('e') else {
            return Err(FormatError::MalformedScientific(scientific));
        };
        let exponent: i32 = exponent.parse()?;
        let shift = exponent.unsigned_abs() as usize;

        if exponent < MIN_FIXED_EXPONENT || (exponent >= 0 && shift >= precision) {
            let sign = if exponent < 0 { '-' } else { '+' };
            return Ok(format!("{}e{sign}{shift:02}", trim_fraction(mantissa)));
        }

        let decimals = if exponent < 0 { precision - 1 + shift } else { precision - 1 - shift };
        if decimals > MAX_PRECISION {
            return Err(FormatError::PrecisionOutOfRange(decimals));
        }
        let fixed = format!("{value:.decimals$}");
        Ok(trim_fraction(&fixed).to_string())
    }
}

/// Strip trailing zeros from the fractional part, and the decimal point if nothing remains.
fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
