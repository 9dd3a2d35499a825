use crate::display::{MetricsSource, SourceError};
use crate::format::{GeneralFormat, NumberFormat, format_metrics};
use crate::metrics::MetricsMap;
use core::fmt::{Debug, Formatter};

const LOG_TARGET: &str = "   display";

/// Supplies the metrics a progress display should render on the current tick.
pub trait DisplayMetrics {
    fn display_metrics(&self) -> MetricsMap;
}

/// Wraps a [`MetricsSource`] and formats its numeric metrics for display.
///
/// The number format, and with it the significant-digit count, is fixed at construction.
#[derive(Clone)]
pub struct SmartMetrics<S, F = GeneralFormat> {
    source: S,
    format: F,
}

impl<S> SmartMetrics<S> {
    /// Create an adapter using general numeric format with six significant digits.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_format(source, GeneralFormat::default())
    }

    /// Create an adapter using general numeric format with the given digit count.
    #[must_use]
    pub const fn with_significant_digits(source: S, max_significant_digits: usize) -> Self {
        Self::with_format(source, GeneralFormat::new(max_significant_digits))
    }

    #[must_use]
    pub const fn max_significant_digits(&self) -> usize {
        self.format.max_significant_digits()
    }
}

impl<S, F> SmartMetrics<S, F> {
    /// Create an adapter with a custom number format.
    #[must_use]
    pub const fn with_format(source: S, format: F) -> Self {
        Self { source, format }
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub const fn format(&self) -> &F {
        &self.format
    }
}

impl<S: MetricsSource, F: NumberFormat> SmartMetrics<S, F> {
    /// Collect and format a snapshot, reporting a source failure instead of hiding it.
    pub fn try_display_metrics(&self) -> Result<MetricsMap, SourceError> {
        let metrics = self.source.collect()?;
        Ok(format_metrics(metrics, &self.format))
    }
}

impl<S: MetricsSource, F: NumberFormat> DisplayMetrics for SmartMetrics<S, F> {
    fn display_metrics(&self) -> MetricsMap {
        self.try_display_metrics().unwrap_or_else(|e| {
            log::warn!(target: LOG_TARGET, "Unable to collect metrics, displaying none: {e}");
            MetricsMap::new()
        })
    }
}

impl<S, F: Debug> Debug for SmartMetrics<S, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SmartMetrics")
            .field("source", &"<source>")
            .field("format", &self.format)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatError;
    use crate::metrics::MetricValue;
    use core::cell::Cell;

    fn sample() -> MetricsMap {
        let mut acc = MetricsMap::new();
        let _ = acc.insert("top1", 1.0);
        let mut metrics = MetricsMap::new();
        let _ = metrics.insert("loss", 0.333_333_333);
        let _ = metrics.insert("acc", acc);
        metrics
    }

    fn text(s: &str) -> MetricValue {
        MetricValue::Text(s.to_string())
    }

    #[test]
    fn test_nested_metrics_are_formatted() {
        let adapter = SmartMetrics::new(|| -> Result<MetricsMap, SourceError> { Ok(sample()) });

        let metrics = adapter.display_metrics();

        assert_eq!(metrics.keys().collect::<Vec<_>>(), vec!["loss", "acc"]);
        assert_eq!(metrics.get("loss"), Some(&text("0.333333")));
        let acc = metrics.get("acc").and_then(MetricValue::as_map).unwrap();
        assert_eq!(acc.get("top1"), Some(&text("1")));
    }

    #[test]
    fn test_failing_source_yields_empty_mapping() {
        let adapter = SmartMetrics::new(|| -> Result<MetricsMap, SourceError> {
            Err(SourceError::Unavailable("no trainer attached".to_string()))
        });

        assert!(adapter.display_metrics().is_empty());
        assert!(matches!(adapter.try_display_metrics(), Err(SourceError::Unavailable(_))));
    }

    #[test]
    fn test_digit_count_is_fixed_at_construction() {
        let adapter = SmartMetrics::with_significant_digits(
            || -> Result<MetricsMap, SourceError> { Ok([("lr", 0.000_123_456)].into_iter().collect()) },
            3,
        );

        assert_eq!(adapter.max_significant_digits(), 3);
        assert_eq!(*adapter.format(), GeneralFormat::new(3));
        assert_eq!(adapter.display_metrics().get("lr"), Some(&text("0.000123")));
    }

    #[test]
    fn test_every_call_collects_a_fresh_snapshot() {
        let step = Cell::new(0_i64);
        let adapter = SmartMetrics::new(|| -> Result<MetricsMap, SourceError> {
            step.set(step.get() + 1);
            Ok([("step", step.get())].into_iter().collect())
        });

        assert_eq!(adapter.display_metrics().get("step"), Some(&text("1")));
        assert_eq!(adapter.display_metrics().get("step"), Some(&text("2")));
    }

    #[test]
    fn test_custom_format() {
        #[derive(Debug)]
        struct Percent;

        impl NumberFormat for Percent {
            fn format_float(&self, value: f64) -> Result<String, FormatError> {
                Ok(format!("{:.1}%", value * 100.0))
            }
        }

        let adapter = SmartMetrics::with_format(
            || -> Result<MetricsMap, SourceError> { Ok([("acc", 0.9123)].into_iter().collect()) },
            Percent,
        );

        assert_eq!(adapter.display_metrics().get("acc"), Some(&text("91.2%")));
    }
}
