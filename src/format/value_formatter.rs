use crate::format::{GeneralFormat, NumberFormat};
use crate::metrics::{MetricValue, MetricsMap};

const LOG_TARGET: &str = "    format";

/// Format a single metric value for display using general numeric format.
///
/// Floats keep at most `max_significant_digits` significant digits, integers render as plain
/// decimal strings and every other value, nested maps included, is returned unchanged. If the
/// numeric rendering fails, the original value is returned.
///
/// ```
/// use smart_progress::{MetricValue, format_value};
///
/// assert_eq!(format_value(MetricValue::Float(1.0), 6), MetricValue::Text("1".into()));
/// assert_eq!(format_value(MetricValue::Int(42), 6), MetricValue::Text("42".into()));
/// assert_eq!(format_value(MetricValue::None, 6), MetricValue::None);
/// ```
#[must_use]
pub fn format_value(value: MetricValue, max_significant_digits: usize) -> MetricValue {
    format_value_with(value, &GeneralFormat::new(max_significant_digits))
}

/// Format a single metric value with an arbitrary [`NumberFormat`].
#[must_use]
pub fn format_value_with<F: NumberFormat + ?Sized>(value: MetricValue, format: &F) -> MetricValue {
    let rendered = match &value {
        MetricValue::Float(v) => format.format_float(*v),
        MetricValue::Int(v) => format.format_int(*v),
        MetricValue::UInt(v) => format.format_uint(*v),
        _ => return value,
    };

    match rendered {
        Ok(text) => MetricValue::Text(text),
        Err(e) => {
            log::debug!(target: LOG_TARGET, "Unable to format {value:?}, displaying it unformatted: {e}");
            value
        }
    }
}

/// Format every numeric leaf of a metrics mapping, recursing into nested mappings.
///
/// Names, their order and the nesting shape are preserved. Lists and other non-numeric values
/// are left as they are.
#[must_use]
pub fn format_metrics<F: NumberFormat + ?Sized>(metrics: MetricsMap, format: &F) -> MetricsMap {
    metrics.map_values(|value| match value {
        MetricValue::Map(nested) => MetricValue::Map(format_metrics(nested, format)),
        other => format_value_with(other, format),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatError;

    /// Fails on every float, to exercise the fallback path.
    struct BrokenFloats;

    impl NumberFormat for BrokenFloats {
        fn format_float(&self, value: f64) -> Result<String, FormatError> {
            Err(FormatError::MalformedScientific(format!("{value}")))
        }
    }

    fn text(s: &str) -> MetricValue {
        MetricValue::Text(s.to_string())
    }

    #[test]
    fn test_format_value_numbers() {
        assert_eq!(format_value(MetricValue::Float(1.0), 6), text("1"));
        assert_eq!(format_value(MetricValue::Float(0.123_456_789), 6), text("0.123457"));
        assert_eq!(format_value(MetricValue::Float(1_200_000.0), 6), text("1.2e+06"));
        assert_eq!(format_value(MetricValue::Float(1.2e-9), 6), text("1.2e-09"));
        assert_eq!(format_value(MetricValue::Int(42), 6), text("42"));
        assert_eq!(format_value(MetricValue::Int(-7), 6), text("-7"));
        assert_eq!(format_value(MetricValue::UInt(1_000_000), 2), text("1000000"));
    }

    #[test]
    fn test_format_value_passthrough() {
        let values = [
            text("0.123456789"),
            MetricValue::None,
            MetricValue::Bool(true),
            MetricValue::List(vec![MetricValue::Float(0.5)]),
            MetricValue::Map([("loss", 0.5)].into_iter().collect()),
        ];

        for value in values {
            assert_eq!(format_value(value.clone(), 6), value);
        }
    }

    #[test]
    fn test_format_failure_returns_original() {
        assert_eq!(format_value_with(MetricValue::Float(0.25), &BrokenFloats), MetricValue::Float(0.25));
        assert_eq!(format_value_with(MetricValue::Int(3), &BrokenFloats), text("3"));
    }

    #[test]
    fn test_unrenderable_precision_returns_original() {
        assert_eq!(format_value(MetricValue::Float(0.001), usize::MAX), MetricValue::Float(0.001));
        assert_eq!(format_value(MetricValue::Int(5), usize::MAX), text("5"));
    }

    #[test]
    fn test_format_metrics_nested() {
        let mut acc = MetricsMap::new();
        let _ = acc.insert("top1", 1.0);
        let mut metrics = MetricsMap::new();
        let _ = metrics.insert("loss", 0.333_333_333);
        let _ = metrics.insert("acc", acc);

        let formatted = format_metrics(metrics, &GeneralFormat::default());

        let mut expected_acc = MetricsMap::new();
        let _ = expected_acc.insert("top1", "1");
        let mut expected = MetricsMap::new();
        let _ = expected.insert("loss", "0.333333");
        let _ = expected.insert("acc", expected_acc);
        assert_eq!(formatted, expected);
    }

    #[test]
    fn test_format_metrics_partial_failure() {
        let metrics: MetricsMap = [
            ("loss", MetricValue::Float(0.5)),
            ("step", MetricValue::Int(10)),
            ("tag", text("warmup")),
        ]
        .into_iter()
        .collect();

        let formatted = format_metrics(metrics, &BrokenFloats);

        assert_eq!(formatted.get("loss"), Some(&MetricValue::Float(0.5)));
        assert_eq!(formatted.get("step"), Some(&text("10")));
        assert_eq!(formatted.get("tag"), Some(&text("warmup")));
    }
}
