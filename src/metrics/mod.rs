//! Metric values as handed to a progress display
//!
//! A metrics source produces a [`MetricsMap`] on every refresh tick: an insertion-ordered
//! mapping from metric name to [`MetricValue`]. Values are numeric leaves, nested mappings,
//! or arbitrary other values that the formatter passes through untouched.
//!
//! Both types serialize to and from JSON objects with serde, so snapshots can be read from
//! and written to JSON lines.

mod metric_value;
mod metrics_map;

pub use metric_value::MetricValue;
pub use metrics_map::MetricsMap;
