//! Supplying formatted metrics to a progress display
//!
//! A training loop exposes its current metrics through a [`MetricsSource`]. The
//! [`SmartMetrics`] adapter wraps such a source and implements [`DisplayMetrics`], the
//! capability a progress display calls once per refresh tick: it collects a fresh snapshot,
//! formats every numeric leaf and hands back a mapping of the same shape.
//!
//! Neither step is allowed to interrupt the display. A failing source yields an empty mapping
//! and a value that cannot be formatted is shown unformatted.
//!
//! [`MetricsProgressBar`] is an `indicatif` progress bar that drives a [`DisplayMetrics`] on
//! every tick and renders the result as its message.

mod adapter;
mod progress_bar;
mod source;

pub use adapter::{DisplayMetrics, SmartMetrics};
pub use progress_bar::{BarOptions, MetricsProgressBar, render_metrics};
pub use source::{MetricsSource, SourceError};
