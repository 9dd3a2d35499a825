use crate::Result;
use crate::display::DisplayMetrics;
use crate::metrics::{MetricValue, MetricsMap};
use core::fmt::{Debug, Formatter};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use ohno::IntoAppError;

const DETERMINATE_TEMPLATE: &str = "{prefix:>12.bold.cyan} [{bar:25}] {pos}/{len} {msg}";
const DETERMINATE_TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{bar:25}] {pos}/{len} {msg}";
const INDETERMINATE_TEMPLATE: &str = "{prefix:>12.bold.cyan} {spinner} {pos} {msg}";
const INDETERMINATE_TEMPLATE_NO_COLOR: &str = "{prefix:>12} {spinner} {pos} {msg}";

/// How a [`MetricsProgressBar`] is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarOptions {
    /// Render the bar chrome with ANSI styling.
    pub use_colors: bool,

    /// Maximum redraws per second.
    pub refresh_hz: u8,

    /// Never draw, e.g. while log output owns the terminal.
    pub hidden: bool,

    /// Joins the names of nested metrics in the rendered message (`acc/top1`).
    pub nested_key_separator: String,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            use_colors: true,
            refresh_hz: 10,
            hidden: false,
            nested_key_separator: "/".to_string(),
        }
    }
}

/// A console progress bar whose message shows the current display metrics.
///
/// Every [`tick`](Self::tick) asks the wrapped [`DisplayMetrics`] for a fresh snapshot, so the
/// rendered metrics are exactly what the adapter produced for that tick.
pub struct MetricsProgressBar<D> {
    bar: ProgressBar,
    metrics: D,
    separator: String,
}

impl<D: DisplayMetrics> MetricsProgressBar<D> {
    /// Create a progress bar over `total` steps, or a spinner when `total` is zero.
    pub fn new(total: u64, metrics: D, options: &BarOptions) -> Result<Self> {
        let (bar, style) = if total > 0 {
            let template = if options.use_colors { DETERMINATE_TEMPLATE } else { DETERMINATE_TEMPLATE_NO_COLOR };
            let style = ProgressStyle::default_bar()
                .template(template)
                .into_app_err("could not create progress bar style")?
                .progress_chars("=> ");
            (ProgressBar::new(total), style)
        } else {
            let template = if options.use_colors { INDETERMINATE_TEMPLATE } else { INDETERMINATE_TEMPLATE_NO_COLOR };
            let style = ProgressStyle::default_spinner()
                .template(template)
                .into_app_err("could not create spinner style")?;
            (ProgressBar::new_spinner(), style)
        };

        bar.set_style(style);
        bar.set_draw_target(if options.hidden {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stderr_with_hz(options.refresh_hz.max(1))
        });

        Ok(Self {
            bar,
            metrics,
            separator: options.nested_key_separator.clone(),
        })
    }

    /// Set the prefix label (e.g. "Training", "Validating").
    pub fn set_phase(&self, phase: &str) {
        self.bar.set_prefix(phase.to_string());
    }

    /// One refresh tick: move to `position` and show the metrics of this tick.
    pub fn tick(&self, position: u64) {
        let metrics = self.metrics.display_metrics();
        self.bar.set_position(position);
        self.bar.set_message(render_metrics(&metrics, &self.separator));
        if self.bar.length().is_none() {
            self.bar.tick();
        }
    }

    /// Print a message line without disrupting the progress bar.
    pub fn println(&self, msg: &str) {
        self.bar.suspend(|| eprintln!("{msg}"));
    }

    /// Finish and clear the progress bar.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// The message rendered on the last tick.
    #[must_use]
    pub fn message(&self) -> String {
        self.bar.message()
    }

    #[must_use]
    pub const fn metrics(&self) -> &D {
        &self.metrics
    }
}

impl<D> Debug for MetricsProgressBar<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MetricsProgressBar")
            .field("bar", &self.bar)
            .field("metrics", &"<metrics>")
            .field("separator", &self.separator)
            .finish()
    }
}

/// Render metrics as `name=value` pairs separated by spaces, in mapping order.
///
/// Nested mappings are flattened, their names joined with `separator`.
///
/// ```
/// use smart_progress::MetricsMap;
/// use smart_progress::display::render_metrics;
///
/// let mut acc = MetricsMap::new();
/// let _ = acc.insert("top1", "1");
/// let mut metrics = MetricsMap::new();
/// let _ = metrics.insert("loss", "0.333333");
/// let _ = metrics.insert("acc", acc);
///
/// assert_eq!(render_metrics(&metrics, "/"), "loss=0.333333 acc/top1=1");
/// ```
#[must_use]
pub fn render_metrics(metrics: &MetricsMap, separator: &str) -> String {
    let mut rendered = String::new();
    push_metrics(&mut rendered, None, metrics, separator);
    rendered
}

fn push_metrics(rendered: &mut String, prefix: Option<&str>, metrics: &MetricsMap, separator: &str) {
    for (name, value) in metrics.iter() {
        let key = prefix.map_or_else(|| name.to_string(), |prefix| format!("{prefix}{separator}{name}"));

        if let MetricValue::Map(nested) = value {
            push_metrics(rendered, Some(&key), nested, separator);
        } else {
            if !rendered.is_empty() {
                rendered.push(' ');
            }
            rendered.push_str(&format!("{key}={value}"));
        }
    }
}
