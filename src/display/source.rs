use crate::metrics::MetricsMap;

/// Boxed error produced by a host's metrics collection hook.
pub type BoxedError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Collects the current metrics of a running training loop.
///
/// This is the host side of the adapter: an implementation returns a fresh snapshot every
/// time it is called. Closures returning `Result<MetricsMap, SourceError>` implement it, so a
/// host can wire its own collection hook in without a dedicated type.
pub trait MetricsSource {
    fn collect(&self) -> Result<MetricsMap, SourceError>;
}

impl<F> MetricsSource for F
where
    F: Fn() -> Result<MetricsMap, SourceError>,
{
    fn collect(&self) -> Result<MetricsMap, SourceError> {
        self()
    }
}

/// The metrics source could not produce a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The host has no metrics to offer at this point, e.g. before the first step.
    #[error("metrics source is unavailable: {0}")]
    Unavailable(String),

    /// The host produced something that is not a metrics mapping.
    #[error("metrics snapshot is malformed: {0}")]
    Malformed(String),

    /// The host's collection hook failed.
    #[error("metrics source failed: {0}")]
    Failed(#[source] BoxedError),
}

impl SourceError {
    /// Wrap an arbitrary host error.
    pub fn failed(error: impl Into<BoxedError>) -> Self {
        Self::Failed(error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::error::Error;

    #[test]
    fn test_closure_is_a_source() {
        let source = || -> Result<MetricsMap, SourceError> { Ok([("loss", 0.5)].into_iter().collect()) };

        let metrics = source.collect().unwrap();

        assert_eq!(metrics.len(), 1);
    }

    #[test]
    fn test_failed_keeps_cause() {
        let io = std::io::Error::other("disk on fire");

        let error = SourceError::failed(io);

        assert_eq!(error.to_string(), "metrics source failed: disk on fire");
        assert!(error.source().is_some());
    }

    #[test]
    fn test_failed_from_message() {
        let error = SourceError::failed("trainer detached");
        assert_eq!(error.to_string(), "metrics source failed: trainer detached");
    }
}
