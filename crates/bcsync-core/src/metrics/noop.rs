use crate::metrics::backend::{MetricsBackend, ResolveOutcome};

/// No-op metrics backend that compiles to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    #[inline(always)]
    fn record_resolve(&self, _: &str, _: ResolveOutcome, _: u64) {}

    #[inline(always)]
    fn record_store_error(&self, _: &str, _: &str) {}
}
