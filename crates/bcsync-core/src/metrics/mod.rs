//! Metrics collection abstraction for binding resolution.
//!
//! Metrics backends (prometheus, statsd, etc) implement [`MetricsBackend`] and are injected
//! into [`crate::BindingService`].
mod backend;
pub use backend::{MetricsBackend, MetricsHandle, ResolveOutcome};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
