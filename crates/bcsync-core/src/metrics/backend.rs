use std::sync::Arc;

/// Outcome of a successful lookup, for metrics classification.
///
/// `Absent` and `Diverged` both resolve to "no live resource" for callers;
/// they are only told apart here and in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Bound instance is still live.
    Live,
    /// Nothing exists at the coordinate.
    Absent,
    /// A different instance now occupies the coordinate.
    Diverged,
}

impl ResolveOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            ResolveOutcome::Live => "live",
            ResolveOutcome::Absent => "absent",
            ResolveOutcome::Diverged => "diverged",
        }
    }
}

/// Backend metrics collection interface.
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record a completed lookup.
    ///
    /// # Arguments
    /// - `store`: Store implementation name
    /// - `outcome`: What the lookup found
    /// - `duration_ms`: Time spent in the store read
    fn record_resolve(&self, store: &str, outcome: ResolveOutcome, duration_ms: u64);
    /// Record a store read that failed.
    ///
    /// # Arguments
    /// - `store`: Store implementation name
    /// - `error_kind`: Error category (see [`crate::StoreError::kind`])
    fn record_store_error(&self, store: &str, error_kind: &str);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;

#[cfg(test)]
mod tests {
    use super::ResolveOutcome;

    #[test]
    fn labels_are_stable() {
        assert_eq!(ResolveOutcome::Live.as_label(), "live");
        assert_eq!(ResolveOutcome::Absent.as_label(), "absent");
        assert_eq!(ResolveOutcome::Diverged.as_label(), "diverged");
    }
}
