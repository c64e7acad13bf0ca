use std::sync::Arc;

use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry, proto::MetricFamily};

use bcsync_core::{MetricsBackend, ResolveOutcome};

/// Prometheus implementation of [`MetricsBackend`].
///
/// ## Label cardinality
/// - `store`: "kube", "memory", ...
/// - `outcome`: "live", "absent", "diverged"
/// - `error_kind`: "fetch", "unavailable"
#[derive(Clone)]
pub struct PrometheusMetrics {
    resolves: CounterVec,
    resolve_duration: HistogramVec,
    store_errors: CounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Create the backend and register its collectors in `registry`.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let resolves = CounterVec::new(
            Opts::new("resolve_total", "Binding lookups by outcome").namespace("bcsync"),
            &["store", "outcome"],
        )?;
        registry.register(Box::new(resolves.clone()))?;

        let resolve_duration = HistogramVec::new(
            HistogramOpts::new(
                "resolve_duration_seconds",
                "Time spent reading the bound build config",
            )
            .namespace("bcsync")
            .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 5.0, 30.0]),
            &["store"],
        )?;
        registry.register(Box::new(resolve_duration.clone()))?;

        let store_errors = CounterVec::new(
            Opts::new("store_errors_total", "Failed build config reads").namespace("bcsync"),
            &["store", "error_kind"],
        )?;
        registry.register(Box::new(store_errors.clone()))?;

        Ok(Self {
            resolves,
            resolve_duration,
            store_errors,
            registry,
        })
    }

    /// Create the backend with a private registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    /// Gather all metrics for exposition.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Underlying registry, for registering additional collectors.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_resolve(&self, store: &str, outcome: ResolveOutcome, duration_ms: u64) {
        self.resolves
            .with_label_values(&[store, outcome.as_label()])
            .inc();
        self.resolve_duration
            .with_label_values(&[store])
            .observe(duration_ms as f64 / 1000.0);
    }

    fn record_store_error(&self, store: &str, error_kind: &str) {
        self.store_errors
            .with_label_values(&[store, error_kind])
            .inc();
    }
}
