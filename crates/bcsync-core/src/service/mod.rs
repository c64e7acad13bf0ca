//! Binding service used by the sync engine.
//! - Holds the remote store, eligibility policy and metrics backend.
//! - Creates bindings for eligible jobs.
//! - Resolves bindings against the store and records outcomes.
use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use bcsync_model::{BuildConfig, JobType};
use tracing::{debug, instrument, warn};

use crate::{
    binding::{BindingError, ResourceBinding},
    eligibility::{JobEligibility, ParameterizedJobs},
    metrics::{MetricsHandle, noop_metrics},
    store::{BuildConfigStore, StoreError},
};

/// Entry point for creating and re-validating bindings.
///
/// All dependencies are injected; cloning is cheap and clones share the same store.
#[derive(Clone)]
pub struct BindingService {
    store: Arc<dyn BuildConfigStore>,
    eligibility: Arc<dyn JobEligibility>,
    metrics: MetricsHandle,
}

impl BindingService {
    /// Create a service over `store` with [`ParameterizedJobs`] eligibility and no-op metrics.
    pub fn new(store: Arc<dyn BuildConfigStore>) -> Self {
        Self {
            store,
            eligibility: Arc::new(ParameterizedJobs),
            metrics: noop_metrics(),
        }
    }

    /// Replace the eligibility policy and return updated service.
    pub fn with_eligibility(mut self, eligibility: Arc<dyn JobEligibility>) -> Self {
        self.eligibility = eligibility;
        self
    }

    /// Replace the metrics backend and return updated service.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &Arc<dyn BuildConfigStore> {
        &self.store
    }

    /// Returns `true` if jobs of this type may be bound.
    pub fn is_eligible(&self, job: JobType) -> bool {
        self.eligibility.is_eligible(job)
    }

    /// Bind a job of type `job` to an observed build configuration.
    ///
    /// Fails with [`BindingError::Ineligible`] before looking at `bc` when the job type
    /// cannot carry a binding, and with [`BindingError::MissingField`] when `bc` is malformed.
    pub fn bind(&self, job: JobType, bc: &BuildConfig) -> Result<ResourceBinding, BindingError> {
        if !self.is_eligible(job) {
            return Err(BindingError::Ineligible(job));
        }
        let binding = ResourceBinding::from_build_config(bc)?;
        debug!(job = %job, binding = %binding, "job bound to build config");
        Ok(binding)
    }

    /// Resolve `binding` against the store.
    ///
    /// Same contract as [`ResourceBinding::resolve`]; additionally records the outcome
    /// (live, absent, diverged) or the store error kind in metrics.
    #[instrument(level = "debug", skip(self, binding), fields(binding = %binding))]
    pub async fn resolve(
        &self,
        binding: &ResourceBinding,
    ) -> Result<Option<BuildConfig>, StoreError> {
        let store = self.store.name();
        let started = Instant::now();
        let result = binding.lookup(self.store.as_ref()).await;
        let elapsed_ms = millis(started.elapsed());

        match result {
            Ok(lookup) => {
                let outcome = lookup.outcome();
                self.metrics.record_resolve(store, outcome, elapsed_ms);
                debug!(outcome = outcome.as_label(), elapsed_ms, "binding resolved");
                Ok(lookup.into_live())
            }
            Err(e) => {
                self.metrics.record_store_error(store, e.kind());
                warn!(error = %e, "build config lookup failed");
                Err(e)
            }
        }
    }
}

/// Whole milliseconds of `d`, saturating at `u64::MAX`.
fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl fmt::Debug for BindingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingService")
            .field("store", &self.store.name())
            .field("eligibility", &"<policy>")
            .field("metrics", &"<handle>")
            .finish()
    }
}
