//! Prometheus metrics backend for binding resolution.
//!
//! [`PrometheusMetrics`] implements [`bcsync_core::MetricsBackend`] and is injected into
//! [`bcsync_core::BindingService`]:
//!
//! ```rust
//! use std::sync::Arc;
//! use bcsync_core::{BindingService, MemoryStore};
//! use bcsync_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let service = BindingService::new(Arc::new(MemoryStore::new()))
//!     .with_metrics(Arc::new(metrics.clone()));
//!
//! // Serve `metrics.gather()` from your own `/metrics` endpoint.
//! # let _ = service;
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `bcsync_resolve_total{store, outcome}` - Counter
//! - `bcsync_resolve_duration_seconds{store}` - Histogram
//! - `bcsync_store_errors_total{store, error_kind}` - Counter
mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
