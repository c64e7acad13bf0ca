//! [`bcsync_core::BuildConfigStore`] implementation backed by a Kubernetes API client.
//!
//! The store performs a single typed `GET` per lookup and applies no retries;
//! connect/read timeouts come from [`KubeStoreConfig`].
mod config;
pub use config::{DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_READ_TIMEOUT_MS, KubeStoreConfig};

mod error;
pub use error::KubeStoreError;

mod store;
pub use store::KubeStore;
