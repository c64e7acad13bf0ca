//! Remote store abstraction used by bindings to look up live build configurations.
//!
//! The only capability a binding needs from the cluster is "fetch by namespace and name".
//! Concrete stores (kube client, in-memory fake) implement [`BuildConfigStore`] and are
//! passed in explicitly wherever a lookup happens.
mod error;
pub use error::{BoxError, StoreError};

mod memory;
pub use memory::MemoryStore;

use async_trait::async_trait;
use bcsync_model::BuildConfig;

/// Read-only access to build configurations in the remote cluster.
///
/// Implementations must:
/// - return `Ok(None)` when nothing exists at the coordinate (not an error);
/// - surface transport and server failures as [`StoreError`] without retrying.
///
/// Timeouts and cancellation are the implementation's concern and should be configured
/// by whoever constructs the store.
#[async_trait]
pub trait BuildConfigStore: Send + Sync {
    /// Store name used in logs and metrics labels.
    fn name(&self) -> &'static str;

    /// Fetch the build configuration at `namespace/name`.
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<BuildConfig>, StoreError>;
}
