use kube::config::{InferConfigError, KubeconfigError};
use thiserror::Error;

/// Errors that can occur while setting up a [`crate::KubeStore`].
///
/// Lookup failures are reported as [`bcsync_core::StoreError`] instead.
#[derive(Debug, Error)]
pub enum KubeStoreError {
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Kubeconfig(#[from] KubeconfigError),

    #[error(transparent)]
    Infer(#[from] InferConfigError),

    #[error(transparent)]
    Kube(#[from] kube::Error),
}
