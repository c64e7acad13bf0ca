use thiserror::Error;

/// Boxed error from a concrete store client.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure to read from the remote store.
///
/// Absence of a resource is never reported through this type.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to fetch {namespace}/{name}: {source}")]
    Fetch {
        namespace: String,
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Wrap a client error raised while fetching `namespace/name`.
    pub fn fetch(namespace: &str, name: &str, source: impl Into<BoxError>) -> Self {
        StoreError::Fetch {
            namespace: namespace.to_string(),
            name: name.to_string(),
            source: source.into(),
        }
    }

    /// Return error kind label for metrics.
    #[inline]
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Fetch { .. } => "fetch",
            StoreError::Unavailable(_) => "unavailable",
        }
    }
}
