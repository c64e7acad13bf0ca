use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::KubeStoreError;

/// Default timeout for establishing a connection to the API server.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;

/// Default timeout for reading an API response.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 30_000;

/// Connection settings for [`crate::KubeStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KubeStoreConfig {
    /// Kubeconfig context to use. If `None`, the config is inferred
    /// (in-cluster service account, then `$KUBECONFIG` / `~/.kube/config`).
    pub context: Option<String>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds.
    pub read_timeout_ms: u64,
}

impl Default for KubeStoreConfig {
    fn default() -> Self {
        Self {
            context: None,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl KubeStoreConfig {
    /// Use the given kubeconfig context.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Connect timeout as [`Duration`].
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Read timeout as [`Duration`].
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), KubeStoreError> {
        if self.connect_timeout_ms == 0 {
            return Err(KubeStoreError::InvalidConfig(
                "connectTimeoutMs cannot be zero".into(),
            ));
        }
        if self.read_timeout_ms == 0 {
            return Err(KubeStoreError::InvalidConfig(
                "readTimeoutMs cannot be zero".into(),
            ));
        }
        if self.context.as_deref().is_some_and(str::is_empty) {
            return Err(KubeStoreError::InvalidConfig(
                "context cannot be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = KubeStoreConfig::default();

        assert_eq!(cfg.context, None);
        assert_eq!(cfg.connect_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.read_timeout(), Duration::from_secs(30));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn serde_uses_defaults_for_missing_fields() {
        let cfg: KubeStoreConfig = serde_json::from_str(r#"{"context": "prod"}"#).unwrap();

        assert_eq!(cfg.context.as_deref(), Some("prod"));
        assert_eq!(cfg.connect_timeout_ms, DEFAULT_CONNECT_TIMEOUT_MS);
        assert_eq!(cfg.read_timeout_ms, DEFAULT_READ_TIMEOUT_MS);
    }

    #[test]
    fn validate_rejects_zero_timeouts() {
        let cfg = KubeStoreConfig {
            read_timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(KubeStoreError::InvalidConfig(_))));

        let cfg = KubeStoreConfig {
            connect_timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(KubeStoreError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_empty_context() {
        let cfg = KubeStoreConfig::default().with_context("");
        assert!(cfg.validate().is_err());
    }
}
