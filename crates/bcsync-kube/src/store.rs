use std::fmt;

use async_trait::async_trait;
use bcsync_core::{BuildConfigStore, StoreError};
use bcsync_model::BuildConfig;
use kube::{
    Api, Client, Config,
    config::{KubeConfigOptions, Kubeconfig},
};
use tracing::{debug, instrument, trace};

use crate::{KubeStoreConfig, KubeStoreError};

/// Build config store that reads from a Kubernetes-compatible API server.
///
/// Each [`BuildConfigStore::get`] issues one `GET
/// /apis/build.openshift.io/v1/namespaces/{ns}/buildconfigs/{name}`.
/// A `404` is reported as `Ok(None)`; every other failure as [`StoreError::Fetch`]
/// carrying the original `kube::Error`.
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    /// Wrap an already configured client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect using the ambient kube configuration.
    ///
    /// With `cfg.context` set, that context is loaded from the local kubeconfig;
    /// otherwise the configuration is inferred (in-cluster first, then kubeconfig).
    #[instrument(skip_all)]
    pub async fn connect(cfg: &KubeStoreConfig) -> Result<Self, KubeStoreError> {
        cfg.validate()?;

        let config = match &cfg.context {
            Some(context) => {
                debug!(context = %context, "loading kubeconfig context");
                Config::from_kubeconfig(&KubeConfigOptions {
                    context: Some(context.clone()),
                    ..Default::default()
                })
                .await?
            }
            None => {
                debug!("inferring kube config");
                Config::infer().await?
            }
        };
        Self::from_config(config, cfg)
    }

    /// Connect using an explicit kubeconfig.
    #[instrument(skip_all)]
    pub async fn from_kubeconfig(
        kubeconfig: Kubeconfig,
        cfg: &KubeStoreConfig,
    ) -> Result<Self, KubeStoreError> {
        cfg.validate()?;

        let config = Config::from_custom_kubeconfig(
            kubeconfig,
            &KubeConfigOptions {
                context: cfg.context.clone(),
                ..Default::default()
            },
        )
        .await?;
        Self::from_config(config, cfg)
    }

    fn from_config(mut config: Config, cfg: &KubeStoreConfig) -> Result<Self, KubeStoreError> {
        config.connect_timeout = Some(cfg.connect_timeout());
        config.read_timeout = Some(cfg.read_timeout());
        debug!(cluster_url = %config.cluster_url, "kube store configured");

        let client = Client::try_from(config)?;
        Ok(Self::new(client))
    }

    /// Get a reference to the underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl fmt::Debug for KubeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KubeStore")
            .field("client", &"<client>")
            .finish()
    }
}

#[async_trait]
impl BuildConfigStore for KubeStore {
    fn name(&self) -> &'static str {
        "kube"
    }

    async fn get(&self, namespace: &str, name: &str) -> Result<Option<BuildConfig>, StoreError> {
        let api: Api<BuildConfig> = Api::namespaced(self.client.clone(), namespace);
        let found = api
            .get_opt(name)
            .await
            .map_err(|e| StoreError::fetch(namespace, name, e))?;

        trace!(
            namespace,
            name,
            found = found.is_some(),
            "build config fetched"
        );
        Ok(found)
    }
}
