//! Binding between a local job and one concrete instance of a remote build configuration.
//!
//! A [`ResourceBinding`] remembers where the resource lives (`namespace`, `name`), which
//! instance it was (`uid`) and what it looked like when bound (`resource_version`,
//! `context_dir`). The snapshot fields are never refreshed in place: callers re-check the
//! binding with [`ResourceBinding::resolve`] and replace it when they decide to resync.
mod error;
pub use error::BindingError;

use std::fmt;

use bcsync_model::{BuildConfig, Namespace, ResourceName, ResourceVersion, Uid};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::{metrics::ResolveOutcome, store::BuildConfigStore, store::StoreError};

/// Immutable association with a specific build configuration instance.
///
/// Deserializing a binding is the same trusted restore path as [`ResourceBinding::new`]:
/// no field is validated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceBinding {
    namespace: Namespace,
    name: ResourceName,
    uid: Uid,
    resource_version: ResourceVersion,
    context_dir: String,
}

/// Result of a single lookup before absent and diverged are collapsed.
#[derive(Debug)]
pub(crate) enum Lookup {
    Live(BuildConfig),
    NotFound,
    Diverged,
}

impl Lookup {
    pub(crate) fn outcome(&self) -> ResolveOutcome {
        match self {
            Lookup::Live(_) => ResolveOutcome::Live,
            Lookup::NotFound => ResolveOutcome::Absent,
            Lookup::Diverged => ResolveOutcome::Diverged,
        }
    }

    pub(crate) fn into_live(self) -> Option<BuildConfig> {
        match self {
            Lookup::Live(bc) => Some(bc),
            Lookup::NotFound | Lookup::Diverged => None,
        }
    }
}

impl ResourceBinding {
    /// Restore a binding from previously persisted fields.
    ///
    /// Values are accepted as given; they must come from a binding that was valid when created.
    pub fn new(
        namespace: impl Into<Namespace>,
        name: impl Into<ResourceName>,
        uid: impl Into<Uid>,
        resource_version: impl Into<ResourceVersion>,
        context_dir: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            uid: uid.into(),
            resource_version: resource_version.into(),
            context_dir: context_dir.into(),
        }
    }

    /// Project a binding out of a freshly observed build configuration.
    ///
    /// Requires `metadata.namespace`, `metadata.name`, `metadata.uid`,
    /// `metadata.resourceVersion` (all non-empty) and `spec.source.contextDir`.
    /// A missing piece means the object is malformed; the caller should report and skip it.
    pub fn from_build_config(bc: &BuildConfig) -> Result<Self, BindingError> {
        let meta = &bc.metadata;
        let namespace = non_empty(meta.namespace.as_deref(), "metadata.namespace")?;
        let name = non_empty(meta.name.as_deref(), "metadata.name")?;
        let uid = non_empty(meta.uid.as_deref(), "metadata.uid")?;
        let resource_version = non_empty(
            meta.resource_version.as_deref(),
            "metadata.resourceVersion",
        )?;

        let spec = bc
            .spec
            .as_ref()
            .ok_or(BindingError::MissingField("spec"))?;
        let source = spec
            .source
            .as_ref()
            .ok_or(BindingError::MissingField("spec.source"))?;
        let context_dir = source
            .context_dir
            .as_deref()
            .ok_or(BindingError::MissingField("spec.source.contextDir"))?;

        Ok(Self::new(namespace, name, uid, resource_version, context_dir))
    }

    /// Namespace of the bound resource.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Name of the bound resource.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity of the bound resource instance.
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Resource version observed at bind time.
    pub fn resource_version(&self) -> &str {
        &self.resource_version
    }

    /// Build context directory observed at bind time.
    pub fn context_dir(&self) -> &str {
        &self.context_dir
    }

    /// Lookup coordinate as `(namespace, name)`.
    pub fn coordinate(&self) -> (&str, &str) {
        (&self.namespace, &self.name)
    }

    /// Returns `true` if `bc` is the same resource instance this binding refers to.
    ///
    /// Only the uid is compared; an object without uid never matches.
    pub fn is_bound_to(&self, bc: &BuildConfig) -> bool {
        bc.uid() == Some(self.uid.as_str())
    }

    /// Fetch the live build configuration this binding refers to.
    ///
    /// Performs exactly one read against `store` and returns:
    /// - `Ok(None)` if nothing exists at the coordinate;
    /// - `Ok(None)` if the object at the coordinate has a different uid
    ///   (the bound instance was deleted and replaced);
    /// - `Ok(Some(bc))` with the current object otherwise, whose resource version and
    ///   spec may differ from this binding's snapshot.
    ///
    /// Store failures are returned unchanged. The result is never cached.
    pub async fn resolve<S>(&self, store: &S) -> Result<Option<BuildConfig>, StoreError>
    where
        S: BuildConfigStore + ?Sized,
    {
        self.lookup(store).await.map(Lookup::into_live)
    }

    #[instrument(level = "debug", skip(self, store), fields(namespace = %self.namespace, name = %self.name, store = store.name()))]
    pub(crate) async fn lookup<S>(&self, store: &S) -> Result<Lookup, StoreError>
    where
        S: BuildConfigStore + ?Sized,
    {
        let Some(live) = store.get(&self.namespace, &self.name).await? else {
            trace!("no build config at coordinate");
            return Ok(Lookup::NotFound);
        };

        if !self.is_bound_to(&live) {
            debug!(
                bound_uid = %self.uid,
                live_uid = live.uid().unwrap_or("<none>"),
                "build config was replaced under the same name"
            );
            return Ok(Lookup::Diverged);
        }

        trace!(
            bound_version = %self.resource_version,
            live_version = live.resource_version().unwrap_or("<none>"),
            "build config resolved"
        );
        Ok(Lookup::Live(live))
    }
}

impl TryFrom<&BuildConfig> for ResourceBinding {
    type Error = BindingError;
    fn try_from(bc: &BuildConfig) -> Result<Self, Self::Error> {
        Self::from_build_config(bc)
    }
}

impl fmt::Display for ResourceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.namespace, self.name, self.uid)
    }
}

fn non_empty<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, BindingError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(BindingError::MissingField(field)),
    }
}
