use std::borrow::Cow;

use k8s_openapi::{NamespaceResourceScope, apimachinery::pkg::apis::meta::v1::ObjectMeta};
use kube::Resource;
use serde::{Deserialize, Serialize};

use crate::domain::{
    BUILD_CONFIG_GROUP, BUILD_CONFIG_KIND, BUILD_CONFIG_PLURAL, BUILD_CONFIG_VERSION,
};

/// Remote build configuration as served by the cluster API.
///
/// Only the parts needed for binding are modelled; unknown fields are ignored
/// on deserialization. `spec` is optional on the wire so that malformed objects
/// can be detected by the binding projection instead of failing to decode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    /// Standard object metadata (namespace, name, uid, resourceVersion, ...).
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Desired build behaviour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<BuildConfigSpec>,
}

/// Build configuration spec.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfigSpec {
    /// Where the build input comes from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<BuildSource>,
}

/// Build input source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSource {
    /// Sub-directory of the source repository used as the build context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_dir: Option<String>,

    /// Git repository the source is checked out from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<GitBuildSource>,
}

/// Git source coordinates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitBuildSource {
    /// Repository URI.
    pub uri: String,

    /// Branch, tag or commit to check out.
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
}

impl BuildConfig {
    /// Create a build configuration with the given coordinate and no spec.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta {
                namespace: Some(namespace.into()),
                name: Some(name.into()),
                ..ObjectMeta::default()
            },
            spec: None,
        }
    }

    /// Set the build context directory, creating intermediate spec structs as needed.
    pub fn with_context_dir(mut self, dir: impl Into<String>) -> Self {
        self.spec
            .get_or_insert_with(BuildConfigSpec::default)
            .source
            .get_or_insert_with(BuildSource::default)
            .context_dir = Some(dir.into());
        self
    }

    /// Server-assigned uid, if present.
    pub fn uid(&self) -> Option<&str> {
        self.metadata.uid.as_deref()
    }

    /// Current resource version, if present.
    pub fn resource_version(&self) -> Option<&str> {
        self.metadata.resource_version.as_deref()
    }

    /// Build context directory from `spec.source.contextDir`, if present.
    pub fn context_dir(&self) -> Option<&str> {
        self.spec
            .as_ref()
            .and_then(|s| s.source.as_ref())
            .and_then(|s| s.context_dir.as_deref())
    }
}

impl Resource for BuildConfig {
    type DynamicType = ();
    type Scope = NamespaceResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(BUILD_CONFIG_KIND)
    }

    fn group(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(BUILD_CONFIG_GROUP)
    }

    fn version(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(BUILD_CONFIG_VERSION)
    }

    fn plural(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(BUILD_CONFIG_PLURAL)
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "apiVersion": "build.openshift.io/v1",
        "kind": "BuildConfig",
        "metadata": {
            "namespace": "ci",
            "name": "app",
            "uid": "0d7a4f3c-1111-4a55-9c1e-3b7c9a0f0001",
            "resourceVersion": "100",
            "labels": {"app": "app"}
        },
        "spec": {
            "runPolicy": "Serial",
            "source": {
                "type": "Git",
                "contextDir": "services/app",
                "git": {"uri": "https://example.com/app.git", "ref": "main"}
            },
            "strategy": {"type": "JenkinsPipeline"}
        }
    }"#;

    #[test]
    fn decodes_server_object_and_ignores_unknown_fields() {
        let bc: BuildConfig = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(bc.metadata.namespace.as_deref(), Some("ci"));
        assert_eq!(bc.metadata.name.as_deref(), Some("app"));
        assert_eq!(bc.uid(), Some("0d7a4f3c-1111-4a55-9c1e-3b7c9a0f0001"));
        assert_eq!(bc.resource_version(), Some("100"));
        assert_eq!(bc.context_dir(), Some("services/app"));

        let git = bc.spec.unwrap().source.unwrap().git.unwrap();
        assert_eq!(git.uri, "https://example.com/app.git");
        assert_eq!(git.git_ref.as_deref(), Some("main"));
    }

    #[test]
    fn decodes_object_without_spec() {
        let json = r#"{"metadata": {"namespace": "ci", "name": "app"}}"#;
        let bc: BuildConfig = serde_json::from_str(json).unwrap();

        assert!(bc.spec.is_none());
        assert_eq!(bc.context_dir(), None);
        assert_eq!(bc.uid(), None);
    }

    #[test]
    fn with_context_dir_fills_nested_spec() {
        let bc = BuildConfig::new("ci", "app").with_context_dir("web");
        assert_eq!(bc.context_dir(), Some("web"));

        let json = serde_json::to_value(&bc).unwrap();
        assert_eq!(json["spec"]["source"]["contextDir"], "web");
    }

    #[test]
    fn resource_coordinates_point_at_buildconfigs() {
        assert_eq!(BuildConfig::api_version(&()), "build.openshift.io/v1");
        assert_eq!(BuildConfig::plural(&()), "buildconfigs");
        assert_eq!(
            BuildConfig::url_path(&(), Some("ci")),
            "/apis/build.openshift.io/v1/namespaces/ci/buildconfigs"
        );
    }
}
