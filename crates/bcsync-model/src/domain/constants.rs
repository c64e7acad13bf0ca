//! Well-known coordinates of the `BuildConfig` resource type.
//!
//! Used by the `kube::Resource` implementation to build API paths
//! (`/apis/{group}/{version}/namespaces/{ns}/{plural}/{name}`).

/// API group serving build configurations.
pub const BUILD_CONFIG_GROUP: &str = "build.openshift.io";

/// API version of the build configuration resource.
pub const BUILD_CONFIG_VERSION: &str = "v1";

/// Resource kind as it appears in manifests.
pub const BUILD_CONFIG_KIND: &str = "BuildConfig";

/// Plural resource name used in URL paths.
pub const BUILD_CONFIG_PLURAL: &str = "buildconfigs";
