mod constants;
pub use constants::{BUILD_CONFIG_GROUP, BUILD_CONFIG_KIND, BUILD_CONFIG_PLURAL, BUILD_CONFIG_VERSION};

/// Logical partition of the remote cluster a resource lives in.
pub type Namespace = String;

/// Resource name, unique within its [`Namespace`].
pub type ResourceName = String;

/// Server-assigned identity token.
///
/// Stable for the whole life of one concrete resource instance and never reused,
/// even when a new resource is created under the same name.
pub type Uid = String;

/// Opaque per-resource version token bumped by the server on every write.
///
/// Only comparable between snapshots of the same resource.
pub type ResourceVersion = String;
