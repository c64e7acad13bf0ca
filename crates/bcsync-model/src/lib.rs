mod domain;
pub use domain::{BUILD_CONFIG_GROUP, BUILD_CONFIG_KIND, BUILD_CONFIG_PLURAL, BUILD_CONFIG_VERSION};
pub use domain::{Namespace, ResourceName, ResourceVersion, Uid};

mod error;
pub use error::{ModelError, ModelResult};

mod kind;
pub use kind::JobType;

mod resource;
pub use resource::{BuildConfig, BuildConfigSpec, BuildSource, GitBuildSource};

pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
