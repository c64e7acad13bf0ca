mod build_config;
pub use build_config::{BuildConfig, BuildConfigSpec, BuildSource, GitBuildSource};
