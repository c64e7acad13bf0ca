use bcsync_model::JobType;
use thiserror::Error;

/// Failure to establish a binding.
///
/// Both variants mean the input cannot be bound as-is and retrying will not help.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindingError {
    /// Projection path absent (or empty) on the source build configuration.
    #[error("build config is missing required field: {0}")]
    MissingField(&'static str),

    /// Job type is not allowed to carry a binding.
    #[error("job type '{0}' cannot be bound to a build config")]
    Ineligible(JobType),
}
