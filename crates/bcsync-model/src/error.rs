use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown job type: {0}")]
    UnknownJobType(String),

    #[error("invalid model: {0}")]
    Invalid(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
